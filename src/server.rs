use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::DEFAULT_TOP_K;
use crate::models::{ChatRequest, ChatResponse};
use crate::rag::{RagEngine, RagError};

pub struct AppState {
    pub engine: RagEngine,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    if request.question.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "question must not be empty".to_string()));
    }

    let top_k = request.top_k.unwrap_or(DEFAULT_TOP_K);
    if top_k == 0 {
        return Err((StatusCode::BAD_REQUEST, "top_k must be at least 1".to_string()));
    }

    let (answer, sources) = state
        .engine
        .answer_question(&request.question, top_k)
        .await
        .map_err(|e| {
            tracing::error!("RAG pipeline error: {}", e);
            let status = match e {
                RagError::Completion(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, format!("{}", e))
        })?;

    Ok(Json(ChatResponse { answer, sources }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RetrievedItem;
    use crate::rag::{ChatModel, DocPoint, Embedder, VectorIndex, NO_MATCH_FALLBACK};
    use anyhow::Result;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct FixedEmbedder;

    impl Embedder for FixedEmbedder {
        fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.0; 4]).collect())
        }
    }

    struct CannedIndex {
        items: Vec<RetrievedItem>,
    }

    #[async_trait]
    impl VectorIndex for CannedIndex {
        async fn upsert(&self, _points: Vec<DocPoint>) -> Result<()> {
            Ok(())
        }

        async fn search(&self, _query: Vec<f32>, limit: u64) -> Result<Vec<RetrievedItem>> {
            Ok(self.items.iter().take(limit as usize).cloned().collect())
        }
    }

    struct CannedModel;

    #[async_trait]
    impl ChatModel for CannedModel {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Ok("Railay Beach day trip. Sources: [1]".to_string())
        }
    }

    fn test_router(items: Vec<RetrievedItem>) -> Router {
        let engine = RagEngine::new(
            Arc::new(FixedEmbedder),
            Arc::new(CannedIndex { items }),
            Arc::new(CannedModel),
            6000,
        );
        router(Arc::new(AppState { engine }))
    }

    fn krabi_item() -> RetrievedItem {
        RetrievedItem {
            score: 0.92,
            text: Some("Island-hopping tour to Railay Beach.".to_string()),
            url: Some("https://example.com/krabi-islands".to_string()),
            city: Some("Krabi".to_string()),
            tags: vec!["beach".to_string(), "islands".to_string()],
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_router(Vec::new());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_chat_returns_answer_and_sources() {
        let app = test_router(vec![krabi_item()]);
        let response = app
            .oneshot(chat_request(r#"{"question": "beaches near Krabi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["answer"], "Railay Beach day trip. Sources: [1]");
        assert_eq!(body["sources"][0]["city"], "Krabi");
    }

    #[tokio::test]
    async fn test_chat_empty_collection_returns_fallback() {
        let app = test_router(Vec::new());
        let response = app
            .oneshot(chat_request(r#"{"question": "anything at all"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["answer"], NO_MATCH_FALLBACK);
        assert_eq!(body["sources"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_question() {
        let app = test_router(vec![krabi_item()]);
        let response = app
            .oneshot(chat_request(r#"{"question": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_rejects_zero_top_k() {
        let app = test_router(vec![krabi_item()]);
        let response = app
            .oneshot(chat_request(r#"{"question": "beaches", "top_k": 0}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_question() {
        let app = test_router(vec![krabi_item()]);
        let response = app.oneshot(chat_request(r#"{"top_k": 3}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
