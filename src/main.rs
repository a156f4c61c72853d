use std::sync::Arc;

use anyhow::Result;

use thailand_brain::config::{Config, COLLECTION_NAME};
use thailand_brain::rag::embeddings::EmbeddingGenerator;
use thailand_brain::rag::llm::GroqClient;
use thailand_brain::rag::vector_store::VectorStore;
use thailand_brain::rag::RagEngine;
use thailand_brain::server::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("Connecting to Qdrant: {}", config.qdrant_url);

    // Collection provisioning belongs to the load-corpus utility; the
    // server only holds a client handle and must come up even when Qdrant
    // is unreachable.
    let embedder = EmbeddingGenerator::new()?;
    let store = VectorStore::new(
        &config.qdrant_url,
        config.qdrant_api_key.as_deref(),
        COLLECTION_NAME,
    )?;
    let llm = GroqClient::new(config.groq_api_key.clone())?;

    let engine = RagEngine::new(
        Arc::new(embedder),
        Arc::new(store),
        Arc::new(llm),
        config.max_context_chars,
    );
    let state = Arc::new(AppState { engine });

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Thailand Brain API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
