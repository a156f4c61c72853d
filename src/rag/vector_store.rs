use anyhow::Result;
use async_trait::async_trait;
use qdrant_client::qdrant::{
    value::Kind, CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use serde_json::{json, Map as JsonMap, Value as JsonValue};

use super::{DocPoint, VectorIndex};
use crate::config::{EMBEDDING_DIM, EXTERNAL_CALL_TIMEOUT};
use crate::models::RetrievedItem;

pub struct VectorStore {
    client: Qdrant,
    collection_name: String,
}

impl VectorStore {
    pub fn new(url: &str, api_key: Option<&str>, collection_name: &str) -> Result<Self> {
        tracing::info!("Building Qdrant client for URL: {}", url);
        let mut builder = Qdrant::from_url(url).timeout(EXTERNAL_CALL_TIMEOUT);
        if let Some(key) = api_key {
            builder = builder.api_key(key.to_string());
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Qdrant client build failed: {}", e))?;

        Ok(Self {
            client,
            collection_name: collection_name.to_string(),
        })
    }

    /// Creates the collection if it does not exist yet (768-dim, cosine).
    /// Returns true when a new collection was created.
    pub async fn ensure_collection(&self) -> Result<bool> {
        if self.client.collection_exists(&self.collection_name).await? {
            return Ok(false);
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection_name)
                    .vectors_config(VectorParamsBuilder::new(EMBEDDING_DIM, Distance::Cosine)),
            )
            .await?;

        Ok(true)
    }
}

#[async_trait]
impl VectorIndex for VectorStore {
    async fn upsert(&self, points: Vec<DocPoint>) -> Result<()> {
        let points: Vec<PointStruct> = points
            .into_iter()
            .map(|p| {
                let mut payload = JsonMap::new();
                payload.insert("text".to_string(), JsonValue::String(p.doc.text));
                payload.insert("url".to_string(), JsonValue::String(p.doc.url));
                payload.insert("city".to_string(), JsonValue::String(p.doc.city));
                payload.insert("tags".to_string(), json!(p.doc.tags));
                PointStruct::new(p.doc.id, p.vector, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, points))
            .await?;

        Ok(())
    }

    async fn search(&self, query_vector: Vec<f32>, limit: u64) -> Result<Vec<RetrievedItem>> {
        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection_name, query_vector, limit)
                    .with_payload(true),
            )
            .await?;

        let items = search_result
            .result
            .into_iter()
            .map(|point| RetrievedItem {
                score: point.score,
                text: string_field(&point.payload, "text"),
                url: string_field(&point.payload, "url"),
                city: string_field(&point.payload, "city"),
                tags: tags_field(&point.payload),
            })
            .collect();

        Ok(items)
    }
}

fn string_field(
    payload: &std::collections::HashMap<String, Value>,
    key: &str,
) -> Option<String> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn tags_field(payload: &std::collections::HashMap<String, Value>) -> Vec<String> {
    match payload.get("tags").and_then(|v| v.kind.as_ref()) {
        Some(Kind::ListValue(list)) => list
            .values
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}
