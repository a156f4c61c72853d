use anyhow::Result;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use super::Embedder;

/// Local ONNX embedding model (bge-base-en-v1.5, 768 dimensions). Loaded
/// once at startup; inference itself is synchronous CPU work.
pub struct EmbeddingGenerator {
    model: TextEmbedding,
}

impl EmbeddingGenerator {
    pub fn new() -> Result<Self> {
        tracing::info!("Loading embedding model...");

        let model = TextEmbedding::try_new(InitOptions {
            model_name: EmbeddingModel::BGEBaseENV15,
            show_download_progress: true,
            ..Default::default()
        })
        .map_err(|e| anyhow::anyhow!("Failed to initialize embedding model: {}", e))?;

        tracing::info!("Embedding model ready");
        Ok(Self { model })
    }
}

impl Embedder for EmbeddingGenerator {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let embeddings = self.model.embed(texts.to_vec(), None)?;
        Ok(embeddings)
    }
}
