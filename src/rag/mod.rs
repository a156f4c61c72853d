pub mod context;
pub mod embeddings;
pub mod llm;
pub mod vector_store;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CorpusDoc, RetrievedItem};

/// Answer returned when retrieval finds nothing; the completion API is not
/// called in that case.
pub const NO_MATCH_FALLBACK: &str = "I don't have any saved content that matches this yet.";

const SYSTEM_PROMPT: &str = "You are my personal Thailand trip planner. \
    You can ONLY use the context I provide from my saved content. \
    If the context does not contain the answer, explicitly say you don't know. \
    Do NOT invent specific hotel, bar, restaurant or tour names if they are not present in the context. \
    Prefer concrete itineraries, places, and practical tips that clearly come from the context.";

/// Converts input texts into fixed-length vectors, one per text.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

/// A vector upserted into the store together with its source document.
pub struct DocPoint {
    pub doc: CorpusDoc,
    pub vector: Vec<f32>,
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn upsert(&self, points: Vec<DocPoint>) -> Result<()>;

    /// Top-`limit` nearest neighbors, ordered by descending similarity as
    /// returned by the store. May return fewer than `limit` items.
    async fn search(&self, query_vector: Vec<f32>, limit: u64) -> Result<Vec<RetrievedItem>>;
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// Which external call failed. Lets the HTTP layer map completion failures
/// to 502 and everything else to 500.
#[derive(Debug, Error)]
pub enum RagError {
    #[error("embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),
    #[error("vector search failed: {0}")]
    Retrieval(#[source] anyhow::Error),
    #[error("chat completion failed: {0}")]
    Completion(#[source] anyhow::Error),
}

/// Orchestrates embed -> retrieve -> format -> generate. Holds shared,
/// never-mutated client handles built once at startup.
pub struct RagEngine {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    llm: Arc<dyn ChatModel>,
    max_context_chars: usize,
}

impl RagEngine {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        llm: Arc<dyn ChatModel>,
        max_context_chars: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            llm,
            max_context_chars,
        }
    }

    /// Embeds the query and returns the top-`top_k` stored chunks.
    pub async fn retrieve_context(
        &self,
        query: &str,
        top_k: u64,
    ) -> Result<Vec<RetrievedItem>, RagError> {
        let vectors = self
            .embedder
            .embed(&[query])
            .map_err(RagError::Embedding)?;
        let query_vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| RagError::Embedding(anyhow::anyhow!("embedder returned no vector")))?;

        self.index
            .search(query_vector, top_k)
            .await
            .map_err(RagError::Retrieval)
    }

    /// Answers `question` from the saved content. Returns the answer text
    /// together with the retrieved items that were shown to the model; when
    /// nothing is retrieved, returns the fixed fallback without calling the
    /// completion API.
    pub async fn answer_question(
        &self,
        question: &str,
        top_k: u64,
    ) -> Result<(String, Vec<RetrievedItem>), RagError> {
        let retrieved = self.retrieve_context(question, top_k).await?;
        if retrieved.is_empty() {
            return Ok((NO_MATCH_FALLBACK.to_string(), Vec::new()));
        }

        let items = context::select_within_budget(retrieved, self.max_context_chars);
        let context_block = context::build_context_block(&items);

        let user_prompt = format!(
            "Question:\n{}\n\n\
             Here is context from my saved videos/articles:\n\n\
             {}\n\n\
             Using ONLY this context, answer the question. \
             If the context is not enough, say 'I don't have this in your saved content yet.' \
             At the end, list which [numbers] you used as 'Sources: [1, 3, ...]'.",
            question, context_block
        );

        let answer = self
            .llm
            .complete(SYSTEM_PROMPT, &user_prompt)
            .await
            .map_err(RagError::Completion)?;

        Ok((answer, items))
    }
}
