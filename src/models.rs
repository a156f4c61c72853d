use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub top_k: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<RetrievedItem>,
}

/// One nearest-neighbor hit from the vector store. Payload fields the store
/// does not carry resolve to None/empty rather than erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedItem {
    pub score: f32,
    pub text: Option<String>,
    pub url: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Ingestion-time unit: upserted into the vector store under an explicit
/// integer id, so re-running the loader overwrites instead of duplicating.
#[derive(Debug, Clone)]
pub struct CorpusDoc {
    pub id: u64,
    pub text: String,
    pub url: String,
    pub city: String,
    pub tags: Vec<String>,
}

// OpenAI-compatible wire types for the Groq chat completions endpoint.

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Message,
}
