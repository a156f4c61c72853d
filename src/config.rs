use anyhow::Result;
use std::time::Duration;

/// Qdrant collection holding the saved Thailand content.
pub const COLLECTION_NAME: &str = "thailand_content";

/// Dimensionality of the embedding model (bge-base-en-v1.5).
pub const EMBEDDING_DIM: u64 = 768;

/// Groq-hosted completion model.
pub const CHAT_MODEL: &str = "llama-3.1-8b-instant";

/// Low temperature to keep answers grounded in the supplied context.
pub const CHAT_TEMPERATURE: f32 = 0.25;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_TOP_K: u64 = 5;

/// Timeout applied to each external call (Qdrant, Groq).
pub const EXTERNAL_CALL_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_MAX_CONTEXT_CHARS: usize = 6000;

/// Process configuration, read once from the environment at startup and
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub groq_api_key: String,
    pub bind_addr: String,
    pub max_context_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let qdrant_url = std::env::var("QDRANT_URL")
            .unwrap_or_else(|_| "http://localhost:6334".to_string());
        let qdrant_api_key = std::env::var("QDRANT_API_KEY").ok();
        let groq_api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| anyhow::anyhow!("GROQ_API_KEY is not set"))?;
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let max_context_chars = match std::env::var("MAX_CONTEXT_CHARS") {
            Ok(v) => parse_context_budget(&v)?,
            Err(_) => DEFAULT_MAX_CONTEXT_CHARS,
        };

        Ok(Self {
            qdrant_url,
            qdrant_api_key,
            groq_api_key,
            bind_addr,
            max_context_chars,
        })
    }
}

fn parse_context_budget(raw: &str) -> Result<usize> {
    let value: usize = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("MAX_CONTEXT_CHARS must be a positive integer"))?;
    anyhow::ensure!(value > 0, "MAX_CONTEXT_CHARS must be a positive integer");
    Ok(value)
}
