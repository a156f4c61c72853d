use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Result;

use thailand_brain::config::{Config, COLLECTION_NAME, DEFAULT_TOP_K};
use thailand_brain::rag::embeddings::EmbeddingGenerator;
use thailand_brain::rag::llm::GroqClient;
use thailand_brain::rag::vector_store::VectorStore;
use thailand_brain::rag::RagEngine;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let embedder = EmbeddingGenerator::new()?;
    let store = VectorStore::new(
        &config.qdrant_url,
        config.qdrant_api_key.as_deref(),
        COLLECTION_NAME,
    )?;
    store.ensure_collection().await?;
    let llm = GroqClient::new(config.groq_api_key.clone())?;

    let engine = RagEngine::new(
        Arc::new(embedder),
        Arc::new(store),
        Arc::new(llm),
        config.max_context_chars,
    );

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\nAsk about Thailand (or 'exit'): ");
        std::io::stdout().flush()?;

        let question = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let question = question.trim();
        if question.is_empty() || question.eq_ignore_ascii_case("exit")
            || question.eq_ignore_ascii_case("quit")
        {
            break;
        }

        let (answer, contexts) = engine.answer_question(question, DEFAULT_TOP_K).await?;

        println!("\n=== ANSWER ===");
        println!("{}", answer);
        println!("\n=== RAW CONTEXT (debug) ===");
        for c in &contexts {
            println!("----");
            println!(
                "City: {} | Tags: [{}] | Score: {}",
                c.city.as_deref().unwrap_or("unknown"),
                c.tags.join(", "),
                c.score
            );
            println!("{}", c.text.as_deref().unwrap_or(""));
        }
    }

    Ok(())
}
