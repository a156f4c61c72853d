use anyhow::Result;

use thailand_brain::config::{COLLECTION_NAME, DEFAULT_TOP_K};
use thailand_brain::corpus::load_corpus;
use thailand_brain::rag::embeddings::EmbeddingGenerator;
use thailand_brain::rag::vector_store::VectorStore;
use thailand_brain::rag::{Embedder, VectorIndex};

const DEMO_QUERY: &str = "I want beaches and island hopping near Krabi";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Only the vector-store settings matter here; no completion call is made.
    let qdrant_url = std::env::var("QDRANT_URL")
        .unwrap_or_else(|_| "http://localhost:6334".to_string());
    let qdrant_api_key = std::env::var("QDRANT_API_KEY").ok();

    println!("Loading embedding model...");
    let embedder = EmbeddingGenerator::new()?;

    println!("Connecting to Qdrant at {}...", qdrant_url);
    let store = VectorStore::new(&qdrant_url, qdrant_api_key.as_deref(), COLLECTION_NAME)?;

    if store.ensure_collection().await? {
        println!("Collection '{}' created.", COLLECTION_NAME);
    } else {
        println!("Collection '{}' already exists, skipping creation.", COLLECTION_NAME);
    }

    let count = load_corpus(&embedder, &store).await?;
    println!("Sample data inserted ({} documents).", count);

    println!("\nRunning search for query: {:?}", DEMO_QUERY);
    let vectors = embedder.embed(&[DEMO_QUERY])?;
    let query_vector = vectors
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("embedder returned no vector"))?;
    let items = store.search(query_vector, DEFAULT_TOP_K).await?;

    for (i, item) in items.iter().enumerate() {
        println!("\nResult #{}", i + 1);
        println!("  Score: {:.4}", item.score);
        println!("  City: {}", item.city.as_deref().unwrap_or("unknown"));
        println!("  Tags: [{}]", item.tags.join(", "));
        println!("  Text: {}", item.text.as_deref().unwrap_or(""));
        println!("  URL:  {}", item.url.as_deref().unwrap_or(""));
    }

    Ok(())
}
