use anyhow::Result;

use crate::models::CorpusDoc;
use crate::rag::{DocPoint, Embedder, VectorIndex};

/// The fixed sample set. Ids are stable so reloading upserts over the same
/// points instead of appending.
pub fn sample_docs() -> Vec<CorpusDoc> {
    vec![
        CorpusDoc {
            id: 1,
            text: "Bangkok has amazing rooftop bars around Sukhumvit and Silom. \
                   Sunset at a rooftop bar is a great way to start a night out."
                .to_string(),
            url: "https://example.com/bangkok-rooftop".to_string(),
            city: "Bangkok".to_string(),
            tags: vec!["nightlife".to_string(), "rooftop".to_string(), "city".to_string()],
        },
        CorpusDoc {
            id: 2,
            text: "In Krabi, an island-hopping tour to Railay Beach and the nearby islands \
                   is one of the best day trips. Clear water and limestone cliffs."
                .to_string(),
            url: "https://example.com/krabi-islands".to_string(),
            city: "Krabi".to_string(),
            tags: vec!["beach".to_string(), "islands".to_string(), "daytrip".to_string()],
        },
        CorpusDoc {
            id: 3,
            text: "Chiang Mai is known for its temples and cafes. \
                   You can spend a day visiting Wat Phra Singh and exploring Nimmanhaemin cafes."
                .to_string(),
            url: "https://example.com/chiangmai-temples-cafes".to_string(),
            city: "Chiang Mai".to_string(),
            tags: vec!["temples".to_string(), "cafes".to_string(), "culture".to_string()],
        },
    ]
}

/// Embeds the sample set and upserts it into the store. Returns the number
/// of documents written.
pub async fn load_corpus(embedder: &dyn Embedder, index: &dyn VectorIndex) -> Result<usize> {
    let docs = sample_docs();
    let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();

    tracing::info!("Embedding {} sample texts...", texts.len());
    let vectors = embedder.embed(&texts)?;
    anyhow::ensure!(
        vectors.len() == docs.len(),
        "embedder returned {} vectors for {} texts",
        vectors.len(),
        docs.len()
    );

    let points: Vec<DocPoint> = docs
        .into_iter()
        .zip(vectors)
        .map(|(doc, vector)| DocPoint { doc, vector })
        .collect();
    let count = points.len();

    tracing::info!("Upserting {} points...", count);
    index.upsert(points).await?;

    Ok(count)
}
