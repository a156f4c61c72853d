use crate::models::RetrievedItem;

/// Formats retrieved items into the numbered context block fed to the LLM.
/// Pure and order-preserving; item `i` in the slice is labeled `[i + 1]`.
pub fn build_context_block(items: &[RetrievedItem]) -> String {
    let mut blocks = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let city = item.city.as_deref().unwrap_or("unknown");
        let tags = item.tags.join(", ");
        let text = item.text.as_deref().unwrap_or("");
        blocks.push(format!("[{}] (city={}, tags=[{}])\n{}\n", i + 1, city, tags, text));
    }
    blocks.join("\n")
}

/// Keeps items in rank order while their combined text length fits the
/// character budget. The top-ranked item is always kept, even when it alone
/// exceeds the budget, so the model never sees an empty context.
pub fn select_within_budget(items: Vec<RetrievedItem>, max_chars: usize) -> Vec<RetrievedItem> {
    let mut selected = Vec::with_capacity(items.len());
    let mut used = 0usize;

    for item in items {
        let len = item.text.as_deref().map_or(0, str::len);
        if !selected.is_empty() && used + len > max_chars {
            break;
        }
        used += len;
        selected.push(item);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str, city: Option<&str>, tags: &[&str]) -> RetrievedItem {
        RetrievedItem {
            score: 0.5,
            text: Some(text.to_string()),
            url: None,
            city: city.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_numbering_starts_at_one_and_preserves_order() {
        let items = vec![
            item("first chunk", Some("Bangkok"), &["nightlife"]),
            item("second chunk", Some("Krabi"), &["beach", "islands"]),
        ];
        let block = build_context_block(&items);

        assert!(block.starts_with("[1] (city=Bangkok, tags=[nightlife])\nfirst chunk\n"));
        assert!(block.contains("[2] (city=Krabi, tags=[beach, islands])\nsecond chunk\n"));
        assert!(block.find("[1]").unwrap() < block.find("[2]").unwrap());
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let items = vec![
            item("a", Some("Chiang Mai"), &["temples"]),
            item("b", None, &[]),
        ];
        assert_eq!(build_context_block(&items), build_context_block(&items));
    }

    #[test]
    fn test_missing_metadata_renders_without_error() {
        let items = vec![RetrievedItem {
            score: 0.1,
            text: None,
            url: None,
            city: None,
            tags: Vec::new(),
        }];
        let block = build_context_block(&items);
        assert_eq!(block, "[1] (city=unknown, tags=[])\n\n");
    }

    #[test]
    fn test_empty_input_yields_empty_block() {
        assert_eq!(build_context_block(&[]), "");
    }

    #[test]
    fn test_budget_keeps_rank_order_prefix() {
        let items = vec![
            item(&"a".repeat(40), None, &[]),
            item(&"b".repeat(40), None, &[]),
            item(&"c".repeat(40), None, &[]),
        ];
        let selected = select_within_budget(items, 90);
        assert_eq!(selected.len(), 2);
        assert!(selected[0].text.as_deref().unwrap().starts_with('a'));
        assert!(selected[1].text.as_deref().unwrap().starts_with('b'));
    }

    #[test]
    fn test_budget_always_keeps_top_item() {
        let items = vec![item(&"x".repeat(500), None, &[]), item("y", None, &[])];
        let selected = select_within_budget(items, 100);
        assert_eq!(selected.len(), 1);
    }
}
