use std::time::Duration;
use waste_sort::api::GeminiClient;
use waste_sort::classify_text;
use waste_sort_common::WasteCategory;

#[tokio::test]
async fn gemini_search_integration() {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return;
        }
    };

    let client = GeminiClient::new(api_key, "gemini-2.0-flash-exp", Duration::from_secs(30))
        .expect("failed to build client");

    let result = classify_text(&client, "empty glass jam jar").await;

    assert!(
        result.classification.ai_generated,
        "service call fell back: {:?}",
        result
    );
    assert!(WasteCategory::ALL.contains(&result.classification.category));
    assert!(!result.classification.name.trim().is_empty());
    assert!((0.0..=1.0).contains(&result.classification.confidence));
    assert_eq!(result.search_query.as_deref(), Some("empty glass jam jar"));
}
