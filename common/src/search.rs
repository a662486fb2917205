//! ローカル品目検索
//!
//! 品目ナレッジベースを対象に、外部サービスを使わずに検索・候補提示を行う。

use crate::knowledge::ITEM_KNOWLEDGE;
use crate::types::{ClassificationResult, EnhancedResult, ItemKnowledgeEntry, WasteCategory};

/// 候補の最大件数
pub const SUGGESTION_LIMIT: usize = 5;

/// 検索ヒット
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMatch {
    pub entry: &'static ItemKnowledgeEntry,
    /// 1.0 完全一致 / 0.9 前方一致 / 0.7 部分一致 / 0.6 検索語側に含まれる
    pub match_score: f64,
}

/// 入力候補
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub name: &'static str,
    pub category: WasteCategory,
}

fn score_name(name: &str, term: &str) -> f64 {
    if name == term {
        1.0
    } else if name.starts_with(term) {
        0.9
    } else if name.contains(term) {
        0.7
    } else if term.contains(name) {
        0.6
    } else {
        0.0
    }
}

/// ローカル品目を検索（スコア降順、同点は定義順）
pub fn search_local_items(query: &str) -> Vec<LocalMatch> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<LocalMatch> = ITEM_KNOWLEDGE
        .iter()
        .filter_map(|entry| {
            let match_score = score_name(&entry.display_name.to_lowercase(), &term);
            (match_score > 0.0).then_some(LocalMatch { entry, match_score })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}

/// 入力候補（品目名に検索語を含むもの、最大5件）
pub fn suggestions(query: &str) -> Vec<Suggestion> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    ITEM_KNOWLEDGE
        .iter()
        .filter(|entry| entry.display_name.to_lowercase().contains(&term))
        .take(SUGGESTION_LIMIT)
        .map(|entry| Suggestion {
            name: entry.display_name,
            category: entry.category,
        })
        .collect()
}

/// ローカル品目を最終結果の形式に変換
pub fn format_local_item(entry: &ItemKnowledgeEntry) -> EnhancedResult {
    let name = entry.display_name.to_string();
    EnhancedResult {
        classification: ClassificationResult {
            name: name.clone(),
            category: entry.category,
            confidence: 1.0,
            preparation_steps: entry.steps(),
            upcycling_tip: Some(entry.upcycling_tip.to_string()),
            contaminated: entry.contaminated,
            detected_labels: Vec::new(),
            ai_generated: false,
        },
        item_name: name,
        environmental_impact: Some(format!(
            "Proper disposal of {} helps reduce waste and protect the environment.",
            entry.display_name.to_lowercase()
        )),
        disposal_instructions: Some(format!(
            "Dispose in the appropriate {} bin according to local guidelines.",
            entry.category
        )),
        search_query: None,
        is_local: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_exact_first() {
        let matches = search_local_items("Paper");
        assert_eq!(matches[0].entry.display_name, "Paper");
        assert_eq!(matches[0].match_score, 1.0);
    }

    #[test]
    fn test_search_prefix_and_contains() {
        let matches = search_local_items("glass");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entry.display_name, "Glass Bottle");
        assert_eq!(matches[0].match_score, 0.9);

        let matches = search_local_items("bottle");
        let names: Vec<&str> = matches.iter().map(|m| m.entry.display_name).collect();
        assert_eq!(names, vec!["Plastic Bottle", "Glass Bottle"]);
        assert!(matches.iter().all(|m| m.match_score == 0.7));
    }

    #[test]
    fn test_search_term_contains_name() {
        let matches = search_local_items("old battery pack");
        assert_eq!(matches[0].entry.display_name, "Battery");
        assert_eq!(matches[0].match_score, 0.6);
    }

    #[test]
    fn test_search_empty_query() {
        assert!(search_local_items("   ").is_empty());
        assert!(suggestions("").is_empty());
    }

    #[test]
    fn test_suggestions_limit() {
        // "a" はほぼ全品目に含まれる
        let result = suggestions("a");
        assert!(result.len() <= SUGGESTION_LIMIT);
        assert_eq!(result[0].name, "Plastic Bottle");
    }

    #[test]
    fn test_format_local_item() {
        let entry = &ITEM_KNOWLEDGE[3];
        let result = format_local_item(entry);
        assert!(result.is_local);
        assert_eq!(result.classification.confidence, 1.0);
        assert_eq!(result.item_name, "Cardboard Box");
        assert_eq!(
            result.disposal_instructions.as_deref(),
            Some("Dispose in the appropriate paper bin according to local guidelines.")
        );
    }
}
