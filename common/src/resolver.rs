//! カテゴリ解決
//!
//! 順位付き検出リストから1つのカテゴリ・品目名・信頼度を決定する。
//!
//! ## 処理フロー
//! 1. 品目ナレッジベース: 検出順に走査し、最初の一致で即確定
//! 2. キーワード表: 全検出を走査し、最も信頼度の高い一致を採用
//! 3. どちらも該当なし: residual / "Unknown Item" / 0

use crate::detection::top_descriptions;
use crate::keywords::{matches_bidirectional, KEYWORD_TABLE};
use crate::knowledge::{category_defaults, find_item};
use crate::types::{ClassificationResult, Detection, WasteCategory};
use regex::Regex;

/// detectedLabelsに載せる件数
pub const DETECTED_LABEL_LIMIT: usize = 5;

/// 未該当時の品目名
pub const UNKNOWN_ITEM_NAME: &str = "Unknown Item";

/// 検出リストからカテゴリを解決する
///
/// 空でないリストに対しては必ず結果を返す（residualが受け皿）。
/// 空リストの場合も residual の既定結果になる。
pub fn resolve(detections: &[Detection]) -> ClassificationResult {
    let detected_labels = top_descriptions(detections, DETECTED_LABEL_LIMIT);

    // 第1パス: ナレッジベース（最初の一致で確定）
    for detection in detections {
        if let Some(entry) = find_item(&detection.description) {
            return ClassificationResult {
                name: entry.display_name.to_string(),
                category: entry.category,
                confidence: detection.score,
                preparation_steps: entry.steps(),
                upcycling_tip: Some(entry.upcycling_tip.to_string()),
                contaminated: entry.contaminated,
                detected_labels,
                ai_generated: false,
            };
        }
    }

    // 第2パス: キーワード表（最高信頼度の一致）
    let mut category = WasteCategory::Residual;
    let mut name = UNKNOWN_ITEM_NAME.to_string();
    let mut confidence = 0.0;

    for detection in detections {
        for mapping in KEYWORD_TABLE {
            if matches_bidirectional(&detection.description, mapping.keyword)
                && detection.score > confidence
            {
                confidence = detection.score;
                category = mapping.category;
                name = capitalize_words(&detection.description);
            }
        }
    }

    let defaults = category_defaults(category);

    ClassificationResult {
        name,
        category,
        confidence,
        preparation_steps: defaults.steps(),
        upcycling_tip: Some(defaults.upcycling_tip.to_string()),
        contaminated: defaults.contaminated,
        detected_labels,
        ai_generated: false,
    }
}

/// 単語の先頭文字を大文字化（"plastic bag" → "Plastic Bag"）
pub fn capitalize_words(text: &str) -> String {
    lazy_static::lazy_static! {
        static ref WORD_START_RE: Regex = Regex::new(r"\b\w").unwrap();
    }

    WORD_START_RE
        .replace_all(text, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}
