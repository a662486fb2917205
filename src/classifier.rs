//! 分類パイプライン
//!
//! 画像 → 検出正規化 → カテゴリ解決 → 補足情報生成、および
//! テキスト検索・アップサイクル提案の入口。
//! サービス障害は各入口で静的フォールバックに吸収し、呼び出し側には
//! 「何も検出できなかった」場合のみエラーを返す。

use crate::api::{ImageLabeler, TextGenerator};
use crate::error::{Result, WasteSortError};
use base64::Engine;
use rand::seq::SliceRandom;
use std::path::Path;
use waste_sort_common::fallback::{
    complete_guidance, enhancement_fallback, mock_results, search_fallback,
    upcycling_projects_fallback, SEARCH_FALLBACK_CONFIDENCE,
};
use waste_sort_common::knowledge::category_defaults;
use waste_sort_common::prompts::{
    build_enhance_prompt, build_search_prompt, build_upcycling_ideas_prompt,
    build_upcycling_projects_prompt,
};
use waste_sort_common::{
    normalize_sets, parse_guidance_response, parse_ideas_response, parse_projects_response,
    parse_search_response, resolve, ClassificationResult, EnhancedResult, GenerationSettings,
    UpcyclingProject, WasteCategory,
};

/// 画像ファイルを読み込み Base64 化
pub fn load_image_base64(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(WasteSortError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| WasteSortError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    if bytes.is_empty() {
        return Err(WasteSortError::ImageLoad(format!("{}: empty file", path.display())));
    }

    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// 画像を分類
///
/// 検出ゼロは `NoDetections` としてそのまま返す。
/// それ以外のサービス障害はモック結果のいずれかに置き換える。
pub async fn classify_image(
    labeler: &dyn ImageLabeler,
    image_base64: &str,
) -> Result<ClassificationResult> {
    match label_and_resolve(labeler, image_base64).await {
        Ok(result) => Ok(result),
        Err(e) if e.is_terminal() => Err(WasteSortError::NoDetections),
        Err(e) => {
            tracing::warn!(error = %e, "Image labeling failed; using mock result");
            Ok(pick_mock_result())
        }
    }
}

async fn label_and_resolve(
    labeler: &dyn ImageLabeler,
    image_base64: &str,
) -> Result<ClassificationResult> {
    let sets = labeler.label(image_base64).await?;
    let detections = normalize_sets(&sets)?;

    tracing::debug!(count = detections.len(), "Detections normalized");

    let result = resolve(&detections);
    tracing::debug!(
        name = %result.name,
        category = %result.category,
        confidence = result.confidence,
        "Category resolved"
    );
    Ok(result)
}

fn pick_mock_result() -> ClassificationResult {
    mock_results()
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_default()
}

/// 分類結果に生成AIの補足情報を付ける
///
/// 失敗時（通信・タイムアウト・応答不正・JSON抽出失敗）は汎用の補足情報で埋める。
pub async fn enhance(
    generator: &dyn TextGenerator,
    classification: &ClassificationResult,
) -> EnhancedResult {
    let prompt = build_enhance_prompt(
        &classification.name,
        classification.category,
        classification.confidence,
    );

    let guidance = match generator.generate(&prompt, GenerationSettings::ENHANCE).await {
        Ok(text) => parse_guidance_response(&text).map_err(WasteSortError::from),
        Err(e) => Err(e),
    };

    match guidance {
        Ok(guidance) => {
            let guidance = complete_guidance(guidance, classification.category);
            EnhancedResult {
                classification: ClassificationResult {
                    preparation_steps: guidance.preparation_steps,
                    upcycling_tip: Some(guidance.upcycling_tip),
                    ai_generated: true,
                    ..classification.clone()
                },
                item_name: guidance
                    .item_name
                    .unwrap_or_else(|| classification.name.clone()),
                environmental_impact: Some(guidance.environmental_impact),
                disposal_instructions: Some(guidance.disposal_instructions),
                search_query: None,
                is_local: false,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, item = %classification.name, "Enhancement failed; using generic guidance");
            enhancement_fallback(classification)
        }
    }
}

/// テキストから品目を分類し補足情報まで生成
///
/// カテゴリが6種以外、または名前が空の応答は不正として扱い、
/// residual・信頼度0.5の汎用結果を返す。
pub async fn classify_text(generator: &dyn TextGenerator, query: &str) -> EnhancedResult {
    let query = query.trim();
    let prompt = build_search_prompt(query, request_id());

    let parsed = match generator.generate(&prompt, GenerationSettings::SEARCH).await {
        Ok(text) => parse_search_response(&text).map_err(WasteSortError::from),
        Err(e) => Err(e),
    };

    match parsed {
        Ok((info, category)) => {
            let name = info.name.unwrap_or_default().trim().to_string();
            let guidance = complete_guidance(info.guidance, category);
            let confidence = info
                .confidence
                .filter(|c| c.is_finite())
                .unwrap_or(SEARCH_FALLBACK_CONFIDENCE)
                .clamp(0.0, 1.0);

            EnhancedResult {
                classification: ClassificationResult {
                    name: name.clone(),
                    category,
                    confidence,
                    preparation_steps: guidance.preparation_steps,
                    upcycling_tip: Some(guidance.upcycling_tip),
                    contaminated: category_defaults(category).contaminated,
                    detected_labels: Vec::new(),
                    ai_generated: true,
                },
                item_name: guidance.item_name.unwrap_or(name),
                environmental_impact: Some(guidance.environmental_impact),
                disposal_instructions: Some(guidance.disposal_instructions),
                search_query: Some(query.to_string()),
                is_local: false,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, query = %query, "Text classification failed; using residual fallback");
            search_fallback(query)
        }
    }
}

/// アップサイクル案（短文）。失敗時は空
pub async fn upcycling_ideas(
    generator: &dyn TextGenerator,
    item_name: &str,
    category: WasteCategory,
) -> Vec<String> {
    let prompt = build_upcycling_ideas_prompt(item_name, category);

    match generator.generate(&prompt, GenerationSettings::IDEAS).await {
        Ok(text) => parse_ideas_response(&text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to parse upcycling ideas");
            Vec::new()
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Upcycling ideas request failed");
            Vec::new()
        }
    }
}

/// アップサイクル企画（詳細）。失敗時は定型の5件
pub async fn upcycling_projects(
    generator: &dyn TextGenerator,
    item_query: &str,
) -> Vec<UpcyclingProject> {
    let item_query = item_query.trim();
    let prompt = build_upcycling_projects_prompt(item_query, request_id());

    let projects = match generator.generate(&prompt, GenerationSettings::PROJECTS).await {
        Ok(text) => parse_projects_response(&text).map_err(WasteSortError::from),
        Err(e) => Err(e),
    };

    projects.unwrap_or_else(|e| {
        tracing::warn!(error = %e, item = %item_query, "Upcycling projects failed; using templates");
        upcycling_projects_fallback(item_query)
    })
}

/// サーバー側キャッシュ回避用のリクエストID（ミリ秒）
fn request_id() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_image_base64() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("item.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        assert_eq!(load_image_base64(&path).unwrap(), "/9j/");
    }

    #[test]
    fn test_load_image_missing_file() {
        let result = load_image_base64(Path::new("/nonexistent/item.jpg"));
        assert!(matches!(result, Err(WasteSortError::FileNotFound(_))));
    }

    #[test]
    fn test_load_image_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.jpg");
        std::fs::write(&path, []).unwrap();

        assert!(matches!(load_image_base64(&path), Err(WasteSortError::ImageLoad(_))));
    }

    #[test]
    fn test_pick_mock_result_is_not_generated() {
        for _ in 0..10 {
            let mock = pick_mock_result();
            assert!(!mock.ai_generated);
            assert!(["Plastic Bottle", "Aluminum Can", "Food Scraps"].contains(&mock.name.as_str()));
        }
    }
}
