//! 固定フォールバック
//!
//! 外部サービスが失敗・不正応答した場合に差し替える静的コンテンツ。
//! ここで生成する結果はすべて `ai_generated = false`。
//! `complete_guidance` は生成結果の欠けた項目を埋めるだけで、この判定には関わらない。

use crate::types::{
    ClassificationResult, EnhancedResult, GeneratedGuidance, UpcyclingProject, WasteCategory,
};

/// テキスト検索フォールバック時の信頼度
pub const SEARCH_FALLBACK_CONFIDENCE: f64 = 0.5;

/// 補足情報の汎用手順（3ステップ）
pub const GENERIC_PREPARATION_STEPS: [&str; 3] = [
    "Clean the item thoroughly",
    "Remove any labels or stickers",
    "Check with local recycling guidelines",
];

pub const GENERIC_UPCYCLING_TIP: &str = "Consider creative reuse before disposal";

pub const GENERIC_ENVIRONMENTAL_IMPACT: &str =
    "Proper disposal helps protect the environment and conserves resources.";

/// カテゴリ名を埋め込んだ廃棄指示
pub fn generic_disposal_instructions(category: WasteCategory) -> String {
    format!("Place in {} bin according to local guidelines.", category)
}

/// 欠けのない補足情報
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedGuidance {
    pub item_name: Option<String>,
    pub preparation_steps: Vec<String>,
    pub upcycling_tip: String,
    pub environmental_impact: String,
    pub disposal_instructions: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// 生成された補足情報の欠け・空欄を汎用の内容で埋める
pub fn complete_guidance(guidance: GeneratedGuidance, category: WasteCategory) -> CompletedGuidance {
    let preparation_steps: Vec<String> = guidance
        .preparation_steps
        .unwrap_or_default()
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();

    CompletedGuidance {
        item_name: non_blank(guidance.item_name),
        preparation_steps: if preparation_steps.is_empty() {
            GENERIC_PREPARATION_STEPS.iter().map(|s| s.to_string()).collect()
        } else {
            preparation_steps
        },
        upcycling_tip: non_blank(guidance.upcycling_tip)
            .unwrap_or_else(|| GENERIC_UPCYCLING_TIP.to_string()),
        environmental_impact: non_blank(guidance.environmental_impact)
            .unwrap_or_else(|| GENERIC_ENVIRONMENTAL_IMPACT.to_string()),
        disposal_instructions: non_blank(guidance.disposal_instructions)
            .unwrap_or_else(|| generic_disposal_instructions(category)),
    }
}

/// 補足情報生成に失敗した場合の結果
///
/// 分類結果（名前・カテゴリ・信頼度・検出ラベル）はそのまま引き継ぐ。
pub fn enhancement_fallback(classification: &ClassificationResult) -> EnhancedResult {
    let category = classification.category;
    EnhancedResult {
        classification: ClassificationResult {
            preparation_steps: GENERIC_PREPARATION_STEPS.iter().map(|s| s.to_string()).collect(),
            upcycling_tip: Some(GENERIC_UPCYCLING_TIP.to_string()),
            ai_generated: false,
            ..classification.clone()
        },
        item_name: classification.name.clone(),
        environmental_impact: Some(GENERIC_ENVIRONMENTAL_IMPACT.to_string()),
        disposal_instructions: Some(generic_disposal_instructions(category)),
        search_query: None,
        is_local: false,
    }
}

/// テキスト検索に失敗した場合の結果（residual、信頼度0.5）
pub fn search_fallback(query: &str) -> EnhancedResult {
    EnhancedResult {
        classification: ClassificationResult {
            name: query.to_string(),
            category: WasteCategory::Residual,
            confidence: SEARCH_FALLBACK_CONFIDENCE,
            preparation_steps: vec![
                "Check the item for recycling symbols".to_string(),
                "Clean the item if needed".to_string(),
                "Consult local waste management guidelines".to_string(),
            ],
            upcycling_tip: Some(
                "Consider if this item can be reused or repurposed before disposal".to_string(),
            ),
            contaminated: false,
            detected_labels: Vec::new(),
            ai_generated: false,
        },
        item_name: query.to_string(),
        environmental_impact: Some(
            "Proper waste sorting helps reduce landfill waste and conserves resources.".to_string(),
        ),
        disposal_instructions: Some(
            "If unsure, place in residual waste bin or contact local waste management.".to_string(),
        ),
        search_query: Some(query.to_string()),
        is_local: false,
    }
}

/// 画像認識サービス障害時のモック結果候補
pub fn mock_results() -> Vec<ClassificationResult> {
    let mock = |name: &str, category, confidence, steps: &[&str], tip: &str| ClassificationResult {
        name: name.to_string(),
        category,
        confidence,
        preparation_steps: steps.iter().map(|s| s.to_string()).collect(),
        upcycling_tip: Some(tip.to_string()),
        contaminated: false,
        detected_labels: Vec::new(),
        ai_generated: false,
    };

    vec![
        mock(
            "Plastic Bottle",
            WasteCategory::Plastics,
            0.95,
            &["Remove cap and label", "Rinse thoroughly", "Crush to save space"],
            "Cut in half and use as a planter or bird feeder",
        ),
        mock(
            "Aluminum Can",
            WasteCategory::Plastics,
            0.92,
            &["Rinse inside", "Crush if possible", "Remove paper labels"],
            "Use as small planters or pen holders",
        ),
        mock(
            "Food Scraps",
            WasteCategory::Bio,
            0.88,
            &["Remove non-organic materials", "Drain excess liquid"],
            "Create compost for your garden",
        ),
    ]
}

/// アップサイクル企画の固定テンプレート（5件）
pub fn upcycling_projects_fallback(item: &str) -> Vec<UpcyclingProject> {
    let project = |title: String,
                   difficulty: &str,
                   time: &str,
                   extra_materials: &[&str],
                   instructions: Vec<String>,
                   impact: String| {
        let mut materials = vec![item.to_string()];
        materials.extend(extra_materials.iter().map(|m| m.to_string()));
        UpcyclingProject {
            title,
            category: "general".to_string(),
            difficulty: difficulty.to_string(),
            time: time.to_string(),
            materials,
            instructions,
            impact,
        }
    };

    vec![
        project(
            format!("Creative {} Organizer", item),
            "Easy",
            "30 mins",
            &["Scissors", "Paint", "Glue"],
            vec![
                format!("Clean the {} thoroughly", item),
                "Cut or shape as needed".to_string(),
                "Paint or decorate with eco-friendly materials".to_string(),
                "Let dry completely".to_string(),
                "Use for storage or organization".to_string(),
            ],
            format!("Gives {} a second life and reduces waste", item),
        ),
        project(
            format!("{} Planter", item),
            "Easy",
            "20 mins",
            &["Soil", "Seeds", "Drainage tool"],
            vec![
                format!("Prepare and clean the {}", item),
                "Create drainage holes at the bottom".to_string(),
                "Fill with potting soil".to_string(),
                "Plant seeds or small plants".to_string(),
                "Water and place in sunlight".to_string(),
            ],
            format!("Transforms {} into a sustainable garden container", item),
        ),
        project(
            format!("Decorative {} Art", item),
            "Medium",
            "1 hour",
            &["Acrylic paint", "Brushes", "Clear sealant"],
            vec![
                format!("Clean and prepare {} surface", item),
                "Sketch your design lightly".to_string(),
                "Paint with creative patterns and colors".to_string(),
                "Add details and finishing touches".to_string(),
                "Apply clear sealant for durability and shine".to_string(),
            ],
            format!("Creates unique art while repurposing {}", item),
        ),
        project(
            format!("{} Storage Solution", item),
            "Easy",
            "25 mins",
            &["Labels", "Markers", "Decorative paper"],
            vec![
                format!("Clean {} and remove any existing labels", item),
                "Measure and cut decorative paper if needed".to_string(),
                "Attach paper or paint the exterior".to_string(),
                "Add custom labels for organization".to_string(),
                "Use for storing small items or supplies".to_string(),
            ],
            format!("Repurposes {} into functional household storage", item),
        ),
        project(
            format!("{} Gift Container", item),
            "Easy",
            "35 mins",
            &["Ribbon", "Gift wrap", "Decorative elements"],
            vec![
                format!("Thoroughly clean and dry {}", item),
                "Wrap or paint in festive colors".to_string(),
                "Add ribbons, bows, or decorative elements".to_string(),
                "Fill with gifts, treats, or homemade items".to_string(),
                "Present as a unique, eco-friendly gift package".to_string(),
            ],
            format!(
                "Turns {} into a reusable, environmentally-friendly gift container",
                item
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_guidance_fills_missing_fields() {
        let completed = complete_guidance(GeneratedGuidance::default(), WasteCategory::Glass);
        assert_eq!(completed.item_name, None);
        assert_eq!(completed.preparation_steps.len(), 3);
        assert_eq!(completed.upcycling_tip, GENERIC_UPCYCLING_TIP);
        assert_eq!(completed.environmental_impact, GENERIC_ENVIRONMENTAL_IMPACT);
        assert_eq!(
            completed.disposal_instructions,
            "Place in glass bin according to local guidelines."
        );
    }

    #[test]
    fn test_complete_guidance_keeps_generated_fields() {
        let guidance = GeneratedGuidance {
            item_name: Some("Jam Jar".into()),
            preparation_steps: Some(vec!["Rinse".into(), " ".into()]),
            upcycling_tip: Some("  ".into()),
            environmental_impact: Some("Glass is endlessly recyclable".into()),
            disposal_instructions: None,
        };
        let completed = complete_guidance(guidance, WasteCategory::Glass);
        assert_eq!(completed.item_name.as_deref(), Some("Jam Jar"));
        assert_eq!(completed.preparation_steps, vec!["Rinse"]);
        assert_eq!(completed.upcycling_tip, GENERIC_UPCYCLING_TIP);
        assert_eq!(completed.environmental_impact, "Glass is endlessly recyclable");
    }

    #[test]
    fn test_enhancement_fallback_keeps_classification() {
        let classification = ClassificationResult {
            name: "Banana Peel".to_string(),
            category: WasteCategory::Bio,
            confidence: 0.9,
            detected_labels: vec!["banana peel".to_string()],
            ai_generated: true,
            ..Default::default()
        };

        let result = enhancement_fallback(&classification);
        assert_eq!(result.item_name, "Banana Peel");
        assert_eq!(result.classification.category, WasteCategory::Bio);
        assert_eq!(result.classification.confidence, 0.9);
        assert_eq!(result.classification.detected_labels, vec!["banana peel"]);
        assert_eq!(result.classification.preparation_steps.len(), 3);
        assert!(!result.classification.ai_generated);
        assert_eq!(
            result.disposal_instructions.as_deref(),
            Some("Place in bio bin according to local guidelines.")
        );
    }

    #[test]
    fn test_search_fallback() {
        let result = search_fallback("mystery gadget");
        assert_eq!(result.classification.category, WasteCategory::Residual);
        assert_eq!(result.classification.confidence, SEARCH_FALLBACK_CONFIDENCE);
        assert_eq!(result.search_query.as_deref(), Some("mystery gadget"));
        assert_eq!(result.item_name, "mystery gadget");
        assert!(!result.classification.ai_generated);
    }

    #[test]
    fn test_mock_results_are_not_ai_generated() {
        let mocks = mock_results();
        assert_eq!(mocks.len(), 3);
        assert!(mocks.iter().all(|m| !m.ai_generated));
    }

    #[test]
    fn test_upcycling_projects_fallback() {
        let projects = upcycling_projects_fallback("tin can");
        assert_eq!(projects.len(), 5);
        assert_eq!(projects[0].title, "Creative tin can Organizer");
        assert_eq!(projects[1].materials[0], "tin can");
        assert!(projects.iter().all(|p| p.instructions.len() == 5));
    }
}
