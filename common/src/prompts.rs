//! プロンプト生成モジュール
//!
//! 生成AI呼び出しごとのプロンプトと生成パラメータ:
//! - build_enhance_prompt: 分類結果の補足情報
//! - build_search_prompt: テキスト検索（分類ごと生成）
//! - build_upcycling_ideas_prompt / build_upcycling_projects_prompt: アップサイクル案

use crate::types::WasteCategory;
use serde::Serialize;

/// 許容カテゴリ一覧（プロンプト埋め込み用）
pub const CATEGORY_LIST: &str = "plastics, paper, bio, glass, ewaste, residual";

/// 生成パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    pub max_output_tokens: u32,
    pub response_mime_type: &'static str,
}

impl GenerationSettings {
    /// 補足情報生成
    pub const ENHANCE: Self = Self {
        temperature: 0.9,
        top_k: Some(40),
        top_p: Some(0.95),
        max_output_tokens: 1024,
        response_mime_type: "application/json",
    };

    /// テキスト検索（ばらつきを大きく）
    pub const SEARCH: Self = Self {
        temperature: 1.2,
        top_k: Some(64),
        top_p: Some(0.98),
        max_output_tokens: 1024,
        response_mime_type: "application/json",
    };

    /// アップサイクル案（短文5件）
    pub const IDEAS: Self = Self {
        temperature: 0.8,
        top_k: None,
        top_p: None,
        max_output_tokens: 512,
        response_mime_type: "application/json",
    };

    /// アップサイクル企画（詳細5件）
    pub const PROJECTS: Self = Self {
        temperature: 1.0,
        top_k: Some(64),
        top_p: Some(0.95),
        max_output_tokens: 2048,
        response_mime_type: "application/json",
    };
}

/// 補足情報プロンプト生成
///
/// # Arguments
/// * `name` - 分類済みの品目名
/// * `category` - 分類カテゴリ
/// * `confidence` - 信頼度 (0.0-1.0)、百分率で埋め込む
pub fn build_enhance_prompt(name: &str, category: WasteCategory, confidence: f64) -> String {
    let percent = confidence * 100.0;

    format!(
        r#"You are a waste management and recycling expert.

A waste item has been identified as: "{name}"
Category: {category}
Confidence: {percent:.1}%

Please provide the following information in a structured JSON format:

{{
  "itemName": "Clear, user-friendly name for this item",
  "preparationSteps": [
    "Step 1: Specific action to prepare the item",
    "Step 2: Another preparation step",
    "Step 3: Final preparation step"
  ],
  "upcyclingTip": "One creative and practical upcycling idea",
  "environmentalImpact": "Brief statement about proper disposal importance (1-2 sentences)",
  "disposalInstructions": "Specific disposal instructions for this category"
}}

Keep all responses concise, practical, and actionable. Return ONLY the JSON object, no additional text."#
    )
}

/// テキスト検索プロンプト生成
///
/// `request_id` はサーバ側で同一応答が返らないよう毎回変える（ミリ秒時刻など）。
pub fn build_search_prompt(query: &str, request_id: i64) -> String {
    format!(
        r#"You are a waste management and recycling expert. [Request ID: {request_id}]

A user is searching for information about: "{query}"

Analyze this SPECIFIC item: "{query}" and provide UNIQUE, DETAILED waste disposal information.

Respond ONLY with a JSON object in this exact format:
{{
  "name": "Exact name of {query}",
  "category": "one of: {CATEGORY_LIST}",
  "confidence": 0.85,
  "itemName": "User-friendly display name for {query}",
  "preparationSteps": [
    "Step 1: VERY SPECIFIC action for {query}",
    "Step 2: Another SPECIFIC step for {query}",
    "Step 3: Final SPECIFIC step for {query}"
  ],
  "upcyclingTip": "ONE creative, practical upcycling idea SPECIFIC to {query}",
  "environmentalImpact": "Brief statement about {query}'s environmental importance",
  "disposalInstructions": "SPECIFIC disposal instructions for {query}"
}}

CRITICAL REQUIREMENTS:
- category must be exactly one of: {CATEGORY_LIST}
- confidence between 0.0 and 1.0
- ALL content MUST be UNIQUE and SPECIFIC to "{query}"
- DO NOT use generic phrases like "this item" or "the item"
- Mention "{query}" explicitly in responses
- Return ONLY valid JSON"#
    )
}

/// アップサイクル案（短文）プロンプト生成
pub fn build_upcycling_ideas_prompt(item_name: &str, category: WasteCategory) -> String {
    format!(
        r#"Generate 5 creative and practical upcycling ideas for: {item_name} (Category: {category})

Provide ideas that are:
- Easy to implement at home
- Practical and useful
- Environmentally friendly
- Creative but realistic

Return as JSON array: ["idea 1", "idea 2", "idea 3", "idea 4", "idea 5"]"#
    )
}

/// アップサイクル企画（詳細）プロンプト生成
pub fn build_upcycling_projects_prompt(item_query: &str, request_id: i64) -> String {
    format!(
        r#"You are a creative upcycling and DIY expert. [Request ID: {request_id}]

A user wants upcycling ideas for: "{item_query}"

Generate 5 UNIQUE, CREATIVE, and PRACTICAL upcycling projects specifically for "{item_query}".

Respond ONLY with a JSON array in this exact format:
[
  {{
    "title": "Creative project name using {item_query}",
    "category": "material type (e.g., plastic, cardboard, glass, metal, fabric)",
    "difficulty": "Easy, Medium, or Hard",
    "time": "estimated time (e.g., 30 mins, 1 hour, 2 hours)",
    "materials": ["{item_query}", "material 2", "material 3", "material 4"],
    "instructions": [
      "Step 1: SPECIFIC action for {item_query}",
      "Step 2: Another SPECIFIC step",
      "Step 3: Continue...",
      "Step 4: ...",
      "Step 5: Final step"
    ],
    "impact": "Environmental impact statement about reusing {item_query}"
  }}
]

CRITICAL REQUIREMENTS:
- Generate exactly 5 different projects
- Instructions should have 5-7 detailed steps
- Materials list should have 3-5 items
- Be practical and achievable at home
- Mention "{item_query}" explicitly in titles and instructions
- Return ONLY valid JSON array"#
    )
}
