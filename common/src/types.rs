//! 分類結果の型定義
//!
//! CLIとライブラリ利用側で共有される型:
//! - Detection: 画像認識サービスの1件の検出（正規化済み）
//! - ClassificationResult: カテゴリ解決の出力
//! - EnhancedResult: 生成AIによる補足情報を付加した最終出力

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ごみカテゴリ（6種固定）
///
/// `Residual` はどの入力にも必ず当てはまる最終フォールバック。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    Plastics,
    Paper,
    Bio,
    Glass,
    Ewaste,
    #[default]
    Residual,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 6] = [
        WasteCategory::Plastics,
        WasteCategory::Paper,
        WasteCategory::Bio,
        WasteCategory::Glass,
        WasteCategory::Ewaste,
        WasteCategory::Residual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Plastics => "plastics",
            WasteCategory::Paper => "paper",
            WasteCategory::Bio => "bio",
            WasteCategory::Glass => "glass",
            WasteCategory::Ewaste => "ewaste",
            WasteCategory::Residual => "residual",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        WasteCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// 画像認識サービスの生アノテーション（ラベル・オブジェクト共通）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub description: String,
    pub score: f64,
}

impl Annotation {
    pub fn new(description: impl Into<String>, score: f64) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }
}

/// 画像認識サービスから受け取る2種類の結果セット
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSets {
    /// ラベル検出結果（存在しない場合は None）
    pub labels: Option<Vec<Annotation>>,
    /// オブジェクト検出結果（存在しない場合は None）
    pub objects: Option<Vec<Annotation>>,
}

/// 正規化済みの検出（descriptionは小文字）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub description: String,
    pub score: f64,
}

/// 品目ナレッジベースの1エントリ
#[derive(Debug, Clone, PartialEq)]
pub struct ItemKnowledgeEntry {
    pub match_key: &'static str,
    pub display_name: &'static str,
    pub category: WasteCategory,
    pub preparation_steps: &'static [&'static str],
    pub upcycling_tip: &'static str,
    pub contaminated: bool,
}

/// キーワード → カテゴリの対応
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMapping {
    pub keyword: &'static str,
    pub category: WasteCategory,
}

/// カテゴリ解決結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub name: String,
    pub category: WasteCategory,
    pub confidence: f64,
    #[serde(default)]
    pub preparation_steps: Vec<String>,
    #[serde(default)]
    pub upcycling_tip: Option<String>,
    #[serde(default)]
    pub contaminated: bool,
    /// 上位5件の検出ラベル
    #[serde(default)]
    pub detected_labels: Vec<String>,
    #[serde(default)]
    pub ai_generated: bool,
}

/// 生成AIで補足した最終結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedResult {
    #[serde(flatten)]
    pub classification: ClassificationResult,
    pub item_name: String,
    #[serde(default)]
    pub environmental_impact: Option<String>,
    #[serde(default)]
    pub disposal_instructions: Option<String>,
    /// テキスト検索経由の場合の検索語
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// ローカル品目テーブルから生成した場合 true
    #[serde(default)]
    pub is_local: bool,
}

/// 生成AIの補足情報レスポンス
///
/// 欠けたキーは None として受け入れる（補完は呼び出し側）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedGuidance {
    pub item_name: Option<String>,
    pub preparation_steps: Option<Vec<String>>,
    pub upcycling_tip: Option<String>,
    pub environmental_impact: Option<String>,
    pub disposal_instructions: Option<String>,
}

/// テキスト検索レスポンス（分類と補足情報を1回で生成）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedSearchInfo {
    pub name: Option<String>,
    pub category: Option<String>,
    pub confidence: Option<f64>,
    #[serde(flatten)]
    pub guidance: GeneratedGuidance,
}

/// アップサイクル企画（詳細版）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpcyclingProject {
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub time: String,
    pub materials: Vec<String>,
    pub instructions: Vec<String>,
    pub impact: String,
}
