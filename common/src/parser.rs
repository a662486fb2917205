//! 生成AIレスポンスパーサー
//!
//! レスポンス本文をまずそのままJSONとして解釈し、
//! 失敗した場合は最初の `{...}` / `[...]` を抜き出して再試行する。

use crate::error::{Error, Result};
use crate::types::{GeneratedGuidance, GeneratedSearchInfo, UpcyclingProject, WasteCategory};
use regex::Regex;
use serde::de::DeserializeOwned;

lazy_static::lazy_static! {
    static ref OBJECT_RE: Regex = Regex::new(r"\{[\s\S]*\}").unwrap();
    static ref ARRAY_RE: Regex = Regex::new(r"\[[\s\S]*\]").unwrap();
}

/// レスポンスからJSONオブジェクト部分を抽出
///
/// 最初の `{` から最後の `}` まで（貪欲マッチ）。
///
/// # Examples
/// ```
/// use waste_sort_common::extract_json_object;
///
/// let response = "Sure! {\"itemName\": \"Jar\"} Hope this helps.";
/// assert_eq!(extract_json_object(response).unwrap(), "{\"itemName\": \"Jar\"}");
/// ```
pub fn extract_json_object(response: &str) -> Result<&str> {
    OBJECT_RE
        .find(response)
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Parse("JSON object not found in response".into()))
}

/// レスポンスからJSON配列部分を抽出
pub fn extract_json_array(response: &str) -> Result<&str> {
    ARRAY_RE
        .find(response)
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Parse("JSON array not found in response".into()))
}

/// 直接パース → 抽出して再パースの2段階
fn parse_with_extraction<T, F>(response: &str, extract: F, what: &str) -> Result<T>
where
    T: DeserializeOwned,
    F: Fn(&str) -> Result<&str>,
{
    if let Ok(value) = serde_json::from_str::<T>(response.trim()) {
        return Ok(value);
    }

    let json_str = extract(response)?;
    serde_json::from_str::<T>(json_str)
        .map_err(|e| Error::Parse(format!("{} JSON parse error: {}", what, e)))
}

/// 補足情報レスポンスをパース
pub fn parse_guidance_response(response: &str) -> Result<GeneratedGuidance> {
    parse_with_extraction(response, extract_json_object, "guidance")
}

/// テキスト検索レスポンスをパースし、必須項目を検証する
///
/// # Returns
/// * `Ok((info, category))` - nameが存在し、categoryが6種のいずれか
/// * `Err(Error::Validation)` - 構造は読めたが必須項目が不正
/// * `Err(Error::Parse)` - JSONとして読めない
pub fn parse_search_response(response: &str) -> Result<(GeneratedSearchInfo, WasteCategory)> {
    let info: GeneratedSearchInfo = parse_with_extraction(response, extract_json_object, "search")?;
    let category = validate_search_info(&info)?;
    Ok((info, category))
}

/// テキスト検索レスポンスの必須項目検証
pub fn validate_search_info(info: &GeneratedSearchInfo) -> Result<WasteCategory> {
    let name_present = info
        .name
        .as_deref()
        .map(|n| !n.trim().is_empty())
        .unwrap_or(false);
    if !name_present {
        return Err(Error::Validation("name is missing".into()));
    }

    let category = info
        .category
        .as_deref()
        .ok_or_else(|| Error::Validation("category is missing".into()))?;

    category
        .parse::<WasteCategory>()
        .map_err(|_| Error::Validation(format!("category is not permitted: {}", category)))
}

/// アップサイクル案（文字列配列）をパース
pub fn parse_ideas_response(response: &str) -> Result<Vec<String>> {
    parse_with_extraction(response, extract_json_array, "ideas")
}

/// アップサイクル企画（オブジェクト配列）をパース
///
/// 空配列はエラー扱い。
pub fn parse_projects_response(response: &str) -> Result<Vec<UpcyclingProject>> {
    let projects: Vec<UpcyclingProject> =
        parse_with_extraction(response, extract_json_array, "projects")?;
    if projects.is_empty() {
        return Err(Error::Validation("no projects in response".into()));
    }
    Ok(projects)
}
