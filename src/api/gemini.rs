//! Gemini API クライアント（generateContent）

use super::TextGenerator;
use crate::error::{Result, WasteSortError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use waste_sort_common::GenerationSettings;

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Gemini APIリクエスト
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationSettings,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// 先頭候補の先頭パートのテキストを取り出す
fn first_text(response: GeminiResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| WasteSortError::GenerationService("no candidates in response".into()))?;

    candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| WasteSortError::GenerationService("candidate has no content".into()))
}

/// Gemini API クライアント
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url =
            env::var(GEMINI_BASE_URL_ENV).unwrap_or_else(|_| GEMINI_API_BASE_URL.to_string());
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, settings: GenerationSettings) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: settings,
        };

        tracing::debug!(
            model = %self.model,
            temperature = settings.temperature,
            prompt_len = prompt.len(),
            "Calling Gemini API"
        );

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WasteSortError::GenerationService(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let payload: GeminiResponse = response.json().await?;
        let text = first_text(payload)?;

        tracing::debug!(response_len = text.len(), "Gemini API responded");
        Ok(text)
    }
}
