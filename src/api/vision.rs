//! Google Cloud Vision API クライアント
//!
//! `images:annotate` に LABEL_DETECTION（最大10件）と
//! OBJECT_LOCALIZATION（最大5件）を要求する。

use super::{strip_data_url_prefix, ImageLabeler};
use crate::error::{Result, WasteSortError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use waste_sort_common::{Annotation, AnnotationSets};

const VISION_API_BASE_URL: &str = "https://vision.googleapis.com/v1";
const VISION_BASE_URL_ENV: &str = "VISION_BASE_URL";

const LABEL_MAX_RESULTS: u32 = 10;
const OBJECT_MAX_RESULTS: u32 = 5;

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: Vec<ImageRequest<'a>>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    image: ImageContent<'a>,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent<'a> {
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    label_annotations: Option<Vec<LabelAnnotation>>,
    localized_object_annotations: Option<Vec<ObjectAnnotation>>,
    error: Option<ResponseError>,
}

#[derive(Deserialize)]
struct LabelAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f64,
}

#[derive(Deserialize)]
struct ObjectAnnotation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    score: f64,
}

#[derive(Deserialize)]
struct ResponseError {
    #[serde(default)]
    message: String,
}

/// Vision API クライアント
pub struct VisionClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl VisionClient {
    /// クライアント生成
    ///
    /// 接続先は `VISION_BASE_URL` 環境変数があればそちらを使う。
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url =
            env::var(VISION_BASE_URL_ENV).unwrap_or_else(|_| VISION_API_BASE_URL.to_string());
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn build_request(image_base64: &str) -> AnnotateRequest<'_> {
        AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: strip_data_url_prefix(image_base64),
                },
                features: vec![
                    Feature {
                        kind: "LABEL_DETECTION",
                        max_results: LABEL_MAX_RESULTS,
                    },
                    Feature {
                        kind: "OBJECT_LOCALIZATION",
                        max_results: OBJECT_MAX_RESULTS,
                    },
                ],
            }],
        }
    }
}

/// レスポンスを注釈セットに変換（先頭レスポンスのみ使用）
fn into_annotation_sets(response: AnnotateResponse) -> Result<AnnotationSets> {
    let Some(first) = response.responses.into_iter().next() else {
        return Ok(AnnotationSets::default());
    };

    if let Some(err) = first.error {
        return Err(WasteSortError::LabelingService(err.message));
    }

    Ok(AnnotationSets {
        labels: first.label_annotations.map(|labels| {
            labels
                .into_iter()
                .map(|l| Annotation::new(l.description, l.score))
                .collect()
        }),
        objects: first.localized_object_annotations.map(|objects| {
            objects
                .into_iter()
                .map(|o| Annotation::new(o.name, o.score))
                .collect()
        }),
    })
}

#[async_trait]
impl ImageLabeler for VisionClient {
    async fn label(&self, image_base64: &str) -> Result<AnnotationSets> {
        let url = format!("{}/images:annotate?key={}", self.base_url, self.api_key);
        let request = Self::build_request(image_base64);

        tracing::debug!(base_url = %self.base_url, "Sending image to Vision API");

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WasteSortError::LabelingService(format!(
                "Unexpected status {}: {}",
                status, body
            )));
        }

        let payload: AnnotateResponse = response.json().await.map_err(|e| {
            WasteSortError::LabelingService(format!("Failed to deserialize response: {}", e))
        })?;
        let sets = into_annotation_sets(payload)?;

        tracing::debug!(
            labels = sets.labels.as_ref().map_or(0, Vec::len),
            objects = sets.objects.as_ref().map_or(0, Vec::len),
            "Vision API annotations received"
        );

        Ok(sets)
    }
}
