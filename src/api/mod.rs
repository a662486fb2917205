//! 外部サービス連携
//!
//! 画像認識（Google Cloud Vision）と文章生成（Gemini）の境界。
//! 分類パイプラインはトレイト越しに呼び出すため、テストではスタブに差し替えられる。

pub mod gemini;
pub mod vision;

use crate::error::Result;
use async_trait::async_trait;
use waste_sort_common::{AnnotationSets, GenerationSettings};

pub use gemini::GeminiClient;
pub use vision::VisionClient;

/// 画像ラベル付けサービス
#[async_trait]
pub trait ImageLabeler: Send + Sync {
    /// Base64画像（Data URL可）からラベル・物体の注釈を取得
    async fn label(&self, image_base64: &str) -> Result<AnnotationSets>;
}

/// 文章生成サービス
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// プロンプトを送り、生成テキスト（先頭候補の先頭パート）を返す
    async fn generate(&self, prompt: &str, settings: GenerationSettings) -> Result<String>;
}

/// Data URL の `data:image/...;base64,` 部分を取り除く
pub fn strip_data_url_prefix(image: &str) -> &str {
    if image.starts_with("data:") {
        image.split_once(',').map(|(_, data)| data).unwrap_or(image)
    } else {
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,/9j/4AAQ"), "/9j/4AAQ");
        assert_eq!(strip_data_url_prefix("/9j/4AAQ"), "/9j/4AAQ");
    }
}
