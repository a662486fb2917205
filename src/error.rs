use thiserror::Error;

#[derive(Error, Debug)]
pub enum WasteSortError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("{service} API key is not set. Set it with `waste-sort config` or export {env_var}")]
    MissingApiKey {
        service: &'static str,
        env_var: &'static str,
    },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    /// 画像から何も検出できなかった（ユーザーに再撮影を促す）
    #[error("No item detected in image. Please try again")]
    NoDetections,

    #[error("Generation service error: {0}")]
    GenerationService(String),

    #[error("Image labeling service error: {0}")]
    LabelingService(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] waste_sort_common::Error),
}

impl WasteSortError {
    /// 呼び出し側に返すべき終端エラーか（フォールバックで吸収しない）
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WasteSortError::NoDetections
                | WasteSortError::Common(waste_sort_common::Error::NoDetections)
        )
    }
}

pub type Result<T> = std::result::Result<T, WasteSortError>;
