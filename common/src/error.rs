//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// ラベル・オブジェクトのどちらも検出されなかった（リクエスト終端）
    #[error("No labels or objects detected in image")]
    NoDetections,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown waste category: {0}")]
    UnknownCategory(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
