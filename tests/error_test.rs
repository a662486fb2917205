//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use std::path::Path;
use tempfile::tempdir;
use waste_sort::error::WasteSortError;
use waste_sort::load_image_base64;

/// 存在しない画像を読み込んだ場合
#[test]
fn test_load_nonexistent_image() {
    let result = load_image_base64(Path::new("/nonexistent/path/12345.jpg"));

    let err = result.unwrap_err();
    assert!(matches!(err, WasteSortError::FileNotFound(_)));
}

/// 空の画像ファイル
#[test]
fn test_load_empty_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("blank.png");
    std::fs::write(&path, b"").unwrap();

    let err = load_image_base64(&path).unwrap_err();
    assert!(matches!(err, WasteSortError::ImageLoad(_)));
}

/// WasteSortErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        WasteSortError::Config("bad config".to_string()),
        WasteSortError::FileNotFound("item.jpg".to_string()),
        WasteSortError::ImageLoad("item.jpg".to_string()),
        WasteSortError::NoDetections,
        WasteSortError::GenerationService("503".to_string()),
        WasteSortError::LabelingService("403".to_string()),
        WasteSortError::Validation("category".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let err = WasteSortError::MissingApiKey {
        service: "Gemini",
        env_var: "GEMINI_API_KEY",
    };
    let display = format!("{}", err);

    assert!(display.contains("Gemini API key"));
    assert!(display.contains("waste-sort config"));
    assert!(display.contains("GEMINI_API_KEY"));
}

/// 検出ゼロはユーザー向けの文言で表示される
#[test]
fn test_no_detections_message() {
    let err = WasteSortError::NoDetections;
    assert_eq!(format!("{}", err), "No item detected in image. Please try again");

    let from_common = WasteSortError::from(waste_sort_common::Error::NoDetections);
    assert!(from_common.is_terminal());
}

/// 検出ゼロのみが終端エラー
#[test]
fn test_terminal_errors() {
    assert!(WasteSortError::NoDetections.is_terminal());
    assert!(WasteSortError::from(waste_sort_common::Error::NoDetections).is_terminal());
    assert!(!WasteSortError::LabelingService("timeout".into()).is_terminal());
    assert!(!WasteSortError::from(waste_sort_common::Error::Parse("x".into())).is_terminal());
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: WasteSortError = io_err.into();

    assert!(matches!(err, WasteSortError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: WasteSortError = json_err.into();

    assert!(matches!(err, WasteSortError::JsonParse(_)));
}

/// common::Errorは透過的に表示される
#[test]
fn test_common_error_transparent() {
    let common_err = waste_sort_common::Error::UnknownLocale("mars".to_string());
    let err: WasteSortError = common_err.into();

    assert!(matches!(err, WasteSortError::Common(_)));
    assert!(format!("{}", err).contains("mars"));
}
