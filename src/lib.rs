//! waste-sort
//!
//! 写真またはテキストから廃棄物を分類し、地域ごとの分別ビンと
//! 処理方法を案内するライブラリとCLI。

pub mod api;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;

pub use classifier::{
    classify_image, classify_text, enhance, load_image_base64, upcycling_ideas,
    upcycling_projects,
};
