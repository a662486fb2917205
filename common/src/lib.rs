//! Waste Sort Common Library
//!
//! CLIとライブラリ利用側で共有される型・静的テーブル・分類ロジック
//! （ネットワークアクセスなし）

pub mod types;
pub mod error;
pub mod keywords;
pub mod knowledge;
pub mod detection;
pub mod resolver;
pub mod prompts;
pub mod parser;
pub mod fallback;
pub mod locale;
pub mod search;

pub use types::{
    Annotation, AnnotationSets, ClassificationResult, Detection, EnhancedResult,
    GeneratedGuidance, GeneratedSearchInfo, UpcyclingProject, WasteCategory,
};
pub use error::{Error, Result};
pub use detection::{normalize_detections, normalize_sets};
pub use resolver::{capitalize_words, resolve};
pub use prompts::GenerationSettings;
pub use parser::{
    extract_json_array, extract_json_object, parse_guidance_response, parse_ideas_response,
    parse_projects_response, parse_search_response,
};
pub use locale::{bin_for, bin_info, BinDisplay, Locale, LocaleSettings};
pub use knowledge::lookup_barcode;
pub use search::{format_local_item, search_local_items, suggestions};
