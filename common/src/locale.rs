//! 地域別の分別ビン対応
//!
//! (カテゴリ, 地域) → 表示色・ビン名・収集日 の静的テーブルと、
//! プロセス全体で共有する現在地域の設定。

use crate::error::{Error, Result};
use crate::types::WasteCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

/// 未登録時の表示色
pub const UNKNOWN_BIN_COLOR: &str = "#6b7280";
/// 未登録時のビン名
pub const UNKNOWN_BIN_NAME: &str = "Unknown Bin";
/// 未登録時の収集日
pub const UNKNOWN_PICKUP_SCHEDULE: &str = "Check local schedule";

/// 対応地域
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Germany,
    India,
    Usa,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Germany, Locale::India, Locale::Usa];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Germany => "germany",
            Locale::India => "india",
            Locale::Usa => "usa",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::Germany => "Germany",
            Locale::India => "India",
            Locale::Usa => "USA",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Locale::Germany => "🇩🇪",
            Locale::India => "🇮🇳",
            Locale::Usa => "🇺🇸",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Locale::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == key)
            .ok_or_else(|| Error::UnknownLocale(s.to_string()))
    }
}

/// 表示用ビン情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinDisplay {
    pub display_color: &'static str,
    pub display_name: &'static str,
    pub pickup_schedule: &'static str,
}

impl BinDisplay {
    /// 未登録の組み合わせに返す既定値
    pub const UNKNOWN: BinDisplay = BinDisplay {
        display_color: UNKNOWN_BIN_COLOR,
        display_name: UNKNOWN_BIN_NAME,
        pickup_schedule: UNKNOWN_PICKUP_SCHEDULE,
    };

    pub fn is_unknown(&self) -> bool {
        self.display_name == UNKNOWN_BIN_NAME
    }
}

/// (色, ビン名)
fn bin_entry(locale: Locale, category: WasteCategory) -> (&'static str, &'static str) {
    use WasteCategory::*;

    match (locale, category) {
        (Locale::Germany, Paper) => ("#3b82f6", "Blue Bin"),
        (Locale::Germany, Plastics) => ("#fbbf24", "Yellow Bin"),
        (Locale::Germany, Bio) => ("#92400e", "Brown Bin"),
        (Locale::Germany, Glass) => ("#10b981", "Green Igloo"),
        (Locale::Germany, Residual) => ("#6b7280", "Gray Bin"),
        (Locale::Germany, Ewaste) => ("#ef4444", "E-Waste Collection"),

        (Locale::India, Paper) => ("#3b82f6", "Blue Bin"),
        (Locale::India, Plastics) => ("#fbbf24", "Yellow Bin"),
        (Locale::India, Bio) => ("#10b981", "Green Bin (Wet)"),
        (Locale::India, Glass) => ("#ffffff", "White Bin"),
        (Locale::India, Residual) => ("#000000", "Black Bin (Dry)"),
        (Locale::India, Ewaste) => ("#ef4444", "E-Waste Center"),

        (Locale::Usa, Paper) => ("#3b82f6", "Blue Recycling"),
        (Locale::Usa, Plastics) => ("#3b82f6", "Blue Recycling"),
        (Locale::Usa, Bio) => ("#92400e", "Brown Compost"),
        (Locale::Usa, Glass) => ("#3b82f6", "Blue Recycling"),
        (Locale::Usa, Residual) => ("#000000", "Black Trash"),
        (Locale::Usa, Ewaste) => ("#ef4444", "Special Pickup"),
    }
}

/// 収集日（未定義の組み合わせあり）
fn pickup_entry(locale: Locale, category: WasteCategory) -> Option<&'static str> {
    use WasteCategory::*;

    match (locale, category) {
        (Locale::Germany, Paper) => Some("Every 2nd Wednesday"),
        (Locale::Germany, Plastics) => Some("Every Thursday"),
        (Locale::Germany, Bio) => Some("Monday & Friday"),
        (Locale::Germany, Residual) => Some("Tuesday"),

        (Locale::India, Bio) => Some("Daily"),
        (Locale::India, Residual) => Some("Daily"),
        (Locale::India, Plastics) => Some("Tuesday & Friday"),
        (Locale::India, Paper) => Some("Wednesday"),

        (Locale::Usa, Residual) => Some("Monday & Thursday"),
        (Locale::Usa, Paper) => Some("Wednesday"),
        (Locale::Usa, Bio) => Some("Friday"),

        _ => None,
    }
}

/// 地域を指定してビン情報を取得
///
/// 収集日が未定義の場合は "Check local schedule" を返す。
pub fn bin_for(category: WasteCategory, locale: Locale) -> BinDisplay {
    let (display_color, display_name) = bin_entry(locale, category);
    BinDisplay {
        display_color,
        display_name,
        pickup_schedule: pickup_entry(locale, category).unwrap_or(UNKNOWN_PICKUP_SCHEDULE),
    }
}

/// 地域名（文字列）からビン情報を取得
///
/// 未知の地域名は失敗せず `BinDisplay::UNKNOWN` を返す。
pub fn bin_info(category: WasteCategory, locale_name: &str) -> BinDisplay {
    match locale_name.parse::<Locale>() {
        Ok(locale) => bin_for(category, locale),
        Err(_) => BinDisplay::UNKNOWN,
    }
}

/// プロセス全体で共有する現在地域
///
/// 書き込みはユーザー操作の1箇所のみ、読み込みは多数。
/// 値はCopyの列挙型を丸ごと差し替えるため、読み手は旧値か新値のどちらかを見る。
#[derive(Debug, Default)]
pub struct LocaleSettings {
    current: RwLock<Locale>,
}

impl LocaleSettings {
    pub fn new(initial: Locale) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// 現在の地域
    pub fn current(&self) -> Locale {
        match self.current.read() {
            Ok(guard) => *guard,
            // 書き手がpanicしても値自体は常に完全
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// 地域を差し替え（後勝ち）
    pub fn set(&self, locale: Locale) {
        match self.current.write() {
            Ok(mut guard) => *guard = locale,
            Err(poisoned) => *poisoned.into_inner() = locale,
        }
    }

    /// 地域名で差し替え。未知の地域名は変更せずエラー
    pub fn set_by_name(&self, name: &str) -> Result<Locale> {
        let locale = name.parse::<Locale>()?;
        self.set(locale);
        Ok(locale)
    }

    /// 現在地域でビン情報を取得
    pub fn bin(&self, category: WasteCategory) -> BinDisplay {
        bin_for(category, self.current())
    }
}
