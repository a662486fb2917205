use crate::error::{Result, WasteSortError};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use waste_sort_common::Locale;

pub const VISION_API_KEY_ENV: &str = "GOOGLE_VISION_API_KEY";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const LOCALE_ENV: &str = "WASTE_SORT_LOCALE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vision_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    #[serde(deserialize_with = "deserialize_locale_lenient")]
    pub locale: Locale,
    /// 外部API呼び出し1回あたりのタイムアウト
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision_api_key: None,
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash-exp".into(),
            locale: Locale::Germany,
            timeout_seconds: 15,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WasteSortError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("waste-sort").join("config.json"))
    }

    pub fn vision_api_key(&self) -> Result<String> {
        // 環境変数を優先
        resolve_key(VISION_API_KEY_ENV, self.vision_api_key.as_deref()).ok_or(
            WasteSortError::MissingApiKey {
                service: "Google Vision",
                env_var: VISION_API_KEY_ENV,
            },
        )
    }

    pub fn gemini_api_key(&self) -> Result<String> {
        resolve_key(GEMINI_API_KEY_ENV, self.gemini_api_key.as_deref()).ok_or(
            WasteSortError::MissingApiKey {
                service: "Gemini",
                env_var: GEMINI_API_KEY_ENV,
            },
        )
    }

    /// 地域（環境変数 > 設定ファイル）
    pub fn effective_locale(&self) -> Locale {
        std::env::var(LOCALE_ENV)
            .ok()
            .and_then(|v| v.parse::<Locale>().ok())
            .unwrap_or(self.locale)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds.max(1))
    }
}

/// 未知の地域名は既定の地域に置き換える（設定ファイル全体は読み込める）
fn deserialize_locale_lenient<'de, D>(deserializer: D) -> std::result::Result<Locale, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw.as_str().map(str::parse::<Locale>) {
        Some(Ok(locale)) => Ok(locale),
        _ => {
            tracing::warn!(locale = %raw, "Unknown locale in config; using default");
            Ok(Locale::default())
        }
    }
}

fn resolve_key(env_var: &str, stored: Option<&str>) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| stored.map(str::to_string))
        .filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.locale, Locale::Germany);
        assert_eq!(config.timeout_seconds, 15);
        assert!(config.vision_api_key.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"locale": "india"}"#).unwrap();
        assert_eq!(config.locale, Locale::India);
        assert_eq!(config.gemini_model, "gemini-2.0-flash-exp");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_default() {
        let config: Config =
            serde_json::from_str(r#"{"locale": "france", "timeout_seconds": 20}"#).unwrap();
        assert_eq!(config.locale, Locale::Germany);
        assert_eq!(config.timeout_seconds, 20);

        let config: Config = serde_json::from_str(r#"{"locale": 3}"#).unwrap();
        assert_eq!(config.locale, Locale::Germany);
    }

    #[test]
    fn test_resolve_key_ignores_blank() {
        assert_eq!(
            resolve_key("WASTE_SORT_TEST_UNSET_KEY", Some("stored")),
            Some("stored".to_string())
        );
        assert_eq!(resolve_key("WASTE_SORT_TEST_UNSET_KEY", Some("  ")), None);
        assert_eq!(resolve_key("WASTE_SORT_TEST_UNSET_KEY", None), None);
    }
}
