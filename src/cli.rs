use clap::{Parser, Subcommand};
use std::path::PathBuf;
use waste_sort_common::{Locale, WasteCategory};

#[derive(Parser)]
#[command(name = "waste-sort")]
#[command(about = "ごみ分別ガイド: 写真・テキストから分類し地域の分別ビンを案内", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真から品目を分類
    Classify {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 生成AIによる補足情報を付けない
        #[arg(long)]
        no_enhance: bool,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 地域 (germany/india/usa)、省略時は設定値
        #[arg(short, long, value_parser = parse_locale)]
        locale: Option<Locale>,
    },

    /// 品目名で検索
    Search {
        /// 検索語
        #[arg(required = true)]
        query: String,

        /// ローカル品目のみ検索（外部サービスを使わない）
        #[arg(long)]
        local: bool,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// バーコードから品目を検索
    Barcode {
        /// バーコード番号
        #[arg(required = true)]
        code: String,
    },

    /// アップサイクル案を生成
    Upcycle {
        /// 品目名
        #[arg(required = true)]
        item: String,

        /// カテゴリ (plastics/paper/bio/glass/ewaste/residual)
        #[arg(short, long, value_parser = parse_category, default_value = "residual")]
        category: WasteCategory,

        /// 材料・手順つきの詳細企画を生成
        #[arg(short, long)]
        detailed: bool,
    },

    /// 地域の分別ビン一覧
    Bins {
        /// 地域 (germany/india/usa)、省略時は設定値
        #[arg(short, long, value_parser = parse_locale)]
        locale: Option<Locale>,
    },

    /// 地域を設定（省略時は対話選択）
    Locale {
        /// 地域名 (germany/india/usa)
        #[arg(value_parser = parse_locale)]
        name: Option<Locale>,
    },

    /// 設定
    Config {
        /// Google Vision APIキーを設定
        #[arg(long)]
        set_vision_key: Option<String>,

        /// Gemini APIキーを設定
        #[arg(long)]
        set_gemini_key: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    s.parse::<Locale>().map_err(|e| e.to_string())
}

fn parse_category(s: &str) -> Result<WasteCategory, String> {
    s.to_lowercase()
        .parse::<WasteCategory>()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify() {
        let cli = Cli::parse_from(["waste-sort", "classify", "can.jpg", "--json", "-l", "usa"]);
        match cli.command {
            Commands::Classify { image, no_enhance, json, locale } => {
                assert_eq!(image, PathBuf::from("can.jpg"));
                assert!(!no_enhance);
                assert!(json);
                assert_eq!(locale, Some(Locale::Usa));
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_parse_upcycle_category() {
        let cli = Cli::parse_from(["waste-sort", "upcycle", "jar", "-c", "Glass", "--detailed"]);
        match cli.command {
            Commands::Upcycle { item, category, detailed } => {
                assert_eq!(item, "jar");
                assert_eq!(category, WasteCategory::Glass);
                assert!(detailed);
            }
            _ => panic!("expected upcycle"),
        }
    }

    #[test]
    fn test_unknown_locale_rejected() {
        assert!(Cli::try_parse_from(["waste-sort", "bins", "--locale", "mars"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
