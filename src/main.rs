use clap::Parser;
use dialoguer::Select;
use tracing_subscriber::EnvFilter;
use waste_sort::api::{GeminiClient, VisionClient};
use waste_sort::{classifier, cli, config, error};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, WasteSortError};
use waste_sort_common::{
    format_local_item, lookup_barcode, search_local_items, suggestions, ClassificationResult,
    EnhancedResult, Locale, LocaleSettings, WasteCategory,
};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        // Debug表記ではなくエラーメッセージをそのまま表示
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let settings = LocaleSettings::new(config.effective_locale());

    match cli.command {
        Commands::Classify { image, no_enhance, json, locale } => {
            if let Some(locale) = locale {
                settings.set(locale);
            }

            if !json {
                println!("📷 waste-sort - 画像分類\n");
                println!("[1/2] 画像を解析中...");
            }

            let image_base64 = classifier::load_image_base64(&image)?;
            let labeler = VisionClient::new(config.vision_api_key()?, config.timeout())?;
            let classification = classifier::classify_image(&labeler, &image_base64).await?;

            let result = if no_enhance {
                None
            } else {
                if !json {
                    println!("[2/2] 処理方法を生成中...");
                }
                let generator = gemini_client(&config)?;
                Some(classifier::enhance(&generator, &classification).await)
            };

            if json {
                let output = match &result {
                    Some(enhanced) => serde_json::to_string_pretty(enhanced)?,
                    None => serde_json::to_string_pretty(&classification)?,
                };
                println!("{}", output);
            } else {
                match &result {
                    Some(enhanced) => print_enhanced(enhanced, &settings),
                    None => print_classification(&classification, &settings),
                }
            }
        }

        Commands::Search { query, local, json } => {
            let query = query.trim().to_string();
            if query.is_empty() {
                return Err(WasteSortError::Validation("search query is empty".into()));
            }

            let result = if local {
                let Some(best) = search_local_items(&query).into_iter().next() else {
                    println!("ローカル品目に一致しません: {}", query);
                    let names: Vec<&str> = suggestions(&query).iter().map(|s| s.name).collect();
                    if !names.is_empty() {
                        println!("候補: {}", names.join(", "));
                    }
                    return Ok(());
                };
                format_local_item(best.entry)
            } else {
                let generator = gemini_client(&config)?;
                classifier::classify_text(&generator, &query).await
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("🔍 waste-sort - 検索: {}\n", query);
                print_enhanced(&result, &settings);
            }
        }

        Commands::Barcode { code } => {
            println!("🏷️  waste-sort - バーコード: {}\n", code);
            let result = lookup_barcode(code.trim());
            print_classification(&result, &settings);
        }

        Commands::Upcycle { item, category, detailed } => {
            println!("♻️  waste-sort - アップサイクル: {}\n", item);
            let generator = gemini_client(&config)?;

            if detailed {
                let projects = classifier::upcycling_projects(&generator, &item).await;
                for (i, project) in projects.iter().enumerate() {
                    println!("{}. {} [{} / {}]", i + 1, project.title, project.difficulty, project.time);
                    println!("   材料: {}", project.materials.join(", "));
                    for (n, step) in project.instructions.iter().enumerate() {
                        println!("   {}) {}", n + 1, step);
                    }
                    println!("   効果: {}\n", project.impact);
                }
            } else {
                let ideas = classifier::upcycling_ideas(&generator, &item, category).await;
                if ideas.is_empty() {
                    println!("アイデアを生成できませんでした");
                }
                for (i, idea) in ideas.iter().enumerate() {
                    println!("{}. {}", i + 1, idea);
                }
            }
        }

        Commands::Bins { locale } => {
            if let Some(locale) = locale {
                settings.set(locale);
            }
            let current = settings.current();
            println!("{} {} の分別ビン\n", current.flag(), current.display_name());

            for category in WasteCategory::ALL {
                let bin = settings.bin(category);
                println!(
                    "  {:<9} {} ({}) - {}",
                    category.as_str(),
                    bin.display_name,
                    bin.display_color,
                    bin.pickup_schedule
                );
            }
        }

        Commands::Locale { name } => {
            let locale = match name {
                Some(locale) => locale,
                None => select_locale(settings.current())?,
            };

            let mut config = config;
            config.locale = locale;
            config.save()?;
            settings.set(locale);
            println!("✔ 地域を設定しました: {} {}", locale.flag(), locale.display_name());
        }

        Commands::Config { set_vision_key, set_gemini_key, show } => {
            let mut config = config;

            if set_vision_key.is_some() || set_gemini_key.is_some() {
                if let Some(key) = set_vision_key {
                    config.vision_api_key = Some(key);
                }
                if let Some(key) = set_gemini_key {
                    config.gemini_api_key = Some(key);
                }
                config.save()?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                let state = |set: bool| if set { "設定済み" } else { "未設定" };
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  モデル: {}", config.gemini_model);
                println!("  地域: {}", config.effective_locale().display_name());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  Vision APIキー: {}", state(config.vision_api_key().is_ok()));
                println!("  Gemini APIキー: {}", state(config.gemini_api_key().is_ok()));
            }
        }
    }

    Ok(())
}

fn gemini_client(config: &Config) -> Result<GeminiClient> {
    GeminiClient::new(config.gemini_api_key()?, &config.gemini_model, config.timeout())
}

fn select_locale(current: Locale) -> Result<Locale> {
    let items: Vec<String> = Locale::ALL
        .iter()
        .map(|l| format!("{} {}", l.flag(), l.display_name()))
        .collect();
    let default = Locale::ALL.iter().position(|l| *l == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("地域を選択")
        .items(&items)
        .default(default)
        .interact()
        .map_err(|e| WasteSortError::Config(format!("locale selection failed: {}", e)))?;

    Ok(Locale::ALL[selection])
}

fn print_classification(result: &ClassificationResult, settings: &LocaleSettings) {
    let bin = settings.bin(result.category);

    println!("品目: {}", result.name);
    println!("カテゴリ: {} ({:.0}%)", result.category, result.confidence * 100.0);
    println!("分別ビン: {} {} - {}", bin.display_name, bin.display_color, bin.pickup_schedule);
    if result.contaminated {
        println!("⚠️  有害物として扱ってください");
    }

    if !result.preparation_steps.is_empty() {
        println!("\n出す前に:");
        for step in &result.preparation_steps {
            println!("  - {}", step);
        }
    }
    if let Some(tip) = &result.upcycling_tip {
        println!("\n💡 {}", tip);
    }
    if !result.detected_labels.is_empty() {
        println!("\n検出ラベル: {}", result.detected_labels.join(", "));
    }
    if !result.ai_generated {
        println!("\n(AI生成ではない既定の案内です)");
    }
}

fn print_enhanced(result: &EnhancedResult, settings: &LocaleSettings) {
    print_classification(&result.classification, settings);

    if let Some(impact) = &result.environmental_impact {
        println!("\n🌍 {}", impact);
    }
    if let Some(instructions) = &result.disposal_instructions {
        println!("🗑️  {}", instructions);
    }
}
