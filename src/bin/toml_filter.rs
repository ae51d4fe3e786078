use clap::Parser;
use product_filter::config::toml_config::TomlConfig;
use product_filter::domain::model::OutputFormat;
use product_filter::domain::ports::ConfigProvider;
use product_filter::utils::{logger, validation::Validate};
use product_filter::FilterEngine;

#[derive(Parser)]
#[command(name = "toml-filter")]
#[command(about = "Product filter with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "filter-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output format from config
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Dry run - show the configuration without filtering
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose || config.log_level() == Some("debug"));
    }

    tracing::info!("🚀 Starting TOML-based product filter");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(format) = args.format {
        config.set_output_format(format);
        tracing::info!("🔧 Output format overridden to: {:?}", format);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if args.dry_run {
        display_config_summary(&config);
        tracing::info!("🔍 DRY RUN MODE - No filtering will occur");
        return;
    }

    let engine = FilterEngine::new(config);

    match engine.run(&mut std::io::stdout().lock()) {
        Ok(report) => {
            tracing::info!("✅ {} of {} products shown", report.matched, report.total);
            if let Some(path) = report.output_path {
                println!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Product filter failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Datastore: {}", config.datastore_path());
    match config.property() {
        Some(property) => println!("  Property: {}", property),
        None => println!("  Property: -"),
    }
    println!("  Operator: {}", config.operator().unwrap_or("-"));
    if !config.input().is_empty() {
        println!("  Input: {}", config.input().join(", "));
    }
    println!("  Format: {:?}", config.output_format());
    if let Some(path) = config.output_path() {
        println!("  Output: {}", path);
    }
}
