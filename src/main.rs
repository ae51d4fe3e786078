use clap::Parser;
use product_filter::core::engine::open_session;
use product_filter::utils::error::FilterError;
use product_filter::utils::{logger, validation::Validate};
use product_filter::{CliConfig, FilterEngine, Shell};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting product-filter CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = if config.interactive {
        run_interactive(&config)
    } else {
        let engine = FilterEngine::new(config);
        engine.run(&mut std::io::stdout().lock()).map(|report| {
            tracing::debug!("Run finished: {:?}", report);
            if let Some(path) = report.output_path {
                println!("📁 Output saved to: {}", path);
            }
        })
    };

    if let Err(e) = result {
        exit_with(e);
    }
}

fn run_interactive(config: &CliConfig) -> product_filter::Result<()> {
    let Some(mut session) = open_session(&config.data)? else {
        return Ok(());
    };
    product_filter::core::engine::apply_selection(&mut session, config)?;

    let mut shell = Shell::new(session, config.format);
    let stdin = std::io::stdin();
    shell.run(stdin.lock(), &mut std::io::stdout().lock())
}

fn exit_with(e: FilterError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Product filter failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}
