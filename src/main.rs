use clap::Parser;
use factor_table::utils::error::ErrorSeverity;
use factor_table::utils::{logger, validation::Validate};
use factor_table::{confirmation_message, CliConfig, LocalStorage, TableEngine, TablePipeline, TomlConfig};

fn main() {
    let mut config = CliConfig::parse();

    // The config file is read before logging starts since it may set the level
    let file_config = match config.config.as_deref().map(|path| TomlConfig::from_file(path)) {
        Some(Ok(file)) => Some(file),
        Some(Err(e)) => {
            eprintln!("❌ Failed to load config file: {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
        None => None,
    };

    logger::init_cli_logger(
        config.verbose,
        file_config.as_ref().and_then(|f| f.log_level()),
    );

    tracing::info!("Starting factor-table");
    if let Some(file) = &file_config {
        if let Err(e) = file.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
        config.apply_file_defaults(file);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::current_dir();
    let pipeline = TablePipeline::new(storage, config);
    let engine = TableEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(output_path) => {
            tracing::debug!("Wrote {}", output_path);
            println!("{}", confirmation_message());
        }
        Err(e) => {
            tracing::error!(
                "❌ Render failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::High => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
