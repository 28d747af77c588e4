use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set. `--verbose` wins over a level
/// taken from the config file.
pub fn default_filter(verbose: bool, config_level: Option<&str>) -> String {
    if verbose {
        "factor_table=debug,info".to_string()
    } else if let Some(level) = config_level {
        format!("factor_table={}", level.to_ascii_lowercase())
    } else {
        "factor_table=info".to_string()
    }
}

pub fn init_cli_logger(verbose: bool, config_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, config_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
