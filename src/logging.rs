//! Tracing subscriber setup for the CLI

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects `debug` and the
/// configured level applies.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(directive(config, verbose, env.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| anyhow!("tracing init failed: {e}"))
}

/// Filter directive to install, given the value of `RUST_LOG` if set
fn directive(config: &LoggingConfig, verbose: bool, env: Option<&str>) -> String {
    match env.map(str::trim) {
        Some(env) if !env.is_empty() => env.to_string(),
        _ if verbose => "debug".to_string(),
        _ => config.level.clone(),
    }
}
