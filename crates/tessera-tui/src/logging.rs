//! Tracing subscriber setup
//!
//! A terminal UI owns stdout, so log lines go to stderr or to a file.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;

/// Filter directive for this crate, merged with `RUST_LOG`.
///
/// An explicit `RUST_LOG` mentioning this crate wins; otherwise its
/// directives are kept and the configured level is appended for this crate.
pub fn filter_directive(level: &str, env_override: &str) -> String {
    let default_directive = format!("tessera_tui={}", level.to_lowercase());
    if env_override.trim().is_empty() {
        default_directive
    } else if env_override.contains("tessera_tui") {
        env_override.to_string()
    } else {
        format!("{},{}", env_override, default_directive)
    }
}

/// Install the global subscriber.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_override = std::env::var("RUST_LOG").unwrap_or_default();
    let filter = filter_directive(&config.level, &env_override);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}
