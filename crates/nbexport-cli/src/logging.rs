//! Logging setup
//!
//! `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
//! output for the nbexport crates with `--verbose`. Logs go to
//! `config.log_file` when configured, else stderr.

use std::fs::OpenOptions;

use nbexport_core::Config;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
pub fn init_logging(config: &Config, verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!(
            "warn,nbexport_core={},nbexport_cli={}",
            level, level
        ))
    });

    if let Some(log_path) = &config.log_file {
        match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(log_file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(log_file)
                    .try_init();
                return;
            }
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            }
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
