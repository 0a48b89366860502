//! nbexport CLI
//!
//! Command-line interface for nbexport - bulk export of notes, organized by
//! notebook.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use nbexport_core::{Config, ExportFormat};

mod commands;
mod logging;
mod output;

use commands::export::ExportRequest;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "nbexport")]
#[command(about = "Export notes to files, one folder per notebook")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging for nbexport (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export notes into a folder tree
    Export {
        /// Notes to export: a JSON array file, or a directory of JSON notes
        source: PathBuf,
        /// Destination folder (defaults to the last export directory)
        output: Option<PathBuf>,
        /// Output format: txt, html or json
        #[arg(short, long)]
        format: Option<ExportFormat>,
        /// Export only this notebook, directly into the destination
        #[arg(short, long, conflicts_with = "unfiled")]
        notebook: Option<String>,
        /// Export only notes without a notebook
        #[arg(short, long)]
        unfiled: bool,
    },
    /// List notebooks and their note counts
    #[command(alias = "ls")]
    Notebooks {
        /// Notes to inspect
        source: PathBuf,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (last_export_dir, default_format, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    let (config, config_error) = load_config(config_path);
    logging::init_logging(&config, cli.verbose);
    if let Some(e) = config_error {
        warn!("Ignoring unreadable configuration: {:#}", e);
    }

    match cli.command {
        Commands::Export {
            source,
            output: destination,
            format,
            notebook,
            unfiled,
        } => commands::export::run(
            ExportRequest {
                source,
                destination,
                format,
                notebook,
                unfiled,
            },
            config_path,
            &output,
        ),
        Commands::Notebooks { source } => commands::notebooks::list(&source, &output),
        Commands::Config { command } => handle_config_command(command, config_path, &output),
    }
}

/// Configuration for logging setup; a broken file falls back to defaults
/// and hands back the error so it can be logged once logging is up
fn load_config(config_path: Option<&PathBuf>) -> (Config, Option<anyhow::Error>) {
    match Config::load_with_cli_override(config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_reports_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "default_format = [").unwrap();

        let (config, error) = load_config(Some(&config_path));
        assert_eq!(config.default_format, ExportFormat::default());
        assert!(error.is_some());
    }

    #[test]
    fn test_load_config_missing_file_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("absent.toml");

        let (_, error) = load_config(Some(&config_path));
        assert!(error.is_none());
    }
}
