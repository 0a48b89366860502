//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use nbexport_core::{ExportError, ExportSummary};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// One row of the notebook listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookRow {
    pub name: String,
    pub folder: String,
    pub notes: usize,
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report a finished export
    pub fn print_summary(&self, summary: &ExportSummary) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "✓ Your notes were exported to \"{}\".",
                    summary.output_root.display()
                );
                println!(
                    "  {} note(s) in {} notebook folder(s), {} template(s) skipped",
                    summary.notes_exported, summary.notebooks_processed, summary.templates_skipped
                );
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "summary": summary})
                );
            }
            OutputFormat::Quiet => {
                println!("{}", summary.output_root.display());
            }
        }
    }

    /// Report a failed export on stdout in JSON mode
    ///
    /// The other modes leave reporting to the error returned from `main`,
    /// which goes to stderr.
    pub fn print_export_error(&self, error: &ExportError) {
        if self.format == OutputFormat::Json {
            println!(
                "{}",
                serde_json::json!({
                    "status": "error",
                    "path": error.path().display().to_string(),
                    "message": error.user_message(),
                    "detail": error.to_string(),
                })
            );
        }
    }

    /// Print notebooks with their note counts
    pub fn print_notebooks(&self, notebooks: &[NotebookRow], unfiled: usize) {
        match self.format {
            OutputFormat::Human => {
                if notebooks.is_empty() {
                    println!("No notebooks found.");
                }
                for row in notebooks {
                    if row.folder == row.name {
                        println!("{} ({})", row.name, row.notes);
                    } else {
                        println!("{} ({}) -> {}/", row.name, row.notes, row.folder);
                    }
                }
                println!("\n{} notebook(s), {} unfiled note(s)", notebooks.len(), unfiled);
            }
            OutputFormat::Json => {
                let json_notebooks: Vec<_> = notebooks
                    .iter()
                    .map(|row| {
                        serde_json::json!({
                            "name": row.name,
                            "folder": row.folder,
                            "count": row.notes
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::json!({"notebooks": json_notebooks, "unfiled": unfiled})
                );
            }
            OutputFormat::Quiet => {
                for row in notebooks {
                    println!("{}", row.name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// The message shown when an export fails
pub fn export_error_message(error: &ExportError) -> String {
    format!(
        "Could not save the files in \"{}\": {}",
        error.path().display(),
        error.user_message()
    )
}
