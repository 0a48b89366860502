//! Export command handler
//!
//! Plays the host application's part around the export core: picks the
//! selection and destination, runs the export, remembers the destination
//! directory on success.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use nbexport_core::{Config, ExportFormat, Exporter, MemoryStore, NotebookRef, NotebookResolver};

use crate::output::{export_error_message, Output};

/// What to export and where
pub struct ExportRequest {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub notebook: Option<String>,
    pub unfiled: bool,
}

/// Run an export
pub fn run(request: ExportRequest, config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let store = MemoryStore::load(&request.source).context("Failed to load notes")?;

    let selection = select(&store, request.notebook.as_deref(), request.unfiled)?;
    let destination = request
        .destination
        .unwrap_or_else(|| default_destination(&config, &selection));
    let format = request.format.unwrap_or(config.default_format);
    debug!(
        "Export of {:?} as {} into {:?}",
        selection.display_name(),
        format,
        destination
    );

    let note_exporter = format.exporter();
    let exporter = Exporter::new(&store, note_exporter.as_ref());

    match exporter.export_notebook(&selection, &destination) {
        Ok(summary) => {
            config.remember_export(&summary.output_root);
            if let Err(e) = save_config(&config, config_path) {
                warn!("Could not remember export directory: {:#}", e);
            }
            output.print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            output.print_export_error(&e);
            let message = export_error_message(&e);
            Err(anyhow::Error::new(e).context(message))
        }
    }
}

/// Resolve the command-line selection to a notebook reference
fn select(store: &MemoryStore, notebook: Option<&str>, unfiled: bool) -> Result<NotebookRef> {
    if unfiled {
        return Ok(NotebookRef::Unfiled);
    }
    let Some(name) = notebook else {
        return Ok(NotebookRef::All);
    };

    let resolver = NotebookResolver::new(store);
    match NotebookRef::from_name(name, &resolver) {
        Some(selection) => Ok(selection),
        None => {
            let known: Vec<_> = resolver
                .notebooks()
                .iter()
                .map(|nb| nb.name().to_string())
                .collect();
            if known.is_empty() {
                bail!("Notebook not found: '{}' (the notes have no notebooks)", name);
            }
            bail!(
                "Notebook not found: '{}'\nKnown notebooks: {}",
                name,
                known.join(", ")
            );
        }
    }
}

/// `<last export dir or home>/<selection name>`
fn default_destination(config: &Config, selection: &NotebookRef) -> PathBuf {
    config
        .export_start_dir()
        .join(selection.display_name().replace(['/', '\\'], "_"))
}

fn save_config(config: &Config, config_path: Option<&PathBuf>) -> Result<()> {
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config.save_to_path(&save_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use nbexport_core::{Note, NoteStore, Tag};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_notes(dir: &Path) -> PathBuf {
        let notes = vec![
            Note::new("Standup").with_tag(Tag::notebook("Work").0),
            Note::new("Recipe").with_tag(Tag::notebook("Home").0),
            Note::new("Loose"),
            Note::new("Template")
                .with_tag(Tag::notebook("Work").0)
                .with_tag(Tag::template().0),
        ];
        let path = dir.join("notes.json");
        std::fs::write(&path, serde_json::to_string(&notes).unwrap()).unwrap();
        path
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_select() {
        let store: MemoryStore = vec![Note::new("a").with_tag(Tag::notebook("Work").0)]
            .into_iter()
            .collect();
        assert_eq!(store.note_count(), 1);

        assert_eq!(select(&store, None, false).unwrap(), NotebookRef::All);
        assert_eq!(select(&store, Some("Work"), true).unwrap(), NotebookRef::Unfiled);
        assert!(matches!(
            select(&store, Some("work"), false).unwrap(),
            NotebookRef::Notebook(_)
        ));

        let err = select(&store, Some("Garden"), false).unwrap_err();
        assert!(err.to_string().contains("Known notebooks: Work"));
    }

    #[test]
    fn test_default_destination() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            last_export_dir: Some(temp_dir.path().to_path_buf()),
            ..Config::default()
        };
        assert_eq!(
            default_destination(&config, &NotebookRef::Unfiled),
            temp_dir.path().join("Unfiled Notes")
        );
    }

    #[test]
    fn test_run_exports_and_remembers_directory() {
        let temp_dir = TempDir::new().unwrap();
        let source = write_notes(temp_dir.path());
        let config_path = temp_dir.path().join("config.toml");
        let destination = temp_dir.path().join("exports").join("all");

        run(
            ExportRequest {
                source,
                destination: Some(destination.clone()),
                format: Some(ExportFormat::Html),
                notebook: None,
                unfiled: false,
            },
            Some(&config_path),
            &quiet(),
        )
        .unwrap();

        assert!(destination.join("Work").join("Standup.html").exists());
        assert!(destination.join("Home").join("Recipe.html").exists());
        assert!(destination.join("Loose.html").exists());
        assert!(!destination.join("Work").join("Template.html").exists());

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.last_export_dir, Some(temp_dir.path().join("exports")));
    }

    #[test]
    fn test_run_single_notebook() {
        let temp_dir = TempDir::new().unwrap();
        let source = write_notes(temp_dir.path());
        let config_path = temp_dir.path().join("config.toml");
        let destination = temp_dir.path().join("work");

        run(
            ExportRequest {
                source,
                destination: Some(destination.clone()),
                format: Some(ExportFormat::Txt),
                notebook: Some("Work".to_string()),
                unfiled: false,
            },
            Some(&config_path),
            &quiet(),
        )
        .unwrap();

        assert!(destination.join("Standup.txt").exists());
        assert!(!destination.join("Work").exists());
        assert!(!destination.join("Recipe.txt").exists());
    }

    #[test]
    fn test_run_reports_export_failure() {
        let temp_dir = TempDir::new().unwrap();
        let source = write_notes(temp_dir.path());
        let config_path = temp_dir.path().join("config.toml");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();

        let err = run(
            ExportRequest {
                source,
                destination: Some(blocker.join("out")),
                format: None,
                notebook: None,
                unfiled: false,
            },
            Some(&config_path),
            &quiet(),
        )
        .unwrap_err();

        assert!(err.to_string().starts_with("Could not save the files in"));
        assert!(!config_path.exists());
    }
}
