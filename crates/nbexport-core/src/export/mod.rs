//! Notebook-organized export
//!
//! The [`Exporter`] walks notebooks, creates the output directory tree and
//! hands each non-template note to a [`SingleNoteExporter`], which owns the
//! file format.
//!
//! ## Layout
//!
//! ```text
//! <output_root>/
//!     <notebook>/      one folder per notebook
//!         <note>.<ext>
//!     <note>.<ext>     unfiled notes
//! ```
//!
//! The first failure aborts the run. Folders and files written before the
//! failure stay on disk.

pub mod error;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info};

use crate::classify::is_template;
use crate::models::Note;
use crate::notebook::{NotebookRef, NotebookResolver};
use crate::sanitize::{sanitize_path_buf, sanitize_title};
use crate::store::NoteStore;

pub use error::{BoxError, ExportError, ExportErrorKind, ExportResult};

/// Converts one note to a target format and writes it to disk
pub trait SingleNoteExporter {
    /// File extension without the leading dot, e.g. `html`
    fn extension(&self) -> &str;

    /// Write `note` into `output_folder`, returning the path of the new file
    fn export_single_note(&self, note: &Note, output_folder: &Path) -> ExportResult<PathBuf>;
}

/// File name for a note: sanitized title plus extension
pub fn note_file_name(note: &Note, extension: &str) -> String {
    let stem = sanitize_title(note.title.trim());
    let stem = if stem.is_empty() { "untitled" } else { stem.as_str() };
    format!("{}.{}", stem, extension)
}

/// Outcome of a successful export run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportSummary {
    /// Folder the run exported into
    pub output_root: PathBuf,
    /// Notebook folders created
    pub notebooks_processed: usize,
    /// Files written
    pub notes_exported: usize,
    /// Template notes left out
    pub templates_skipped: usize,
    /// Every file written, in export order
    pub files: Vec<PathBuf>,
}

impl ExportSummary {
    fn new(output_root: PathBuf) -> Self {
        Self {
            output_root,
            ..Self::default()
        }
    }

    fn record(&mut self, listed: &ListExport) {
        self.notes_exported += listed.files.len();
        self.templates_skipped += listed.templates_skipped;
        self.files.extend(listed.files.iter().cloned());
    }
}

/// Files written by [`Exporter::export_notes_in_list`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListExport {
    pub files: Vec<PathBuf>,
    pub templates_skipped: usize,
}

/// Export orchestrator
///
/// Holds no state between calls; each entry point is a self-contained run.
pub struct Exporter<'a> {
    store: &'a dyn NoteStore,
    note_exporter: &'a dyn SingleNoteExporter,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a dyn NoteStore, note_exporter: &'a dyn SingleNoteExporter) -> Self {
        Self {
            store,
            note_exporter,
        }
    }

    fn resolver(&self) -> NotebookResolver<'a> {
        NotebookResolver::new(self.store)
    }

    /// Export every note, one folder per notebook, unfiled notes at the root
    pub fn export_all(&self, output_root: &Path) -> ExportResult<ExportSummary> {
        let output_root = sanitize_path_buf(output_root);
        info!(
            "Exporting all notes as {} to {:?}",
            self.note_exporter.extension(),
            output_root
        );

        let result = self.export_all_into(&output_root);
        log_outcome(&result);
        result
    }

    fn export_all_into(&self, output_root: &Path) -> ExportResult<ExportSummary> {
        let resolver = self.resolver();
        create_folder(output_root)?;
        resolver.warn_multiple_memberships();

        let mut summary = ExportSummary::new(output_root.to_path_buf());
        for notebook in resolver.notebooks() {
            debug!("Exporting notebook {:?}", notebook.name());
            let folder = sanitize_path_buf(&output_root.join(notebook.normalized_name()));
            create_folder(&folder)?;
            summary.notebooks_processed += 1;

            let listed =
                self.export_notes_in_list(&resolver.notes_in_notebook(&notebook), &folder)?;
            summary.record(&listed);
        }

        debug!("Exporting unfiled notes");
        let listed = self.export_notes_in_list(&resolver.list_unfiled_notes(), output_root)?;
        summary.record(&listed);

        Ok(summary)
    }

    /// Export one notebook selection directly into `output_root`
    ///
    /// `All` behaves like [`Exporter::export_all`]. For `Unfiled` and real
    /// notebooks the notes land in `output_root` itself; no notebook
    /// subfolder is added.
    pub fn export_notebook(
        &self,
        notebook: &NotebookRef,
        output_root: &Path,
    ) -> ExportResult<ExportSummary> {
        let notes = match notebook {
            NotebookRef::All => {
                info!("Selection includes all notes, exporting everything");
                return self.export_all(output_root);
            }
            NotebookRef::Unfiled => self.resolver().list_unfiled_notes(),
            NotebookRef::Notebook(notebook) => self.resolver().notes_in_notebook(notebook),
        };

        let output_root = sanitize_path_buf(output_root);
        info!(
            "Exporting notebook {:?} as {} to {:?}",
            notebook.display_name(),
            self.note_exporter.extension(),
            output_root
        );

        let result = create_folder(&output_root).and_then(|()| {
            let listed = self.export_notes_in_list(&notes, &output_root)?;
            let mut summary = ExportSummary::new(output_root.clone());
            summary.record(&listed);
            Ok(summary)
        });
        log_outcome(&result);
        result
    }

    /// Export the non-template notes of `notes` into `output_folder`, in order
    ///
    /// Errors from the single-note exporter are returned unchanged.
    pub fn export_notes_in_list(
        &self,
        notes: &[Note],
        output_folder: &Path,
    ) -> ExportResult<ListExport> {
        let mut listed = ListExport::default();
        for note in notes {
            if is_template(note) {
                debug!("Skipping template {:?}", note.title);
                listed.templates_skipped += 1;
                continue;
            }
            let file = self.note_exporter.export_single_note(note, output_folder)?;
            debug!("Exported {:?} to {:?}", note.title, file);
            listed.files.push(file);
        }
        Ok(listed)
    }

    /// Notes without any notebook, in store order
    pub fn list_unfiled_notes(&self) -> Vec<Note> {
        self.resolver().list_unfiled_notes()
    }
}

fn create_folder(folder: &Path) -> ExportResult<()> {
    debug!("Creating export folder {:?}", folder);
    std::fs::create_dir_all(folder).map_err(|e| ExportError::from_io(e, folder))
}

fn log_outcome(result: &ExportResult<ExportSummary>) {
    match result {
        Ok(summary) => info!(
            "Exported {} notes ({} notebooks, {} templates skipped) to {:?}",
            summary.notes_exported,
            summary.notebooks_processed,
            summary.templates_skipped,
            summary.output_root
        ),
        Err(e) => error!("Could not export: {}", e),
    }
}
