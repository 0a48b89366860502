//! nbexport Core Library
//!
//! Bulk-exports notes to files, organized by notebook.
//!
//! # Architecture
//!
//! Data flows one way: tag catalog → notebook membership → note lists →
//! per-note export calls → filesystem. Nothing reads back its own output.
//!
//! # Quick Start
//!
//! ```text
//! let store = MemoryStore::load(Path::new("notes.json"))?;
//! let format = ExportFormat::Html.exporter();
//!
//! let summary = Exporter::new(&store, format.as_ref())
//!     .export_all(Path::new("/tmp/out"))?;
//! println!("{} notes exported", summary.notes_exported);
//! ```
//!
//! # Modules
//!
//! - `models`: Note and Tag, system-tag constants
//! - `sanitize`: path and title sanitization
//! - `classify`: template detection
//! - `notebook`: notebook resolution and the pseudo-notebook sentinels
//! - `store`: note store trait and the in-memory/JSON store
//! - `export`: export orchestration and error taxonomy
//! - `formats`: built-in single-note exporters
//! - `config`: application configuration

pub mod classify;
pub mod config;
pub mod export;
pub mod formats;
pub mod models;
pub mod notebook;
pub mod sanitize;
pub mod store;

pub use classify::is_template;
pub use config::Config;
pub use export::{
    note_file_name, ExportError, ExportErrorKind, ExportResult, ExportSummary, Exporter,
    ListExport, SingleNoteExporter,
};
pub use formats::{ExportFormat, HtmlExporter, JsonExporter, TextExporter};
pub use models::{Note, Tag};
pub use notebook::{
    Notebook, NotebookRef, NotebookResolver, ALL_NOTES_NOTEBOOK, UNFILED_NOTES_NOTEBOOK,
};
pub use sanitize::{sanitize_path, sanitize_title};
pub use store::{MemoryStore, NoteStore};
