//! Note store collaborator
//!
//! The export pipeline only reads from a store: the notes in store order and
//! the tag catalog. [`MemoryStore`] is the concrete store used by the CLI and
//! tests; it can be loaded from JSON on disk.
//!
//! ## Usage
//!
//! ```ignore
//! let store = MemoryStore::load(Path::new("notes.json"))?;
//! for tag in store.all_tags() {
//!     println!("{}", tag);
//! }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{Note, Tag};

/// Read access to a collection of notes
pub trait NoteStore {
    /// All notes, in store order
    fn notes(&self) -> &[Note];

    /// The tag catalog: every distinct tag on any note, sorted by name
    fn all_tags(&self) -> Vec<Tag> {
        self.notes()
            .iter()
            .flat_map(|note| note.tags())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of notes in the store
    fn note_count(&self) -> usize {
        self.notes().len()
    }
}

/// In-memory note store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    notes: Vec<Note>,
}

impl MemoryStore {
    /// Create a store over the given notes, keeping their order
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Append a note
    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Load notes from disk
    ///
    /// - A file must contain a JSON array of notes.
    /// - A directory is scanned for `*.json` files, one note per file, read in
    ///   file-name order.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load_file(path)
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read notes file: {:?}", path))?;
        let notes: Vec<Note> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse notes file: {:?}", path))?;
        debug!("Loaded {} notes from {:?}", notes.len(), path);
        Ok(Self::new(notes))
    }

    fn load_dir(dir: &Path) -> Result<Self> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read notes directory: {:?}", dir))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let mut notes = Vec::with_capacity(files.len());
        for file in &files {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read note file: {:?}", file))?;
            let note: Note = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse note file: {:?}", file))?;
            notes.push(note);
        }
        debug!("Loaded {} notes from directory {:?}", notes.len(), dir);
        Ok(Self::new(notes))
    }
}

impl NoteStore for MemoryStore {
    fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl FromIterator<Note> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
