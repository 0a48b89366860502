//! Notebook resolution
//!
//! A notebook is a virtual grouping: every note carrying the tag
//! `system:notebook:<name>` belongs to notebook `<name>`. Membership is
//! strict: a note belongs to the notebook of its first notebook tag, so
//! notebooks and the unfiled list partition the store.

use serde::Serialize;
use tracing::warn;

use crate::models::{strip_prefix_ignore_case, Note, Tag, NOTEBOOK_SYSTEM_TAG};
use crate::sanitize::sanitize_title;
use crate::store::NoteStore;

/// Sentinel name of the "all notes" pseudo-notebook
pub const ALL_NOTES_NOTEBOOK: &str = "___NotebookManager___AllNotes__Notebook___";

/// Sentinel name of the "unfiled notes" pseudo-notebook
pub const UNFILED_NOTES_NOTEBOOK: &str = "___NotebookManager___UnfiledNotes__Notebook___";

/// A tag-defined grouping of notes
///
/// Two notebooks are equal when they export into the same folder, i.e. their
/// normalized names match.
#[derive(Debug, Clone, Serialize)]
pub struct Notebook {
    name: String,
    tag: Tag,
}

impl PartialEq for Notebook {
    fn eq(&self, other: &Self) -> bool {
        self.normalized_name() == other.normalized_name()
    }
}

impl Eq for Notebook {}

impl Notebook {
    /// Display name, as written after the notebook marker
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The membership tag that defines this notebook
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Filesystem-safe name used as the notebook's folder
    ///
    /// Trimmed, then sanitized like a note title: separators and dots
    /// become `_`, so the folder can neither leave the output root nor
    /// collide with a `<note>.<ext>` file beside it.
    pub fn normalized_name(&self) -> String {
        let name = sanitize_title(self.name.trim());
        if name.is_empty() {
            "_".to_string()
        } else {
            name
        }
    }
}

/// What the user asked to export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookRef {
    /// Every note, organized by notebook
    All,
    /// Notes without a notebook
    Unfiled,
    /// A single real notebook
    Notebook(Notebook),
}

impl NotebookRef {
    /// Resolve a selection by name
    ///
    /// The two sentinel names map to the pseudo-notebooks; anything else must
    /// name an existing notebook.
    pub fn from_name(name: &str, resolver: &NotebookResolver<'_>) -> Option<Self> {
        match name {
            ALL_NOTES_NOTEBOOK => Some(NotebookRef::All),
            UNFILED_NOTES_NOTEBOOK => Some(NotebookRef::Unfiled),
            _ => resolver.find_notebook(name).map(NotebookRef::Notebook),
        }
    }

    /// Name to show the user and to suggest as a destination folder
    pub fn display_name(&self) -> &str {
        match self {
            NotebookRef::All => "All Notes",
            NotebookRef::Unfiled => "Unfiled Notes",
            NotebookRef::Notebook(notebook) => notebook.name(),
        }
    }
}

/// Maps tags and notes to notebooks over a note store
pub struct NotebookResolver<'a> {
    store: &'a dyn NoteStore,
}

impl<'a> NotebookResolver<'a> {
    pub fn new(store: &'a dyn NoteStore) -> Self {
        Self { store }
    }

    /// The notebook a tag represents, if it is a notebook tag
    pub fn notebook_for_tag(&self, tag: &Tag) -> Option<Notebook> {
        let name = strip_prefix_ignore_case(tag.system_marker()?, NOTEBOOK_SYSTEM_TAG)?;
        if name.trim().is_empty() {
            return None;
        }
        Some(Notebook {
            name: name.to_string(),
            tag: tag.clone(),
        })
    }

    /// The notebook a note belongs to (its first notebook tag)
    pub fn notebook_for_note(&self, note: &Note) -> Option<Notebook> {
        note.tags().find_map(|tag| self.notebook_for_tag(&tag))
    }

    /// Every notebook tag on a note, in tag order
    pub fn notebooks_for_note(&self, note: &Note) -> Vec<Notebook> {
        note.tags()
            .filter_map(|tag| self.notebook_for_tag(&tag))
            .collect()
    }

    /// Every notebook in the tag catalog, in catalog order
    pub fn notebooks(&self) -> Vec<Notebook> {
        let mut notebooks: Vec<Notebook> = Vec::new();
        for tag in self.store.all_tags() {
            if let Some(notebook) = self.notebook_for_tag(&tag) {
                if !notebooks.contains(&notebook) {
                    notebooks.push(notebook);
                }
            }
        }
        notebooks
    }

    /// Log every note whose extra notebook tags are ignored
    pub fn warn_multiple_memberships(&self) {
        for note in self.store.notes() {
            let notebooks = self.notebooks_for_note(note);
            if let [first, extra @ ..] = notebooks.as_slice() {
                for ignored in extra {
                    warn!(
                        "Note {:?} is also tagged with notebook {:?}; exporting it under {:?} only",
                        note.title,
                        ignored.name(),
                        first.name()
                    );
                }
            }
        }
    }

    /// Look up a notebook by display name, ignoring case
    pub fn find_notebook(&self, name: &str) -> Option<Notebook> {
        let wanted = name.trim();
        self.notebooks()
            .into_iter()
            .find(|notebook| notebook.name().trim().eq_ignore_ascii_case(wanted))
    }

    /// Notes without any notebook, in store order
    pub fn list_unfiled_notes(&self) -> Vec<Note> {
        self.store
            .notes()
            .iter()
            .filter(|note| self.notebook_for_note(note).is_none())
            .cloned()
            .collect()
    }

    /// A notebook's member notes, in store order
    pub fn notes_in_notebook(&self, notebook: &Notebook) -> Vec<Note> {
        self.store
            .notes()
            .iter()
            .filter(|note| self.notebook_for_note(note).as_ref() == Some(notebook))
            .cloned()
            .collect()
    }
}
