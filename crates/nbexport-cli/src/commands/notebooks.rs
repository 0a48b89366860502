//! Notebook listing

use std::path::Path;

use anyhow::{Context, Result};

use nbexport_core::{MemoryStore, NotebookResolver, NoteStore};

use crate::output::{NotebookRow, Output};

/// List notebooks with note counts, plus the number of unfiled notes
pub fn list(source: &Path, output: &Output) -> Result<()> {
    let store = MemoryStore::load(source).context("Failed to load notes")?;
    let (rows, unfiled) = notebook_rows(&store);
    output.print_notebooks(&rows, unfiled);
    Ok(())
}

fn notebook_rows(store: &dyn NoteStore) -> (Vec<NotebookRow>, usize) {
    let resolver = NotebookResolver::new(store);
    let rows = resolver
        .notebooks()
        .iter()
        .map(|notebook| NotebookRow {
            name: notebook.name().to_string(),
            folder: notebook.normalized_name(),
            notes: resolver.notes_in_notebook(notebook).len(),
        })
        .collect();
    (rows, resolver.list_unfiled_notes().len())
}
