//! Data models for nbexport
//!
//! Defines the note and tag structures read by the export pipeline.
//! Notes are owned by the note store; the export core never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix shared by every reserved system tag
pub const SYSTEM_TAG_PREFIX: &str = "system:";

/// Marker following the system prefix on template notes
pub const TEMPLATE_NOTE_SYSTEM_TAG: &str = "template";

/// Marker following the system prefix on notebook membership tags
pub const NOTEBOOK_SYSTEM_TAG: &str = "notebook:";

/// A text note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Unique identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Note title
    pub title: String,
    /// Note body content
    #[serde(default)]
    pub body: String,
    /// Tags, including system tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// When this note was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When this note was last updated
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note with the given title
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: String::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style body setter, handy for fixtures
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Builder-style tag adder
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
            self.updated_at = Utc::now();
        }
    }

    /// Iterate over the note's tags
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tags.iter().map(|t| Tag::new(t.as_str()))
    }
}

/// A tag attached to a note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub String);

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Build the membership tag for a notebook display name
    pub fn notebook(name: &str) -> Self {
        Self(format!("{}{}{}", SYSTEM_TAG_PREFIX, NOTEBOOK_SYSTEM_TAG, name))
    }

    /// The template system tag
    pub fn template() -> Self {
        Self(format!("{}{}", SYSTEM_TAG_PREFIX, TEMPLATE_NOTE_SYSTEM_TAG))
    }

    /// Get the tag name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The part of a system tag after `system:`
    pub fn system_marker(&self) -> Option<&str> {
        strip_prefix_ignore_case(&self.0, SYSTEM_TAG_PREFIX)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// ASCII case-insensitive `strip_prefix`
pub(crate) fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_new() {
        let note = Note::new("Test Note");
        assert_eq!(note.title, "Test Note");
        assert!(note.body.is_empty());
        assert!(note.tags.is_empty());
    }

    #[test]
    fn test_note_builders() {
        let note = Note::new("Groceries")
            .with_body("milk")
            .with_tag("errands")
            .with_tag("errands");
        assert_eq!(note.body, "milk");
        assert_eq!(note.tags, vec!["errands"]);
    }

    #[test]
    fn test_reserved_tags() {
        assert_eq!(Tag::template().name(), "system:template");
        assert_eq!(Tag::notebook("Work").name(), "system:notebook:Work");
        assert!(Tag::notebook("Work").system_marker().is_some());
        assert!(Tag::new("work").system_marker().is_none());
    }

    #[test]
    fn test_system_marker_ignores_prefix_case() {
        let tag = Tag::new("System:notebook:Home");
        assert_eq!(tag.system_marker(), Some("notebook:Home"));
        assert_eq!(Tag::new("sys").system_marker(), None);
    }

    #[test]
    fn test_strip_prefix_multibyte() {
        // slicing must not panic on a char boundary inside the prefix window
        assert_eq!(strip_prefix_ignore_case("sÿstem:x", SYSTEM_TAG_PREFIX), None);
    }

    #[test]
    fn test_tag_display() {
        let tag = Tag::new("rust");
        assert_eq!(format!("{}", tag), "rust");
        assert_eq!(tag.name(), "rust");
    }

    #[test]
    fn test_note_deserialize_minimal() {
        let note: Note = serde_json::from_str(r#"{"title": "Bare"}"#).unwrap();
        assert_eq!(note.title, "Bare");
        assert!(note.tags.is_empty());
    }

    #[test]
    fn test_note_serialization() {
        let note = Note::new("Test Note").with_body("Content").with_tag("test");
        let json = serde_json::to_string(&note).unwrap();
        let deserialized: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(note, deserialized);
    }
}
