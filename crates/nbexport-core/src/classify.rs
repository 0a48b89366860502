//! Note classification
//!
//! Template notes are reusable blanks, not content, and never get exported.

use crate::models::{strip_prefix_ignore_case, Note, TEMPLATE_NOTE_SYSTEM_TAG};

/// Whether the note carries the template system tag
pub fn is_template(note: &Note) -> bool {
    note.tags().any(|tag| {
        tag.system_marker()
            .and_then(|marker| strip_prefix_ignore_case(marker, TEMPLATE_NOTE_SYSTEM_TAG))
            .is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    #[test]
    fn test_template_tag_marks_template() {
        let note = Note::new("Meeting template").with_tag(Tag::template().0);
        assert!(is_template(&note));
    }

    #[test]
    fn test_plain_note_is_not_template() {
        let note = Note::new("Shopping").with_tag("template").with_tag("errands");
        assert!(!is_template(&note));
    }

    #[test]
    fn test_notebook_template_variant_counts() {
        // notebook-specific templates extend the marker
        let note = Note::new("Work template").with_tag("system:template:notebook");
        assert!(is_template(&note));
    }

    #[test]
    fn test_template_alongside_notebook() {
        let note = Note::new("E")
            .with_tag(Tag::notebook("Work").0)
            .with_tag("System:Template");
        assert!(is_template(&note));
    }

    #[test]
    fn test_untagged_note() {
        assert!(!is_template(&Note::new("Bare")));
    }
}
