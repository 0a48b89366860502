//! Built-in single-note exporters
//!
//! Each format writes one file per note named after the sanitized title.
//! Notes sharing a title overwrite each other within a folder.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pulldown_cmark::{html, Event, Options, Parser};
use serde::{Deserialize, Serialize};

use crate::export::{note_file_name, ExportError, ExportResult, SingleNoteExporter};
use crate::models::Note;

/// Output formats shipped with nbexport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain text
    #[default]
    Txt,
    /// Standalone HTML page rendered from Markdown
    Html,
    /// The note serialized as JSON
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Txt, ExportFormat::Html, ExportFormat::Json];

    /// File extension, also the format's name
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }

    /// Name shown to users
    pub fn pretty_name(self) -> &'static str {
        match self {
            ExportFormat::Txt => "Plain Text",
            ExportFormat::Html => "HTML",
            ExportFormat::Json => "JSON",
        }
    }

    pub fn exporter(self) -> Box<dyn SingleNoteExporter> {
        match self {
            ExportFormat::Txt => Box::new(TextExporter),
            ExportFormat::Html => Box::new(HtmlExporter),
            ExportFormat::Json => Box::new(JsonExporter),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "html" | "htm" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!(
                "Unknown export format: '{}'. Valid formats: txt, html, json",
                other
            )),
        }
    }
}

/// Write `content` to the note's file inside `output_folder`
fn write_note_file(
    note: &Note,
    extension: &str,
    output_folder: &Path,
    content: &str,
) -> ExportResult<PathBuf> {
    let path = output_folder.join(note_file_name(note, extension));
    std::fs::write(&path, content).map_err(|e| ExportError::from_io(e, output_folder))?;
    Ok(path)
}

/// Title, blank line, body
pub struct TextExporter;

impl SingleNoteExporter for TextExporter {
    fn extension(&self) -> &str {
        "txt"
    }

    fn export_single_note(&self, note: &Note, output_folder: &Path) -> ExportResult<PathBuf> {
        let mut content = String::with_capacity(note.title.len() + note.body.len() + 3);
        content.push_str(&note.title);
        content.push_str("\n\n");
        content.push_str(&note.body);
        if !content.ends_with('\n') {
            content.push('\n');
        }
        write_note_file(note, self.extension(), output_folder, &content)
    }
}

/// Standalone HTML page; the body is treated as Markdown
pub struct HtmlExporter;

impl HtmlExporter {
    /// Render a note to a complete HTML document
    pub fn render(note: &Note) -> String {
        let mut title = String::new();
        html::push_html(&mut title, std::iter::once(Event::Text(note.title.as_str().into())));

        // raw HTML in a note body is shown, not interpreted
        let parser = Parser::new_ext(&note.body, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
            .map(|event| match event {
                Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
                other => other,
            });
        let mut body = String::new();
        html::push_html(&mut body, parser);

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n"
        )
    }
}

impl SingleNoteExporter for HtmlExporter {
    fn extension(&self) -> &str {
        "html"
    }

    fn export_single_note(&self, note: &Note, output_folder: &Path) -> ExportResult<PathBuf> {
        write_note_file(note, self.extension(), output_folder, &Self::render(note))
    }
}

/// Pretty-printed JSON of the full note
pub struct JsonExporter;

impl SingleNoteExporter for JsonExporter {
    fn extension(&self) -> &str {
        "json"
    }

    fn export_single_note(&self, note: &Note, output_folder: &Path) -> ExportResult<PathBuf> {
        let content =
            serde_json::to_string_pretty(note).map_err(|e| ExportError::unknown(e, output_folder))?;
        write_note_file(note, self.extension(), output_folder, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_str() {
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert_eq!("Text".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert_eq!("HTML".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_format_display_matches_extension() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string(), format.extension());
            assert_eq!(format.exporter().extension(), format.extension());
        }
    }

    #[test]
    fn test_text_export() {
        let temp_dir = TempDir::new().unwrap();
        let note = Note::new("Plan.v2").with_body("step one");

        let path = TextExporter
            .export_single_note(&note, temp_dir.path())
            .unwrap();

        assert_eq!(path, temp_dir.path().join("Plan_v2.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Plan.v2\n\nstep one\n");
    }

    #[test]
    fn test_html_render_escapes() {
        let note = Note::new("Tom & <Jerry>").with_body("**bold**\n\n<script>alert(1)</script>\n");
        let html = HtmlExporter::render(&note);

        assert!(html.contains("<title>Tom &amp; &lt;Jerry&gt;</title>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_html_export_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = HtmlExporter
            .export_single_note(&Note::new("Hello"), temp_dir.path())
            .unwrap();
        assert_eq!(path, temp_dir.path().join("Hello.html"));
        assert!(std::fs::read_to_string(path).unwrap().starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_json_export_roundtrips_note() {
        let temp_dir = TempDir::new().unwrap();
        let note = Note::new("Data").with_body("x").with_tag("system:notebook:Work");

        let path = JsonExporter
            .export_single_note(&note, temp_dir.path())
            .unwrap();

        let written: Note = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, note);
    }

    #[test]
    fn test_write_into_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");

        let err = TextExporter
            .export_single_note(&Note::new("x"), &missing)
            .unwrap_err();

        assert_eq!(err.kind(), ExportErrorKind::FolderMissing);
        assert_eq!(err.path(), missing);
    }
}
