//! Export error handling
//!
//! Every failure is classified into one of three kinds and carries the
//! output folder that was being written when it happened.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed error from a single-note exporter that is not an I/O error
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort an export run
#[derive(Error, Debug)]
pub enum ExportError {
    /// Permission failure creating a folder or writing a file
    #[error("Could not export to '{path}': access denied")]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The folder, or one of its parents, does not exist
    #[error("Could not export to '{path}': folder does not exist")]
    FolderMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Anything else raised by folder creation or the note exporter
    #[error("Could not export to '{path}': {source}")]
    Unknown {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

/// Classification of an [`ExportError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorKind {
    AccessDenied,
    FolderMissing,
    Unknown,
}

impl ExportError {
    /// Classify an I/O error raised while writing into `path`
    pub fn from_io(error: io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match error.kind() {
            io::ErrorKind::PermissionDenied => ExportError::AccessDenied {
                path,
                source: error,
            },
            io::ErrorKind::NotFound => ExportError::FolderMissing {
                path,
                source: error,
            },
            _ => ExportError::Unknown {
                path,
                source: Box::new(error),
            },
        }
    }

    /// Wrap a non-I/O failure (serialization, rendering) as `Unknown`
    pub fn unknown(error: impl Into<BoxError>, path: impl Into<PathBuf>) -> Self {
        ExportError::Unknown {
            path: path.into(),
            source: error.into(),
        }
    }

    pub fn kind(&self) -> ExportErrorKind {
        match self {
            ExportError::AccessDenied { .. } => ExportErrorKind::AccessDenied,
            ExportError::FolderMissing { .. } => ExportErrorKind::FolderMissing,
            ExportError::Unknown { .. } => ExportErrorKind::Unknown,
        }
    }

    /// The output folder being written when the failure happened
    pub fn path(&self) -> &Path {
        match self {
            ExportError::AccessDenied { path, .. }
            | ExportError::FolderMissing { path, .. }
            | ExportError::Unknown { path, .. } => path,
        }
    }

    /// Short, human-readable reason suitable for display to the end user
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ExportErrorKind::AccessDenied => "Access denied.",
            ExportErrorKind::FolderMissing => "Folder does not exist.",
            ExportErrorKind::Unknown => "Unknown error.",
        }
    }
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ExportError::from_io(io_err, "/out");

        assert_eq!(err.kind(), ExportErrorKind::AccessDenied);
        assert_eq!(err.path(), Path::new("/out"));
        assert_eq!(err.user_message(), "Access denied.");
    }

    #[test]
    fn test_not_found_classification() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = ExportError::from_io(io_err, "/gone/out");

        assert_eq!(err.kind(), ExportErrorKind::FolderMissing);
        assert_eq!(err.user_message(), "Folder does not exist.");
    }

    #[test]
    fn test_other_io_is_unknown() {
        let io_err = io::Error::new(io::ErrorKind::Other, "No space left on device");
        let err = ExportError::from_io(io_err, "/full");

        assert_eq!(err.kind(), ExportErrorKind::Unknown);
        assert!(err.to_string().contains("No space left"));
    }

    #[test]
    fn test_unknown_from_message() {
        let err = ExportError::unknown("renderer exploded", "/out/Work");
        assert_eq!(err.kind(), ExportErrorKind::Unknown);
        assert_eq!(err.path(), Path::new("/out/Work"));
        assert_eq!(err.user_message(), "Unknown error.");
    }

    #[test]
    fn test_error_display_includes_path() {
        let err = ExportError::from_io(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            "/test/out",
        );
        let msg = err.to_string();
        assert!(msg.contains("access denied"));
        assert!(msg.contains("/test/out"));
    }
}
