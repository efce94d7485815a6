//! Log documents handed to the outline service

use rmslog_core::prelude::*;
use std::path::Path;

/// An RMS log opened for outlining
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDocument {
    /// Display name, usually the file name
    pub name: String,

    /// Full document text
    pub text: String,
}

impl LogDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a log file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. A file holding only
    /// whitespace yields [`Error::EmptyDocument`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::document_not_found(path));
        }

        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        if text.trim().is_empty() {
            return Err(Error::empty_document(path));
        }

        debug!("Loaded {:?} ({} bytes)", path, bytes.len());
        Ok(Self::new(display_name(path), text))
    }
}

/// File name of `path`, or the whole path when it has none
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_document() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("run.html");
        std::fs::write(&path, "<pre>Job</pre>").unwrap();

        let doc = LogDocument::load(&path).unwrap();
        assert_eq!(doc.name, "run.html");
        assert_eq!(doc.text, "<pre>Job</pre>");
    }

    #[test]
    fn test_load_missing_document() {
        let temp = tempdir().unwrap();
        let err = LogDocument::load(&temp.path().join("missing.html")).unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_load_unreadable_path_keeps_io_error() {
        let temp = tempdir().unwrap();
        let err = LogDocument::load(temp.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_load_blank_document() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blank.html");
        std::fs::write(&path, " \n\t\n").unwrap();

        let err = LogDocument::load(&path).unwrap_err();
        assert!(matches!(err, Error::EmptyDocument { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_load_replaces_invalid_utf8() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("latin1.html");
        std::fs::write(&path, b"<pre>Caf\xe9</pre>").unwrap();

        let doc = LogDocument::load(&path).unwrap();
        assert_eq!(doc.text, "<pre>Caf\u{FFFD}</pre>");
    }
}
