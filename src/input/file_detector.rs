//! Document format detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Unknown,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            _ => DocumentFormat::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentFormat::Unknown)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, DocumentFormat::Unknown)
    }

    /// Text returned when nothing could be extracted
    pub fn placeholder(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "Unable to extract text from PDF.",
            DocumentFormat::Docx => "Unable to extract text from DOCX.",
            DocumentFormat::Unknown => "Unable to extract text from document.",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Docx => write!(f, "docx"),
            DocumentFormat::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_extension("PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension(".docx"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_extension("doc"), DocumentFormat::Unknown);
    }

    #[test]
    fn test_path_detection() {
        assert_eq!(DocumentFormat::from_path(Path::new("cv/Jane.Doe.Docx")), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_path(Path::new("resume")), DocumentFormat::Unknown);
        assert!(!DocumentFormat::from_path(Path::new("notes.txt")).is_supported());
    }
}
