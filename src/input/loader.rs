//! Document loading with backend fallback and placeholder text

use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{
    DocxExtractor, PagewisePdfExtractor, PdfExtractor, TextExtractor,
};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;

/// Result of a single backend attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StageOutcome {
    Extracted { chars: usize },
    Empty,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub backend: &'static str,
    #[serde(flatten)]
    pub outcome: StageOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Trimmed document text, or the format's placeholder
    pub text: String,
    pub placeholder: bool,
    pub stages: Vec<StageReport>,
}

impl LoadReport {
    fn placeholder(format: DocumentFormat, stages: Vec<StageReport>) -> Self {
        Self {
            text: format.placeholder().to_string(),
            placeholder: true,
            stages,
        }
    }
}

/// Turns PDF and DOCX documents into plain text.
///
/// Loading never fails. Backends are tried in order until one produces
/// non-empty text; when none does the format's placeholder is returned.
pub struct DocumentLoader {
    pdf_backends: Vec<Box<dyn TextExtractor>>,
    docx_backends: Vec<Box<dyn TextExtractor>>,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self {
            pdf_backends: vec![Box::new(PdfExtractor), Box::new(PagewisePdfExtractor)],
            docx_backends: vec![Box::new(DocxExtractor)],
        }
    }

    pub fn load(&self, path: &Path, format: DocumentFormat) -> String {
        self.load_report(path, format).text
    }

    pub fn load_report(&self, path: &Path, format: DocumentFormat) -> LoadReport {
        info!("Loading {} document: {}", format, path.display());

        match std::fs::read(path) {
            Ok(bytes) => self.extract_report(&bytes, format),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                LoadReport::placeholder(
                    format,
                    vec![StageReport {
                        backend: "fs",
                        outcome: StageOutcome::Failed {
                            reason: e.to_string(),
                        },
                    }],
                )
            }
        }
    }

    pub fn load_bytes(&self, bytes: &[u8], format: DocumentFormat) -> String {
        self.extract_report(bytes, format).text
    }

    pub fn extract_report(&self, bytes: &[u8], format: DocumentFormat) -> LoadReport {
        let backends = match format {
            DocumentFormat::Pdf => &self.pdf_backends,
            DocumentFormat::Docx => &self.docx_backends,
            DocumentFormat::Unknown => {
                warn!("No extraction backend for unknown document format");
                return LoadReport::placeholder(format, Vec::new());
            }
        };

        let mut stages = Vec::with_capacity(backends.len());

        for backend in backends {
            match backend.extract(bytes) {
                Ok(raw) => {
                    let text = raw.trim();
                    if text.is_empty() {
                        warn!("{} produced no text", backend.backend());
                        stages.push(StageReport {
                            backend: backend.backend(),
                            outcome: StageOutcome::Empty,
                        });
                        continue;
                    }

                    let chars = text.chars().count();
                    debug!("{} extracted {} characters", backend.backend(), chars);
                    stages.push(StageReport {
                        backend: backend.backend(),
                        outcome: StageOutcome::Extracted { chars },
                    });

                    return LoadReport {
                        text: text.to_string(),
                        placeholder: false,
                        stages,
                    };
                }
                Err(e) => {
                    warn!("{} failed: {}", backend.backend(), e);
                    stages.push(StageReport {
                        backend: backend.backend(),
                        outcome: StageOutcome::Failed {
                            reason: e.to_string(),
                        },
                    });
                }
            }
        }

        LoadReport::placeholder(format, stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn docx_bytes(lines: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in lines {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_docx_text_is_trimmed() {
        let loader = DocumentLoader::new();
        let bytes = docx_bytes(&["", "Jane Doe", "Rust developer", ""]);

        let report = loader.extract_report(&bytes, DocumentFormat::Docx);

        assert!(!report.placeholder);
        assert_eq!(report.text, "Jane Doe\nRust developer");
        assert_eq!(report.stages.len(), 1);
        assert_eq!(report.stages[0].backend, "docx-rs");
    }

    #[test]
    fn test_empty_docx_yields_placeholder() {
        let loader = DocumentLoader::new();
        let bytes = docx_bytes(&["   "]);

        let report = loader.extract_report(&bytes, DocumentFormat::Docx);

        assert!(report.placeholder);
        assert_eq!(report.text, "Unable to extract text from DOCX.");
        assert_eq!(report.stages[0].outcome, StageOutcome::Empty);
    }

    #[test]
    fn test_broken_pdf_tries_every_backend() {
        let loader = DocumentLoader::new();

        let report = loader.extract_report(b"not a pdf at all", DocumentFormat::Pdf);

        assert!(report.placeholder);
        assert_eq!(report.text, "Unable to extract text from PDF.");
        let backends: Vec<_> = report.stages.iter().map(|s| s.backend).collect();
        assert_eq!(backends, vec!["pdf-extract", "lopdf"]);
        assert!(report
            .stages
            .iter()
            .all(|s| matches!(s.outcome, StageOutcome::Failed { .. })));
    }

    #[test]
    fn test_unknown_format_is_placeholder() {
        let loader = DocumentLoader::new();

        let text = loader.load_bytes(b"plain text", DocumentFormat::Unknown);

        assert_eq!(text, "Unable to extract text from document.");
    }

    #[test]
    fn test_missing_file_is_placeholder() {
        let loader = DocumentLoader::new();

        let report = loader.load_report(Path::new("/definitely/not/here.pdf"), DocumentFormat::Pdf);

        assert!(report.placeholder);
        assert_eq!(report.stages[0].backend, "fs");
    }
}
