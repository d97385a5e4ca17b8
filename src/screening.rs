//! Screening engine combining document loading, field extraction and scoring

use crate::config::Config;
use crate::error::{Result, ScreenerError};
use crate::extraction::strategy::Extraction;
use crate::extraction::{CandidateExtractor, CandidateFields};
use crate::input::file_detector::DocumentFormat;
use crate::input::loader::{DocumentLoader, LoadReport};
use crate::processing::scorer::{RelevanceScorer, ScoreResult};
use log::info;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Outcome of screening one resume against one job description
#[derive(Debug, Clone, Serialize)]
pub struct Screening {
    /// File path, or a caller-chosen label for in-memory text
    pub source: String,
    pub fields: CandidateFields,
    pub score: ScoreResult,
    /// Per-field strategy results
    pub extractions: Vec<Extraction>,
    /// Present when the resume came from a document
    pub load: Option<LoadReport>,
    pub processing_time_ms: u64,
}

impl Screening {
    /// A candidate without an email or a phone number cannot be contacted
    pub fn is_contactable(&self) -> bool {
        self.fields.has_contact()
    }

    pub fn used_placeholder(&self) -> bool {
        self.load.as_ref().is_some_and(|load| load.placeholder)
    }
}

pub struct Screener {
    loader: DocumentLoader,
    extractor: CandidateExtractor,
    scorer: RelevanceScorer,
}

impl Screener {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            loader: DocumentLoader::new(),
            extractor: CandidateExtractor::new(&config.extraction)?,
            scorer: RelevanceScorer::new(config)?,
        })
    }

    pub fn screen_text(&self, source: &str, resume_text: &str, job_description: &str) -> Screening {
        let start = Instant::now();
        self.screen(source, resume_text, job_description, None, start)
    }

    pub fn screen_bytes(
        &self,
        source: &str,
        bytes: &[u8],
        format: DocumentFormat,
        job_description: &str,
    ) -> Screening {
        let start = Instant::now();
        let load = self.loader.extract_report(bytes, format);
        let text = load.text.clone();
        self.screen(source, &text, job_description, Some(load), start)
    }

    /// Screen a PDF or DOCX file; other extensions are rejected
    pub fn screen_file(&self, path: &Path, job_description: &str) -> Result<Screening> {
        let format = DocumentFormat::from_path(path);
        if !format.is_supported() {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "{} (expected .pdf or .docx)",
                path.display()
            )));
        }

        let start = Instant::now();
        let bytes = std::fs::read(path)?;
        let load = self.loader.extract_report(&bytes, format);
        let text = load.text.clone();

        Ok(self.screen(
            &path.display().to_string(),
            &text,
            job_description,
            Some(load),
            start,
        ))
    }

    fn screen(
        &self,
        source: &str,
        resume_text: &str,
        job_description: &str,
        load: Option<LoadReport>,
        start: Instant,
    ) -> Screening {
        let extractions = self.extractor.extract_detailed(resume_text);
        let mut fields = CandidateFields::default();
        for extraction in &extractions {
            fields.set(extraction.field, extraction.value.clone());
        }

        let score = self.scorer.score(resume_text, job_description);
        info!("Screened {}: score {:.2}", source, score.score);

        Screening {
            source: source.to_string(),
            fields,
            score,
            extractions,
            load,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Sort by score, highest first; equal scores keep their input order
pub fn rank_screenings(screenings: &mut [Screening]) {
    screenings.sort_by(|a, b| b.score.score.total_cmp(&a.score.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    const JOB: &str = "Data engineer with Python, SQL and Airflow experience";

    const RESUME: &str = "Jane Doe\n\
        jane.doe@example.com\n\
        Based in Seattle, WA\n\
        Data engineer: Python, SQL, Airflow pipelines\n\
        M.Sc Data Science";

    fn screener() -> Screener {
        Screener::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_screen_text_fills_fields_and_score() {
        let screening = screener().screen_text("inline", RESUME, JOB);

        assert_eq!(screening.fields.name, "Jane Doe");
        assert_eq!(screening.fields.email, "jane.doe@example.com");
        assert_eq!(screening.fields.qualification, "Masters");
        assert!(screening.score.score > 50.0);
        assert!(screening.is_contactable());
        assert!(!screening.used_placeholder());
        assert_eq!(screening.extractions.len(), 5);
    }

    #[test]
    fn test_candidate_without_contact_is_flagged() {
        let screening = screener().screen_text("inline", "John Smith\nPython developer", JOB);

        assert!(!screening.is_contactable());
    }

    #[test]
    fn test_screen_bytes_uses_loader() {
        let mut docx = Docx::new();
        for line in RESUME.lines() {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
        }
        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();

        let screening =
            screener().screen_bytes("jane.docx", buffer.get_ref(), DocumentFormat::Docx, JOB);

        assert_eq!(screening.fields.email, "jane.doe@example.com");
        assert!(!screening.used_placeholder());
    }

    #[test]
    fn test_unreadable_document_scores_placeholder() {
        let screening = screener().screen_bytes("bad.pdf", b"garbage", DocumentFormat::Pdf, JOB);

        assert!(screening.used_placeholder());
        assert_eq!(screening.fields, CandidateFields::default());
        assert_eq!(screening.score.score, 0.0);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let result = screener().screen_file(Path::new("resume.txt"), JOB);

        assert!(matches!(result, Err(ScreenerError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_ranking_is_descending_and_stable() {
        let screener = screener();
        let mut screenings = vec![
            screener.screen_text("weak", "gardening and pottery", JOB),
            screener.screen_text("strong", RESUME, JOB),
            screener.screen_text("also weak", "gardening and pottery", JOB),
        ];

        rank_screenings(&mut screenings);

        let order: Vec<_> = screenings.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(order, vec!["strong", "weak", "also weak"]);
    }
}
