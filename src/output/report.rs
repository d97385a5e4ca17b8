//! Report structures for a screening run

use crate::extraction::CandidateFields;
use crate::input::loader::StageReport;
use crate::processing::scorer::ScoreMethod;
use crate::screening::Screening;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// All candidates screened against one job description
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    /// Job description file, or `"inline"` for `--job-text`
    pub job_source: String,
    pub generated_at: DateTime<Utc>,
    pub screener_version: String,
    /// Ranked, best match first
    pub candidates: Vec<CandidateReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport {
    pub rank: usize,
    pub source: String,
    pub fields: CandidateFields,
    pub score: f64,
    pub method: ScoreMethod,
    pub overlap: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_similarity: Option<f64>,
    pub status: CandidateStatus,
    /// Field name to the strategy that filled it
    pub matched_by: Vec<(String, String)>,
    pub placeholder_text: bool,
    pub load_stages: Vec<StageReport>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Accepted,
    /// No email and no phone number found
    Rejected,
}

impl ScreeningReport {
    /// Build a report from screenings that are already ranked
    pub fn new(job_source: impl Into<String>, screenings: &[Screening]) -> Self {
        let candidates = screenings
            .iter()
            .enumerate()
            .map(|(i, screening)| CandidateReport::from_screening(i + 1, screening))
            .collect();

        Self {
            job_source: job_source.into(),
            generated_at: Utc::now(),
            screener_version: env!("CARGO_PKG_VERSION").to_string(),
            candidates,
        }
    }

    pub fn accepted(&self) -> impl Iterator<Item = &CandidateReport> {
        self.candidates
            .iter()
            .filter(|c| c.status == CandidateStatus::Accepted)
    }
}

impl CandidateReport {
    pub fn from_screening(rank: usize, screening: &Screening) -> Self {
        let status = if screening.is_contactable() {
            CandidateStatus::Accepted
        } else {
            CandidateStatus::Rejected
        };

        let matched_by = screening
            .extractions
            .iter()
            .filter_map(|e| e.strategy.map(|s| (e.field.to_string(), s.to_string())))
            .collect();

        Self {
            rank,
            source: screening.source.clone(),
            fields: screening.fields.clone(),
            score: screening.score.score,
            method: screening.score.method,
            overlap: screening.score.overlap,
            vector_similarity: screening.score.vector_similarity,
            status,
            matched_by,
            placeholder_text: screening.used_placeholder(),
            load_stages: screening
                .load
                .as_ref()
                .map(|load| load.stages.clone())
                .unwrap_or_default(),
            processing_time_ms: screening.processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::screening::Screener;

    #[test]
    fn test_ranks_follow_input_order() {
        let screener = Screener::new(&Config::default()).unwrap();
        let job = "Python developer";
        let screenings = vec![
            screener.screen_text("a", "Ann Lee\nann@example.com\nPython developer", job),
            screener.screen_text("b", "Bob Stone\nwoodworking", job),
        ];

        let report = ScreeningReport::new("job.txt", &screenings);

        assert_eq!(report.candidates[0].rank, 1);
        assert_eq!(report.candidates[1].rank, 2);
        assert_eq!(report.candidates[0].status, CandidateStatus::Accepted);
        assert_eq!(report.candidates[1].status, CandidateStatus::Rejected);
        assert_eq!(report.accepted().count(), 1);
    }

    #[test]
    fn test_matched_by_lists_only_found_fields() {
        let screener = Screener::new(&Config::default()).unwrap();
        let screening = screener.screen_text("a", "contact: ann@example.com", "rust");

        let candidate = CandidateReport::from_screening(1, &screening);

        assert_eq!(
            candidate.matched_by,
            vec![("email".to_string(), "standard".to_string())]
        );
        assert!(!candidate.placeholder_text);
        assert!(candidate.load_stages.is_empty());
    }
}
