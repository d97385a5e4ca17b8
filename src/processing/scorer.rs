//! Relevance scoring between a resume and a job description

use crate::config::{Config, ScoringConfig};
use crate::error::Result;
use crate::processing::text_processor::{ProcessedText, TextProcessor};
use crate::processing::tfidf::TfidfSpace;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Which computation produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreMethod {
    /// Word-overlap ratio only
    Overlap,
    /// TF-IDF cosine similarity blended with the overlap ratio
    Blended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Final score in `[0, 100]`, rounded to 2 decimals
    pub score: f64,
    pub method: ScoreMethod,
    /// Share of job vocabulary present in the resume, in `[0, 100]`
    pub overlap: f64,
    /// Cosine similarity scaled to `[0, 100]`, when computed
    pub vector_similarity: Option<f64>,
}

impl ScoreResult {
    fn zero() -> Self {
        Self {
            score: 0.0,
            method: ScoreMethod::Overlap,
            overlap: 0.0,
            vector_similarity: None,
        }
    }
}

pub struct RelevanceScorer {
    text_processor: TextProcessor,
    config: ScoringConfig,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::with_processor(TextProcessor::default(), ScoringConfig::default())
    }
}

impl RelevanceScorer {
    pub fn new(config: &Config) -> Result<Self> {
        let text_processor = TextProcessor::new(&config.processing)?;
        Ok(Self::with_processor(text_processor, config.scoring.clone()))
    }

    pub fn with_processor(text_processor: TextProcessor, config: ScoringConfig) -> Self {
        Self {
            text_processor,
            config,
        }
    }

    /// Score `resume_text` against `job_description`; never fails
    pub fn score(&self, resume_text: &str, job_description: &str) -> ScoreResult {
        let resume = self.text_processor.process(resume_text);
        let job = self.text_processor.process(job_description);

        if resume.is_empty() || job.is_empty() {
            debug!("Empty text after cleaning, scoring 0");
            return ScoreResult::zero();
        }

        let overlap = overlap_score(&resume, &job);

        let vector_similarity = if self.wants_vector_score(&resume, &job) {
            match vector_similarity(&resume, &job) {
                Ok(similarity) => Some(similarity),
                Err(e) => {
                    warn!("Vector scoring failed, using overlap only: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let (raw, method) = match vector_similarity {
            Some(similarity) => (
                self.config.vector_weight * similarity + self.config.overlap_weight * overlap,
                ScoreMethod::Blended,
            ),
            None => (overlap, ScoreMethod::Overlap),
        };

        let score = round2(raw.clamp(0.0, 100.0));
        debug!(
            "Scored {:?}: {} (overlap {:.2}, vector {:?})",
            method, score, overlap, vector_similarity
        );

        ScoreResult {
            score,
            method,
            overlap: round2(overlap),
            vector_similarity: vector_similarity.map(round2),
        }
    }

    /// Bare score in `[0, 100]`
    pub fn score_match(&self, resume_text: &str, job_description: &str) -> f64 {
        self.score(resume_text, job_description).score
    }

    fn wants_vector_score(&self, resume: &ProcessedText, job: &ProcessedText) -> bool {
        self.config.vector_scoring
            && resume.token_count() > self.config.min_vector_tokens
            && job.token_count() > self.config.min_vector_tokens
    }
}

/// Percentage of distinct job tokens that also occur in the resume
pub fn overlap_score(resume: &ProcessedText, job: &ProcessedText) -> f64 {
    let job_words = job.vocabulary();
    if job_words.is_empty() {
        return 0.0;
    }

    let resume_words = resume.vocabulary();
    let common = job_words.intersection(&resume_words).count();

    common as f64 / job_words.len() as f64 * 100.0
}

/// TF-IDF cosine similarity over `{job, resume}`, scaled to `[0, 100]`
fn vector_similarity(resume: &ProcessedText, job: &ProcessedText) -> Result<f64> {
    let space = TfidfSpace::fit(&[job.tokens.as_slice(), resume.tokens.as_slice()])?;
    Ok(space.similarity(0, 1)? * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
