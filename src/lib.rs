//! Resume screener library
//!
//! Pulls text out of PDF/DOCX resumes, extracts candidate contact fields
//! with ordered heuristic strategies and scores each resume against a job
//! description.

pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod input;
pub mod output;
pub mod processing;
pub mod screening;

pub use config::Config;
pub use error::{Result, ScreenerError};
pub use extraction::{CandidateExtractor, CandidateFields};
pub use input::file_detector::DocumentFormat;
pub use input::loader::DocumentLoader;
pub use processing::scorer::{RelevanceScorer, ScoreResult};
pub use screening::{rank_screenings, Screener, Screening};
