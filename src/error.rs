//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Regex tables are compiled once at startup; a bad pattern is a processing error
impl From<regex::Error> for ScreenerError {
    fn from(err: regex::Error) -> Self {
        ScreenerError::TextProcessing(err.to_string())
    }
}
