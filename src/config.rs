//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Tokens in this set are dropped during cleaning
    pub stop_words: Vec<String>,
    /// Tokens with this many characters or fewer are dropped
    pub min_token_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub name_scan_lines: usize,
    pub phone_max_length: usize,
    /// Characters searched on each side of a postal code for a place name
    pub postal_window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Enables the TF-IDF cosine component of the score
    pub vector_scoring: bool,
    pub vector_weight: f64,
    pub overlap_weight: f64,
    /// Both cleaned texts need more tokens than this for vector scoring
    pub min_vector_tokens: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig::default(),
            extraction: ExtractionConfig::default(),
            scoring: ScoringConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            stop_words: default_stop_words(),
            min_token_length: 2,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_scan_lines: 10,
            phone_max_length: 15,
            postal_window: 50,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            vector_scoring: true,
            vector_weight: 0.7,
            overlap_weight: 0.3,
            min_vector_tokens: 10,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        for (key, weight) in [
            ("scoring.vector_weight", scoring.vector_weight),
            ("scoring.overlap_weight", scoring.overlap_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScreenerError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    key, weight
                )));
            }
        }

        if self.extraction.name_scan_lines == 0 {
            return Err(ScreenerError::Configuration(
                "extraction.name_scan_lines must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Standard English stop words
pub fn default_stop_words() -> Vec<String> {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
        "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
        "what", "which", "who", "whom", "this", "that", "these", "those", "am", "is", "are",
        "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
        "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
        "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
        "in", "out", "on", "off", "over", "under", "again", "further", "then", "once", "here",
        "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
        "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
        "than", "too", "very", "s", "t", "can", "will", "just", "don", "should", "now",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
