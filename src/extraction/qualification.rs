//! Highest qualification mentioned in a resume

use crate::error::Result;
use crate::extraction::strategy::Strategy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Education levels, ordered lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Qualification {
    #[serde(rename = "High School")]
    HighSchool,
    Diploma,
    Bachelors,
    Masters,
    #[serde(rename = "PhD")]
    Phd,
}

impl Qualification {
    pub fn label(&self) -> &'static str {
        match self {
            Qualification::HighSchool => "High School",
            Qualification::Diploma => "Diploma",
            Qualification::Bachelors => "Bachelors",
            Qualification::Masters => "Masters",
            Qualification::Phd => "PhD",
        }
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detects every qualification mentioned and keeps the highest one.
///
/// Position in the document does not matter.
pub struct QualificationMatcher {
    patterns: Vec<(Qualification, Regex)>,
}

impl QualificationMatcher {
    pub fn new() -> Result<Self> {
        let table = [
            (Qualification::Phd, r"(?i)\b(?:ph\.?\s?d|doctorate)\b"),
            (
                Qualification::Masters,
                r"(?i)\b(?:m\.?sc|master['’]?s|master\s+of|m\.?a|m\.?ed|m\.?tech|mba|msc|ma|ms)\b",
            ),
            (
                Qualification::Bachelors,
                r"(?i)\b(?:b\.?sc|bachelor['’]?s|bachelor\s+of|b\.?a|b\.?ed|b\.?tech|bsc|ba)\b",
            ),
            (Qualification::Diploma, r"(?i)\b(?:diploma|certificate)\b"),
            (Qualification::HighSchool, r"(?i)\b(?:h\.s|high school|secondary school)\b"),
        ];

        let patterns = table
            .into_iter()
            .map(|(level, pattern)| Ok((level, Regex::new(pattern)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Every level with at least one mention
    pub fn mentioned(&self, text: &str) -> Vec<Qualification> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(level, _)| *level)
            .collect()
    }

    pub fn highest(&self, text: &str) -> Option<Qualification> {
        self.mentioned(text).into_iter().max()
    }
}

impl Strategy for QualificationMatcher {
    fn name(&self) -> &'static str {
        "highest_mentioned"
    }

    fn apply(&self, text: &str) -> Option<String> {
        self.highest(text).map(|q| q.label().to_string())
    }
}
