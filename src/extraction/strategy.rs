//! Ordered, named extraction strategies

use crate::error::Result;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Candidate field a strategy chain fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    City,
    Qualification,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Email => write!(f, "email"),
            Field::Phone => write!(f, "phone"),
            Field::City => write!(f, "city"),
            Field::Qualification => write!(f, "qualification"),
        }
    }
}

/// One self-contained rule for pulling a field out of raw text
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` (or an empty string) means the rule did not fire
    fn apply(&self, text: &str) -> Option<String>;
}

type Normalizer = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Strategy backed by a single regex.
///
/// Matches are visited left to right and the first one whose normalized
/// capture is non-empty is returned.
pub struct RegexStrategy {
    name: &'static str,
    regex: Regex,
    group: usize,
    normalize: Normalizer,
}

impl RegexStrategy {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            group: 0,
            normalize: Box::new(|raw| Some(raw.trim().to_string())),
        })
    }

    /// Return capture group `group` instead of the whole match
    pub fn capture(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    pub fn normalize_with<F>(mut self, normalize: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.normalize = Box::new(normalize);
        self
    }
}

impl Strategy for RegexStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, text: &str) -> Option<String> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(self.group))
            .filter_map(|m| (self.normalize)(m.as_str()))
            .find(|value| !value.is_empty())
    }
}

/// Result of running a strategy chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub field: Field,
    /// Empty when nothing matched
    pub value: String,
    /// Name of the strategy that produced `value`
    pub strategy: Option<&'static str>,
}

impl Extraction {
    pub fn is_found(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Strategies for one field, tried in order until one produces a value
pub struct FieldExtractor {
    field: Field,
    strategies: Vec<Box<dyn Strategy>>,
}

impl FieldExtractor {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            strategies: Vec::new(),
        }
    }

    pub fn with_strategy<S: Strategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn extract(&self, text: &str) -> Extraction {
        for strategy in &self.strategies {
            if let Some(value) = strategy.apply(text).filter(|v| !v.is_empty()) {
                debug!("{} found by '{}' strategy", self.field, strategy.name());
                return Extraction {
                    field: self.field,
                    value,
                    strategy: Some(strategy.name()),
                };
            }
        }

        debug!("{} not found", self.field);
        Extraction {
            field: self.field,
            value: String::new(),
            strategy: None,
        }
    }

    /// Value only, empty string when not found
    pub fn extract_value(&self, text: &str) -> String {
        self.extract(text).value
    }
}
