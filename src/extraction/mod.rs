//! Heuristic candidate field extraction
//! Each field is filled by its own ordered strategy chain

pub mod email;
pub mod location;
pub mod name;
pub mod phone;
pub mod qualification;
pub mod strategy;

use crate::config::ExtractionConfig;
use crate::error::Result;
use qualification::QualificationMatcher;
use serde::{Deserialize, Serialize};
use strategy::{Extraction, Field, FieldExtractor};

/// Structured candidate fields; an empty string means "not found"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub qualification: String,
}

impl CandidateFields {
    /// At least one way to reach the candidate
    pub fn has_contact(&self) -> bool {
        !self.email.is_empty() || !self.phone.is_empty()
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::City => self.city = value,
            Field::Qualification => self.qualification = value,
        }
    }
}

pub struct CandidateExtractor {
    extractors: Vec<FieldExtractor>,
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default()).expect("Failed to create default candidate extractor")
    }
}

impl CandidateExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let extractors = vec![
            name::name_extractor(config.name_scan_lines)?,
            email::email_extractor()?,
            phone::phone_extractor(config.phone_max_length)?,
            location::location_extractor(config.postal_window)?,
            FieldExtractor::new(Field::Qualification).with_strategy(QualificationMatcher::new()?),
        ];

        Ok(Self { extractors })
    }

    /// Run every field extractor over `text`; missing fields stay empty
    pub fn extract(&self, text: &str) -> CandidateFields {
        let mut fields = CandidateFields::default();
        for extraction in self.extract_detailed(text) {
            fields.set(extraction.field, extraction.value);
        }
        fields
    }

    /// Per-field results including which strategy matched
    pub fn extract_detailed(&self, text: &str) -> Vec<Extraction> {
        self.extractors.iter().map(|e| e.extract(text)).collect()
    }

    pub fn extractor(&self, field: Field) -> Option<&FieldExtractor> {
        self.extractors.iter().find(|e| e.field() == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\n\
        Senior Data Engineer\n\
        jane.doe@example.com | (555) 123-4567\n\
        Based in Seattle, WA\n\
        \n\
        Education\n\
        B.Sc Computer Science, 2014\n\
        M.Sc Data Science, 2016\n";

    #[test]
    fn test_extracts_all_fields() {
        let extractor = CandidateExtractor::default();

        let fields = extractor.extract(RESUME);

        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.email, "jane.doe@example.com");
        assert_eq!(fields.phone, "5551234567");
        assert_eq!(fields.city, "Seattle, WA");
        assert_eq!(fields.qualification, "Masters");
        assert!(fields.has_contact());
    }

    #[test]
    fn test_fields_are_independent() {
        let extractor = CandidateExtractor::default();

        let fields = extractor.extract("reach me: jane@example.com");

        assert_eq!(fields.email, "jane@example.com");
        assert_eq!(fields.name, "");
        assert_eq!(fields.phone, "");
        assert_eq!(fields.city, "");
        assert_eq!(fields.qualification, "");
    }

    #[test]
    fn test_detailed_results_name_the_strategy() {
        let extractor = CandidateExtractor::default();

        let detailed = extractor.extract_detailed(RESUME);

        let phone = detailed.iter().find(|e| e.field == Field::Phone).unwrap();
        assert_eq!(phone.strategy, Some("parenthesized"));
        let qualification = detailed.iter().find(|e| e.field == Field::Qualification).unwrap();
        assert_eq!(qualification.strategy, Some("highest_mentioned"));
    }

    #[test]
    fn test_empty_text_yields_empty_fields() {
        let extractor = CandidateExtractor::default();

        let fields = extractor.extract("");

        assert_eq!(fields, CandidateFields::default());
        assert!(!fields.has_contact());
    }

    #[test]
    fn test_extractor_lookup_by_field() {
        let extractor = CandidateExtractor::default();

        let names = extractor.extractor(Field::Email).unwrap().strategy_names();
        assert_eq!(names, vec!["standard", "spaced", "at_marker", "labeled"]);
    }
}
