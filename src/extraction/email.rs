//! Email address strategies

use crate::error::Result;
use crate::extraction::strategy::{Field, FieldExtractor, RegexStrategy};
use regex::Regex;

const LOCAL: &str = r"[A-Za-z0-9._%+-]+";

/// Domain label after a dot; a space after the dot is only allowed before a
/// lowercase label, so a sentence-ending full stop is not swallowed
const DOMAIN_LABEL: &str = r"(?:[ \t]*[a-z0-9-][A-Za-z0-9-]*|[A-Za-z0-9-]+)";

#[derive(Clone)]
struct EmailNormalizer {
    at_marker: Regex,
    dot_marker: Regex,
    at_word: Regex,
    dot_word: Regex,
    valid: Regex,
}

impl EmailNormalizer {
    fn new() -> Result<Self> {
        Ok(Self {
            at_marker: Regex::new(r"(?i)\s*(?:\(at\)|\[at\])\s*")?,
            dot_marker: Regex::new(r"(?i)\s*(?:\(dot\)|\[dot\])\s*")?,
            at_word: Regex::new(r"(?i)[ \t]+at[ \t]+")?,
            dot_word: Regex::new(r"(?i)[ \t]+dot[ \t]+")?,
            valid: Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")?,
        })
    }

    /// Markers become `@` / `.`, whitespace goes, and the result must look like an address
    fn normalize(&self, raw: &str) -> Option<String> {
        let replaced = self.at_marker.replace_all(raw.trim(), "@");
        let replaced = self.dot_marker.replace_all(&replaced, ".");
        let compact: String = replaced.chars().filter(|c| !c.is_whitespace()).collect();

        self.valid.is_match(&compact).then_some(compact)
    }

    /// Labeled values may also spell the markers out as words
    fn normalize_words(&self, raw: &str) -> Option<String> {
        let replaced = self.at_word.replace_all(raw.trim(), "@");
        let replaced = self.dot_word.replace_all(&replaced, ".");
        self.normalize(&replaced)
    }
}

pub fn email_extractor() -> Result<FieldExtractor> {
    let normalizer = EmailNormalizer::new()?;
    let spaced = normalizer.clone();
    let marked = normalizer.clone();
    let labeled = normalizer;

    Ok(FieldExtractor::new(Field::Email)
        .with_strategy(RegexStrategy::new(
            "standard",
            &format!(r"\b{LOCAL}@[A-Za-z0-9.-]+\.[A-Za-z]{{2,}}\b"),
        )?)
        .with_strategy(
            RegexStrategy::new(
                "spaced",
                &format!(r"{LOCAL}[ \t]*@[ \t]*[A-Za-z0-9-]+(?:[ \t]*\.{DOMAIN_LABEL})+"),
            )?
            .normalize_with(move |raw| spaced.normalize(raw)),
        )
        .with_strategy(
            RegexStrategy::new(
                "at_marker",
                &format!(
                    r"(?i:{LOCAL}[ \t]*(?:\(at\)|\[at\])[ \t]*[A-Za-z0-9-]+)(?:[ \t]*\.{DOMAIN_LABEL}|[ \t]*(?i:\(dot\)|\[dot\])[ \t]*[A-Za-z0-9-]+)+"
                ),
            )?
            .normalize_with(move |raw| marked.normalize(raw)),
        )
        .with_strategy(
            RegexStrategy::new(
                "labeled",
                r"(?i)\b(?:e-?mail(?:[ \t]+id)?|id)[ \t]*[:\-][ \t]*([^\s,;|]+(?:[ \t]+(?:at|dot)[ \t]+[^\s,;|]+)*)",
            )?
            .capture(1)
            .normalize_with(move |raw| labeled.normalize_words(raw)),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> (String, Option<&'static str>) {
        let extraction = email_extractor().unwrap().extract(text);
        (extraction.value, extraction.strategy)
    }

    #[test]
    fn test_standard_address_in_prose() {
        let text = "Feel free to reach out at jane.doe@example.com, any time after 9am.";

        assert_eq!(extract(text), ("jane.doe@example.com".to_string(), Some("standard")));
    }

    #[test]
    fn test_address_with_embedded_spaces() {
        let text = "Write to jane.doe @ example . com for references";

        assert_eq!(extract(text), ("jane.doe@example.com".to_string(), Some("spaced")));
    }

    #[test]
    fn test_sentence_full_stop_ends_the_domain() {
        assert_eq!(
            extract("Mail me at jane @ example.com. Thanks"),
            ("jane@example.com".to_string(), Some("spaced"))
        );
        assert_eq!(
            extract("jane(at)example.org. References on request").0,
            "jane@example.org"
        );
    }

    #[test]
    fn test_at_markers_are_normalized() {
        assert_eq!(extract("jane.doe(at)example.com").0, "jane.doe@example.com");
        assert_eq!(extract("jane.doe [at] example [dot] org").0, "jane.doe@example.org");
        assert_eq!(extract("jane.doe [AT] example.org").1, Some("at_marker"));
    }

    #[test]
    fn test_labeled_address_spelled_out() {
        let text = "Email: jane.doe at example dot com\nPhone: 555 123 4567";

        assert_eq!(extract(text), ("jane.doe@example.com".to_string(), Some("labeled")));
    }

    #[test]
    fn test_standard_wins_over_later_strategies() {
        let text = "Email ID: someone(at)old.net\nCurrent: jane@example.com";

        assert_eq!(extract(text), ("jane@example.com".to_string(), Some("standard")));
    }

    #[test]
    fn test_missing_email_is_empty() {
        assert_eq!(extract("No contact details here, sorry."), (String::new(), None));
        assert_eq!(extract("Email: available on request").0, "");
    }
}
