//! City / address strategies

use crate::error::{Result, ScreenerError};
use crate::extraction::strategy::{Field, FieldExtractor, RegexStrategy, Strategy};
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::sync::Arc;

const NOISE_WORDS: &[&str] = &[
    "curriculum vitae",
    "resume",
    "cv",
    "contact",
    "details",
    "email",
    "phone",
    "mobile",
    "address",
    "location",
];

/// Words near a number that mark it as money rather than a postal code
const SALARY_CUES: &[&str] = &[
    "salary",
    "ctc",
    "compensation",
    "expected",
    "expectation",
    "package",
    "per annum",
    "usd",
    "eur",
    "gbp",
    "inr",
    "$",
    "€",
    "£",
];

/// How far around a code, within its line, salary cues are looked for
const SALARY_CONTEXT: usize = 30;

/// Removes words that often sit next to a location but are not part of it
pub struct NoiseFilter {
    matcher: AhoCorasick,
}

impl NoiseFilter {
    pub fn new() -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(NOISE_WORDS)
            .map_err(|e| ScreenerError::TextProcessing(format!("Failed to build noise filter: {}", e)))?;

        Ok(Self { matcher })
    }

    /// Cleaned location, or `None` if nothing but noise is left
    pub fn strip(&self, text: &str) -> Option<String> {
        let mut kept = String::with_capacity(text.len());
        let mut last = 0;

        for mat in self.matcher.find_iter(text) {
            if !is_whole_word(text, mat.start(), mat.end()) {
                continue;
            }
            kept.push_str(&text[last..mat.start()]);
            kept.push(' ');
            last = mat.end();
        }
        kept.push_str(&text[last..]);

        let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
        let trimmed = collapsed
            .trim_matches(|c: char| c.is_whitespace() || ",;:-|/".contains(c))
            .to_string();

        (!trimmed.is_empty()).then_some(trimmed)
    }
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Postal code lookup that prefers a nearby place name over the raw code
pub struct PostalCodeStrategy {
    formats: Vec<Regex>,
    place: Regex,
    window: usize,
    noise: Arc<NoiseFilter>,
    salary_cues: AhoCorasick,
}

impl PostalCodeStrategy {
    pub fn new(window: usize, noise: Arc<NoiseFilter>) -> Result<Self> {
        let salary_cues = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(SALARY_CUES)
            .map_err(|e| ScreenerError::TextProcessing(format!("Failed to build salary cues: {}", e)))?;

        Ok(Self {
            formats: vec![
                // US
                Regex::new(r"\b\d{5}(?:-\d{4})?\b")?,
                // UK
                Regex::new(r"\b[A-Z]{1,2}\d[A-Z\d]?[ \t]?\d[A-Z]{2}\b")?,
                // Canada
                Regex::new(r"\b[A-Z]\d[A-Z][ \t]?\d[A-Z]\d\b")?,
            ],
            place: Regex::new(r"\p{Lu}\p{Ll}+(?:[ \t]+\p{Lu}\p{Ll}+)?")?,
            window,
            noise,
            salary_cues,
        })
    }

    /// True when the code's line mentions pay near it
    fn looks_like_salary(&self, text: &str, start: usize, end: usize) -> bool {
        let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);
        let from = floor_boundary(text, start.saturating_sub(SALARY_CONTEXT)).max(line_start);
        let to = floor_boundary(text, end.saturating_add(SALARY_CONTEXT)).min(line_end);
        let context = &text[from..to];

        self.salary_cues.find_iter(context).any(|mat| {
            let cue = SALARY_CUES[mat.pattern().as_usize()];
            !cue.chars().all(|c| c.is_alphabetic() || c == ' ')
                || is_whole_word(context, mat.start(), mat.end())
        })
    }

    fn place_near(&self, text: &str, start: usize, end: usize) -> Option<String> {
        let before = &text[floor_boundary(text, start.saturating_sub(self.window))..start];
        let nearest_before = self
            .place
            .find_iter(before)
            .filter_map(|m| self.noise.strip(m.as_str()))
            .last();
        if nearest_before.is_some() {
            return nearest_before;
        }

        let after = &text[end..floor_boundary(text, end.saturating_add(self.window))];
        self.place
            .find_iter(after)
            .find_map(|m| self.noise.strip(m.as_str()))
    }
}

impl Strategy for PostalCodeStrategy {
    fn name(&self) -> &'static str {
        "postal_code"
    }

    fn apply(&self, text: &str) -> Option<String> {
        self.formats.iter().find_map(|format| {
            format
                .find_iter(text)
                .find(|code| !self.looks_like_salary(text, code.start(), code.end()))
                .map(|code| {
                    self.place_near(text, code.start(), code.end())
                        .unwrap_or_else(|| code.as_str().to_string())
                })
        })
    }
}

/// Largest char boundary at or below `index`, clamped to the text
fn floor_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

pub fn location_extractor(postal_window: usize) -> Result<FieldExtractor> {
    let noise = Arc::new(NoiseFilter::new()?);
    let phrase_noise = Arc::clone(&noise);
    let label_noise = Arc::clone(&noise);

    Ok(FieldExtractor::new(Field::City)
        .with_strategy(
            RegexStrategy::new(
                "residence_phrase",
                r"\b(?i:located|based|living|residing|resides|reside|lives|live)[ \t]+(?i:in|at|near)[ \t]+(\p{Lu}[\p{L}'-]*(?:[ \t]+\p{Lu}[\p{L}'-]*){0,2}(?:,[ \t]*\p{Lu}\p{L}*)?)",
            )?
            .capture(1)
            .normalize_with(move |raw| phrase_noise.strip(raw)),
        )
        .with_strategy(
            RegexStrategy::new(
                "labeled",
                r"(?i)\b(?:address|location|city)[ \t]*:[ \t]*([^\n|]+)",
            )?
            .capture(1)
            .normalize_with(move |raw| label_noise.strip(raw.trim_end_matches('.'))),
        )
        .with_strategy(PostalCodeStrategy::new(postal_window, noise)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> (String, Option<&'static str>) {
        let extraction = location_extractor(50).unwrap().extract(text);
        (extraction.value, extraction.strategy)
    }

    #[test]
    fn test_residence_phrase() {
        assert_eq!(
            extract("Backend developer based in San Francisco. Open to remote work."),
            ("San Francisco".to_string(), Some("residence_phrase"))
        );
        assert_eq!(extract("Currently living in Pune, India with family").0, "Pune, India");
    }

    #[test]
    fn test_labeled_address() {
        let text = "Jane Doe\nAddress: 221B Baker Street, London\nPhone: 555 123 4567";

        assert_eq!(extract(text), ("221B Baker Street, London".to_string(), Some("labeled")));
    }

    #[test]
    fn test_noise_words_are_stripped() {
        assert_eq!(extract("Location: Austin, TX | Resume").0, "Austin, TX");
        assert_eq!(extract("based in Denver Resume").0, "Denver");
    }

    #[test]
    fn test_postal_code_prefers_nearby_place() {
        let text = "Jane Doe\n742 Evergreen Terrace\nChicago, IL 60601\njane@example.com";

        assert_eq!(extract(text), ("Chicago".to_string(), Some("postal_code")));
    }

    #[test]
    fn test_postal_code_falls_back_to_raw_code() {
        assert_eq!(extract("zip 90210 only").0, "90210");
    }

    #[test]
    fn test_salary_figures_are_not_postal_codes() {
        assert_eq!(extract("Jane Doe\nSalary expectation 85000 USD"), (String::new(), None));
        assert_eq!(extract("Expected CTC: $95000"), (String::new(), None));
    }

    #[test]
    fn test_postal_code_after_salary_line() {
        let text = "Jane Doe\nSalary 85000 USD\nPortland, OR 97201";

        assert_eq!(extract(text), ("Portland".to_string(), Some("postal_code")));
    }

    #[test]
    fn test_canadian_postal_code() {
        assert_eq!(extract("postal K1A 0B1").0, "K1A 0B1");
    }

    #[test]
    fn test_no_location_is_empty() {
        assert_eq!(extract("skilled in rust and sql"), (String::new(), None));
    }

    #[test]
    fn test_noise_filter_keeps_embedded_words() {
        let filter = NoiseFilter::new().unwrap();

        assert_eq!(filter.strip("Contactville"), Some("Contactville".to_string()));
        assert_eq!(filter.strip("CV - Resume"), None);
    }

    #[test]
    fn test_floor_boundary_respects_multibyte_chars() {
        let text = "Zürich";
        assert_eq!(floor_boundary(text, 2), 1);
        assert_eq!(floor_boundary(text, 100), text.len());
    }
}
