//! Candidate name strategies

use crate::error::Result;
use crate::extraction::strategy::{Field, FieldExtractor, RegexStrategy, Strategy};

/// A short, fully capitalized line near the top of the document
pub struct LeadingLineStrategy {
    scan_lines: usize,
}

impl LeadingLineStrategy {
    pub fn new(scan_lines: usize) -> Self {
        Self { scan_lines }
    }

    fn looks_like_name(line: &str) -> bool {
        let words: Vec<&str> = line.split_whitespace().collect();

        (2..=4).contains(&words.len())
            && words
                .iter()
                .all(|word| word.chars().next().is_some_and(char::is_uppercase))
            && !line.chars().any(|c| c.is_ascii_digit())
    }
}

impl Strategy for LeadingLineStrategy {
    fn name(&self) -> &'static str {
        "leading_line"
    }

    fn apply(&self, text: &str) -> Option<String> {
        text.split('\n')
            .take(self.scan_lines)
            .map(str::trim)
            .find(|line| Self::looks_like_name(line))
            .map(str::to_string)
    }
}

pub fn name_extractor(scan_lines: usize) -> Result<FieldExtractor> {
    Ok(FieldExtractor::new(Field::Name)
        .with_strategy(LeadingLineStrategy::new(scan_lines))
        .with_strategy(
            RegexStrategy::new(
                "labeled",
                r"(?i:\bname)[ \t]*:[ \t]*(\p{Lu}[\p{L}'.-]*(?:[ \t]+\p{Lu}[\p{L}'.-]*){0,3})",
            )?
            .capture(1),
        )
        .with_strategy(
            RegexStrategy::new(
                "resume_title",
                r"\b(\p{Lu}\p{Ll}+(?:[ \t]+\p{Lu}\p{Ll}+){1,3})(?:[ \t]+|[ \t]*[-|:][ \t]*)(?i:resume|cv|curriculum vitae)\b",
            )?
            .capture(1),
        ))
}
