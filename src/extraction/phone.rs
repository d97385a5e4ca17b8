//! Phone number strategies

use crate::error::Result;
use crate::extraction::strategy::{Field, FieldExtractor, RegexStrategy};

const COUNTRY_PREFIX: &str = r"(?:\+\d{1,3}[-.\s]?)?";

/// Keep digits plus a leading `+`, capped at `max_length` characters
pub fn normalize_phone(raw: &str, max_length: usize) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let mut phone = String::with_capacity(digits.len() + 1);
    if raw.trim_start().starts_with('+') {
        phone.push('+');
    }
    phone.push_str(&digits);
    phone.truncate(max_length);

    Some(phone)
}

pub fn phone_extractor(max_length: usize) -> Result<FieldExtractor> {
    let normalize = move |raw: &str| normalize_phone(raw, max_length);

    Ok(FieldExtractor::new(Field::Phone)
        .with_strategy(
            RegexStrategy::new(
                "parenthesized",
                &format!(r"{COUNTRY_PREFIX}\(\d{{3}}\)[-.\s]?\d{{3}}[-.\s]?\d{{4}}\b"),
            )?
            .normalize_with(normalize),
        )
        .with_strategy(
            RegexStrategy::new(
                "hyphenated",
                &format!(r"{COUNTRY_PREFIX}\b\d{{3}}[-.\s]\d{{3}}[-.\s]\d{{4}}\b"),
            )?
            .normalize_with(normalize),
        )
        .with_strategy(
            // The country code may be glued to the number, as in +919876543210
            RegexStrategy::new(
                "contiguous",
                r"(?:^|[^\d+])((?:\+\d{1,3}[-.\s]?)?\d{10})\b",
            )?
            .capture(1)
            .normalize_with(normalize),
        )
        .with_strategy(
            RegexStrategy::new("grouped", &format!(r"{COUNTRY_PREFIX}\b\d{{5}}[-\s]\d{{5}}\b"))?
                .normalize_with(normalize),
        )
        .with_strategy(
            RegexStrategy::new(
                "labeled",
                r"(?i)\b(?:phone|mobile|mob|contact|tel|cell)(?:[ \t]*(?:no\.?|number|#))?[ \t]*[:\-]?[ \t]*(\+?[\d(][\d \t().-]{6,19})",
            )?
            .capture(1)
            .normalize_with(normalize),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> (String, Option<&'static str>) {
        let extraction = phone_extractor(15).unwrap().extract(text);
        (extraction.value, extraction.strategy)
    }

    #[test]
    fn test_parenthesized_area_code() {
        assert_eq!(
            extract("Contact: (555) 123-4567"),
            ("5551234567".to_string(), Some("parenthesized"))
        );
    }

    #[test]
    fn test_international_prefix_is_kept() {
        assert_eq!(extract("Call +1 555-123-4567 after 5pm").0, "+15551234567");
        assert_eq!(extract("Mobile +44 (020) 794-6095").0, "+440207946095");
    }

    #[test]
    fn test_contiguous_and_grouped_digits() {
        assert_eq!(extract("ph 9876543210 (whatsapp)"), ("9876543210".to_string(), Some("contiguous")));
        assert_eq!(extract("reach me on 98765 43210"), ("9876543210".to_string(), Some("grouped")));
    }

    #[test]
    fn test_country_code_attached_to_number() {
        assert_eq!(
            extract("Jane Doe | +919876543210 | jane@x.com"),
            ("+919876543210".to_string(), Some("contiguous"))
        );
        assert_eq!(extract("+91 9876543210").0, "+919876543210");
        // Longer digit runs are not phone numbers
        assert_eq!(extract("order 123456789012345 shipped").0, "");
    }

    #[test]
    fn test_labeled_fallback_for_unusual_layouts() {
        assert_eq!(
            extract("Tel: 030 1234 5678"),
            ("03012345678".to_string(), Some("labeled"))
        );
    }

    #[test]
    fn test_output_is_digits_with_optional_leading_plus_and_bounded() {
        let samples = [
            "Phone: +91 (22) 4000 1234 5678 9012 3456",
            "Contact: (555) 123-4567",
            "tel 12 34 56 78 90 12 34 56 78",
            "+353 1 234 5678",
        ];

        for sample in samples {
            let (phone, _) = extract(sample);
            assert!(phone.len() <= 15, "{sample:?} -> {phone:?}");
            let digits = phone.strip_prefix('+').unwrap_or(&phone);
            assert!(digits.chars().all(|c| c.is_ascii_digit()), "{sample:?} -> {phone:?}");
        }
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone(" +1 (555) 123-4567", 15), Some("+15551234567".to_string()));
        assert_eq!(normalize_phone("555+123", 15), Some("555123".to_string()));
        assert_eq!(normalize_phone("12345678901234567890", 15), Some("123456789012345".to_string()));
        assert_eq!(normalize_phone("() -", 15), None);
    }

    #[test]
    fn test_no_phone_is_empty() {
        assert_eq!(extract("Worked 2019 - 2021 at ACME"), (String::new(), None));
    }
}
