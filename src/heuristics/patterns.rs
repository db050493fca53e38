//! Compiled patterns and character-class checks shared by the heuristics.

use regex::Regex;

/// Pattern for zero-padded digit strings such as `007`.
pub static LEADING_ZEROS_PATTERN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^0[0-9]+$").expect("Invalid leading zeros pattern"));

/// Pattern for 15-character Salesforce-style record IDs.
pub static SALESFORCE_ID_15_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]{15}$").expect("Invalid 15-character ID pattern")
});

/// Pattern for 18-character Salesforce-style record IDs.
pub static SALESFORCE_ID_18_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]{18}$").expect("Invalid 18-character ID pattern")
});

/// Non-empty and made of ASCII digits only.
#[inline]
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Non-empty and made of alphabetic characters only.
#[inline]
pub fn is_alpha(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

/// A record-ID shape: matches `pattern` and mixes letters with digits.
///
/// The mix requirement keeps plain numbers and plain words of the right
/// length from being flagged.
pub fn looks_like_record_id(s: &str, pattern: &Regex) -> bool {
    pattern.is_match(s)
        && s.bytes().any(|b| b.is_ascii_alphabetic())
        && s.bytes().any(|b| b.is_ascii_digit())
}

/// Parse a whole cell as a finite number.
#[inline]
pub fn parse_numeric(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric ordering of two digit strings without going through floats.
pub fn cmp_digits(a: &str, b: &str) -> std::cmp::Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_leading_zeros_pattern() {
        assert!(LEADING_ZEROS_PATTERN.is_match("007"));
        assert!(LEADING_ZEROS_PATTERN.is_match("01"));
        assert!(!LEADING_ZEROS_PATTERN.is_match("0"));
        assert!(!LEADING_ZEROS_PATTERN.is_match("100"));
        assert!(!LEADING_ZEROS_PATTERN.is_match("0a1"));
    }

    #[test]
    fn test_record_ids() {
        assert!(looks_like_record_id(
            "a1b2c3d4e5f6g7h",
            &SALESFORCE_ID_15_PATTERN
        ));
        assert!(!looks_like_record_id(
            "111111111111111",
            &SALESFORCE_ID_15_PATTERN
        ));
        assert!(!looks_like_record_id(
            "abcdefghijklmno",
            &SALESFORCE_ID_15_PATTERN
        ));
        assert!(looks_like_record_id(
            "001A000001abcdEFGH",
            &SALESFORCE_ID_18_PATTERN
        ));
        assert!(!looks_like_record_id(
            "a1b2c3d4e5f6g7h",
            &SALESFORCE_ID_18_PATTERN
        ));
    }

    #[test]
    fn test_character_classes() {
        assert!(is_digits("0123"));
        assert!(!is_digits(""));
        assert!(!is_digits("-1"));
        assert!(is_alpha("Zoë"));
        assert!(!is_alpha("a b"));
        assert!(!is_alpha(""));
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("-2.5"), Some(-2.5));
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric(" 1"), None);
        assert_eq!(parse_numeric("abc"), None);
    }

    #[test]
    fn test_cmp_digits() {
        assert_eq!(cmp_digits("9", "10"), Ordering::Less);
        assert_eq!(cmp_digits("007", "7"), Ordering::Equal);
        assert_eq!(cmp_digits("123456789012345678901", "99"), Ordering::Greater);
    }
}
