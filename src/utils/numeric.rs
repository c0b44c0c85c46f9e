//! Numeric-string detection for the shorten guard.

/// Reports whether `s` is a purely numeric string.
///
/// Mirrors the classic dynamic-language notion of "numeric": decimal
/// integers, floats, and exponent forms (`"42"`, `"-3"`, `".5"`, `"1e5"`)
/// all count, while named float constants (`"inf"`, `"nan"`) and anything
/// containing other letters do not.
///
/// Callers are expected to trim the input first; surrounding whitespace
/// makes a string non-numeric here.
///
/// # Examples
///
/// ```ignore
/// assert!(is_numeric("12345"));
/// assert!(is_numeric("1e5"));
/// assert!(!is_numeric("inf"));
/// assert!(!is_numeric("https://example.com"));
/// ```
pub fn is_numeric(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    // `f64::from_str` accepts "inf", "infinity" and "nan"; only the exponent
    // marker may appear as a letter in a numeric string.
    if s.chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return false;
    }

    s.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_numeric() {
        assert!(is_numeric("0"));
        assert!(is_numeric("12345"));
        assert!(is_numeric("-3"));
        assert!(is_numeric("+7"));
    }

    #[test]
    fn test_floats_are_numeric() {
        assert!(is_numeric("12.5"));
        assert!(is_numeric(".5"));
        assert!(is_numeric("5."));
    }

    #[test]
    fn test_exponent_forms_are_numeric() {
        assert!(is_numeric("1e5"));
        assert!(is_numeric("2E-3"));
        assert!(is_numeric("9e999"));
    }

    #[test]
    fn test_named_float_constants_are_not_numeric() {
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("infinity"));
        assert!(!is_numeric("nan"));
        assert!(!is_numeric("NaN"));
    }

    #[test]
    fn test_plain_words_are_not_numeric() {
        assert!(!is_numeric("abc"));
        assert!(!is_numeric("example"));
    }

    #[test]
    fn test_urls_are_not_numeric() {
        assert!(!is_numeric("https://example.com"));
        assert!(!is_numeric("example.com/12345"));
    }

    #[test]
    fn test_malformed_numbers_are_not_numeric() {
        assert!(!is_numeric(""));
        assert!(!is_numeric("."));
        assert!(!is_numeric("e5"));
        assert!(!is_numeric("1e"));
        assert!(!is_numeric("1_000"));
        assert!(!is_numeric("12 34"));
        assert!(!is_numeric("0x1A"));
    }
}
