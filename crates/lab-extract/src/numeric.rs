//! Numeric token parsing.

/// Parses a string as f64, returning None for invalid, empty or non-finite input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_and_decimal_tokens() {
        assert_eq!(parse_f64("7200"), Some(7200.0));
        assert_eq!(parse_f64(" 2.1 "), Some(2.1));
    }

    #[test]
    fn rejects_empty_and_overflowing_tokens() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("abc"), None);
        assert_eq!(parse_f64(&"9".repeat(400)), None);
    }
}
