//! Permissive argument parsing.
//!
//! Filter arguments arrive as positional strings from the request path.
//! Malformed numbers never fail a request; they parse as zero, which keeps
//! one bad argument from blocking the whole response.

use std::borrow::Cow;

/// Parse an integer argument, defaulting to 0.
pub(crate) fn parse_int(arg: &str) -> i64 {
    arg.parse().unwrap_or(0)
}

/// Parse a float argument, defaulting to 0.
pub(crate) fn parse_float(arg: &str) -> f64 {
    arg.parse().unwrap_or(0.0)
}

/// Percent-decode an argument, falling back to the raw text when the
/// escape sequences do not decode cleanly.
pub(crate) fn url_decode(arg: &str) -> String {
    match urlencoding::decode(arg) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => arg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_permissive() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("-7"), -7);
        assert_eq!(parse_int("+5"), 5);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("12.5"), 0);
    }

    #[test]
    fn test_parse_float_permissive() {
        assert_eq!(parse_float("1.5"), 1.5);
        assert_eq!(parse_float("-30"), -30.0);
        assert_eq!(parse_float("1e2"), 100.0);
        assert_eq!(parse_float("nope"), 0.0);
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(
            url_decode("https%3A%2F%2Fexample.com%2Fmark.png"),
            "https://example.com/mark.png"
        );
        assert_eq!(url_decode("plain.png"), "plain.png");
    }
}
