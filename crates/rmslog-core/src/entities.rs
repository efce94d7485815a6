//! HTML character reference decoding for job-block text
//!
//! Only the references that show up in RMS logs are handled: numeric
//! references and a small named set. Everything else passes through.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// `&#65;`, `&#x41;` with an optional trailing semicolon.
static NUMERIC_REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#([xX][0-9a-fA-F]+|[0-9a-fA-F]+);?")
        .expect("Numeric reference regex pattern is valid")
});

/// `&amp;`, `&NBSP` and friends.
static NAMED_REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&([a-zA-Z]+);?").expect("Named reference regex pattern is valid")
});

/// Decode numeric and common named HTML character references.
///
/// Numeric references that do not name a valid character (including decimal
/// references containing hex letters) decode to an empty string. Unknown
/// named references are kept verbatim.
///
/// # Examples
///
/// ```
/// use rmslog_core::entities::decode_entities;
///
/// assert_eq!(decode_entities("a &amp; b &#65;"), "a & b A");
/// assert_eq!(decode_entities("&copy;"), "&copy;");
/// ```
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let numeric = NUMERIC_REFERENCE_PATTERN.replace_all(input, |caps: &Captures| {
        decode_numeric(&caps[1])
            .map(String::from)
            .unwrap_or_default()
    });

    let named = NAMED_REFERENCE_PATTERN.replace_all(&numeric, |caps: &Captures| {
        match named_reference(&caps[1]) {
            Some(decoded) => decoded.to_string(),
            None => caps[0].to_string(),
        }
    });

    Cow::Owned(named.into_owned())
}

fn decode_numeric(digits: &str) -> Option<char> {
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn named_reference(name: &str) -> Option<char> {
    match name.to_ascii_lowercase().as_str() {
        "nbsp" => Some('\u{00A0}'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_mixed_references() {
        assert_eq!(
            decode_entities("a &amp; b &#65; &nbsp;c"),
            "a & b A\u{00A0}c"
        );
    }

    #[test]
    fn test_decodes_hex_reference() {
        assert_eq!(decode_entities("&#x7B;x&#X7D;"), "{x}");
    }

    #[test]
    fn test_named_references_are_case_insensitive() {
        assert_eq!(decode_entities("&LT;tag&Gt;"), "<tag>");
        assert_eq!(decode_entities("&QUOT;hi&apos;"), "\"hi'");
    }

    #[test]
    fn test_semicolon_is_optional() {
        assert_eq!(decode_entities("&lt &#66"), "< B");
    }

    #[test]
    fn test_unknown_named_reference_passes_through() {
        assert_eq!(decode_entities("&copy; 2024"), "&copy; 2024");
    }

    #[test]
    fn test_malformed_numeric_reference_decodes_to_empty() {
        // Decimal form with hex letters is not a number
        assert_eq!(decode_entities("x&#12ab;y"), "xy");
        // Surrogate code points are not characters
        assert_eq!(decode_entities("x&#xD800;y"), "xy");
    }

    #[test]
    fn test_decoded_output_is_not_rescanned() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(decode_entities("no refs here"), Cow::Borrowed(_)));
    }
}
