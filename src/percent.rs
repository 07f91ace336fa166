//! Percent-encoding for form keys and values.
//!
//! Only ASCII alphanumerics and `*`, `-`, `.`, `_` pass through unchanged.
//! Every other character, space and all non-ASCII code points included, is
//! written as `%XX` for each byte of its UTF-8 representation.
//!
//! ```rust
//! use serde_urlform::percent;
//!
//! assert_eq!(percent::encode("a b&c"), "a%20b%26c");
//! assert_eq!(percent::encode("é"), "%C3%A9");
//! assert_eq!(percent::decode("a%20b%26c").unwrap(), "a b&c");
//! ```

use crate::{Error, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in form-urlencoded keys and values.
pub const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Percent-encodes `text` for use as a form key segment or value.
#[must_use]
pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, FORM_ENCODE_SET).to_string()
}

/// Decodes `%XX` escapes in `text`.
///
/// `+` is left untouched since [`encode`] never produces it for spaces.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the decoded bytes are not valid UTF-8.
pub fn decode(text: &str) -> Result<String> {
    percent_decode_str(text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| Error::encoding("", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreserved_pass_through() {
        let text = "AZaz09*-._";
        assert_eq!(encode(text), text);
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        assert_eq!(encode(" "), "%20");
        assert_eq!(encode("+"), "%2B");
        assert_eq!(encode("[]"), "%5B%5D");
        assert_eq!(encode("a=b&c"), "a%3Db%26c");
        assert_eq!(encode("~"), "%7E");
        assert_eq!(encode(","), "%2C");
    }

    #[test]
    fn test_multibyte_uses_utf8_bytes() {
        assert_eq!(encode("ü"), "%C3%BC");
        assert_eq!(encode("日"), "%E6%97%A5");
        assert_eq!(encode("🦀"), "%F0%9F%A6%80");
    }

    #[test]
    fn test_decode_inverts_encode() {
        for text in ["", "plain", "a b", "x=1&y=[2]", "Grüße, 世界"] {
            assert_eq!(decode(&encode(text)).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode("ok%C3").unwrap_err();
        match err {
            Error::Encoding { value, .. } => assert_eq!(value, "ok%C3"),
            other => panic!("Expected encoding error, got {other:?}"),
        }
    }
}
