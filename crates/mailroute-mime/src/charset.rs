//! Charset decoding for textual parts.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, WINDOWS_1252};

/// Decodes the transfer-decoded bytes of a `text/*` part into a string.
///
/// An absent charset parameter falls back to ISO-8859-1, which accepts every
/// byte (`encoding_rs` resolves that label to its windows-1252 superset). An
/// unrecognized label is [`Error::CharsetDecode`]. In the default lenient
/// mode, byte sequences invalid for the declared charset decode to
/// replacement characters; in strict mode they are rejected.
pub(crate) fn decode_text(bytes: &[u8], charset: Option<&str>, strict: bool) -> Result<String> {
    let encoding = match charset {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| Error::CharsetDecode(format!("unrecognized charset: {label}")))?,
        None => WINDOWS_1252,
    };

    let (text, _, had_errors) = encoding.decode(bytes);
    if strict && had_errors {
        return Err(Error::CharsetDecode(format!(
            "input is not valid {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let text = decode_text("héllo".as_bytes(), Some("utf-8"), false).unwrap();
        assert_eq!(text, "héllo");
    }

    #[test]
    fn test_decode_iso_8859_15() {
        // 0xE9 = é, 0xA4 = € in ISO-8859-15
        let text = decode_text(&[b'c', b'a', b'f', 0xE9, b' ', 0xA4], Some("ISO-8859-15"), false)
            .unwrap();
        assert_eq!(text, "café €");
    }

    #[test]
    fn test_decode_fallback_when_charset_absent() {
        // 0xE9 = é in ISO-8859-1
        let text = decode_text(&[b'c', b'a', b'f', 0xE9], None, false).unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn test_decode_unrecognized_charset() {
        let err = decode_text(b"hello", Some("klingon-1"), false).unwrap_err();
        assert!(matches!(err, Error::CharsetDecode(_)));
    }

    #[test]
    fn test_decode_strict_rejects_invalid_sequences() {
        // 0xFF is never valid UTF-8
        let bytes = [b'a', 0xFF, b'b'];
        assert!(decode_text(&bytes, Some("utf-8"), true).is_err());

        let lenient = decode_text(&bytes, Some("utf-8"), false).unwrap();
        assert_eq!(lenient, "a\u{FFFD}b");
    }
}
