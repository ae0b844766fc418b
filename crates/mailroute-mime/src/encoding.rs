//! Transfer decoding (RFC 2045 Content-Transfer-Encoding).
//!
//! Decodes a part's body bytes into the bytes they represent. Charset
//! interpretation of textual parts happens in a later stage, so everything
//! here is byte-in, byte-out.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Transfer encoding types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// 7-bit ASCII, no encoding applied.
    SevenBit,
    /// 8-bit bytes, no encoding applied.
    EightBit,
    /// Raw binary, no encoding applied.
    Binary,
    /// Base64 encoding.
    Base64,
    /// Quoted-Printable encoding.
    QuotedPrintable,
}

impl TransferEncoding {
    /// Parses a Content-Transfer-Encoding token (case-insensitive).
    ///
    /// Callers default to [`Self::SevenBit`] when the header is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTransferEncoding`] for any token outside
    /// the five recognized encodings.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "7bit" => Ok(Self::SevenBit),
            "8bit" => Ok(Self::EightBit),
            "binary" => Ok(Self::Binary),
            "base64" => Ok(Self::Base64),
            "quoted-printable" => Ok(Self::QuotedPrintable),
            other => Err(Error::UnsupportedTransferEncoding(other.to_string())),
        }
    }

    /// Whether decoding passes the bytes through unchanged.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        matches!(self, Self::SevenBit | Self::EightBit | Self::Binary)
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SevenBit => write!(f, "7bit"),
            Self::EightBit => write!(f, "8bit"),
            Self::Binary => write!(f, "binary"),
            Self::Base64 => write!(f, "base64"),
            Self::QuotedPrintable => write!(f, "quoted-printable"),
        }
    }
}

/// Decodes part body bytes according to the declared transfer encoding.
///
/// # Errors
///
/// Returns [`Error::TransferDecode`] when the bytes are inconsistent with
/// the encoding.
pub fn decode(body: &[u8], encoding: TransferEncoding) -> Result<Vec<u8>> {
    match encoding {
        TransferEncoding::Base64 => decode_base64(body),
        TransferEncoding::QuotedPrintable => decode_quoted_printable(body),
        TransferEncoding::SevenBit | TransferEncoding::EightBit | TransferEncoding::Binary => {
            Ok(body.to_vec())
        }
    }
}

/// Decodes Base64 body data.
///
/// Line breaks and other ASCII whitespace are transport artifacts and are
/// stripped before decoding.
///
/// # Errors
///
/// Returns [`Error::TransferDecode`] on invalid characters or padding.
pub fn decode_base64(data: &[u8]) -> Result<Vec<u8>> {
    let cleaned: Vec<u8> = data
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD.decode(cleaned).map_err(Into::into)
}

/// Decodes Quoted-Printable body data (RFC 2045): `=XX` hex escapes and
/// soft line breaks (`=` at end of line).
///
/// # Errors
///
/// Returns [`Error::TransferDecode`] on a truncated or non-hex escape.
pub fn decode_quoted_printable(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len());
    let mut i = 0;

    while i < data.len() {
        if data[i] != b'=' {
            out.push(data[i]);
            i += 1;
            continue;
        }

        match data.get(i + 1) {
            // Soft line break: the '=' and the line ending vanish
            Some(b'\r') if data.get(i + 2) == Some(&b'\n') => i += 3,
            Some(b'\n') => i += 2,
            Some(&hi) => {
                let lo = *data.get(i + 2).ok_or_else(|| {
                    Error::TransferDecode("truncated quoted-printable escape".to_string())
                })?;
                out.push(hex_pair(hi, lo)?);
                i += 3;
            }
            None => {
                return Err(Error::TransferDecode(
                    "quoted-printable input ends with a bare '='".to_string(),
                ));
            }
        }
    }

    Ok(out)
}

fn hex_pair(hi: u8, lo: u8) -> Result<u8> {
    let digit = |b: u8| -> Result<u8> {
        match b {
            b'0'..=b'9' => Ok(b - b'0'),
            b'A'..=b'F' => Ok(b - b'A' + 10),
            b'a'..=b'f' => Ok(b - b'a' + 10),
            _ => Err(Error::TransferDecode(format!(
                "invalid quoted-printable escape: ={}{}",
                hi as char, lo as char
            ))),
        }
    };
    Ok((digit(hi)? << 4) | digit(lo)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_encoding_parse() {
        assert_eq!(
            TransferEncoding::parse("7bit").unwrap(),
            TransferEncoding::SevenBit
        );
        assert_eq!(
            TransferEncoding::parse("Base64").unwrap(),
            TransferEncoding::Base64
        );
        assert_eq!(
            TransferEncoding::parse(" QUOTED-PRINTABLE ").unwrap(),
            TransferEncoding::QuotedPrintable
        );
    }

    #[test]
    fn test_transfer_encoding_parse_unsupported() {
        let err = TransferEncoding::parse("uuencode").unwrap_err();
        assert!(matches!(err, Error::UnsupportedTransferEncoding(e) if e == "uuencode"));
    }

    #[test]
    fn test_decode_base64() {
        let decoded = decode_base64(b"SGVsbG8sIHdvcmxkCg==").unwrap();
        assert_eq!(decoded, b"Hello, world\n");
        assert_eq!(decoded.len(), 13);
    }

    #[test]
    fn test_decode_base64_with_line_breaks() {
        let decoded = decode_base64(b"SGVsbG8s\r\nIHdvcmxk\r\nCg==").unwrap();
        assert_eq!(decoded, b"Hello, world\n");
    }

    #[test]
    fn test_decode_base64_invalid() {
        assert!(matches!(
            decode_base64(b"not!!valid@@base64"),
            Err(Error::TransferDecode(_))
        ));
        // Bad length / padding
        assert!(matches!(
            decode_base64(b"SGVsbG8"),
            Err(Error::TransferDecode(_))
        ));
    }

    #[test]
    fn test_decode_quoted_printable() {
        let decoded = decode_quoted_printable(b"Caf=C3=A9").unwrap();
        assert_eq!(decoded, "Café".as_bytes());
    }

    #[test]
    fn test_decode_quoted_printable_soft_break() {
        assert_eq!(
            decode_quoted_printable(b"Hello=\r\nWorld").unwrap(),
            b"HelloWorld"
        );
        assert_eq!(
            decode_quoted_printable(b"Hello=\nWorld").unwrap(),
            b"HelloWorld"
        );
    }

    #[test]
    fn test_decode_quoted_printable_errors() {
        assert!(matches!(
            decode_quoted_printable(b"broken=Z9"),
            Err(Error::TransferDecode(_))
        ));
        assert!(matches!(
            decode_quoted_printable(b"truncated=A"),
            Err(Error::TransferDecode(_))
        ));
        assert!(matches!(
            decode_quoted_printable(b"bare="),
            Err(Error::TransferDecode(_))
        ));
    }

    #[test]
    fn test_decode_identity() {
        let body = b"\x00\x01binary bytes\xff";
        assert_eq!(decode(body, TransferEncoding::Binary).unwrap(), body);
        assert_eq!(decode(body, TransferEncoding::EightBit).unwrap(), body);
        assert!(TransferEncoding::SevenBit.is_identity());
        assert!(!TransferEncoding::Base64.is_identity());
    }
}
