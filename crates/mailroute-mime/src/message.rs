//! Message structure: raw parts and the decoded output types.

use crate::content_type::ContentType;
use crate::encoding::{self, TransferEncoding};
use crate::error::{Error, Result};
use crate::header::Headers;

/// One raw segment of a multipart body: parsed headers plus the still
/// transfer-encoded body bytes. Produced by the scanner, consumed once by
/// the unmarshaller.
#[derive(Debug, Clone)]
pub struct Part {
    /// Part headers.
    pub headers: Headers,
    /// Raw body bytes, not yet transfer-decoded.
    pub body: Vec<u8>,
}

impl Part {
    /// Creates a part from headers and raw body bytes.
    #[must_use]
    pub const fn new(headers: Headers, body: Vec<u8>) -> Self {
        Self { headers, body }
    }

    /// Parses one raw part: a header block up to the first empty line, body
    /// after it.
    ///
    /// A part that begins with an empty line has no headers; a part without
    /// any empty line is all headers with an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPartHeader`] when the header block is not
    /// valid UTF-8 or a header line cannot be parsed.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let (header_bytes, body) = split_at_empty_line(raw);
        let text = std::str::from_utf8(header_bytes).map_err(|_| {
            Error::MalformedPartHeader("header block contains non-UTF-8 bytes".to_string())
        })?;
        Ok(Self::new(Headers::parse(text)?, body.to_vec()))
    }

    /// Content type declared by the part, or `text/plain` when absent
    /// (RFC 2045 default).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPartHeader`] if the header value is not a
    /// valid media type.
    pub fn content_type(&self) -> Result<ContentType> {
        self.headers.get("content-type").map_or_else(
            || Ok(ContentType::new("text", "plain")),
            ContentType::parse,
        )
    }

    /// Transfer encoding declared by the part, `7bit` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTransferEncoding`] for an unrecognized
    /// encoding token.
    pub fn transfer_encoding(&self) -> Result<TransferEncoding> {
        self.headers.get("content-transfer-encoding").map_or(
            Ok(TransferEncoding::SevenBit),
            TransferEncoding::parse,
        )
    }

    /// Decodes the body according to the declared transfer encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTransferEncoding`] or
    /// [`Error::TransferDecode`] when the declaration or the bytes are bad.
    pub fn decode_body(&self) -> Result<Vec<u8>> {
        encoding::decode(&self.body, self.transfer_encoding()?)
    }
}

/// Splits a raw part at its first empty line.
fn split_at_empty_line(raw: &[u8]) -> (&[u8], &[u8]) {
    let mut pos = 0;
    while pos < raw.len() {
        let (content_end, next) = match raw[pos..].iter().position(|&b| b == b'\n') {
            Some(rel) => {
                let nl = pos + rel;
                let content_end = if nl > pos && raw[nl - 1] == b'\r' {
                    nl - 1
                } else {
                    nl
                };
                (content_end, nl + 1)
            }
            None => (raw.len(), raw.len()),
        };
        if content_end == pos {
            return (&raw[..pos], &raw[next..]);
        }
        pos = next;
    }
    (raw, &[])
}

/// A non-primary part retained as a named binary resource.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// Content type declared by the part.
    pub content_type: String,
    /// Filename from the Content-Disposition header, if any.
    pub filename: Option<String>,
    /// Content-ID with surrounding angle brackets stripped, if any.
    pub content_id: Option<String>,
    /// Transfer-decoded content bytes.
    pub bytes: Vec<u8>,
}

/// Ordered mapping from attachment name to [`Attachment`].
///
/// Insertion order is source order of the parts; names are unique within
/// one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachments {
    entries: Vec<(String, Attachment)>,
}

impl Attachments {
    /// Creates an empty attachment map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: String, attachment: Attachment) {
        self.entries.push((name, attachment));
    }

    /// Looks up an attachment by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attachment> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    /// Whether an attachment with this name exists.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterates over `(name, attachment)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attachment)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    /// Attachment names in source order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of attachments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The decoded output of the unmarshaller, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedMessage {
    /// Content type of the primary part (not the outer container).
    pub content_type: String,
    /// Decoded text of the primary part.
    pub body: String,
    /// All non-primary parts, keyed by their derived names.
    pub attachments: Attachments,
}
