//! Multipart/related unmarshalling: the crate's single public operation.
//!
//! Raw multipart bytes plus the outer Content-Type header go in; a
//! [`DecodedMessage`] comes out, with the primary part promoted to the
//! message body and every other part retained as a named attachment. The
//! transform is atomic: the first error from any stage aborts the whole
//! call and no partial message is ever returned.

use tracing::warn;

use crate::boundary;
use crate::charset;
use crate::content_type::ContentType;
use crate::error::{Error, Result};
use crate::message::{Attachment, Attachments, DecodedMessage, Part};
use crate::params::HeaderValue;

/// Primary part selection policy.
///
/// multipart/related payloads declare their primary part two ways in the
/// wild: by position (first part) and by the container's `type` parameter.
/// Which one a producer means is not always knowable, so the policy is
/// configurable rather than hard-coded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimaryPolicy {
    /// The first part in source order is primary. The outer `type`
    /// parameter is used only as a consistency check; a mismatch logs a
    /// warning and is never an error.
    #[default]
    First,
    /// The first part whose own Content-Type equals the outer `type`
    /// parameter is primary, falling back to the first part when no part
    /// matches or the parameter is absent.
    MatchType,
}

/// Decoder for multipart/related payloads.
///
/// Holds no cross-call state; one instance may be shared freely between
/// concurrent invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmarshaller {
    policy: PrimaryPolicy,
    strict_charset: bool,
}

impl Unmarshaller {
    /// Creates an unmarshaller with the default options: first part
    /// primary, lenient charset handling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary part selection policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: PrimaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables strict charset handling. When strict, bytes
    /// invalid for a part's declared charset are a
    /// [`Error::CharsetDecode`] instead of decoding to replacement
    /// characters.
    #[must_use]
    pub const fn with_strict_charset(mut self, strict: bool) -> Self {
        self.strict_charset = strict;
        self
    }

    /// Decodes a multipart/related payload.
    ///
    /// `content_type` is the outer Content-Type header value, e.g.
    /// `multipart/related; type="text/plain"; boundary="----=_divider"`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any stage; see [`Error`] for the
    /// taxonomy. No partial result is ever returned.
    pub fn unmarshal(&self, body: &[u8], content_type: &str) -> Result<DecodedMessage> {
        let outer = ContentType::parse(content_type).map_err(|_| {
            Error::MalformedBoundary(format!(
                "unparsable outer Content-Type: {content_type:?}"
            ))
        })?;
        let token = outer.boundary().ok_or_else(|| {
            Error::MalformedBoundary(
                "outer Content-Type has no boundary parameter".to_string(),
            )
        })?;
        if token.is_empty() {
            return Err(Error::MalformedBoundary(
                "outer Content-Type has an empty boundary token".to_string(),
            ));
        }

        let mut parts = Vec::new();
        for raw in boundary::scan(body, token)? {
            parts.push(Part::parse(raw)?);
        }

        // Terminator before any separator: delimiters were present, so the
        // body is well-formed but carries nothing.
        if parts.is_empty() {
            return Ok(DecodedMessage {
                content_type: "text/plain".to_string(),
                body: String::new(),
                attachments: Attachments::new(),
            });
        }

        // Decode every part up front. Textual attachments are charset-checked
        // here too: validation belongs to the atomic transform even though
        // attachments keep their transfer-decoded bytes.
        let mut decoded = Vec::with_capacity(parts.len());
        for part in &parts {
            let content_type = part.content_type()?;
            let bytes = part.decode_body()?;
            let text = if content_type.is_text() {
                Some(charset::decode_text(
                    &bytes,
                    content_type.charset(),
                    self.strict_charset,
                )?)
            } else {
                None
            };
            decoded.push((content_type, bytes, text));
        }

        let expected_type = outer.related_type();
        let primary_index = self.primary_index(&decoded, expected_type);

        if let Some(expected) = expected_type {
            let primary_type = &decoded[primary_index].0;
            if !primary_type.matches(expected) {
                warn!(
                    expected = expected,
                    actual = %primary_type,
                    "primary part type differs from the container's type parameter"
                );
            }
        }

        let mut message = DecodedMessage {
            content_type: String::new(),
            body: String::new(),
            attachments: Attachments::new(),
        };

        for (index, ((content_type, bytes, text), part)) in
            decoded.into_iter().zip(&parts).enumerate()
        {
            if index == primary_index {
                message.content_type = content_type.essence();
                message.body = match text {
                    Some(text) => text,
                    // Non-textual primary: the byte-preserving fallback keeps
                    // the body lossless.
                    None => charset::decode_text(&bytes, None, false)?,
                };
                continue;
            }

            let filename = disposition_filename(part);
            let content_id = part.headers.get("content-id").map(strip_angle_brackets);
            let mut name = content_id
                .clone()
                .or_else(|| filename.clone())
                .unwrap_or_else(|| format!("attachment_{index}"));
            if message.attachments.contains_key(&name) {
                name = format!("{name}_{index}");
            }

            message.attachments.insert(
                name,
                Attachment {
                    content_type: content_type.essence(),
                    filename,
                    content_id,
                    bytes,
                },
            );
        }

        Ok(message)
    }

    fn primary_index(
        &self,
        decoded: &[(ContentType, Vec<u8>, Option<String>)],
        expected_type: Option<&str>,
    ) -> usize {
        match (self.policy, expected_type) {
            (PrimaryPolicy::MatchType, Some(expected)) => decoded
                .iter()
                .position(|(content_type, _, _)| content_type.matches(expected))
                .unwrap_or(0),
            _ => 0,
        }
    }
}

/// Decodes a multipart/related payload with the default options.
///
/// See [`Unmarshaller::unmarshal`].
///
/// # Errors
///
/// Returns the first error raised by any decoding stage.
pub fn unmarshal(body: &[u8], content_type: &str) -> Result<DecodedMessage> {
    Unmarshaller::new().unmarshal(body, content_type)
}

/// Filename parameter of the part's Content-Disposition header, if any.
fn disposition_filename(part: &Part) -> Option<String> {
    let value = part.headers.get("content-disposition")?;
    HeaderValue::parse(value)
        .param("filename")
        .map(str::to_string)
}

/// Content-ID values commonly come wrapped in angle brackets (RFC 2392);
/// the attachment key uses the bare identifier.
fn strip_angle_brackets(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(trimmed)
        .to_string()
}
