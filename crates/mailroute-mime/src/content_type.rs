//! MIME content type handling.

use crate::error::{Error, Result};
use crate::params::HeaderValue;
use std::fmt;

/// MIME content type with parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Main type (e.g. "text", "application", "multipart").
    pub main_type: String,
    /// Subtype (e.g. "plain", "octet-stream", "related").
    pub sub_type: String,
    /// Parameters in source order (e.g. charset=utf-8, boundary=xxx).
    pub parameters: Vec<(String, String)>,
}

impl ContentType {
    /// Creates a new content type without parameters.
    #[must_use]
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
            parameters: Vec::new(),
        }
    }

    /// Returns a parameter value by name (case-insensitive).
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the charset parameter if present.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.parameter("charset")
    }

    /// Returns the boundary parameter if present.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.parameter("boundary")
    }

    /// Returns the `type` parameter of a multipart/related container: the
    /// declared MIME type of the primary part.
    #[must_use]
    pub fn related_type(&self) -> Option<&str> {
        self.parameter("type")
    }

    /// The `type/subtype` pair without parameters.
    #[must_use]
    pub fn essence(&self) -> String {
        format!("{}/{}", self.main_type, self.sub_type)
    }

    /// Checks if this is a multipart content type.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.main_type.eq_ignore_ascii_case("multipart")
    }

    /// Checks if this is a text content type.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.main_type.eq_ignore_ascii_case("text")
    }

    /// Compares `type/subtype` against another media type, ignoring case and
    /// parameters.
    #[must_use]
    pub fn matches(&self, media_type: &str) -> bool {
        let essence = HeaderValue::parse(media_type).value;
        essence
            .split_once('/')
            .is_some_and(|(main, sub)| {
                self.main_type.eq_ignore_ascii_case(main.trim())
                    && self.sub_type.eq_ignore_ascii_case(sub.trim())
            })
    }

    /// Parses a content type string.
    ///
    /// Format: `type/subtype; param1=value1; param2="value2"`. Parameter
    /// order and quoting are not significant; names are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPartHeader`] if the `type/subtype` form is
    /// missing.
    pub fn parse(s: &str) -> Result<Self> {
        let hv = HeaderValue::parse(s);

        let (main_type, sub_type) = hv.value.split_once('/').ok_or_else(|| {
            Error::MalformedPartHeader(format!("invalid content type: {s:?}"))
        })?;
        let main_type = main_type.trim().to_lowercase();
        let sub_type = sub_type.trim().to_lowercase();
        if main_type.is_empty() || sub_type.is_empty() {
            return Err(Error::MalformedPartHeader(format!(
                "invalid content type: {s:?}"
            )));
        }

        let mut content_type = Self::new(main_type, sub_type);
        for (name, value) in hv.params {
            content_type
                .parameters
                .push((name, value.as_str().to_string()));
        }

        Ok(content_type)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = &self.main_type;
        let sub = &self.sub_type;
        write!(f, "{main}/{sub}")?;

        for (key, value) in &self.parameters {
            // Quote values that contain tspecials or whitespace
            if value.contains(|c: char| c.is_whitespace() || "()<>@,;:\\\"/[]?=".contains(c)) {
                write!(f, "; {key}=\"{value}\"")?;
            } else {
                write!(f, "; {key}={value}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_parse() {
        let ct = ContentType::parse("text/plain; charset=utf-8").unwrap();
        assert_eq!(ct.main_type, "text");
        assert_eq!(ct.sub_type, "plain");
        assert_eq!(ct.charset(), Some("utf-8"));
        assert!(ct.is_text());
    }

    #[test]
    fn test_content_type_parse_quoted_boundary() {
        let ct =
            ContentType::parse("multipart/related; type=\"text/plain\";boundary=\"----=_divider\"")
                .unwrap();
        assert_eq!(ct.main_type, "multipart");
        assert_eq!(ct.sub_type, "related");
        assert_eq!(ct.boundary(), Some("----=_divider"));
        assert_eq!(ct.related_type(), Some("text/plain"));
        assert!(ct.is_multipart());
    }

    #[test]
    fn test_content_type_parse_case_folding() {
        let ct = ContentType::parse("Text/HTML; Charset=ISO-8859-1").unwrap();
        assert_eq!(ct.main_type, "text");
        assert_eq!(ct.sub_type, "html");
        assert_eq!(ct.charset(), Some("ISO-8859-1"));
    }

    #[test]
    fn test_content_type_parse_invalid() {
        assert!(ContentType::parse("not-a-media-type").is_err());
        assert!(ContentType::parse("/plain").is_err());
        assert!(ContentType::parse("text/").is_err());
    }

    #[test]
    fn test_content_type_matches() {
        let ct = ContentType::parse("text/plain; charset=utf-8").unwrap();
        assert!(ct.matches("text/plain"));
        assert!(ct.matches("TEXT/Plain"));
        assert!(ct.matches("text/plain; charset=iso-8859-15"));
        assert!(!ct.matches("text/html"));
        assert!(!ct.matches("plain"));
    }

    #[test]
    fn test_content_type_display() {
        let mut ct = ContentType::new("text", "plain");
        ct.parameters
            .push(("charset".to_string(), "utf-8".to_string()));
        assert_eq!(ct.to_string(), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_content_type_display_quotes_specials() {
        let mut ct = ContentType::new("multipart", "related");
        ct.parameters
            .push(("boundary".to_string(), "----=_divider".to_string()));
        assert_eq!(
            ct.to_string(),
            "multipart/related; boundary=\"----=_divider\""
        );
    }
}
