//! MIME part header handling.

use crate::error::{Error, Result};

/// Ordered collection of part headers.
///
/// Header names are case-insensitive (stored lowercase) and source order is
/// preserved. Duplicate names are kept; lookups return the first-defined
/// value, as later duplicates never override an earlier definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: Vec<(String, String)>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header value.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into().to_lowercase(), value.into()));
    }

    /// Gets the first-defined value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Gets all values for a header, in source order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Number of header lines (duplicates counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether the collection holds no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns an iterator over all headers in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Parses a header block.
    ///
    /// Each line is `Name: Value`; a line beginning with whitespace folds
    /// into the previous header's value, joined with a single space. An
    /// empty line ends the block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPartHeader`] for a non-continuation line
    /// without a colon, or a continuation line with nothing to continue.
    pub fn parse(text: &str) -> Result<Self> {
        let mut headers = Self::new();
        let mut current: Option<(String, String)> = None;

        for line in text.lines() {
            if line.is_empty() {
                break;
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                // Folded header (RFC 5322): continuation of the previous value
                let Some((_, value)) = current.as_mut() else {
                    return Err(Error::MalformedPartHeader(
                        "continuation line without a preceding header".to_string(),
                    ));
                };
                value.push(' ');
                value.push_str(line.trim());
            } else {
                if let Some((name, value)) = current.take() {
                    headers.add(name, value);
                }

                let Some((name, value)) = line.split_once(':') else {
                    return Err(Error::MalformedPartHeader(format!(
                        "header line without a colon: {line:?}"
                    )));
                };
                current = Some((name.trim().to_string(), value.trim().to_string()));
            }
        }

        if let Some((name, value)) = current {
            headers.add(name, value);
        }

        Ok(headers)
    }
}
