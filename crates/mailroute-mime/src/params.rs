//! Mini-parser for parameters embedded in header values.
//!
//! MIME header values carry `; name=value` parameters where the value is
//! either a bare token or a quoted string (`boundary="----=_x"`). Quoting
//! changes the grammar: `;` and `=` lose their meaning inside quotes and a
//! backslash escapes the next character. The tokenizer here keeps those
//! cases in one place instead of scattering `split(';')` calls around the
//! crate.

/// A parameter value, tagged by its surface syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParamValue {
    /// Bare token, e.g. the value in `charset=utf-8`.
    Token(String),
    /// Quoted string with quotes and escapes removed, e.g. `boundary="a b"`.
    Quoted(String),
}

impl ParamValue {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Self::Token(s) | Self::Quoted(s) => s,
        }
    }
}

/// A structured header value: the part before the first top-level `;`, plus
/// the `name=value` parameters after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderValue {
    pub(crate) value: String,
    pub(crate) params: Vec<(String, ParamValue)>,
}

impl HeaderValue {
    /// Parses a raw header value.
    ///
    /// Parameter names are folded to lowercase. Segments that carry no `=`
    /// (such as the bare `attachment` token of a Content-Disposition value
    /// when it appears after the first segment) are skipped.
    pub(crate) fn parse(raw: &str) -> Self {
        let mut segments = split_unquoted(raw).into_iter();
        let value = segments.next().unwrap_or_default().trim().to_string();

        let mut params = Vec::new();
        for segment in segments {
            let Some((name, rest)) = segment.split_once('=') else {
                continue;
            };
            let name = name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            params.push((name, parse_value(rest.trim())));
        }

        Self { value, params }
    }

    /// First parameter with the given name (case-insensitive), unquoted.
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Splits on `;` outside of quoted strings.
fn split_unquoted(raw: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in raw.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => {
                current.push(ch);
                escaped = true;
            }
            '"' => {
                current.push(ch);
                in_quotes = !in_quotes;
            }
            ';' if !in_quotes => {
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    segments.push(current);
    segments
}

/// Reads one parameter value, stripping quotes and backslash escapes.
fn parse_value(raw: &str) -> ParamValue {
    let Some(inner) = raw.strip_prefix('"') else {
        return ParamValue::Token(raw.to_string());
    };

    let mut unquoted = String::with_capacity(inner.len());
    let mut escaped = false;
    for ch in inner.chars() {
        if escaped {
            unquoted.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            break;
        } else {
            unquoted.push(ch);
        }
    }
    ParamValue::Quoted(unquoted)
}
