//! Boundary delimiter scanning.

use crate::error::{Error, Result};

/// One scanned line, classified against the delimiter token.
enum LineKind {
    /// `--boundary`: separates two parts (or preamble from the first part).
    Separator,
    /// `--boundary--`: ends the multipart body; what follows is epilogue.
    Terminator,
    /// Anything else: part (or preamble/epilogue) content.
    Content,
}

/// Splits a multipart body into the raw byte ranges of its parts.
///
/// Delimiter lines are `--boundary` and `--boundary--`, each on a line of
/// their own (CRLF or LF terminated; trailing whitespace on the line is
/// transport padding and ignored). Bytes before the first delimiter
/// (preamble) and after the terminator (epilogue) are discarded. The line
/// ending immediately preceding a delimiter line belongs to the delimiter
/// grammar, not to the part's content.
///
/// A missing terminator is tolerated when at least one separator was seen:
/// the open part then runs to end of input.
///
/// # Errors
///
/// Returns [`Error::MalformedBoundary`] when no delimiter line occurs
/// before end of input.
pub(crate) fn scan<'a>(body: &'a [u8], boundary: &str) -> Result<Vec<&'a [u8]>> {
    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();

    let mut parts = Vec::new();
    let mut part_start: Option<usize> = None;
    let mut saw_delimiter = false;
    let mut pos = 0;

    while pos < body.len() {
        let (content_end, next) = match body[pos..].iter().position(|&b| b == b'\n') {
            Some(rel) => {
                let nl = pos + rel;
                let content_end = if nl > pos && body[nl - 1] == b'\r' {
                    nl - 1
                } else {
                    nl
                };
                (content_end, nl + 1)
            }
            None => (body.len(), body.len()),
        };

        match classify(&body[pos..content_end], delimiter) {
            LineKind::Separator => {
                saw_delimiter = true;
                if let Some(start) = part_start {
                    parts.push(part_slice(body, start, pos));
                }
                part_start = Some(next);
            }
            LineKind::Terminator => {
                saw_delimiter = true;
                if let Some(start) = part_start {
                    parts.push(part_slice(body, start, pos));
                    part_start = None;
                }
                break;
            }
            LineKind::Content => {}
        }

        pos = next;
    }

    if !saw_delimiter {
        return Err(Error::MalformedBoundary(format!(
            "no delimiter line --{boundary} found in body"
        )));
    }

    if let Some(start) = part_start {
        parts.push(&body[start..]);
    }

    Ok(parts)
}

fn classify(line: &[u8], delimiter: &[u8]) -> LineKind {
    let mut line = line;
    while let [rest @ .., b' ' | b'\t'] = line {
        line = rest;
    }

    if !line.starts_with(delimiter) {
        return LineKind::Content;
    }
    match &line[delimiter.len()..] {
        b"" => LineKind::Separator,
        b"--" => LineKind::Terminator,
        _ => LineKind::Content,
    }
}

/// Part content between `start` and the delimiter line at `delim_start`,
/// with the delimiter's own leading line break excluded.
fn part_slice(body: &[u8], start: usize, delim_start: usize) -> &[u8] {
    let mut end = delim_start;
    if end > start && body[end - 1] == b'\n' {
        end -= 1;
        if end > start && body[end - 1] == b'\r' {
            end -= 1;
        }
    }
    &body[start..end]
}
