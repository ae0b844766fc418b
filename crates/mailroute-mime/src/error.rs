//! Error types for multipart decoding.

/// Result type alias for multipart decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Multipart decoding error types.
///
/// Every variant aborts the whole unmarshal; a partially decoded message is
/// never returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The outer Content-Type lacks a usable boundary parameter, or no
    /// delimiter line was found in the body.
    #[error("Malformed multipart boundary: {0}")]
    MalformedBoundary(String),

    /// A header line within a part could not be parsed.
    #[error("Malformed part header: {0}")]
    MalformedPartHeader(String),

    /// A part declared a Content-Transfer-Encoding this decoder does not
    /// recognize.
    #[error("Unsupported transfer encoding: {0}")]
    UnsupportedTransferEncoding(String),

    /// Part body bytes are inconsistent with the declared transfer encoding.
    #[error("Transfer decode error: {0}")]
    TransferDecode(String),

    /// The declared charset is unrecognized, or the bytes are invalid for it
    /// in strict mode.
    #[error("Charset decode error: {0}")]
    CharsetDecode(String),
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Self::TransferDecode(format!("invalid base64 content: {err}"))
    }
}
