//! # mailroute-mime
//!
//! MIME multipart/related decoding for the mailroute pipeline.
//!
//! Decodes a buffered multipart/related payload into a structured message:
//! the primary part becomes the message body (transfer- and
//! charset-decoded text), every other part becomes a named binary
//! attachment with its metadata preserved. Decode-only: composing
//! multipart output is out of scope.
//!
//! ## Features
//!
//! - **Boundary scanning**: CRLF/LF delimiter lines, preamble/epilogue
//!   handling, permissive about a missing terminator
//! - **Part headers**: folded headers, case-insensitive names, quoted
//!   parameter values
//! - **Transfer decoding**: base64, quoted-printable, 7bit/8bit/binary
//! - **Charset decoding**: any label `encoding_rs` knows, with an
//!   ISO-8859-1 fallback when the charset parameter is absent
//! - **Primary selection**: first-part or type-matching policy
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailroute_mime::unmarshal;
//!
//! let content_type = r#"multipart/related; type="text/plain"; boundary="frontier""#;
//! let body = b"--frontier\r\n\
//!              Content-Type: text/plain; charset=ISO-8859-15\r\n\
//!              \r\n\
//!              Hello, world!\r\n\
//!              --frontier--\r\n";
//!
//! let message = unmarshal(body, content_type)?;
//! assert_eq!(message.content_type, "text/plain");
//! assert_eq!(message.body, "Hello, world!");
//! assert!(message.attachments.is_empty());
//! ```
//!
//! ## Errors
//!
//! The transform is atomic: the first malformed boundary, header, transfer
//! encoding, or charset aborts the whole call with a typed [`Error`]; a
//! partially decoded message is never returned. The calling pipeline owns
//! the failure path — decoding is deterministic, so a retry without
//! altered input cannot succeed.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod boundary;
mod charset;
mod content_type;
mod error;
mod header;
mod message;
mod params;
mod unmarshal;

pub mod encoding;

pub use content_type::ContentType;
pub use encoding::TransferEncoding;
pub use error::{Error, Result};
pub use header::Headers;
pub use message::{Attachment, Attachments, DecodedMessage, Part};
pub use unmarshal::{PrimaryPolicy, Unmarshaller, unmarshal};
