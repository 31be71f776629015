//! Error types for pdfoutline.

use std::io;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while collecting runs or emitting outlines.
///
/// The inference engine itself never fails; these errors come from reading
/// PDF files, writing output, or parsing user-supplied options.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading a PDF or writing an outline failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input does not start with a `%PDF-` header.
    #[error("Not a PDF file")]
    UnknownFormat,

    /// Header version is not a `digit.digit` pair.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// lopdf could not load the document.
    #[error("Failed to load PDF: {0}")]
    PdfParse(String),

    /// Text cannot be read without the document password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Page tree missing or unreadable.
    #[error("Corrupted PDF: {0}")]
    Corrupted(String),

    /// Selected page beyond the end of the document.
    #[error("Page {0} does not exist (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A `--pages` style selection that does not parse.
    #[error("Invalid page selection: {0}")]
    InvalidPageRange(String),

    /// Serializing an outline failed.
    #[error("Failed to render outline: {0}")]
    Render(String),

    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
