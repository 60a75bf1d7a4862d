//! Errors raised while turning a book into summarization units.
//!
//! Every variant is fatal for the current document: an outline that cannot be
//! trusted cannot be partially split, so nothing is retried or recovered here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    /// The document has no table of contents / navigation structure.
    #[error("{} has no table of contents; only books with chapters/outline are supported", path.display())]
    NoOutline { path: PathBuf },

    /// The file is neither an EPUB nor a PDF.
    #[error("unsupported document format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Text could not be read from the document's text layer.
    #[error("text extraction failed: {reason}")]
    Extraction { reason: String },

    /// The outline produced no leaf sections.
    #[error("outline contains no leaf sections")]
    EmptyDocument,

    /// Outline entries are not in document order.
    #[error("malformed outline: {reason}")]
    MalformedOutline { reason: String },

    /// The container itself could not be opened or parsed.
    #[error("failed to open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BookError>;
