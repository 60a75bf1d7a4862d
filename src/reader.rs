use crate::error::Result;
use crate::outline::{Outline, Position, Span};

/// Capability shared by every input format (EPUB, PDF).
///
/// The leaf resolver and context assigner are written against this trait only.
pub trait BookReader {
    /// Format-owned location type; comparable only within this document.
    type Position: Position;

    /// Parse the table of contents into an outline tree.
    fn outline(&self) -> Result<Outline<Self::Position>>;

    /// Raw text between two outline positions, in document order.
    fn fetch_text(&self, span: &Span<Self::Position>) -> Result<String>;

    /// Book title from the document metadata, if any.
    fn title(&self) -> Option<String>;
}
