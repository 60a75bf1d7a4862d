//! Split structured ebooks (EPUB, PDF) into ordered leaf sections for
//! independent summarization.
//!
//! A book's table of contents becomes an [`outline::Outline`]; every leaf of
//! that tree becomes one [`sequencer::SummarizationUnit`], carrying the intro
//! text of each ancestor section for which it is the first leaf.

pub mod cli;
pub mod config;
pub mod context;
pub mod converter;
pub mod epub_reader;
pub mod error;
pub mod format;
pub mod markdown;
pub mod merge;
pub mod outline;
pub mod pdf_reader;
pub mod reader;
pub mod resolver;
pub mod sequencer;
pub mod splitter;

#[cfg(test)]
mod test_utils;

pub use config::SplitOptions;
pub use error::{BookError, Result};
pub use outline::{Outline, OutlineNode, Position, Span, TocEntry};
pub use reader::BookReader;
pub use sequencer::{AncestorIntro, SummarizationUnit};
pub use splitter::split;
