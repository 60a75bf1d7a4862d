//! In-memory book used by unit tests.

use crate::error::{BookError, Result};
use crate::outline::{Outline, Span, TocEntry};
use crate::reader::BookReader;
use std::cell::Cell;
use std::path::PathBuf;

/// A book backed by one string; positions are byte offsets.
#[derive(Debug, Default)]
pub struct MemoryBook {
    text: String,
    entries: Vec<TocEntry<usize>>,
    pub fetches: Cell<usize>,
}

impl MemoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text before the first outline entry.
    pub fn front_matter(mut self, text: &str) -> Self {
        self.text.push_str(text);
        self.text.push('\n');
        self
    }

    /// Start an outline entry here and append its own text (a branch's intro,
    /// or a leaf's body).
    pub fn section(mut self, level: usize, title: &str, text: &str) -> Self {
        self.entries.push(TocEntry {
            level,
            title: title.to_string(),
            start: self.text.len(),
        });
        self.text.push_str(text);
        self.text.push('\n');
        self
    }
}

impl BookReader for MemoryBook {
    type Position = usize;

    fn outline(&self) -> Result<Outline<usize>> {
        if self.entries.is_empty() {
            return Err(BookError::NoOutline {
                path: PathBuf::from("memory"),
            });
        }
        Outline::from_entries(self.entries.clone(), self.text.len())
    }

    fn fetch_text(&self, span: &Span<usize>) -> Result<String> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.text[span.start..span.end].to_string())
    }

    fn title(&self) -> Option<String> {
        Some("Memory Book".to_string())
    }
}

/// `n` space-separated words.
pub fn words(n: usize) -> String {
    vec!["lorem"; n].join(" ")
}
