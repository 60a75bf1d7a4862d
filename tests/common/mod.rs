#![allow(dead_code)]

use bookleaf::{BookError, BookReader, Outline, Result, Span, TocEntry};
use std::path::PathBuf;

/// String-backed book; positions are byte offsets into `text`.
#[derive(Debug, Default, Clone)]
pub struct TextBook {
    pub text: String,
    pub entries: Vec<TocEntry<usize>>,
}

impl TextBook {
    pub fn new() -> Self {
        Self::default()
    }

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

impl BookReader for TextBook {
    type Position = usize;

    fn outline(&self) -> Result<Outline<usize>> {
        if self.entries.is_empty() {
            return Err(BookError::NoOutline {
                path: PathBuf::from("text"),
            });
        }
        Outline::from_entries(self.entries.clone(), self.text.len())
    }

    fn fetch_text(&self, span: &Span<usize>) -> Result<String> {
        Ok(self.text[span.start..span.end].to_string())
    }

    fn title(&self) -> Option<String> {
        None
    }
}

pub fn words(n: usize) -> String {
    vec!["ipsum"; n].join(" ")
}
