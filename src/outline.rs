//! Format-independent outline (table of contents) tree.
//!
//! Adapters report a flat, document-ordered list of [`TocEntry`] values; the
//! tree and every node's extent are derived here so that EPUB and PDF share the
//! same nesting and boundary rules.

use crate::error::{BookError, Result};
use std::fmt::Debug;

/// A format-owned location inside one document.
///
/// Positions only order against positions of the same document. Nothing
/// downstream looks inside them.
pub trait Position: Ord + Clone + Debug {}

impl<T: Ord + Clone + Debug> Position for T {}

/// Half-open range `[start, end)` between two positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<P> {
    pub start: P,
    pub end: P,
}

impl<P: Position> Span<P> {
    pub fn new(start: P, end: P) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, other: &Span<P>) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// One raw table-of-contents entry as reported by a format adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry<P> {
    /// Nesting level in the format's own numbering. Only relative values matter.
    pub level: usize,
    pub title: String,
    pub start: P,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode<P> {
    pub title: String,
    /// Tree depth, 0 for top-level entries.
    pub level: usize,
    /// Full extent: own intro text plus every descendant.
    pub span: Span<P>,
    pub children: Vec<OutlineNode<P>>,
}

impl<P: Position> OutlineNode<P> {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Text owned by a branch before its first child starts.
    ///
    /// `None` for leaves; an empty span when the first child starts where the
    /// branch does.
    pub fn intro_span(&self) -> Option<Span<P>> {
        self.children
            .first()
            .map(|first| Span::new(self.span.start.clone(), first.span.start.clone()))
    }
}

/// The whole outline. Acts as the synthetic root over the top-level entries and
/// owns no text of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline<P> {
    pub roots: Vec<OutlineNode<P>>,
}

impl<P: Position> Outline<P> {
    /// Build the tree from document-ordered entries.
    ///
    /// An entry nests under the closest preceding entry with a smaller level.
    /// A node ends where the next entry at the same or a shallower level
    /// starts, or at `document_end` when no such entry follows.
    pub fn from_entries(entries: Vec<TocEntry<P>>, document_end: P) -> Result<Self> {
        for pair in entries.windows(2) {
            if pair[1].start < pair[0].start {
                return Err(BookError::MalformedOutline {
                    reason: format!(
                        "\"{}\" starts before the preceding entry \"{}\"",
                        pair[1].title, pair[0].title
                    ),
                });
            }
        }
        if let Some(last) = entries.last() {
            if last.start > document_end {
                return Err(BookError::MalformedOutline {
                    reason: format!("\"{}\" starts past the end of the document", last.title),
                });
            }
        }

        let ends: Vec<P> = (0..entries.len())
            .map(|i| {
                entries[i + 1..]
                    .iter()
                    .find(|next| next.level <= entries[i].level)
                    .map(|next| next.start.clone())
                    .unwrap_or_else(|| document_end.clone())
            })
            .collect();

        // Open ancestors as (raw level, node); closed nodes are folded into their parent.
        let mut roots = Vec::new();
        let mut stack: Vec<(usize, OutlineNode<P>)> = Vec::new();

        for (entry, end) in entries.into_iter().zip(ends) {
            while stack.last().is_some_and(|(level, _)| *level >= entry.level) {
                close_top(&mut stack, &mut roots);
            }
            let node = OutlineNode {
                title: entry.title,
                level: stack.len(),
                span: Span::new(entry.start, end),
                children: Vec::new(),
            };
            stack.push((entry.level, node));
        }
        while !stack.is_empty() {
            close_top(&mut stack, &mut roots);
        }

        Ok(Self { roots })
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes, branches included.
    pub fn node_count(&self) -> usize {
        fn count<P>(node: &OutlineNode<P>) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}

fn close_top<P>(stack: &mut Vec<(usize, OutlineNode<P>)>, roots: &mut Vec<OutlineNode<P>>) {
    if let Some((_, node)) = stack.pop() {
        match stack.last_mut() {
            Some((_, parent)) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}
