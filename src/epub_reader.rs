use crate::error::{BookError, Result};
use crate::markdown;
use crate::outline::{self, Outline, Span};
use crate::reader::BookReader;
use rbook::prelude::*;
use rbook::Epub;
use std::path::{Path, PathBuf};

/// Location inside an EPUB: a spine document and a byte offset into its XHTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpubPosition {
    spine: usize,
    offset: usize,
}

struct SpineDocument {
    href: String,
    html: String,
}

pub struct EpubBook {
    path: PathBuf,
    epub: Epub,
    documents: Vec<SpineDocument>,
}

impl EpubBook {
    pub fn open(path: &Path) -> Result<Self> {
        let epub = Epub::options()
            .strict(false)
            .open(path)
            .map_err(|e| BookError::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // Empty documents are kept so spine indices stay aligned.
        let mut documents = Vec::new();
        let mut reader = epub.reader();
        while let Some(result) = reader.read_next() {
            let data = result.map_err(|e| BookError::Extraction {
                reason: format!("failed to read spine document: {e}"),
            })?;
            let href = data
                .manifest_entry()
                .resource()
                .key()
                .value()
                .unwrap_or_default()
                .to_string();
            documents.push(SpineDocument {
                href,
                html: data.content().to_string(),
            });
        }
        log::debug!("{}: {} spine documents", path.display(), documents.len());

        Ok(Self {
            path: path.to_path_buf(),
            epub,
            documents,
        })
    }

    fn document_end(&self) -> EpubPosition {
        EpubPosition {
            spine: self.documents.len(),
            offset: 0,
        }
    }
}

impl BookReader for EpubBook {
    type Position = EpubPosition;

    fn outline(&self) -> Result<Outline<EpubPosition>> {
        let no_outline = || BookError::NoOutline {
            path: self.path.clone(),
        };
        let toc = self.epub.toc();
        let root = toc.contents().ok_or_else(no_outline)?;

        let mut entries: Vec<outline::TocEntry<EpubPosition>> = Vec::new();
        for entry in root.children().flatten() {
            let title = entry.label().trim().to_string();
            let Some(href) = entry.href() else {
                continue;
            };
            let previous = entries.last().map(|e| e.start);
            match resolve(&self.documents, href.as_str(), previous) {
                Some(start) => entries.push(outline::TocEntry {
                    level: entry.depth(),
                    title,
                    start,
                }),
                None => log::warn!(
                    "Skipping TOC entry \"{title}\": {} is not in the spine",
                    href.as_str()
                ),
            }
        }
        if entries.is_empty() {
            return Err(no_outline());
        }

        Outline::from_entries(entries, self.document_end())
    }

    fn fetch_text(&self, span: &Span<EpubPosition>) -> Result<String> {
        if span.is_empty() || self.documents.is_empty() {
            return Ok(String::new());
        }
        let last = span.end.spine.min(self.documents.len() - 1);
        let mut pieces = Vec::new();

        for spine in span.start.spine..=last {
            let html = &self.documents[spine].html;
            let from = if spine == span.start.spine { span.start.offset } else { 0 };
            let to = if spine == span.end.spine { span.end.offset } else { html.len() };
            let Some(slice) = html.get(from.min(to)..to.min(html.len())) else {
                return Err(BookError::Extraction {
                    reason: format!(
                        "offset {from}..{to} is not a boundary in {}",
                        self.documents[spine].href
                    ),
                });
            };
            let md = markdown::html_to_markdown(slice);
            if !md.is_empty() {
                pieces.push(md);
            }
        }

        Ok(pieces.join("\n"))
    }

    fn title(&self) -> Option<String> {
        self.epub
            .metadata()
            .title()
            .map(|t| t.value().to_string())
    }
}

/// Map a TOC href to a spine position.
///
/// A fragment that matches no anchor falls back to the start of its document,
/// but never before `previous` when that entry sits in the same document.
fn resolve(
    documents: &[SpineDocument],
    href: &str,
    previous: Option<EpubPosition>,
) -> Option<EpubPosition> {
    let (path, fragment) = split_href(href);
    let spine = documents
        .iter()
        .position(|doc| same_resource(&doc.href, path))?;
    let Some(id) = fragment else {
        return Some(EpubPosition { spine, offset: 0 });
    };
    if let Some(offset) = anchor_offset(&documents[spine].html, id) {
        return Some(EpubPosition { spine, offset });
    }

    log::warn!("Anchor #{id} not found in {path}");
    let start = EpubPosition { spine, offset: 0 };
    Some(match previous {
        Some(prev) if prev.spine == spine => prev.max(start),
        _ => start,
    })
}

fn split_href(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, fragment)) if !fragment.is_empty() => (path, Some(fragment)),
        Some((path, _)) => (path, None),
        None => (href, None),
    }
}

/// TOC hrefs and manifest keys may differ in their leading directories
/// (`/OEBPS/Text/ch1.xhtml` vs `Text/ch1.xhtml`).
fn same_resource(doc_href: &str, toc_path: &str) -> bool {
    let doc = normalize(doc_href);
    let toc = normalize(toc_path);
    if doc.is_empty() || toc.is_empty() {
        return false;
    }
    doc == toc || doc.ends_with(&format!("/{toc}")) || toc.ends_with(&format!("/{doc}"))
}

fn normalize(href: &str) -> &str {
    let mut s = href.trim();
    loop {
        if let Some(rest) = s.strip_prefix("../") {
            s = rest;
        } else if let Some(rest) = s.strip_prefix("./") {
            s = rest;
        } else if let Some(rest) = s.strip_prefix('/') {
            s = rest;
        } else {
            return s;
        }
    }
}

/// Byte offset of the earliest start tag whose `id` or `name` attribute is `target`.
fn anchor_offset(html: &str, target: &str) -> Option<usize> {
    ["id", "name"]
        .into_iter()
        .filter_map(|attr| attribute_position(html, attr, target))
        .min()
        .and_then(|pos| html[..pos].rfind('<'))
}

/// Position of the first `attr = "target"` (either quote, optional spaces).
fn attribute_position(html: &str, attr: &str, target: &str) -> Option<usize> {
    html.match_indices(attr).map(|(pos, _)| pos).find(|&pos| {
        let preceded_by_space = html[..pos].chars().next_back().is_some_and(char::is_whitespace);
        if !preceded_by_space {
            return false;
        }
        let rest = html[pos + attr.len()..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            return false;
        };
        let rest = rest.trim_start();
        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            return false;
        };
        rest[1..]
            .strip_prefix(target)
            .is_some_and(|after| after.starts_with(quote))
    })
}
