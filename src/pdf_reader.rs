use crate::error::{BookError, Result};
use crate::outline::{Outline, Span, TocEntry};
use crate::reader::BookReader;
use lopdf::{Document, Object};
use std::path::{Path, PathBuf};

/// A 1-based page number. Spans cover whole pages, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PdfPosition(u32);

pub struct PdfBook {
    path: PathBuf,
    doc: Document,
    page_count: u32,
}

impl PdfBook {
    pub fn open(path: &Path) -> Result<Self> {
        let doc = Document::load(path).map_err(|e| BookError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let page_count = u32::try_from(doc.get_pages().len()).unwrap_or(u32::MAX);
        log::debug!("{}: {} pages", path.display(), page_count);
        Ok(Self {
            path: path.to_path_buf(),
            doc,
            page_count,
        })
    }
}

impl BookReader for PdfBook {
    type Position = PdfPosition;

    fn outline(&self) -> Result<Outline<PdfPosition>> {
        let toc = match self.doc.get_toc() {
            Ok(toc) => toc,
            Err(e) => {
                log::debug!("{}: no outline ({e})", self.path.display());
                return Err(BookError::NoOutline {
                    path: self.path.clone(),
                });
            }
        };
        if toc.toc.is_empty() {
            return Err(BookError::NoOutline {
                path: self.path.clone(),
            });
        }

        let entries = toc
            .toc
            .into_iter()
            .map(|item| TocEntry {
                level: item.level,
                title: item.title.trim().to_string(),
                start: clamp_page(item.page, self.page_count),
            })
            .collect();

        Outline::from_entries(entries, PdfPosition(self.page_count + 1))
    }

    fn fetch_text(&self, span: &Span<PdfPosition>) -> Result<String> {
        let pages: Vec<u32> = (span.start.0..span.end.0)
            .filter(|page| (1..=self.page_count).contains(page))
            .collect();
        if pages.is_empty() {
            return Ok(String::new());
        }

        self.doc
            .extract_text(&pages)
            .map_err(|e| BookError::Extraction {
                reason: format!(
                    "pages {}..{} of {}: {e}",
                    span.start.0,
                    span.end.0,
                    self.path.display()
                ),
            })
    }

    fn title(&self) -> Option<String> {
        let info = match self.doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.doc.get_dictionary(*id).ok()?,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        let raw = info.get(b"Title").ok()?.as_str().ok()?;
        let title = decode_text_string(raw);
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    }
}

/// PDF text strings are PDFDocEncoding or UTF-16BE with a byte order mark.
fn decode_text_string(raw: &[u8]) -> String {
    match raw.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => String::from_utf8_lossy(raw).into_owned(),
    }
}

/// Outline page numbers outside the document snap to its bounds.
fn clamp_page(page: usize, page_count: u32) -> PdfPosition {
    let page = u32::try_from(page).unwrap_or(u32::MAX);
    PdfPosition(page.clamp(1, page_count + 1))
}
