use crate::error::{BookError, Result};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OCF requires an uncompressed `mimetype` entry first, so its name and
/// content sit at a fixed offset after the local file header.
const EPUB_MIMETYPE: &[u8] = b"mimetypeapplication/epub+zip";
const ZIP_HEADER_LEN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Epub,
    Pdf,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Epub => f.write_str("EPUB"),
            DocumentFormat::Pdf => f.write_str("PDF"),
        }
    }
}

impl DocumentFormat {
    /// Detect the format from the file's leading bytes, falling back to its extension.
    pub fn detect(path: &Path) -> Result<Self> {
        let mut head = Vec::with_capacity(64);
        File::open(path)?.take(64).read_to_end(&mut head)?;

        Self::sniff(&head)
            .or_else(|| Self::from_extension(path))
            .ok_or_else(|| BookError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    pub fn sniff(head: &[u8]) -> Option<Self> {
        if head.starts_with(PDF_MAGIC) {
            return Some(DocumentFormat::Pdf);
        }
        let mimetype = head.get(ZIP_HEADER_LEN..ZIP_HEADER_LEN + EPUB_MIMETYPE.len());
        if head.starts_with(ZIP_MAGIC) && mimetype == Some(EPUB_MIMETYPE) {
            return Some(DocumentFormat::Epub);
        }
        None
    }

    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "epub" => Some(DocumentFormat::Epub),
            "pdf" => Some(DocumentFormat::Pdf),
            _ => None,
        }
    }
}
