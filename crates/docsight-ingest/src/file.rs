//! Supported document kinds and local document discovery.

use std::path::{Path, PathBuf};

use docsight_core::{Error, Result};

/// Text used when a document yields no readable lines.
pub const NO_TEXT_READ: &str = "No text was read.";

/// Document formats Docsight can extract text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
}

impl FileKind {
    /// Detect file kind from extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Detect file kind from a path, failing for anything but PDF or DOCX.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str());
        ext.and_then(Self::from_extension).ok_or_else(|| {
            Error::UnsupportedFileType(
                ext.map(|e| format!(".{}", e.to_lowercase()))
                    .unwrap_or_default(),
            )
        })
    }
}

/// PDF and DOCX files directly inside `docs_dir`, sorted by file name.
pub fn list_documents(docs_dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(docs_dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut docs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && FileKind::from_path(path).is_ok())
        .collect();

    docs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    docs
}
