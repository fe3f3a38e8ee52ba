//! Local DOCX text extraction.
//!
//! Only body-level paragraphs are read: table cells, headers, footers and
//! text boxes are skipped. Within a paragraph, run text is concatenated in
//! order, tabs become `\t` and breaks become `\n`.

use std::path::Path;

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use tracing::debug;

use crate::file::NO_TEXT_READ;
use docsight_core::{Error, Result};

/// Read a DOCX file and return its non-empty paragraphs joined by newlines.
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let paragraphs = paragraphs_from_bytes(&bytes)
        .map_err(|e| Error::Extraction(format!("Invalid DOCX file {}: {}", path.display(), e)))?;
    debug!("Read {} paragraphs from {}", paragraphs.len(), path.display());

    if paragraphs.is_empty() {
        Ok(NO_TEXT_READ.to_string())
    } else {
        Ok(paragraphs.join("\n"))
    }
}

/// Trimmed, non-empty body paragraph texts in document order.
pub fn paragraphs_from_bytes(
    bytes: &[u8],
) -> std::result::Result<Vec<String>, docx_rs::ReaderError> {
    let docx = docx_rs::read_docx(bytes)?;

    Ok(docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&para.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_children(&link.children, text),
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}
