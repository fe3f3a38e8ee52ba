//! Docsight Ingest — resolve a document source and extract its text.

pub mod analysis;
pub mod docx;
pub mod extract;
pub mod file;
pub mod resolve;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{
    AnalyzeResult, DocumentAnalyzer, DocumentIntelligenceClient, DocumentIntelligenceConfig,
    PREBUILT_DOCUMENT_MODEL,
};
pub use extract::analyze_document;
pub use file::{list_documents, FileKind, NO_TEXT_READ};
pub use resolve::{resolve, ResolvedSource};
