//! Document analysis entry point: source → local file → text.

use tracing::info;

use crate::analysis::{DocumentAnalyzer, PREBUILT_DOCUMENT_MODEL};
use crate::docx;
use crate::file::FileKind;
use crate::resolve::resolve;
use docsight_core::{DocsightConfig, DocumentInfo, Error, Result};

/// Resolve `input` (path or URL) and extract its text.
///
/// PDFs go through `analyzer`; DOCX files are read locally. A downloaded copy
/// is removed before this returns, whatever the outcome.
pub async fn analyze_document(
    input: &str,
    config: &DocsightConfig,
    analyzer: Option<&dyn DocumentAnalyzer>,
) -> Result<DocumentInfo> {
    let resolved = resolve(input, config).await?;
    let path = resolved.path();

    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let (text, page_count) = match FileKind::from_path(path)? {
        FileKind::Pdf => {
            let analyzer = analyzer.ok_or_else(|| {
                Error::Config(
                    "PDF analysis needs AZURE_FORM_RECOGNIZER_ENDPOINT and AZURE_FORM_RECOGNIZER_KEY"
                        .into(),
                )
            })?;
            info!("Analyzing PDF with the document analysis service...");
            let bytes = tokio::fs::read(path).await?;
            let result = analyzer.analyze(bytes, PREBUILT_DOCUMENT_MODEL).await?;
            (result.text(), result.page_count())
        }
        FileKind::Docx => {
            info!("Reading DOCX locally...");
            (docx::extract_text(path)?, None)
        }
    };

    Ok(DocumentInfo {
        text,
        page_count,
        source: path.to_path_buf(),
    })
}
