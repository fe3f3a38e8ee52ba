//! One document analysis run.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::output;
use docsight_chat::{ChatModel, InsightGenerator};
use docsight_core::{DocsightConfig, DocumentInfo, Insights, Result};
use docsight_ingest::{analyze_document, DocumentAnalyzer};

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub document: DocumentInfo,
    pub insights: Insights,
    /// Where the JSON artifact was written.
    pub artifact: PathBuf,
}

/// Sequential pipeline over borrowed collaborators; holds no mutable state,
/// so independent runs can share one instance.
pub struct Pipeline<'a> {
    config: &'a DocsightConfig,
    analyzer: Option<&'a dyn DocumentAnalyzer>,
    model: &'a dyn ChatModel,
    max_tokens: usize,
    temperature: f64,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a DocsightConfig,
        analyzer: Option<&'a dyn DocumentAnalyzer>,
        model: &'a dyn ChatModel,
    ) -> Self {
        Self {
            config,
            analyzer,
            model,
            max_tokens: docsight_chat::config::DEFAULT_MAX_TOKENS,
            temperature: docsight_chat::config::DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_limits(mut self, max_tokens: usize, temperature: f64) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Analyze `target` (path or URL), summarize it and write the artifact.
    ///
    /// Resolution and extraction errors abort before anything is written.
    pub async fn run(&self, target: &str) -> Result<PipelineOutput> {
        info!("Analyzing document: {}", target);
        let document = analyze_document(target, self.config, self.analyzer).await?;

        let max_chars = self.config.max_chars_for_summary;
        let (text, truncated) = truncate_chars(&document.text, max_chars);
        if truncated {
            info!("Text was truncated to {} characters", max_chars);
        }

        info!("Generating summary and key points...");
        let insights = InsightGenerator::new(self.model)
            .with_limits(self.max_tokens, self.temperature)
            .generate(text)
            .await;
        if insights.is_empty() {
            warn!("No summary or key points were produced");
        }

        let artifact = output::write_artifact(&document.source, &insights)?;
        info!("Summary saved to {}", artifact.display());

        Ok(PipelineOutput {
            document,
            insights,
            artifact,
        })
    }
}

/// First `max_chars` characters of `text`, and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}
