//! Remote document analysis (Azure Form Recognizer / Document Intelligence).
//!
//! The service analyzes asynchronously: the submit call answers `202` with an
//! `Operation-Location` header, which is polled until the operation succeeds
//! or fails.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::file::NO_TEXT_READ;
use docsight_core::{Error, Result};

/// General-purpose prebuilt model used for PDFs.
pub const PREBUILT_DOCUMENT_MODEL: &str = "prebuilt-document";
pub const DEFAULT_API_VERSION: &str = "2023-07-31";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_POLLS: usize = 300;

/// Service that turns document bytes into text lines.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, document: Vec<u8>, model_id: &str) -> Result<AnalyzeResult>;
}

/// Analysis result: unified content and/or per-page lines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeResult {
    #[serde(default)]
    pub content: Option<String>,
    /// Absent when the service did not report pages.
    #[serde(default)]
    pub pages: Option<Vec<AnalyzedPage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzedPage {
    #[serde(default)]
    pub lines: Vec<AnalyzedLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzedLine {
    pub content: String,
}

impl AnalyzeResult {
    /// Prefer the unified content; otherwise join every page line in order.
    pub fn text(&self) -> String {
        if let Some(content) = self.content.as_deref().filter(|c| !c.is_empty()) {
            return content.to_string();
        }

        let lines: Vec<&str> = self
            .pages
            .iter()
            .flatten()
            .flat_map(|page| page.lines.iter())
            .map(|line| line.content.as_str())
            .collect();

        if lines.is_empty() {
            NO_TEXT_READ.to_string()
        } else {
            lines.join("\n")
        }
    }

    pub fn page_count(&self) -> Option<usize> {
        self.pages.as_ref().map(Vec::len)
    }
}

/// Connection settings for the document analysis service.
#[derive(Debug, Clone)]
pub struct DocumentIntelligenceConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub poll_interval: Duration,
    pub max_polls: usize,
}

impl DocumentIntelligenceConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    /// `None` unless both endpoint and key are set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) over any variable source; empty
    /// values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut config = Self::new(
            var("AZURE_FORM_RECOGNIZER_ENDPOINT")?,
            var("AZURE_FORM_RECOGNIZER_KEY")?,
        );
        if let Some(version) = var("AZURE_FORM_RECOGNIZER_API_VERSION") {
            config.api_version = version;
        }
        Some(config)
    }

    fn analyze_url(&self, model_id: &str) -> String {
        format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}",
            self.endpoint.trim_end_matches('/'),
            model_id,
            self.api_version
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOperation {
    status: String,
    #[serde(default)]
    analyze_result: Option<AnalyzeResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// REST client for the document analysis service.
pub struct DocumentIntelligenceClient {
    client: Client,
    config: DocumentIntelligenceConfig,
}

impl DocumentIntelligenceClient {
    pub fn new(config: DocumentIntelligenceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn submit(&self, document: Vec<u8>, model_id: &str) -> Result<String> {
        let url = self.config.analyze_url(model_id);
        debug!("Submitting {} bytes to {}", document.len(), url);

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(document)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Analyze request failed: {}", e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::ACCEPTED {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Extraction(format!(
                "Analyze request rejected ({}): {}",
                status, body
            )));
        }

        response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| Error::Extraction("Analyze response has no Operation-Location".into()))
    }

    async fn poll(&self, operation_url: &str) -> Result<AnalyzeResult> {
        for attempt in 1..=self.config.max_polls {
            let response = self
                .client
                .get(operation_url)
                .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
                .send()
                .await
                .map_err(|e| Error::Http(format!("Analyze poll failed: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Extraction(format!(
                    "Analyze poll returned {}: {}",
                    status, body
                )));
            }

            let operation: AnalyzeOperation = response
                .json()
                .await
                .map_err(|e| Error::Extraction(format!("Invalid analyze response: {}", e)))?;

            match operation.status.as_str() {
                "succeeded" => return Ok(operation.analyze_result.unwrap_or_default()),
                "failed" => {
                    let detail = operation
                        .error
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "no details".into());
                    return Err(Error::Extraction(format!("Document analysis failed: {}", detail)));
                }
                "notStarted" | "running" => {
                    debug!("Analyze operation {} (poll {})", operation.status, attempt);
                    tokio::time::sleep(self.config.poll_interval).await;
                }
                status => {
                    return Err(Error::Extraction(format!(
                        "Document analysis ended with status {}",
                        status
                    )));
                }
            }
        }

        Err(Error::Extraction(format!(
            "Document analysis did not finish after {} polls",
            self.config.max_polls
        )))
    }
}

#[async_trait]
impl DocumentAnalyzer for DocumentIntelligenceClient {
    async fn analyze(&self, document: Vec<u8>, model_id: &str) -> Result<AnalyzeResult> {
        let operation_url = self.submit(document, model_id).await?;
        let result = self.poll(&operation_url).await?;
        info!(
            "Document analysis finished ({} pages)",
            result.page_count().unwrap_or(0)
        );
        Ok(result)
    }
}
