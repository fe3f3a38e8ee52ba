//! Document source resolution: local paths and remote URLs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use docsight_core::{DocsightConfig, Error, Result};

/// Filename used when a URL has no final path segment.
pub const FALLBACK_FILENAME: &str = "document_from_url.pdf";

/// A local file ready for extraction.
///
/// A transient source (downloaded from a URL) deletes its file when dropped,
/// so cleanup runs on every exit path of the analysis.
#[derive(Debug)]
pub struct ResolvedSource {
    path: PathBuf,
    transient: bool,
}

impl ResolvedSource {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            transient: false,
        }
    }

    pub fn transient(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            transient: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }
}

impl Drop for ResolvedSource {
    fn drop(&mut self) {
        if !self.transient || !self.path.exists() {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed temporary file {}", self.path.display()),
            Err(e) => warn!(
                "Failed to remove temporary file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Turn a path or URL into a local file.
pub async fn resolve(input: &str, config: &DocsightConfig) -> Result<ResolvedSource> {
    if input.starts_with("http") {
        let path = download(
            input,
            &config.data_paths.scratch_dir,
            config.download_timeout,
        )
        .await?;
        return Ok(ResolvedSource::transient(path));
    }

    Ok(ResolvedSource::local(resolve_local(
        input,
        &config.data_paths.docs_dir,
    )))
}

/// Relative paths are taken as names inside the documents root.
pub fn resolve_local(input: &str, docs_dir: &Path) -> PathBuf {
    let path = Path::new(input);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        docs_dir.join(path)
    }
}

/// Rewrite a GitHub "blob" page URL to the raw file URL.
pub fn normalize_github_url(url: &str) -> String {
    if url.contains("github.com") && url.contains("/blob/") {
        url.replace("github.com", "raw.githubusercontent.com")
            .replace("/blob/", "/")
    } else {
        url.to_string()
    }
}

/// Last path segment of a URL, without query or fragment.
pub fn filename_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(|name| name.trim().to_string())
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Download a remote document into `scratch_dir`. Only HTTP 200 counts as success.
pub async fn download(url: &str, scratch_dir: &Path, timeout: Duration) -> Result<PathBuf> {
    let url = normalize_github_url(url);

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Http(e.to_string()))?;

    debug!("Downloading {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Download(format!("Request to {} failed: {}", url, e)))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(Error::Download(format!(
            "Failed to download {} (HTTP {})",
            url,
            status.as_u16()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Download(format!("Failed to read body of {}: {}", url, e)))?;

    tokio::fs::create_dir_all(scratch_dir).await?;
    let local_path = scratch_dir.join(filename_from_url(&url));
    tokio::fs::write(&local_path, &bytes).await?;

    info!("Downloaded file to {}", local_path.display());
    Ok(local_path)
}
