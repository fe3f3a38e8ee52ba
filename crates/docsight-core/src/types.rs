//! Document and insight types shared across the pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Text extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub text: String,
    /// Number of pages reported by the extractor, when it knows.
    pub page_count: Option<usize>,
    /// Local path the text was read from.
    pub source: PathBuf,
}

/// Structured summary of a document.
///
/// Both fields are always present; a failed generation yields
/// `Insights::default()` rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub summary: String,
    pub key_points: Vec<String>,
}

impl Insights {
    pub fn new(summary: impl Into<String>, key_points: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            key_points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.key_points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_json_shape() {
        let insights = Insights::new("Zażółć gęślą jaźń.", vec!["punkt".into()]);
        let json = serde_json::to_value(&insights).unwrap();
        assert!(json["summary"].is_string());
        assert!(json["key_points"].is_array());
        assert_eq!(json["key_points"][0], "punkt");
    }

    #[test]
    fn test_default_is_empty_but_present() {
        let insights = Insights::default();
        assert!(insights.is_empty());
        let json = serde_json::to_string(&insights).unwrap();
        assert_eq!(json, r#"{"summary":"","key_points":[]}"#);
    }
}
