//! Insight generation: prompt the model for a summary and key points, then
//! parse its free-text reply.
//!
//! Generation never fails outward. Empty input short-circuits to a fixed
//! summary, and a failed model call degrades to `Insights::default()`.

use tracing::{debug, error, info};

use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::providers::ChatModel;
use crate::types::{ChatCompletionRequest, ChatMessage};
use docsight_core::Insights;

/// Summary returned for empty or whitespace-only documents.
pub const NO_TEXT_SUMMARY: &str = "No text to analyze.";

pub const SYSTEM_PROMPT: &str = "You are an office assistant that writes document summaries.";
pub const TEXT_DELIMITER: &str = "=== TEXT TO ANALYZE ===";

const SUMMARY_HEADER: &str = "SUMMARY";
const KEY_POINTS_HEADER: &str = "KEY POINTS";
const BULLET_MARKERS: [char; 3] = ['-', '•', '*'];

/// Prompts a chat model and turns its reply into [`Insights`].
pub struct InsightGenerator<'a> {
    model: &'a dyn ChatModel,
    max_tokens: usize,
    temperature: f64,
}

impl<'a> InsightGenerator<'a> {
    pub fn new(model: &'a dyn ChatModel) -> Self {
        Self {
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_limits(mut self, max_tokens: usize, temperature: f64) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub async fn generate(&self, document_text: &str) -> Insights {
        if document_text.trim().is_empty() {
            return Insights::new(NO_TEXT_SUMMARY, Vec::new());
        }

        let request = ChatCompletionRequest {
            model: self.model.model_id(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(document_text)),
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        info!("Sending document to the chat model...");

        let reply = match self.model.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Chat model call failed: {}", e);
                return Insights::default();
            }
        };

        let (summary, key_points) = parse_model_output(reply.as_deref());
        debug!(
            "Parsed {} summary chars and {} key points",
            summary.len(),
            key_points.len()
        );
        Insights::new(summary, key_points)
    }
}

/// Generate insights with the default token limit and temperature.
pub async fn generate_insights(document_text: &str, model: &dyn ChatModel) -> Insights {
    InsightGenerator::new(model).generate(document_text).await
}

/// Prompt asking for the two labeled sections, followed by the document text.
pub fn build_prompt(document_text: &str) -> String {
    format!(
        "Read the text below and prepare two sections:\n\n\
         SUMMARY:\n\
         - a short description of the most important information (3-5 sentences)\n\n\
         KEY POINTS:\n\
         - a bulleted list of the most important claims and facts\n\n\
         Keep exactly this format:\n\
         SUMMARY:\n\
         <text>\n\n\
         KEY POINTS:\n\
         - point 1\n\
         - point 2\n\
         - ...\n\n\
         {}\n\
         {}\n",
        TEXT_DELIMITER,
        document_text.trim()
    )
}

/// Section of the reply currently being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseSection {
    None,
    Summary,
    Points,
}

/// Split a model reply into a summary and key points.
///
/// Lines before the first header are dropped. A repeated header switches
/// back to its section and keeps appending to the same accumulator.
pub fn parse_model_output(raw: Option<&str>) -> (String, Vec<String>) {
    let Some(raw) = raw else {
        return (String::new(), Vec::new());
    };

    let mut section = ParseSection::None;
    let mut summary_lines: Vec<&str> = Vec::new();
    let mut key_points: Vec<String> = Vec::new();

    for line in raw.split('\n') {
        let stripped = line.trim();
        let upper = stripped.to_uppercase();

        if upper.starts_with(SUMMARY_HEADER) {
            section = ParseSection::Summary;
            continue;
        }
        if upper.starts_with(KEY_POINTS_HEADER) {
            section = ParseSection::Points;
            continue;
        }

        match section {
            ParseSection::None => {}
            ParseSection::Summary => {
                if !stripped.is_empty() {
                    summary_lines.push(stripped);
                }
            }
            ParseSection::Points => {
                if stripped.is_empty() {
                    continue;
                }
                if stripped.starts_with(BULLET_MARKERS) {
                    let point = stripped.trim_start_matches(BULLET_MARKERS).trim();
                    if !point.is_empty() {
                        key_points.push(point.to_string());
                    }
                } else {
                    // Model left out the bullet
                    key_points.push(stripped.to_string());
                }
            }
        }
    }

    let summary = summary_lines.join(" ").trim().to_string();
    (summary, key_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelReply;
    use async_trait::async_trait;
    use docsight_core::{Error, Result};
    use std::sync::Mutex;

    /// Returns a canned reply and records every request.
    struct CannedModel {
        reply: ModelReply,
        requests: Mutex<Vec<ChatCompletionRequest>>,
    }

    impl CannedModel {
        fn new(reply: &str) -> Self {
            Self {
                reply: ModelReply::text(reply),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatModel for CannedModel {
        fn model_id(&self) -> String {
            "test-model".into()
        }

        async fn complete(&self, request: ChatCompletionRequest) -> Result<ModelReply> {
            self.requests.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }
    }

    struct BrokenModel;

    #[async_trait]
    impl ChatModel for BrokenModel {
        fn model_id(&self) -> String {
            "broken".into()
        }

        async fn complete(&self, _request: ChatCompletionRequest) -> Result<ModelReply> {
            Err(Error::ModelCall("connection reset".into()))
        }
    }

    fn parse(raw: &str) -> (String, Vec<String>) {
        parse_model_output(Some(raw))
    }

    #[test]
    fn test_parse_none() {
        assert_eq!(parse_model_output(None), (String::new(), Vec::new()));
    }

    #[test]
    fn test_parse_canonical_reply() {
        let (summary, points) =
            parse("SUMMARY:\nHello world.\n\nKEY POINTS:\n- point one\n- point two");
        assert_eq!(summary, "Hello world.");
        assert_eq!(points, vec!["point one", "point two"]);
    }

    #[test]
    fn test_parse_bullet_styles() {
        for line in ["- a", "• a", "* a", "--a", "  -*• a  "] {
            let (_, points) = parse(&format!("KEY POINTS:\n{}", line));
            assert_eq!(points, vec!["a"], "line {:?}", line);
        }
    }

    #[test]
    fn test_parse_bare_marker_is_dropped() {
        let (_, points) = parse("KEY POINTS:\n-\n• \n**\n- kept");
        assert_eq!(points, vec!["kept"]);
    }

    #[test]
    fn test_parse_unbulleted_point_kept() {
        let (_, points) = parse("KEY POINTS:\njust text\n- bulleted");
        assert_eq!(points, vec!["just text", "bulleted"]);
    }

    #[test]
    fn test_parse_discards_preamble() {
        assert_eq!(parse("noise\nSUMMARY:\ntext"), ("text".to_string(), Vec::new()));
    }

    #[test]
    fn test_parse_no_headers() {
        assert_eq!(parse("Just a reply\n- with a bullet"), (String::new(), Vec::new()));
    }

    #[test]
    fn test_parse_case_insensitive_headers() {
        let (summary, points) = parse("  summary:\n  First.  \nSecond.\nKey Points:\n- p");
        assert_eq!(summary, "First. Second.");
        assert_eq!(points, vec!["p"]);
    }

    #[test]
    fn test_parse_points_before_summary() {
        let (summary, points) = parse("KEY POINTS:\n- early\nSUMMARY:\nLate summary.");
        assert_eq!(summary, "Late summary.");
        assert_eq!(points, vec!["early"]);
    }

    #[test]
    fn test_parse_repeated_headers_accumulate() {
        let raw = "SUMMARY:\nOne.\nKEY POINTS:\n- a\nSUMMARY:\nTwo.\nKEY POINTS:\n- b";
        let (summary, points) = parse(raw);
        assert_eq!(summary, "One. Two.");
        assert_eq!(points, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_whitespace_lines_ignored() {
        let (summary, points) = parse("SUMMARY:\n   \n\t\nText.\r\nKEY POINTS:\n  \n- x\r\n");
        assert_eq!(summary, "Text.");
        assert_eq!(points, vec!["x"]);
    }

    #[test]
    fn test_parse_header_text_on_same_line_is_discarded() {
        let (summary, _) = parse("SUMMARY: inline text\nNext line.");
        assert_eq!(summary, "Next line.");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = "intro\nSUMMARY:\nA.\nB.\nKEY POINTS:\n* one\ntwo\n• three";
        let first = parse(raw);
        for _ in 0..5 {
            assert_eq!(parse(raw), first);
        }
        assert_eq!(first.1, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("  Quarterly results were strong.\n\n");
        assert!(prompt.contains("SUMMARY:"));
        assert!(prompt.contains("KEY POINTS:"));
        assert!(prompt.contains("3-5 sentences"));
        assert!(prompt.ends_with("=== TEXT TO ANALYZE ===\nQuarterly results were strong.\n"));
    }

    #[tokio::test]
    async fn test_blank_text_skips_model() {
        let model = CannedModel::new("SUMMARY:\nshould not be used");
        for text in ["", "   ", "\n\t \r\n"] {
            let insights = generate_insights(text, &model).await;
            assert_eq!(insights, Insights::new(NO_TEXT_SUMMARY, Vec::new()));
        }
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let model = CannedModel::new(
            "SUMMARY:\nRevenue grew 10%. Costs fell.\n\nKEY POINTS:\n- Revenue up\n- Costs down\n",
        );
        let insights = generate_insights("Quarterly results were strong.", &model).await;

        assert_eq!(
            insights,
            Insights::new(
                "Revenue grew 10%. Costs fell.",
                vec!["Revenue up".into(), "Costs down".into()]
            )
        );

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "test-model");
        assert_eq!(request.max_tokens, 800);
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.messages[0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(request.messages[1].role, "user");
        assert!(request.messages[1]
            .content
            .ends_with("Quarterly results were strong.\n"));
    }

    #[tokio::test]
    async fn test_model_failure_degrades_to_empty() {
        let insights = generate_insights("Some text.", &BrokenModel).await;
        assert_eq!(insights, Insights::default());
    }

    #[tokio::test]
    async fn test_null_reply_is_empty() {
        let model = CannedModel {
            reply: ModelReply(None),
            requests: Mutex::new(Vec::new()),
        };
        assert_eq!(generate_insights("text", &model).await, Insights::default());
    }

    #[tokio::test]
    async fn test_custom_limits() {
        let model = CannedModel::new("SUMMARY:\nok");
        let insights = InsightGenerator::new(&model)
            .with_limits(256, 0.0)
            .generate("text")
            .await;
        assert_eq!(insights.summary, "ok");

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests[0].max_tokens, 256);
        assert_eq!(requests[0].temperature, 0.0);
    }
}
