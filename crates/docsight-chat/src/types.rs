//! Chat-completion wire types.

use serde::{Deserialize, Serialize};

/// Chat provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatProvider {
    Azure,
    OpenAI,
}

impl std::fmt::Display for ChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatProvider::Azure => write!(f, "azure"),
            ChatProvider::OpenAI => write!(f, "openai"),
        }
    }
}

/// Chat message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Non-streaming chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: usize,
    pub temperature: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Usually a string, but providers may send `null` (e.g. content filtering).
    #[serde(default)]
    pub content: serde_json::Value,
}

/// Raw text of a model reply; `None` when the provider sent no content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply(pub Option<String>);

impl ModelReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self(Some(text.into()))
    }

    /// Null stays absent, strings pass through, anything else becomes its JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self(None),
            serde_json::Value::String(s) => Self(Some(s.clone())),
            other => Self(Some(other.to_string())),
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_from_json() {
        assert_eq!(ModelReply::from_json(&json!(null)), ModelReply(None));
        assert_eq!(ModelReply::from_json(&json!("SUMMARY:")), ModelReply::text("SUMMARY:"));
        assert_eq!(ModelReply::from_json(&json!(42)), ModelReply::text("42"));
        assert_eq!(
            ModelReply::from_json(&json!(["a", "b"])),
            ModelReply::text(r#"["a","b"]"#)
        );
    }

    #[test]
    fn test_response_with_null_content() {
        let resp: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": {"role": "assistant", "content": null}}]}))
                .unwrap();
        assert_eq!(ModelReply::from_json(&resp.choices[0].message.content), ModelReply(None));
    }

    #[test]
    fn test_request_shape() {
        let req = ChatCompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            max_tokens: 800,
            temperature: 0.2,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["max_tokens"], 800);
        assert_eq!(value["temperature"], 0.2);
    }
}
