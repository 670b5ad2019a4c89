use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// Where the answer sits in a `generateContent` response.
pub const ANSWER_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Text of the first part of the first candidate, if it is a non-empty
/// string. Any other shape (missing, `null`, wrong type) yields `None`.
pub fn answer_text(response: &Value) -> Option<&str> {
    response
        .pointer(ANSWER_POINTER)
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
}
