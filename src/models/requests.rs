//! Request DTOs for the title suggestion API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Minimum blog post length, in characters
pub const MIN_CONTENT_CHARS: usize = 50;

/// Request body for POST /api/suggest-titles/
///
/// Both fields are kept as raw JSON: a non-string `content` gets its own
/// message, and `include_analysis` accepts any truthy value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestTitlesRequest {
    /// The blog post text
    #[serde(default)]
    pub content: Option<Value>,
    /// Whether keywords and a summary should be returned too
    #[serde(default)]
    pub include_analysis: Option<Value>,
}

impl SuggestTitlesRequest {
    /// Creates a request for plain text content
    pub fn new(content: impl Into<String>, include_analysis: bool) -> Self {
        Self {
            content: Some(Value::String(content.into())),
            include_analysis: Some(Value::Bool(include_analysis)),
        }
    }

    /// True when `include_analysis` holds a truthy value.
    pub fn wants_analysis(&self) -> bool {
        self.include_analysis.as_ref().is_some_and(is_truthy)
    }

    /// Validates the request and returns the content on success.
    ///
    /// Returns the client-facing error message if validation fails.
    pub fn validate(&self) -> Result<&str, String> {
        let content = match &self.content {
            Some(value) if !is_truthy(value) => {
                return Err("Blog post content is required".to_string())
            }
            None => return Err("Blog post content is required".to_string()),
            Some(Value::String(s)) => s.as_str(),
            Some(_) => return Err("Content must be a string".to_string()),
        };

        if content.chars().count() < MIN_CONTENT_CHARS {
            return Err(format!(
                "Blog post content must be at least {} characters long",
                MIN_CONTENT_CHARS
            ));
        }
        Ok(content)
    }
}

/// JSON truthiness: `null`, `false`, zero, `""`, `[]` and `{}` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
