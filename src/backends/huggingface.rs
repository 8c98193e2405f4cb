//! HuggingFace title generator
//!
//! Uses a hosted summarization model through the Inference API; each sampled
//! summary becomes one title candidate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{http_client, truncate_content, BackendError, TitleGenerator};

const PROVIDER: &str = "HuggingFace";

/// Longest content excerpt sent to the model
const MAX_CONTENT_CHARS: usize = 1000;

/// HuggingFace Inference API backend
#[derive(Debug, Clone)]
pub struct HuggingFaceTitleGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl HuggingFaceTitleGenerator {
    pub fn new(api_key: Option<String>, model: String, base_url: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            model,
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl TitleGenerator for HuggingFaceTitleGenerator {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn display_name(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, content: &str, count: usize) -> Result<Vec<String>, BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| BackendError::NotConfigured {
                provider: PROVIDER.to_string(),
                message: "HuggingFace API key is not set".to_string(),
            })?;

        let payload = json!({
            "inputs": truncate_content(content, MAX_CONTENT_CHARS),
            "parameters": {
                "max_length": 30,
                "min_length": 5,
                "do_sample": true,
                "top_k": 50,
                "top_p": 0.95,
                "num_return_sequences": count,
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BackendError::from_transport(PROVIDER, e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(BackendError::RateLimited {
                provider: PROVIDER.to_string(),
            });
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Api {
                provider: PROVIDER.to_string(),
                code: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await.map_err(|e| BackendError::Parse {
            provider: PROVIDER.to_string(),
            message: e.to_string(),
        })?;

        let titles: Vec<String> = extract_texts(&body)
            .iter()
            .map(|t| clean_title(t))
            .filter(|t| !t.is_empty())
            .collect();

        if titles.is_empty() {
            warn!("No titles extracted from HuggingFace response");
        } else {
            info!("Generated {} title suggestions using HuggingFace", titles.len());
        }
        Ok(titles)
    }
}

/// Pulls the generated strings out of an Inference API reply.
///
/// The API answers with a list of `{"generated_text"}` or `{"summary_text"}`
/// objects, a list of plain strings, or a single object.
fn extract_texts(body: &Value) -> Vec<String> {
    fn text_of(item: &Value) -> Option<&str> {
        match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map
                .get("generated_text")
                .or_else(|| map.get("summary_text"))
                .and_then(Value::as_str),
            _ => None,
        }
    }

    match body {
        Value::Array(items) => items
            .iter()
            .filter_map(text_of)
            .map(|s| s.trim().to_string())
            .collect(),
        Value::Object(_) => text_of(body)
            .map(|s| vec![s.trim().to_string()])
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Trims, drops one trailing period and capitalises the first letter.
pub fn clean_title(title: &str) -> String {
    let title = title.trim();
    let title = title.strip_suffix('.').unwrap_or(title);

    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
