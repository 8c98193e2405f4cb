//! OpenAI title generator
//!
//! Asks the Chat Completions API for a numbered list of titles and parses
//! the list back out of the reply.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{http_client, truncate_content, BackendError, TitleGenerator};

const PROVIDER: &str = "OpenAI";

const SYSTEM_PROMPT: &str = "You are a professional blog title generator. Create engaging, \
SEO-friendly titles that accurately reflect the content while being catchy and memorable.";

/// Longest content excerpt sent in the prompt
const MAX_CONTENT_CHARS: usize = 4000;

/// Longest title accepted from the model
pub const MAX_TITLE_CHARS: usize = 60;

/// Line prefixes that mark chatter rather than a title
const PREAMBLE_PREFIXES: [&str; 3] = ["title", "suggestion", "here"];

/// OpenAI Chat Completions backend
#[derive(Debug, Clone)]
pub struct OpenAiTitleGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiTitleGenerator {
    pub fn new(api_key: Option<String>, model: String, base_url: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key,
            model,
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request_body(&self, content: &str, count: usize) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(content, count) },
            ],
            "temperature": 0.7,
            "max_tokens": 150,
            "top_p": 1,
            "frequency_penalty": 0.5,
            "presence_penalty": 0.3,
        })
    }
}

#[async_trait]
impl TitleGenerator for OpenAiTitleGenerator {
    fn name(&self) -> &str {
        "openai"
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
                message: "OpenAI API key is not set".to_string(),
            })?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&self.build_request_body(content, count))
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

        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| BackendError::Parse {
                provider: PROVIDER.to_string(),
                message: "response has no message content".to_string(),
            })?
            .trim();

        if text.is_empty() {
            warn!("Empty response from OpenAI");
            return Ok(Vec::new());
        }

        let titles = parse_titles(text);
        if titles.is_empty() {
            warn!("No valid titles extracted from OpenAI response");
        } else {
            info!("Generated {} title suggestions using OpenAI", titles.len());
        }
        Ok(titles)
    }
}

/// Builds the user prompt asking for `count` numbered titles.
pub fn build_prompt(content: &str, count: usize) -> String {
    let excerpt = truncate_content(content, MAX_CONTENT_CHARS);
    format!(
        "Generate exactly {count} unique and engaging blog post titles based on the following content.\n\
         \n\
         Content:\n\
         {excerpt}\n\
         \n\
         Requirements:\n\
         1. Each title should be SEO-friendly and no longer than {MAX_TITLE_CHARS} characters\n\
         2. Titles should be catchy and engaging while accurately reflecting the content\n\
         3. Format the output as a numbered list (1., 2., etc.)\n\
         4. Do not include any additional text or explanations\n\
         5. Each title should be unique and different in structure\n\
         \n\
         Generate {count} titles now:"
    )
}

/// Extracts titles from a model reply.
///
/// Accepts `1. Title`, `- Title` and bare lines; bare lines that open with a
/// preamble word are skipped, as are titles over [`MAX_TITLE_CHARS`].
pub fn parse_titles(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let candidate = if line.starts_with(|c: char| c.is_ascii_digit()) && line.contains('.') {
                line.split_once('.').map(|(_, rest)| rest.trim())
            } else if let Some(rest) = line.strip_prefix('-') {
                Some(rest.trim())
            } else if PREAMBLE_PREFIXES.iter().any(|p| line.starts_with(p)) {
                None
            } else {
                Some(line)
            };

            match candidate {
                Some(title) if !title.is_empty() && title.chars().count() <= MAX_TITLE_CHARS => {
                    Some(title.to_string())
                }
                Some(title) => {
                    debug!("Skipping title candidate '{}'", title);
                    None
                }
                None => None,
            }
        })
        .collect()
}
