//! Title generation backends
//!
//! Defines the [`TitleGenerator`] trait, the [`BackendError`] type shared by
//! all providers, and the OpenAI and HuggingFace implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;

mod huggingface;
mod openai;

pub use huggingface::HuggingFaceTitleGenerator;
pub use openai::OpenAiTitleGenerator;

/// Errors that can occur while asking a backend for titles
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend has no API key configured
    #[error("[{provider}] not configured: {message}")]
    NotConfigured { provider: String, message: String },

    /// Network error during the request
    #[error("[{provider}] network error: {message}")]
    Network { provider: String, message: String },

    /// Request exceeded the configured timeout
    #[error("[{provider}] request timed out")]
    Timeout { provider: String },

    /// Provider is throttling requests
    #[error("[{provider}] rate limit exceeded, try again later")]
    RateLimited { provider: String },

    /// Provider returned a non-success status
    #[error("[{provider}] API error ({code}): {message}")]
    Api {
        provider: String,
        code: u16,
        message: String,
    },

    /// Provider response could not be understood
    #[error("[{provider}] parse error: {message}")]
    Parse { provider: String, message: String },
}

impl BackendError {
    /// Maps a reqwest transport error onto `Timeout` or `Network`.
    pub(crate) fn from_transport(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout {
                provider: provider.to_string(),
            }
        } else {
            BackendError::Network {
                provider: provider.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// A service that turns blog post content into title suggestions.
#[async_trait]
pub trait TitleGenerator: Send + Sync {
    /// Stable identifier, also used as the cache namespace for this backend.
    fn name(&self) -> &str;

    /// Human readable name used in warnings returned to clients.
    fn display_name(&self) -> &str;

    /// Generates up to `count` titles for `content`.
    async fn generate(&self, content: &str, count: usize) -> Result<Vec<String>, BackendError>;
}

/// Builds the configured backends in merge order: OpenAI first, then HuggingFace.
pub fn from_config(config: &Config) -> Vec<Arc<dyn TitleGenerator>> {
    let timeout = Duration::from_secs(config.request_timeout);
    vec![
        Arc::new(OpenAiTitleGenerator::new(
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            config.openai_base_url.clone(),
            timeout,
        )),
        Arc::new(HuggingFaceTitleGenerator::new(
            config.huggingface_api_key.clone(),
            config.huggingface_model.clone(),
            config.huggingface_base_url.clone(),
            timeout,
        )),
    ]
}

/// Cuts `content` to `max_chars` characters, marking the cut with `...`.
pub(crate) fn truncate_content(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &content[..idx]),
        None => content.to_string(),
    }
}

pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
