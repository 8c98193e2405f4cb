//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Default OpenAI API base URL
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default HuggingFace Inference API base URL
pub const DEFAULT_HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Default OpenAI chat model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo-preview";

/// Default HuggingFace summarization model
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "facebook/bart-large-cnn";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the in-memory store can hold
    pub max_entries: usize,
    /// TTL in seconds applied to every cached suggestion list
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Timeout in seconds for each backend HTTP call
    pub request_timeout: u64,
    /// Number of titles requested from each backend
    pub num_suggestions: usize,
    /// Maximum number of titles returned to the caller
    pub max_suggestions: usize,
    /// OpenAI API key, `None` when unset or empty
    pub openai_api_key: Option<String>,
    /// OpenAI chat model
    pub openai_model: String,
    /// OpenAI API base URL
    pub openai_base_url: String,
    /// HuggingFace API key, `None` when unset or empty
    pub huggingface_api_key: Option<String>,
    /// HuggingFace model id
    pub huggingface_model: String,
    /// HuggingFace Inference API base URL
    pub huggingface_base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `MAX_ENTRIES` - Maximum cached suggestion lists (default: 10000)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 86400)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `REQUEST_TIMEOUT` - Backend timeout in seconds (default: 30)
    /// - `NUM_SUGGESTIONS` - Titles requested per backend (default: 3)
    /// - `MAX_SUGGESTIONS` - Titles returned per request (default: 3)
    /// - `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_BASE_URL`
    /// - `HUGGINGFACE_API_KEY`, `HUGGINGFACE_MODEL`, `HUGGINGFACE_BASE_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            request_timeout: parse_var("REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout),
            num_suggestions: parse_var("NUM_SUGGESTIONS").unwrap_or(defaults.num_suggestions),
            max_suggestions: parse_var("MAX_SUGGESTIONS").unwrap_or(defaults.max_suggestions),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: non_empty_var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: non_empty_var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            huggingface_api_key: non_empty_var("HUGGINGFACE_API_KEY"),
            huggingface_model: non_empty_var("HUGGINGFACE_MODEL")
                .unwrap_or(defaults.huggingface_model),
            huggingface_base_url: non_empty_var("HUGGINGFACE_BASE_URL")
                .unwrap_or(defaults.huggingface_base_url),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            max_entries: 10_000,
            cache_ttl: 86_400,
            cleanup_interval: 60,
            request_timeout: 30,
            num_suggestions: 3,
            max_suggestions: 3,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            huggingface_api_key: None,
            huggingface_model: DEFAULT_HUGGINGFACE_MODEL.to_string(),
            huggingface_base_url: DEFAULT_HUGGINGFACE_BASE_URL.to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
