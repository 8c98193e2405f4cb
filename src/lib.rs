//! Title Suggester - blog post title suggestions over HTTP
//!
//! Fans a blog post out to the OpenAI and HuggingFace backends, merges their
//! titles and caches each backend's answer per content hash.

pub mod analysis;
pub mod api;
pub mod backends;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod tasks;

pub use api::AppState;
pub use cache::{MemoryStore, SuggestionStore, TitleSuggestionCache};
pub use config::Config;
pub use orchestrator::{SuggestionError, SuggestionOrchestrator, SuggestionOutcome};
pub use tasks::spawn_cleanup_task;
