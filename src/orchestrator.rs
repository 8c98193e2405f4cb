//! Suggestion Orchestrator
//!
//! Runs every configured backend behind the cache, concurrently, and merges
//! their lists into one response. A backend that fails only costs its share
//! of the suggestions; the request fails only when nothing was produced.

use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::backends::{self, BackendError, TitleGenerator};
use crate::cache::TitleSuggestionCache;
use crate::config::Config;

/// Primary share of the merged list for the OpenAI backend
pub const OPENAI_QUOTA: usize = 2;

/// Primary share of the merged list for the HuggingFace backend
pub const HUGGINGFACE_QUOTA: usize = 1;

/// Failure to produce any suggestion at all
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuggestionError {
    /// Every backend failed; carries the joined backend errors
    #[error("Failed to generate titles: {0}")]
    AllBackendsFailed(String),

    /// Backends answered but produced nothing usable
    #[error("No titles could be generated")]
    NoSuggestions,
}

/// Merged suggestions plus the errors of backends that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionOutcome {
    pub suggestions: Vec<String>,
    pub warnings: Vec<String>,
}

struct BackendSlot {
    generator: Arc<dyn TitleGenerator>,
    quota: usize,
}

/// Cache-aware fan-out over the title generation backends.
pub struct SuggestionOrchestrator {
    cache: TitleSuggestionCache,
    backends: Vec<BackendSlot>,
    /// Titles requested from each backend
    num_suggestions: usize,
    /// Titles returned to the caller
    max_suggestions: usize,
}

impl SuggestionOrchestrator {
    /// Creates an orchestrator with no backends.
    pub fn new(cache: TitleSuggestionCache, num_suggestions: usize, max_suggestions: usize) -> Self {
        Self {
            cache,
            backends: Vec::new(),
            num_suggestions,
            max_suggestions,
        }
    }

    /// Appends a backend; merge order follows registration order.
    pub fn with_backend(mut self, generator: Arc<dyn TitleGenerator>, quota: usize) -> Self {
        self.backends.push(BackendSlot { generator, quota });
        self
    }

    /// Builds the OpenAI + HuggingFace pipeline described by `config`.
    pub fn from_config(config: &Config, cache: TitleSuggestionCache) -> Self {
        let quotas = [OPENAI_QUOTA, HUGGINGFACE_QUOTA];
        backends::from_config(config)
            .into_iter()
            .zip(quotas)
            .fold(
                Self::new(cache, config.num_suggestions, config.max_suggestions),
                |orchestrator, (generator, quota)| orchestrator.with_backend(generator, quota),
            )
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|slot| slot.generator.name()).collect()
    }

    // == Suggest ==
    /// Produces merged title suggestions for `content`.
    pub async fn suggest(&self, content: &str) -> Result<SuggestionOutcome, SuggestionError> {
        let results = join_all(
            self.backends
                .iter()
                .map(|slot| self.suggestions_from(slot.generator.as_ref(), content)),
        )
        .await;

        let mut lists = Vec::with_capacity(results.len());
        let mut warnings = Vec::new();
        for (slot, result) in self.backends.iter().zip(results) {
            match result {
                Ok(titles) => lists.push((titles, slot.quota)),
                Err(e) => {
                    error!("{} service error: {}", slot.generator.display_name(), e);
                    warnings.push(e.to_string());
                    lists.push((Vec::new(), slot.quota));
                }
            }
        }

        let suggestions = merge_suggestions(&lists, self.max_suggestions);
        if suggestions.is_empty() {
            return Err(if warnings.is_empty() {
                SuggestionError::NoSuggestions
            } else {
                SuggestionError::AllBackendsFailed(warnings.join(" | "))
            });
        }

        Ok(SuggestionOutcome {
            suggestions,
            warnings,
        })
    }

    // Cache lookup, then the backend on a miss; fresh results are cached.
    async fn suggestions_from(
        &self,
        generator: &dyn TitleGenerator,
        content: &str,
    ) -> Result<Vec<String>, BackendError> {
        let name = generator.name();
        if let Some(cached) = self.cache.get_cached_suggestions(content, name).await {
            info!("Using cached {} title suggestions", generator.display_name());
            return Ok(cached);
        }

        let titles = generator.generate(content, self.num_suggestions).await?;
        if titles.is_empty() {
            warn!("No titles generated by {}", generator.display_name());
            return Ok(titles);
        }

        if !self.cache.cache_suggestions(content, name, &titles).await {
            warn!("Continuing without caching {} suggestions", generator.display_name());
        }
        Ok(titles)
    }
}

/// Merges per-backend lists into at most `max` titles.
///
/// Each list first contributes up to its quota, in order; remaining slots
/// are then filled from the leftovers of each list, again in order.
pub fn merge_suggestions(lists: &[(Vec<String>, usize)], max: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(max);

    for (titles, quota) in lists {
        merged.extend(titles.iter().take(*quota).cloned());
    }
    for (titles, quota) in lists {
        let room = max.saturating_sub(merged.len());
        merged.extend(titles.iter().skip(*quota).take(room).cloned());
    }

    merged.truncate(max);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CONTENT: &str = "A long blog post about AI and how it reshapes software teams.";

    /// Generator returning a fixed answer and counting its calls.
    struct StubGenerator {
        name: &'static str,
        answer: Result<Vec<&'static str>, u16>,
        calls: AtomicUsize,
    }

    impl StubGenerator {
        fn ok(name: &'static str, titles: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer: Ok(titles),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str, code: u16) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer: Err(code),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TitleGenerator for StubGenerator {
        fn name(&self) -> &str {
            self.name
        }

        fn display_name(&self) -> &str {
            self.name
        }

        async fn generate(&self, _: &str, _: usize) -> Result<Vec<String>, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.answer {
                Ok(titles) => Ok(titles.iter().map(|t| t.to_string()).collect()),
                Err(code) => Err(BackendError::Api {
                    provider: self.name.to_string(),
                    code: *code,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    fn cache() -> TitleSuggestionCache {
        TitleSuggestionCache::new(Arc::new(MemoryStore::new(100)))
    }

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_primary_quotas() {
        let merged = merge_suggestions(
            &[(list(&["O1", "O2", "O3"]), 2), (list(&["H1", "H2"]), 1)],
            3,
        );
        assert_eq!(merged, list(&["O1", "O2", "H1"]));
    }

    #[test]
    fn test_merge_fills_from_first_backend_leftovers() {
        let merged = merge_suggestions(&[(list(&["O1", "O2", "O3"]), 2), (Vec::new(), 1)], 3);
        assert_eq!(merged, list(&["O1", "O2", "O3"]));
    }

    #[test]
    fn test_merge_fills_from_second_backend_leftovers() {
        let merged = merge_suggestions(&[(list(&["O1"]), 2), (list(&["H1", "H2", "H3"]), 1)], 3);
        assert_eq!(merged, list(&["O1", "H1", "H2"]));
    }

    #[test]
    fn test_merge_everything_empty() {
        assert!(merge_suggestions(&[(Vec::new(), 2), (Vec::new(), 1)], 3).is_empty());
    }

    #[tokio::test]
    async fn test_suggest_merges_both_backends() {
        let openai = StubGenerator::ok("openai", vec!["O1", "O2", "O3"]);
        let hf = StubGenerator::ok("huggingface", vec!["H1"]);
        let orchestrator = SuggestionOrchestrator::new(cache(), 3, 3)
            .with_backend(openai, OPENAI_QUOTA)
            .with_backend(hf, HUGGINGFACE_QUOTA);

        let outcome = orchestrator.suggest(CONTENT).await.unwrap();

        assert_eq!(outcome.suggestions, list(&["O1", "O2", "H1"]));
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_second_call_served_from_cache() {
        let openai = StubGenerator::ok("openai", vec!["Title A", "Title B"]);
        let orchestrator =
            SuggestionOrchestrator::new(cache(), 3, 3).with_backend(openai.clone(), OPENAI_QUOTA);

        let first = orchestrator.suggest(CONTENT).await.unwrap();
        let second = orchestrator.suggest(CONTENT).await.unwrap();

        assert_eq!(first.suggestions, list(&["Title A", "Title B"]));
        assert_eq!(second.suggestions, first.suggestions);
        assert_eq!(openai.calls(), 1);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_backend() {
        let openai = StubGenerator::failing("openai", 503);
        let hf = StubGenerator::ok("huggingface", vec!["H1", "H2", "H3"]);
        let orchestrator = SuggestionOrchestrator::new(cache(), 3, 3)
            .with_backend(openai, OPENAI_QUOTA)
            .with_backend(hf, HUGGINGFACE_QUOTA);

        let outcome = orchestrator.suggest(CONTENT).await.unwrap();

        assert_eq!(outcome.suggestions, list(&["H1", "H2", "H3"]));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("503"));
    }

    #[tokio::test]
    async fn test_failed_backend_is_not_cached() {
        let openai = StubGenerator::failing("openai", 500);
        let orchestrator =
            SuggestionOrchestrator::new(cache(), 3, 3).with_backend(openai.clone(), OPENAI_QUOTA);

        assert!(orchestrator.suggest(CONTENT).await.is_err());
        assert!(orchestrator.suggest(CONTENT).await.is_err());
        assert_eq!(openai.calls(), 2);
    }

    #[tokio::test]
    async fn test_all_backends_failed() {
        let orchestrator = SuggestionOrchestrator::new(cache(), 3, 3)
            .with_backend(StubGenerator::failing("openai", 500), OPENAI_QUOTA)
            .with_backend(StubGenerator::failing("huggingface", 502), HUGGINGFACE_QUOTA);

        match orchestrator.suggest(CONTENT).await {
            Err(SuggestionError::AllBackendsFailed(message)) => {
                assert!(message.contains("500"));
                assert!(message.contains(" | "));
                assert!(message.contains("502"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_answers_yield_no_suggestions() {
        let orchestrator = SuggestionOrchestrator::new(cache(), 3, 3)
            .with_backend(StubGenerator::ok("openai", vec![]), OPENAI_QUOTA);

        assert_eq!(
            orchestrator.suggest(CONTENT).await,
            Err(SuggestionError::NoSuggestions)
        );
    }

    #[tokio::test]
    async fn test_broken_cache_still_serves_backends() {
        let broken = TitleSuggestionCache::new(Arc::new(crate::cache::BrokenStore));
        let openai = StubGenerator::ok("openai", vec!["Title A"]);
        let orchestrator =
            SuggestionOrchestrator::new(broken, 3, 3).with_backend(openai.clone(), OPENAI_QUOTA);

        orchestrator.suggest(CONTENT).await.unwrap();
        let outcome = orchestrator.suggest(CONTENT).await.unwrap();

        assert_eq!(outcome.suggestions, list(&["Title A"]));
        assert_eq!(openai.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_cache_write_still_returns_fresh_titles() {
        let read_only = TitleSuggestionCache::new(Arc::new(crate::cache::ReadOnlyStore::new()));
        let openai = StubGenerator::ok("openai", vec!["Fresh A", "Fresh B"]);
        let hf = StubGenerator::ok("huggingface", vec!["Fresh H"]);
        let orchestrator = SuggestionOrchestrator::new(read_only, 3, 3)
            .with_backend(openai.clone(), OPENAI_QUOTA)
            .with_backend(hf.clone(), HUGGINGFACE_QUOTA);

        let first = orchestrator.suggest(CONTENT).await.unwrap();
        let second = orchestrator.suggest(CONTENT).await.unwrap();

        assert_eq!(first.suggestions, list(&["Fresh A", "Fresh B", "Fresh H"]));
        assert!(first.warnings.is_empty());
        assert_eq!(second.suggestions, first.suggestions);
        assert_eq!(openai.calls(), 2);
        assert_eq!(hf.calls(), 2);
    }

    #[test]
    fn test_from_config_registers_both_backends() {
        let orchestrator = SuggestionOrchestrator::from_config(&Config::default(), cache());
        assert_eq!(orchestrator.backend_names(), vec!["openai", "huggingface"]);
    }
}
