//! Response DTOs for the title suggestion API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use uuid::Uuid;

use crate::analysis::ContentAnalysis;
use crate::cache::CacheStats;

/// Analysis block attached when the client asks for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisData {
    /// Set when analysis failed; the request itself still succeeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub keywords: Vec<String>,
    pub summary: String,
}

impl AnalysisData {
    /// Placeholder returned when analysis could not be computed
    pub fn failed() -> Self {
        Self {
            error: Some("Content analysis failed".to_string()),
            keywords: Vec::new(),
            summary: String::new(),
        }
    }
}

impl From<ContentAnalysis> for AnalysisData {
    fn from(analysis: ContentAnalysis) -> Self {
        Self {
            error: None,
            keywords: analysis.keywords,
            summary: analysis.summary,
        }
    }
}

/// Response body for POST /api/suggest-titles/
#[derive(Debug, Clone, Serialize)]
pub struct SuggestTitlesResponse {
    /// Identifier of this request, for log correlation
    pub id: Uuid,
    /// Merged title suggestions
    pub suggestions: Vec<String>,
    /// Present only when analysis was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisData>,
    /// Errors from backends that failed; omitted when all succeeded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_suggest_response_omits_optional_fields() {
        let resp = SuggestTitlesResponse {
            id: Uuid::nil(),
            suggestions: vec!["Title A".to_string()],
            analysis: None,
            warnings: Vec::new(),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({ "id": "00000000-0000-0000-0000-000000000000", "suggestions": ["Title A"] })
        );
    }

    #[test]
    fn test_failed_analysis_serialize() {
        let value = serde_json::to_value(AnalysisData::failed()).unwrap();
        assert_eq!(
            value,
            json!({ "error": "Content analysis failed", "keywords": [], "summary": "" })
        );
    }

    #[test]
    fn test_analysis_from_content_analysis() {
        let data = AnalysisData::from(ContentAnalysis {
            keywords: vec!["rust".to_string()],
            summary: "About rust.".to_string(),
        });
        let value = serde_json::to_value(data).unwrap();
        assert_eq!(value, json!({ "keywords": ["rust"], "summary": "About rust." }));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..CacheStats::default()
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
