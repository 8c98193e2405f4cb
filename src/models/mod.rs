//! Request and Response models for the title suggestion API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{SuggestTitlesRequest, MIN_CONTENT_CHARS};
pub use responses::{
    AnalysisData, ErrorResponse, HealthResponse, StatsResponse, SuggestTitlesResponse,
};
