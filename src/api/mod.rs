//! API Module
//!
//! HTTP handlers and routing for the title suggestion REST API.
//!
//! # Endpoints
//! - `POST /api/suggest-titles/` - Suggest titles for a blog post
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
