//! # API Module
//!
//! HTTP interface for helpboard.
//!
//! ## Endpoints Overview
//!
//! ### Businesses
//! - `GET /businesses` - HTML listing, filtered by `q`, ordered by `sort-by`
//! - `GET /businesses.json` - JSON listing with the same parameters
//! - `GET /business/{id}` - HTML view; `{id}.json` returns the raw record
//!
//! ### Help Requests
//! - `GET /requests` - HTML listing
//! - `POST /requests` - Create from `from`, `title`, `description`
//! - `GET /requests.json` - JSON listing
//! - `GET /request/{id}` - HTML view; `{id}.json` returns the raw record
//! - `PATCH /request/{id}` - Set `priority`, append `comment`
//!
//! ### System Essentials
//! - `GET /health` - Liveness and record counts
//! - `GET /metrics` - Prometheus metrics

pub mod error;
pub mod extract;
pub mod handlers;
pub mod render;
pub mod server;

// Re-export commonly used items
pub use error::ApiError;
pub use server::{create_app, start_server};
