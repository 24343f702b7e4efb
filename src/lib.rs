//! helpboard - business listings and help requests over HTTP
//!
//! Records are loaded from JSON documents at startup and held in memory.
//! Listings support case-insensitive substring search and a descending sort
//! on one field; help requests can also be created and updated.
#![warn(missing_docs)]

/// Shared constants
pub mod constants;

// Core foundational modules
pub mod core;
pub mod types;

// Main functional modules
pub mod storage;
pub mod query;
pub mod api;
pub mod system;

// Re-export commonly used items for convenience
pub use crate::core::{AppState, Config, Error, Result};
pub use query::{filter_and_sort, ListQuery, Listed};
pub use storage::Store;
pub use types::{Business, Entity, EntityId, HelpRequest};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
