//! Application Factory
//!
//! Builds [`AppState`] from configuration by loading both startup documents.

use crate::core::app_state::AppState;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::storage::{BusinessStore, HelpRequestStore};

/// Create AppState based on configuration
///
/// Fails if either startup document is missing or invalid; the caller is
/// expected to treat that as fatal.
pub fn create_app_state(config: Config) -> Result<AppState> {
    tracing::info!("Loading businesses from {:?}", config.data.businesses);
    let businesses = BusinessStore::load(&config.data.businesses)?;

    tracing::info!("Loading help requests from {:?}", config.data.help_requests);
    let help_requests = HelpRequestStore::load(&config.data.help_requests)?;

    let state = AppState::new(businesses, help_requests, config)?;
    tracing::info!("AppState created successfully");
    Ok(state)
}
