//! Application State Management
//!
//! The central [`AppState`] holds the record stores, configuration and view
//! templates. It is cloned into every request handler; all members are
//! reference counted.

use std::sync::Arc;
use crate::api::render::Views;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::storage::{BusinessStore, HelpRequestStore};
use crate::system::metrics::Metrics;

/// Central application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Business listings
    pub businesses: Arc<BusinessStore>,

    /// Help requests
    pub help_requests: Arc<HelpRequestStore>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Compiled HTML templates
    pub views: Arc<Views>,
}

impl AppState {
    /// Assemble state from already-loaded stores
    pub fn new(businesses: BusinessStore, help_requests: HelpRequestStore, config: Config) -> Result<Self> {
        let state = Self {
            businesses: Arc::new(businesses),
            help_requests: Arc::new(help_requests),
            config: Arc::new(config),
            views: Arc::new(Views::new()?),
        };
        state.record_store_sizes();
        Ok(state)
    }

    /// Publish current store sizes to the metrics gauges
    pub fn record_store_sizes(&self) {
        let metrics = Metrics::global();
        metrics.stores.businesses.set(self.businesses.len() as i64);
        metrics.stores.help_requests.set(self.help_requests.len() as i64);
    }
}
