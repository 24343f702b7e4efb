//! Core application plumbing: errors, configuration, logging and state

pub mod error;
pub mod config;
pub mod logging;
pub mod app_state;
pub mod factory;

// Re-export commonly used items
pub use error::{Error, Result};
pub use config::Config;
pub use app_state::AppState;
pub use factory::create_app_state;
