//! Storage layer for helpboard
//!
//! Each entity kind lives in its own [`Store`], loaded once at startup and
//! shared between request handlers behind an `Arc`.

/// Keyed in-memory record store
pub mod store;

pub use store::{Store, StoreView};

use std::sync::Arc;
use crate::types::{Business, HelpRequest};

/// Shared handle to a store
pub type SharedStore<E> = Arc<Store<E>>;

/// Store of business listings
pub type BusinessStore = Store<Business>;

/// Store of help requests
pub type HelpRequestStore = Store<HelpRequest>;
