//! Entity types served by helpboard
//!
//! Both record kinds implement [`Entity`], the capability set the record
//! store and the query engine are generic over: searchable text, sortable
//! fields and presence checks for required fields.

use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::core::Result;

/// Identifier types
pub mod ids;

/// Business listings
pub mod business;

/// Help requests
pub mod help_request;

pub use business::{Business, Category};
pub use help_request::{HelpRequest, NewHelpRequest, Priority, UpdateHelpRequest};
pub use ids::{next_id, EntityId};

/// Value of an entity field used for ordering
///
/// Timestamps are kept as ISO-8601 text, which already sorts chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue<'a> {
    /// Numeric field
    Integer(i64),
    /// Text field, compared lexicographically
    Text(&'a str),
}

/// A filterable, sortable, identified record
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable kind used in messages, e.g. `Business`
    const KIND: &'static str;

    /// Field names a listing may be sorted by
    const SORT_KEYS: &'static [&'static str];

    /// Sort key used when a listing does not name one
    const DEFAULT_SORT_KEY: &'static str;

    /// The two text fields whose concatenation is searched
    fn searchable_text(&self) -> (&str, &str);

    /// Value of `key` for ordering, or `None` when the entity has no such value
    fn sort_value(&self, key: &str) -> Option<SortValue<'_>>;

    /// Check that required fields are present and non-empty
    fn validate(&self) -> Result<()>;
}

/// Fail with a required-value error when `value` is empty
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(crate::core::Error::required(field));
    }
    Ok(())
}
