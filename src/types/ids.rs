//! Entity identifiers.
//!
//! Generated identifiers are six characters drawn uniformly from `[a-z0-9]`,
//! short enough to type into a URL by hand. Identifiers read from a startup
//! document are taken as they are.

use std::borrow::Borrow;
use std::fmt;
use rand::{rng, Rng};
use serde::{Deserialize, Serialize};
use crate::constants::{ID_ALPHABET, ID_LENGTH};

/// Opaque identifier naming one entity in a store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        EntityId(id.into())
    }

    /// Generate a random identifier
    pub fn random() -> Self {
        EntityId(next_id())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId(id.to_string())
    }
}

/// Draw a fresh identifier string
///
/// Each character is sampled independently; no uniqueness check happens here.
pub fn next_id() -> String {
    let mut rng = rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
