//! Error types and handling for helpboard
//!
//! A single error enum covers the record stores, the query engine and the
//! HTTP layer. Request-level variants map one-to-one onto status codes.

use std::path::PathBuf;
use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for helpboard
#[derive(Error, Debug)]
pub enum Error {
    /// No entity is stored under the identifier
    #[error("{kind} {id} doesn't exist")]
    NotFound {
        /// Human-readable entity kind, e.g. `Business`
        kind: &'static str,
        /// The identifier that was looked up
        id: String,
    },

    /// An insert targeted an identifier that is already taken
    #[error("Identifier {0} already exists")]
    DuplicateKey(String),

    /// A request field is missing, empty or out of range
    #[error("{0}")]
    Validation(String),

    /// Every generated identifier collided with an existing one
    #[error("Could not allocate a free identifier after {attempts} attempts")]
    IdSpaceExhausted {
        /// Number of identifiers drawn before giving up
        attempts: u32,
    },

    /// A startup document could not be read or parsed
    #[error("Failed to load {path:?}: {reason}")]
    Load {
        /// Path of the document
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Prometheus metrics errors
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl Error {
    /// Create a not found error for an entity kind
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    /// Create the error for a missing or empty required field
    pub fn required(field: &str) -> Self {
        Self::Validation(format!("'{}' is a required value", field))
    }

    /// Create a validation error with a custom message
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a load error for a startup document
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::DuplicateKey(_) | Error::Validation(_)
        )
    }
}
