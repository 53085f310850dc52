//! Crate-wide error type.
//!
//! Three families of failures, matching the registry's error-handling
//! contract:
//!
//! - construction failures at load time are fatal and abort the whole load
//! - lookup or reload of a type that was never registered fails loudly
//! - everything per-tick and recoverable is handled at the stage boundary
//!   (see `pipeline::tick`) and never surfaces as an `Error`

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A state factory failed during `load` or `reload`.
    #[error("state `{name}` could not be constructed: {details}")]
    Construct { name: &'static str, details: String },

    /// Lookup or reload asked for a state type the registry never loaded.
    #[error("state type `{name}` is not registered")]
    NotRegistered { name: &'static str },

    /// A factory for the same state type was registered twice.
    #[error("state type `{name}` is already registered")]
    AlreadyRegistered { name: &'static str },

    #[error("config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn construct(name: &'static str, details: impl Into<String>) -> Self {
        Self::Construct {
            name,
            details: details.into(),
        }
    }

    pub fn not_registered(name: &'static str) -> Self {
        Self::NotRegistered { name }
    }

    pub fn already_registered(name: &'static str) -> Self {
        Self::AlreadyRegistered { name }
    }
}
