//! Error types for robovox-core.

use thiserror::Error;

/// Error type for robovox-core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
