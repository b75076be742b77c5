//! Error kinds reported by the IME core.
//!
//! Nothing here is fatal to the host. The absorbing operations on the session
//! and engine turn these into no-ops or empty results; the `try_*` variants
//! hand them back for callers that want to tell the cases apart.

use std::path::PathBuf;
use thiserror::Error;

/// A dictionary document could not be read or parsed.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The document is not a JSON object of string arrays.
    #[error("malformed dictionary document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read dictionary {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by input buffer and session operations.
#[derive(Debug, Error)]
pub enum ImeError {
    /// Append attempted while the buffer already holds `capacity` letters.
    #[error("input buffer is full ({capacity} characters)")]
    BufferFull { capacity: usize },

    /// Only ASCII letters may enter the buffer.
    #[error("key {0:?} is not an ASCII letter")]
    InvalidKey(char),

    /// Commit requested with nothing composed.
    #[error("nothing to commit: input buffer is empty")]
    EmptyBufferCommit,

    #[error("candidate index {index} out of range ({len} candidates)")]
    CandidateOutOfRange { index: usize, len: usize },

    /// The session was torn down and must not be used again.
    #[error("IME session used after teardown")]
    UseAfterTeardown,

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating [`crate::ImeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}
