//! Error types for `cachelab`.
//!
//! One unified error type covers both the cache core and the surrounding
//! server/client plumbing so callers only need to match on a single enum.

use thiserror::Error;

/// Result type alias for `cachelab` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur anywhere in the `cachelab` stack.
///
/// Error codes follow the pattern `CACHE-XXX` for easy log grepping.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested key is not resident in the cache (normal control flow, never surfaced to clients).
    #[error("[CACHE-001] key not present in cache")]
    NotPresent,

    /// The requested key has no entry in the loaded dataset.
    #[error("[CACHE-002] No Entry For Key: {0}")]
    DatasetMiss(String),

    /// The request's command verb is not recognized.
    #[error("[CACHE-003] Bad Command")]
    BadCommand,

    /// The socket could not be read to completion.
    #[error("[CACHE-004] Read Failure, check logs...")]
    ReadFailure,

    /// A dataset or trace file could not be parsed.
    #[error("[CACHE-005] malformed data: {0}")]
    MalformedData(String),

    /// A configuration value (CLI flag, cache type, file path) is invalid.
    #[error("[CACHE-006] configuration error: {0}")]
    Config(String),

    /// Underlying IO error.
    #[error("[CACHE-007] IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the error code (e.g., "CACHE-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotPresent => "CACHE-001",
            Self::DatasetMiss(_) => "CACHE-002",
            Self::BadCommand => "CACHE-003",
            Self::ReadFailure => "CACHE-004",
            Self::MalformedData(_) => "CACHE-005",
            Self::Config(_) => "CACHE-006",
            Self::Io(_) => "CACHE-007",
        }
    }

    /// Returns true if this error is fatal at startup (dataset/config problems)
    /// rather than a per-request condition a client can recover from.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedData(_) | Self::Config(_))
    }
}
