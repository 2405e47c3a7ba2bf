//! Error taxonomy for configuration, hashing, search and validation.

use thiserror::Error;

/// A setter was given a value outside the allowed range.
///
/// The previous value is kept when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("difficulty must be at least 1 bit, got {0}")]
    InvalidDifficulty(u32),

    #[error("timeout must be zero or more milliseconds, got {0}")]
    InvalidTimeout(i64),
}

/// The hash capability failed to absorb input or produce a digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("hash failed to absorb input: {0}")]
    Absorb(String),

    #[error("hash failed to produce a digest: {0}")]
    Finalize(String),
}

/// The requested difficulty needs more bits than the digest has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("difficulty of {difficulty} bits exceeds the {digest_bits}-bit digest")]
pub struct DigestTooShort {
    pub difficulty: u32,
    pub digest_bits: usize,
}

/// Failure while checking a single proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    DigestTooShort(#[from] DigestTooShort),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Terminal failure of a proof search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    DigestTooShort(#[from] DigestTooShort),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("timed out after {timeout_ms} ms and {iterations} candidates")]
    Timeout { timeout_ms: u64, iterations: u64 },

    #[error("nonce space exhausted after {iterations} candidates")]
    NonceExhausted { iterations: u64 },

    /// The search task ended without reporting an outcome.
    #[error("search ended without producing an outcome")]
    Interrupted,
}

impl From<ValidationError> for SearchError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::DigestTooShort(e) => SearchError::DigestTooShort(e),
            ValidationError::Hash(e) => SearchError::Hash(e),
        }
    }
}
