//! Brute-force nonce search and proof validation.
//!
//! [`SearchParams`] is an immutable snapshot of the engine configuration.
//! Every search runs against its own snapshot, so changing the engine after
//! submission never affects a search already in flight.

use std::fmt;
use std::time::{Duration, Instant};

use bytes::Bytes;
use tracing::{debug, debug_span, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::difficulty::meets_difficulty;
use crate::error::{HashError, SearchError, ValidationError};
use crate::hasher::{HashFactory, ProofHasher, sha512_factory};
use crate::params::{DEFAULT_DIFFICULTY, DEFAULT_TIMEOUT_MS};
use crate::proof::Proof;

/// Configuration captured for one or more searches.
#[derive(Clone)]
pub struct SearchParams {
    difficulty: u32,
    timeout_ms: u64,
    hash_factory: HashFactory,
}

impl SearchParams {
    /// Snapshot the given settings. A `timeout_ms` of zero disables the
    /// deadline.
    ///
    /// Range checks live in the engine setters; a difficulty of zero here is
    /// simply met by the first candidate.
    pub fn new(difficulty: u32, timeout_ms: u64, hash_factory: HashFactory) -> Self {
        Self {
            difficulty,
            timeout_ms,
            hash_factory,
        }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// The deadline for one search, `None` when unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn hash_factory(&self) -> &HashFactory {
        &self.hash_factory
    }

    /// Search for the first nonce, counting up from zero, whose candidate
    /// digest meets the difficulty.
    pub fn search(&self, message: impl Into<Bytes>) -> Result<Proof, SearchError> {
        self.search_from(message.into(), 0)
    }

    pub(crate) fn search_from(&self, message: Bytes, start: i64) -> Result<Proof, SearchError> {
        let span = debug_span!(
            "pow_search",
            difficulty = self.difficulty,
            timeout_ms = self.timeout_ms,
            message_len = message.len()
        );
        let _enter = span.enter();

        let deadline = self.timeout();
        let started = Instant::now();
        let mut hasher = (self.hash_factory)();
        let mut nonce = start;
        let mut iterations = 0u64;

        loop {
            let digest = candidate_digest(hasher.as_mut(), &message, nonce)
                .inspect_err(|err| warn!(%err, nonce, "hash capability failed"))?;
            if meets_difficulty(&digest, self.difficulty)? {
                debug!(
                    nonce,
                    iterations,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "proof found"
                );
                return Ok(Proof::found(message, nonce, iterations));
            }

            iterations += 1;
            nonce = match nonce.checked_add(1) {
                Some(next) => next,
                None => {
                    warn!(iterations, "nonce space exhausted");
                    return Err(SearchError::NonceExhausted { iterations });
                }
            };

            if let Some(limit) = deadline {
                if started.elapsed() >= limit {
                    warn!(iterations, "proof search timed out");
                    return Err(SearchError::Timeout {
                        timeout_ms: self.timeout_ms,
                        iterations,
                    });
                }
            }
        }
    }

    /// Recompute the digest for `proof` and check it against the difficulty.
    pub fn validate(&self, proof: &Proof) -> Result<bool, ValidationError> {
        let mut hasher = (self.hash_factory)();
        self.validate_with(hasher.as_mut(), proof)
    }

    fn validate_with(
        &self,
        hasher: &mut dyn ProofHasher,
        proof: &Proof,
    ) -> Result<bool, ValidationError> {
        let digest = candidate_digest(hasher, proof.message(), proof.nonce())?;
        Ok(meets_difficulty(&digest, self.difficulty)?)
    }

    /// Validate many proofs, one hash instance per worker thread.
    #[cfg(feature = "parallel")]
    pub fn validate_batch(&self, proofs: &[Proof]) -> Vec<Result<bool, ValidationError>> {
        proofs
            .par_iter()
            .map_init(
                || (self.hash_factory)(),
                |hasher, proof| self.validate_with(hasher.as_mut(), proof),
            )
            .collect()
    }

    /// Validate many proofs (sequential fallback).
    #[cfg(not(feature = "parallel"))]
    pub fn validate_batch(&self, proofs: &[Proof]) -> Vec<Result<bool, ValidationError>> {
        let mut hasher = (self.hash_factory)();
        proofs
            .iter()
            .map(|proof| self.validate_with(hasher.as_mut(), proof))
            .collect()
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY, DEFAULT_TIMEOUT_MS, sha512_factory())
    }
}

impl fmt::Debug for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchParams")
            .field("difficulty", &self.difficulty)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

/// Digest of `message ‖ LE64(nonce)`.
///
/// The hasher is reset first, so recycled instances are safe to pass in.
pub fn candidate_digest(
    hasher: &mut dyn ProofHasher,
    message: &[u8],
    nonce: i64,
) -> Result<Vec<u8>, HashError> {
    hasher.reset();
    hasher.update(message)?;
    hasher.update(&nonce.to_le_bytes())?;
    hasher.finalize()
}
