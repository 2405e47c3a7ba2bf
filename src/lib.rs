//! powork
//!
//! Hashcash-style proof of work for anti-spam and rate limiting.
//!
//! # Overview
//!
//! A [`Worker`] searches for a nonce such that the digest of
//! `message ‖ LE64(nonce)` starts with a configurable number of zero bits.
//! Finding one costs about `2^difficulty` hashes; checking it costs one.
//!
//! Freshness is up to the caller: embed a timestamp or server nonce in the
//! message if proofs must not be replayed.
//!
//! # Example
//!
//! ```rust
//! use powork::Worker;
//!
//! let mut worker = Worker::new();
//! worker.set_difficulty(8).unwrap();
//!
//! let proof = worker.search("hello").unwrap();
//! assert!(worker.validate(&proof).unwrap());
//!
//! // Non-blocking: the search runs on its own thread.
//! let handle = worker.search_async("hello again");
//! let proof = handle.wait().unwrap();
//! assert_eq!(proof.message_str(), "hello again");
//! ```

// Re-export the core algorithm
pub use powork_core as algorithm;

pub mod config;
pub mod handle;
pub mod logging;
pub mod worker;

// Convenience re-exports
pub use algorithm::{
    blake3_factory, digest_factory, hash_factory, meets_difficulty, sha512_factory, ConfigError,
    DigestTooShort, HashError, HashFactory, Proof, ProofHasher, SearchError, SearchParams,
    ValidationError,
};
pub use config::WorkerConfig;
pub use handle::{outcome_channel, OutcomeReceiver, OutcomeSender, ProofHandle, SearchOutcome};
pub use worker::Worker;
