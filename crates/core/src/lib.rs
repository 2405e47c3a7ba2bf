//! # powork core
//!
//! Hash-based proof of work: find a nonce such that
//! `H(message ‖ LE64(nonce))` starts with at least N zero bits.
//!
//! ## Input Format
//!
//! The nonce is a signed 64-bit counter appended to the message in
//! little-endian two's-complement form:
//!
//! ```text
//! input = message || nonce
//!         ^^^^^^^    ^^^^^
//!         any len    8 bytes (little-endian i64)
//! ```
//!
//! Any implementation that hashes the same bytes produces interoperable
//! proofs.
//!
//! ## Example
//!
//! ```rust
//! use powork_core::{SearchParams, sha512_factory};
//!
//! let params = SearchParams::new(8, 5_000, sha512_factory());
//! let proof = params.search("hello").unwrap();
//!
//! assert_eq!(proof.message_str(), "hello");
//! assert_eq!(params.validate(&proof), Ok(true));
//! ```
//!
//! ## Hash capability
//!
//! The digest is pluggable through [`ProofHasher`] and [`HashFactory`].
//! SHA-512 is the default; any RustCrypto digest works through
//! [`digest_factory`], and BLAKE3 is supported natively.

mod difficulty;
mod error;
mod hasher;
mod params;
mod proof;
mod search;

pub use difficulty::{leading_zero_bits, meets_difficulty};
pub use error::{ConfigError, DigestTooShort, HashError, SearchError, ValidationError};
pub use hasher::{
    DigestHasher, HashFactory, ProofHasher, blake3_factory, digest_factory, hash_factory,
    sha512_factory,
};
pub use params::*;
pub use proof::Proof;
pub use search::{SearchParams, candidate_digest};
