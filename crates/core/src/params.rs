//! Default engine parameters and fixed encoding sizes.

/// Default difficulty in leading zero bits
pub const DEFAULT_DIFFICULTY: u32 = 10;

/// Default wall-clock budget for one search, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Size of the encoded nonce appended to the message (little-endian i64)
pub const NONCE_SIZE: usize = 8;

/// SHA-512 output size
pub const SHA512_SIZE: usize = 64;

/// BLAKE3 output size
pub const BLAKE3_SIZE: usize = 32;
