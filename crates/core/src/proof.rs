use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use bytes::Bytes;

use crate::params::NONCE_SIZE;

/// A message together with the nonce that satisfies the difficulty.
///
/// The message buffer is shared with the caller, not copied; [`Bytes`] is
/// immutable, so the proof cannot observe later changes to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Proof {
    message: Bytes,
    nonce: i64,
    iterations: u64,
}

impl Proof {
    /// Build a proof received from elsewhere, e.g. to validate it.
    ///
    /// The iteration count of such a proof is unknown and reported as zero.
    pub fn new(message: impl Into<Bytes>, nonce: i64) -> Self {
        Self {
            message: message.into(),
            nonce,
            iterations: 0,
        }
    }

    pub(crate) fn found(message: Bytes, nonce: i64, iterations: u64) -> Self {
        Self {
            message,
            nonce,
            iterations,
        }
    }

    /// The raw message bytes.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// A cheap handle to the shared message buffer.
    pub fn message_bytes(&self) -> Bytes {
        self.message.clone()
    }

    /// The message as text; invalid UTF-8 sequences are replaced.
    pub fn message_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.message)
    }

    pub fn nonce(&self) -> i64 {
        self.nonce
    }

    /// Wire encoding of the nonce as hashed after the message.
    pub fn nonce_bytes(&self) -> [u8; NONCE_SIZE] {
        self.nonce.to_le_bytes()
    }

    /// Candidates rejected before this proof was found.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

impl Display for Proof {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(proof (message {}) (nonce {}) (iterations {}))",
            hex::encode(&self.message),
            self.nonce,
            self.iterations
        )
    }
}
