//! The proof-of-work engine.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use powork_core::{
    sha512_factory, ConfigError, HashFactory, Proof, SearchError, SearchParams, ValidationError,
    DEFAULT_DIFFICULTY, DEFAULT_TIMEOUT_MS,
};

use crate::config::WorkerConfig;
use crate::handle::{spawn_to_channel, OutcomeSender, ProofHandle};

/// Computes proofs of work and verifies them.
///
/// Setters take effect for searches started afterwards. Searches already
/// submitted keep the configuration they were started with.
#[derive(Clone)]
pub struct Worker {
    difficulty: u32,
    timeout_ms: u64,
    hash_factory: HashFactory,
}

impl Worker {
    /// SHA-512, 10-bit difficulty and a 5 second timeout.
    pub fn new() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            hash_factory: sha512_factory(),
        }
    }

    /// Build a SHA-512 worker from serialized settings.
    pub fn from_config(config: WorkerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            difficulty: config.difficulty,
            timeout_ms: config.timeout_ms,
            hash_factory: sha512_factory(),
        })
    }

    pub fn config(&self) -> WorkerConfig {
        WorkerConfig {
            difficulty: self.difficulty,
            timeout_ms: self.timeout_ms,
        }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Search deadline, `None` when unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Set the number of leading zero bits a proof needs. Cost doubles with
    /// every extra bit.
    ///
    /// Zero is rejected and the current difficulty is kept.
    pub fn set_difficulty(&mut self, difficulty: u32) -> Result<(), ConfigError> {
        if difficulty == 0 {
            return Err(ConfigError::InvalidDifficulty(difficulty));
        }
        self.difficulty = difficulty;
        Ok(())
    }

    /// Set how long one search may run, in milliseconds; 0 means no limit.
    ///
    /// Negative values are rejected and the current timeout is kept.
    pub fn set_timeout(&mut self, milliseconds: i64) -> Result<(), ConfigError> {
        let timeout_ms =
            u64::try_from(milliseconds).map_err(|_| ConfigError::InvalidTimeout(milliseconds))?;
        self.timeout_ms = timeout_ms;
        Ok(())
    }

    /// Replace the hash used by subsequent searches and validations.
    pub fn set_hash_factory(&mut self, hash_factory: HashFactory) {
        self.hash_factory = hash_factory;
    }

    /// Snapshot of the current configuration.
    pub fn params(&self) -> SearchParams {
        SearchParams::new(self.difficulty, self.timeout_ms, self.hash_factory.clone())
    }

    /// Search for a proof, blocking the calling thread.
    pub fn search(&self, message: impl Into<Bytes>) -> Result<Proof, SearchError> {
        self.params().search(message)
    }

    pub fn search_str(&self, message: &str) -> Result<Proof, SearchError> {
        self.search(Bytes::copy_from_slice(message.as_bytes()))
    }

    /// Start a search on its own thread and return immediately.
    pub fn search_async(&self, message: impl Into<Bytes>) -> ProofHandle {
        let message = message.into();
        debug!(message_len = message.len(), "submitting search");
        ProofHandle::spawn(self.params(), message)
    }

    /// Start a search on its own thread; its outcome is pushed onto
    /// `sender`, which stays open for other searches.
    pub fn send_to_channel(&self, message: impl Into<Bytes>, sender: &OutcomeSender) {
        let message = message.into();
        debug!(message_len = message.len(), "submitting search to channel");
        spawn_to_channel(self.params(), message, sender);
    }

    /// Check a proof against the current difficulty and hash.
    pub fn validate(&self, proof: &Proof) -> Result<bool, ValidationError> {
        self.params().validate(proof)
    }

    /// Check many proofs; parallel when the `parallel` feature is on.
    pub fn validate_batch(&self, proofs: &[Proof]) -> Vec<Result<bool, ValidationError>> {
        self.params().validate_batch(proofs)
    }
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("difficulty", &self.difficulty)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}
