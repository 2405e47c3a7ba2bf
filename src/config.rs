//! Serializable worker settings.

use serde::{Deserialize, Serialize};

use powork_core::{ConfigError, DEFAULT_DIFFICULTY, DEFAULT_TIMEOUT_MS};

/// The scalar part of a worker's configuration.
///
/// The hash factory is not serializable and is set in code with
/// [`crate::Worker::set_hash_factory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Required leading zero bits
    pub difficulty: u32,
    /// Wall-clock budget per search; 0 disables the deadline
    pub timeout_ms: u64,
}

impl WorkerConfig {
    /// Check the same ranges the worker setters enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty == 0 {
            return Err(ConfigError::InvalidDifficulty(self.difficulty));
        }
        Ok(())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}
