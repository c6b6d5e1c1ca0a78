//! Generator settings. Every field has a default so the JS side can pass a
//! partial object (or nothing) through `serde-wasm-bindgen`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest accepted grid side.
pub const MAX_GRID_SIZE: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrosswordConfig {
    /// Side length of the square grid.
    pub grid_size: usize,
    /// Randomized placement attempts; the best one is kept.
    pub attempts: u32,
    pub min_word_len: usize,
    pub max_word_len: usize,
}

impl Default for CrosswordConfig {
    fn default() -> Self {
        Self {
            grid_size: 12,
            attempts: 20,
            min_word_len: 3,
            max_word_len: 11,
        }
    }
}

impl CrosswordConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.min_word_len == 0 || self.min_word_len > self.max_word_len {
            return Err(ConfigError::EmptyLengthRange {
                min: self.min_word_len,
                max: self.max_word_len,
            });
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        // The first word is always placed across the middle row.
        if self.grid_size < self.max_word_len {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
                max_word_len: self.max_word_len,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionsConfig {
    pub mistakes: u32,
}

impl Default for ConnectionsConfig {
    fn default() -> Self {
        Self { mistakes: 4 }
    }
}

impl ConnectionsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mistakes == 0 {
            return Err(ConfigError::NoMistakes);
        }
        Ok(())
    }
}
