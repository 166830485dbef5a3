//! Engine configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for one processing context (live session or render).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub sample_rate: f64,
    /// Output channels. The engine is mono; channels carry identical copies.
    pub channels: usize,
    /// Largest block the live path processes at once. Scratch buffers are sized to this.
    pub block_size: usize,
    /// Fixed RNG seed. `None` draws one from system entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            channels: 2,
            block_size: 128,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub const MIN_SAMPLE_RATE: f64 = 8000.0;
    pub const MAX_SAMPLE_RATE: f64 = 384000.0;
    pub const MAX_CHANNELS: usize = 32;
    pub const MAX_BLOCK_SIZE: usize = 8192;

    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN_SAMPLE_RATE..=Self::MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        if self.channels == 0 || self.channels > Self::MAX_CHANNELS {
            return Err(Error::InvalidConfig(format!(
                "channels {} out of range (1-{})",
                self.channels,
                Self::MAX_CHANNELS
            )));
        }
        if self.block_size == 0 || self.block_size > Self::MAX_BLOCK_SIZE {
            return Err(Error::InvalidConfig(format!(
                "block_size {} out of range (1-{})",
                self.block_size,
                Self::MAX_BLOCK_SIZE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.sample_rate, 44100.0);
        assert_eq!(config.channels, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        let config = EngineConfig {
            sample_rate: 1000.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = EngineConfig {
            sample_rate: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_channels_and_blocks() {
        let config = EngineConfig {
            channels: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            block_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
