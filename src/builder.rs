//! Builder for live vocoder sessions.

use crate::error::Result;
use crate::session::VocoderSession;
use robovox_core::{seed_or_entropy, EngineConfig, ParameterSnapshot, SharedParameters};
use robovox_dsp::VocoderEngine;

/// Builder for [`VocoderSession`]
///
/// # Example
///
/// ```
/// use robovox::VocoderSession;
///
/// let session = VocoderSession::builder()
///     .sample_rate(48000.0)
///     .channels(2)
///     .seed(7)
///     .build()?;
/// assert_eq!(session.block_size(), 128);
/// # Ok::<(), robovox::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct VocoderSessionBuilder {
    config: EngineConfig,
    parameters: ParameterSnapshot,
    shared: Option<SharedParameters>,
}

impl VocoderSessionBuilder {
    /// Sample rate in Hz.
    ///
    /// Default: 44100
    pub fn sample_rate(mut self, rate: f64) -> Self {
        self.config.sample_rate = rate;
        self
    }

    /// Number of output channels. Every channel carries the same signal.
    ///
    /// Default: 2
    pub fn channels(mut self, count: usize) -> Self {
        self.config.channels = count;
        self
    }

    /// Largest block handed to the engine in one call.
    ///
    /// Default: 128
    pub fn block_size(mut self, frames: usize) -> Self {
        self.config.block_size = frames;
        self
    }

    /// Seed for oscillator phases and carrier noise.
    ///
    /// Default: drawn from entropy
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial parameters.
    ///
    /// Default: [`ParameterSnapshot::default`]
    pub fn parameters(mut self, parameters: ParameterSnapshot) -> Self {
        self.parameters = parameters;
        self
    }

    /// Attach an existing parameter slot, e.g. one already owned by a UI.
    ///
    /// The slot's current snapshot wins over [`parameters`](Self::parameters).
    pub fn shared_parameters(mut self, shared: SharedParameters) -> Self {
        self.shared = Some(shared);
        self
    }

    pub fn build(self) -> Result<VocoderSession> {
        self.config.validate()?;

        let seed = seed_or_entropy(self.config.seed);
        let shared = self
            .shared
            .unwrap_or_else(|| SharedParameters::new(self.parameters));

        let mut engine = VocoderEngine::with_seed(self.config.sample_rate, seed);
        engine.set_parameters(shared.load());

        tracing::info!(
            sample_rate = self.config.sample_rate,
            channels = self.config.channels,
            block_size = self.config.block_size,
            seed,
            "vocoder session ready"
        );

        Ok(VocoderSession::new(self.config, engine, shared))
    }
}
