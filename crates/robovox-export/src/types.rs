//! Render job description.

use robovox_core::ParameterSnapshot;

/// Seed used by render jobs that don't set one, so repeated renders match.
pub const DEFAULT_RENDER_SEED: u64 = 0x524F_424F_564F_58; // "ROBOVOX"

/// Everything one offline render needs.
///
/// The parameter snapshot is fixed for the whole job.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    /// Sample rate of the modulator and of the output
    pub sample_rate: u32,
    /// Output channel count; every channel carries the same mono signal
    pub channels: u16,
    pub parameters: ParameterSnapshot,
    /// Seeds oscillator phases and carrier noise
    pub seed: u64,
    /// Decoded mono modulator
    pub modulator: Vec<f32>,
}

impl RenderJob {
    /// Mono job with default parameters and the default seed.
    pub fn new(sample_rate: u32, modulator: Vec<f32>) -> Self {
        Self {
            sample_rate,
            channels: 1,
            parameters: ParameterSnapshot::default(),
            seed: DEFAULT_RENDER_SEED,
            modulator,
        }
    }

    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_parameters(mut self, parameters: ParameterSnapshot) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Length in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.modulator.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_defaults() {
        let job = RenderJob::new(44100, vec![0.0; 22050]);
        assert_eq!(job.channels, 1);
        assert_eq!(job.seed, DEFAULT_RENDER_SEED);
        assert_eq!(job.parameters, ParameterSnapshot::default());
        assert!((job.duration_seconds() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_builders() {
        let params = ParameterSnapshot::new(0.5, 1.0, -3.0);
        let job = RenderJob::new(48000, Vec::new())
            .with_channels(2)
            .with_parameters(params)
            .with_seed(3);
        assert_eq!(job.channels, 2);
        assert_eq!(job.parameters, params);
        assert_eq!(job.seed, 3);
    }
}
