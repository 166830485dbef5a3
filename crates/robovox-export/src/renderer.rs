//! Offline renderer
//!
//! `VocoderRenderer` runs a dedicated, freshly constructed engine over an
//! entire modulator buffer. A render either completes or fails as a whole;
//! no partial buffer is ever returned.

use crate::error::{ExportError, Result};
use crate::format::wav::encode_pcm16;
use crate::types::RenderJob;
use robovox_core::EngineConfig;
use robovox_dsp::VocoderEngine;

/// Frames processed per engine call during a render.
pub const RENDER_BLOCK_SIZE: usize = 128;

/// Progress callback for render operations (0.0 to 1.0)
pub type RenderProgressCallback = Box<dyn Fn(f32) + Send>;

/// Result of a render operation
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    /// Planar output, one identical buffer per channel
    pub channels: Vec<Vec<f32>>,
    /// Sample rate of the rendered audio
    pub sample_rate: u32,
    /// Peak level (linear)
    pub peak_level: f32,
    /// Number of frames rendered
    pub length_samples: usize,
}

impl RenderResult {
    /// Get duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.length_samples as f64 / self.sample_rate as f64
    }

    /// Encode as a 16-bit PCM WAV byte stream
    pub fn to_wav(&self) -> Result<Vec<u8>> {
        encode_pcm16(&self.channels, self.sample_rate)
    }
}

/// Offline vocoder renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct VocoderRenderer;

impl VocoderRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a job to planar buffers
    ///
    /// # Arguments
    /// * `job` - The render job to run
    /// * `progress` - Optional progress callback (0.0 to 1.0)
    pub fn render(
        &self,
        job: &RenderJob,
        progress: Option<RenderProgressCallback>,
    ) -> Result<RenderResult> {
        if let Err(e) = Self::validate(job) {
            log::warn!("Rejected render job: {}", e);
            return Err(e);
        }

        log::debug!(
            "Rendering {} frames at {} Hz into {} channel(s)",
            job.modulator.len(),
            job.sample_rate,
            job.channels
        );

        let mut engine = VocoderEngine::with_seed(job.sample_rate as f64, job.seed);
        engine.set_parameters(job.parameters);

        let total = job.modulator.len();
        let mut mono = vec![0.0f32; total];
        let blocks = total.div_ceil(RENDER_BLOCK_SIZE);

        for (block_idx, (input, output)) in job
            .modulator
            .chunks(RENDER_BLOCK_SIZE)
            .zip(mono.chunks_mut(RENDER_BLOCK_SIZE))
            .enumerate()
        {
            engine.process_block(Some(input), &mut [output]);

            if let Some(ref callback) = progress {
                callback(block_idx as f32 / blocks as f32);
            }
        }

        if let Some(bad) = mono.iter().position(|s| !s.is_finite()) {
            return Err(ExportError::Render(format!(
                "engine produced a non-finite sample at frame {}",
                bad
            )));
        }

        let peak_level = mono.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        let channels = vec![mono; job.channels as usize];

        if let Some(callback) = progress {
            callback(1.0);
        }

        log::info!(
            "Rendered {:.2}s of audio (peak {:.3})",
            job.duration_seconds(),
            peak_level
        );

        Ok(RenderResult {
            channels,
            sample_rate: job.sample_rate,
            peak_level,
            length_samples: total,
        })
    }

    /// Render a job and encode it as WAV bytes
    pub fn render_wav(&self, job: &RenderJob) -> Result<Vec<u8>> {
        self.render(job, None)?.to_wav()
    }

    fn validate(job: &RenderJob) -> Result<()> {
        let config = EngineConfig {
            sample_rate: job.sample_rate as f64,
            channels: job.channels as usize,
            seed: Some(job.seed),
            ..Default::default()
        };
        config
            .validate()
            .map_err(|e| ExportError::InvalidOptions(e.to_string()))?;

        if let Some(bad) = job.modulator.iter().position(|s| !s.is_finite()) {
            return Err(ExportError::InvalidData(format!(
                "modulator sample {} is not finite",
                bad
            )));
        }
        Ok(())
    }
}
