//! The eight-band vocoder engine.

use crate::band::{BandProcessor, BAND_CENTERS_HZ, BAND_COUNT};
use crate::oscillator::{CarrierOscillatorBank, UNISON_VOICES};
use robovox_core::{create_rng, EngineRng, ParameterSnapshot};

/// Make-up gain applied to the band sum.
pub const OUTPUT_GAIN: f32 = 4.0;

/// Channel vocoder: modulator in, carrier shaped by the modulator's band envelopes out.
///
/// All state is allocated in [`new`](Self::new). Filter memories, envelopes and
/// oscillator phases persist across blocks and parameter changes; nothing is
/// reset after construction. The engine is mono and copies its output to
/// every requested channel.
///
/// # Example
///
/// ```
/// use robovox_core::ParameterSnapshot;
/// use robovox_dsp::VocoderEngine;
///
/// let mut engine = VocoderEngine::with_seed(44100.0, 7);
/// engine.set_parameters(ParameterSnapshot::default().with_pitch_offset(-5.0));
///
/// let voice = vec![0.0f32; 128];
/// let mut left = vec![0.0f32; 128];
/// let mut right = vec![0.0f32; 128];
/// engine.process_block(Some(&voice[..]), &mut [&mut left[..], &mut right[..]]);
/// assert!(left.iter().all(|&s| s == 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct VocoderEngine {
    sample_rate: f64,
    parameters: ParameterSnapshot,
    bands: [BandProcessor; BAND_COUNT],
    carrier: CarrierOscillatorBank,
}

impl VocoderEngine {
    pub fn new(sample_rate: f64, rng: EngineRng) -> Self {
        let mut engine = Self {
            sample_rate,
            parameters: ParameterSnapshot::default(),
            bands: BAND_CENTERS_HZ.map(|center| BandProcessor::new(center, sample_rate)),
            carrier: CarrierOscillatorBank::new(UNISON_VOICES, sample_rate, rng),
        };
        engine.set_parameters(ParameterSnapshot::default());
        engine
    }

    pub fn with_seed(sample_rate: f64, seed: u64) -> Self {
        Self::new(sample_rate, create_rng(seed))
    }

    /// Replace the parameter snapshot. Takes effect from the next sample.
    pub fn set_parameters(&mut self, parameters: ParameterSnapshot) {
        let parameters = parameters.clamped();
        self.parameters = parameters;
        self.carrier
            .set_parameters(parameters.pitch_offset, parameters.carrier_noise_mix);
    }

    pub fn parameters(&self) -> ParameterSnapshot {
        self.parameters
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// One modulator sample in, one output sample out.
    #[inline]
    pub fn process_sample(&mut self, modulator: f32) -> f32 {
        let carrier = self.carrier.tick();
        let formant_shift = self.parameters.formant_shift;
        let sum: f32 = self
            .bands
            .iter_mut()
            .map(|band| band.process(modulator, carrier, formant_shift))
            .sum();
        sum * OUTPUT_GAIN
    }

    /// Process one block into every output channel.
    ///
    /// A missing or empty modulator produces silence without advancing any
    /// state. Frames past the end of a short modulator are also written as
    /// silence.
    pub fn process_block(&mut self, modulator: Option<&[f32]>, outputs: &mut [&mut [f32]]) {
        let modulator = match modulator {
            Some(samples) if !samples.is_empty() => samples,
            _ => {
                for channel in outputs.iter_mut() {
                    channel.fill(0.0);
                }
                return;
            }
        };

        let frames = outputs.iter().map(|c| c.len()).max().unwrap_or(0);
        for i in 0..frames {
            let value = match modulator.get(i) {
                Some(&x) => self.process_sample(x),
                None => 0.0,
            };
            for channel in outputs.iter_mut() {
                if let Some(slot) = channel.get_mut(i) {
                    *slot = value;
                }
            }
        }
    }

    pub fn bands(&self) -> &[BandProcessor; BAND_COUNT] {
        &self.bands
    }

    pub fn band(&self, index: usize) -> Option<&BandProcessor> {
        self.bands.get(index)
    }

    pub fn carrier(&self) -> &CarrierOscillatorBank {
        &self.carrier
    }
}
