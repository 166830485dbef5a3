//! Unison square-wave carrier with a noise blend.

use crate::pitch::{midi_to_hz, semitones_to_ratio};
use rand::Rng;
use robovox_core::EngineRng;

/// Voices in the default unison stack.
pub const UNISON_VOICES: usize = 3;
/// MIDI note the carrier sits on at zero pitch offset (E2).
pub const BASE_MIDI_NOTE: f32 = 40.0;
/// Total detune span across the unison stack, centered on zero.
pub const DETUNE_SPREAD_SEMITONES: f32 = 0.2;

/// One phase accumulator of the unison stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorVoice {
    /// Normalized phase in `[0, 1)`.
    pub phase: f32,
    pub detune_ratio: f32,
}

/// Detuned unison square oscillators blended with uniform noise.
///
/// Owns the engine's random source: initial phases are drawn at construction
/// and one noise value is drawn on every [`tick`](Self::tick), whatever the mix.
#[derive(Debug, Clone)]
pub struct CarrierOscillatorBank {
    voices: Vec<OscillatorVoice>,
    rng: EngineRng,
    dt: f32,
    pitch_offset: f32,
    base_increment: f32,
    noise_mix: f32,
}

impl CarrierOscillatorBank {
    /// `voices` must be at least one.
    pub fn new(voices: usize, sample_rate: f64, mut rng: EngineRng) -> Self {
        let voices = voices.max(1);
        let voices = (0..voices)
            .map(|i| {
                let t = if voices > 1 {
                    i as f32 / (voices - 1) as f32
                } else {
                    0.5
                };
                let offset = (t - 0.5) * DETUNE_SPREAD_SEMITONES;
                OscillatorVoice {
                    phase: rng.gen::<f32>(),
                    detune_ratio: semitones_to_ratio(offset),
                }
            })
            .collect();

        let dt = (1.0 / sample_rate) as f32;
        Self {
            voices,
            rng,
            dt,
            pitch_offset: 0.0,
            base_increment: midi_to_hz(BASE_MIDI_NOTE) * dt,
            noise_mix: 0.0,
        }
    }

    /// Apply the carrier-related fields of a parameter snapshot.
    pub fn set_parameters(&mut self, pitch_offset: f32, noise_mix: f32) {
        if pitch_offset != self.pitch_offset {
            self.pitch_offset = pitch_offset;
            self.base_increment = midi_to_hz(BASE_MIDI_NOTE + pitch_offset) * self.dt;
        }
        self.noise_mix = noise_mix;
    }

    /// Produce the next carrier sample. Call exactly once per output sample.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        let mut sum = 0.0;
        for voice in self.voices.iter_mut() {
            sum += if voice.phase < 0.5 { 1.0 } else { -1.0 };
            voice.phase = (voice.phase + self.base_increment * voice.detune_ratio).fract();
        }
        let tone = sum / self.voices.len() as f32;
        let noise = self.rng.gen::<f32>() - 0.5;
        tone * (1.0 - self.noise_mix) + noise * self.noise_mix
    }

    pub fn voices(&self) -> &[OscillatorVoice] {
        &self.voices
    }

    /// Base frequency in Hz before detune.
    pub fn base_frequency(&self) -> f32 {
        self.base_increment / self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use robovox_core::create_rng;

    #[test]
    fn test_detune_spans_plus_minus_tenth_semitone() {
        let bank = CarrierOscillatorBank::new(3, 44100.0, create_rng(1));
        let ratios: Vec<f32> = bank.voices().iter().map(|v| v.detune_ratio).collect();
        assert_relative_eq!(ratios[0], semitones_to_ratio(-0.1));
        assert_relative_eq!(ratios[1], 1.0);
        assert_relative_eq!(ratios[2], semitones_to_ratio(0.1));
    }

    #[test]
    fn test_single_voice_sits_at_midpoint() {
        let bank = CarrierOscillatorBank::new(1, 44100.0, create_rng(1));
        assert_eq!(bank.voices()[0].detune_ratio, 1.0);
    }

    #[test]
    fn test_initial_phases_come_from_seed() {
        let a = CarrierOscillatorBank::new(3, 44100.0, create_rng(9));
        let b = CarrierOscillatorBank::new(3, 44100.0, create_rng(9));
        let c = CarrierOscillatorBank::new(3, 44100.0, create_rng(10));
        assert_eq!(a.voices(), b.voices());
        assert_ne!(a.voices(), c.voices());
        for voice in a.voices() {
            assert!((0.0..1.0).contains(&voice.phase));
        }
    }

    #[test]
    fn test_phases_stay_in_unit_interval() {
        let mut bank = CarrierOscillatorBank::new(3, 44100.0, create_rng(3));
        bank.set_parameters(24.0, 0.0);
        for _ in 0..1_000_000 {
            let out = bank.tick();
            assert!((-1.0..=1.0).contains(&out));
        }
        for voice in bank.voices() {
            assert!((0.0..1.0).contains(&voice.phase), "{}", voice.phase);
        }
    }

    #[test]
    fn test_pure_tone_is_periodic_at_base_frequency() {
        let sample_rate = 44100.0;
        let mut bank = CarrierOscillatorBank::new(1, sample_rate, create_rng(5));
        bank.set_parameters(12.0, 0.0);
        let expected_hz = midi_to_hz(52.0);
        assert_relative_eq!(bank.base_frequency(), expected_hz, epsilon = 1e-2);

        let mut rising_edges = 0;
        let mut previous = bank.tick();
        for _ in 0..sample_rate as usize {
            let out = bank.tick();
            if previous < 0.0 && out > 0.0 {
                rising_edges += 1;
            }
            previous = out;
        }
        assert!(
            (rising_edges as f32 - expected_hz).abs() <= 1.0,
            "{rising_edges} edges, expected ~{expected_hz}"
        );
    }

    #[test]
    fn test_tone_levels_are_unison_averages() {
        let mut bank = CarrierOscillatorBank::new(3, 44100.0, create_rng(11));
        for _ in 0..4410 {
            let out = bank.tick();
            let is_level = [-1.0f32, -1.0 / 3.0, 1.0 / 3.0, 1.0]
                .iter()
                .any(|level| (out - level).abs() < 1e-6);
            assert!(is_level, "unexpected tone value {out}");
        }
    }

    #[test]
    fn test_full_noise_mix_is_bounded_noise() {
        let mut bank = CarrierOscillatorBank::new(3, 44100.0, create_rng(4));
        bank.set_parameters(0.0, 1.0);
        let samples: Vec<f32> = (0..10_000).map(|_| bank.tick()).collect();
        assert!(samples.iter().all(|s| (-0.5..0.5).contains(s)));
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!(mean.abs() < 0.02, "noise mean {mean}");
    }
}
