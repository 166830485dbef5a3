//! Test helpers and fixtures for robovox integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations
//! - `INT16_EPSILON` (1/32768): One 16-bit quantization step
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)

#![allow(dead_code)]

pub mod tolerances;

use robovox::prelude::*;

/// Default test sample rate
pub const TEST_SAMPLE_RATE: f64 = 44100.0;

/// Fixed seed so every test run sees the same carrier
pub const TEST_SEED: u64 = 0x5EED;

/// Session with a fixed seed and no hardware I/O.
pub fn test_session(channels: usize, block_size: usize) -> VocoderSession {
    VocoderSession::builder()
        .sample_rate(TEST_SAMPLE_RATE)
        .channels(channels)
        .block_size(block_size)
        .seed(TEST_SEED)
        .build()
        .expect("Failed to create test session")
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Crude vowel-ish test signal: a few harmonics of a 150 Hz fundamental.
pub fn generate_voice(sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            let sum: f64 = [(150.0, 0.5), (300.0, 0.3), (750.0, 0.2), (2400.0, 0.1)]
                .iter()
                .map(|&(f, a)| a * (2.0 * std::f64::consts::PI * f * t).sin())
                .sum();
            sum as f32
        })
        .collect()
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Assert that a signal is approximately silent (all values near zero).
pub fn assert_silence(samples: &[f32], tolerance: f32) {
    let max = peak(samples);
    assert!(
        max <= tolerance,
        "Expected silence, but peak amplitude was {}",
        max
    );
}

/// Assert that a signal has content (not silent).
pub fn assert_has_audio(samples: &[f32], min_rms: f32) {
    let r = rms(samples);
    assert!(
        r >= min_rms,
        "Expected audio content with RMS >= {}, but RMS was {}",
        min_rms,
        r
    );
}
