//! Parameter ranges for the vocoder's control inputs.
//!
//! Provides normalized (0.0-1.0) ↔ real value conversion so control surfaces
//! can drive every parameter from a single unit slider.
//!
//! # Example
//!
//! ```
//! use robovox_core::FORMANT_SHIFT_RANGE;
//!
//! // A slider at its midpoint maps to "no shift"
//! assert_eq!(FORMANT_SHIFT_RANGE.denormalize(0.5), 0.0);
//!
//! // Out-of-range requests are pulled back into range
//! assert_eq!(FORMANT_SHIFT_RANGE.clamp(3.0), 2.0);
//! ```

/// Blend between the unison tone (0.0) and white noise (1.0).
pub const NOISE_MIX_RANGE: ParameterRange = ParameterRange::linear(0.0, 1.0, 0.0);

/// Band center scaling in octaves.
pub const FORMANT_SHIFT_RANGE: ParameterRange = ParameterRange::linear(-2.0, 2.0, 0.0);

/// Carrier pitch relative to the base note, in semitones.
pub const PITCH_OFFSET_RANGE: ParameterRange = ParameterRange::linear(-24.0, 24.0, 0.0);

/// Modulator playback rate. Consumed by the upstream source only.
pub const PLAYBACK_SPEED_RANGE: ParameterRange = ParameterRange::linear(0.25, 4.0, 1.0);

/// Linear parameter range with a default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    /// Minimum real value
    pub min: f32,
    /// Maximum real value
    pub max: f32,
    /// Default real value
    pub default: f32,
}

impl ParameterRange {
    /// Create a linear parameter range.
    ///
    /// `default` must already lie within `min..=max`.
    pub const fn linear(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Convert a real value to normalized (0.0-1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / range
    }

    /// Convert a normalized value (0.0-1.0) to a real value.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Clamp a real value to this parameter's range.
    ///
    /// Non-finite values resolve to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }

    /// Check if a real value is within range.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}
