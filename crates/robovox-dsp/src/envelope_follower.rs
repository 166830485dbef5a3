//! Asymmetric one-pole envelope follower.

/// Smoothing coefficient applied while the input is above the envelope.
pub const DEFAULT_ATTACK_COEFF: f32 = 0.005;
/// Smoothing coefficient applied while the input is at or below the envelope.
pub const DEFAULT_RELEASE_COEFF: f32 = 0.02;

/// One-pole smoother with separate rise and fall coefficients.
///
/// Coefficients are per-sample blend factors, not time constants, so the
/// perceived attack/release time scales inversely with the sample rate.
/// Input is expected to be rectified; the output is then never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeFollower {
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(DEFAULT_ATTACK_COEFF, DEFAULT_RELEASE_COEFF)
    }
}

impl EnvelopeFollower {
    pub fn new(attack_coeff: f32, release_coeff: f32) -> Self {
        Self {
            envelope: 0.0,
            attack_coeff,
            release_coeff,
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = if input > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = (1.0 - c) * self.envelope + c * input;
        self.envelope
    }

    pub fn current_envelope(&self) -> f32 {
        self.envelope
    }

    pub fn attack_coeff(&self) -> f32 {
        self.attack_coeff
    }

    pub fn release_coeff(&self) -> f32 {
        self.release_coeff
    }
}
