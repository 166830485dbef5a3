//! One analysis/synthesis band of the vocoder.

use crate::envelope_follower::EnvelopeFollower;
use crate::svf::FilterCascade;

/// Number of vocoder bands. Fixed.
pub const BAND_COUNT: usize = 8;

/// Band center frequencies in Hz at zero formant shift.
pub const BAND_CENTERS_HZ: [f32; BAND_COUNT] =
    [123.0, 294.0, 481.0, 746.0, 1387.0, 2255.0, 3403.0, 4865.0];

/// Resonance shared by every band filter.
pub const BAND_Q: f32 = 4.0;

/// Lowest normalized cutoff handed to a filter stage.
pub const MIN_CUTOFF: f32 = 1.0e-5;
/// Highest normalized cutoff handed to a filter stage; stays below Nyquist.
pub const MAX_CUTOFF: f32 = 0.49;

/// Modulator filter → envelope, carrier filter × envelope, at one center frequency.
#[derive(Debug, Clone)]
pub struct BandProcessor {
    center_hz: f32,
    dt: f32,
    formant_shift: f32,
    cutoff: f32,
    modulator_filter: FilterCascade<2>,
    carrier_filter: FilterCascade<2>,
    envelope: EnvelopeFollower,
}

impl BandProcessor {
    pub fn new(center_hz: f32, sample_rate: f64) -> Self {
        let dt = (1.0 / sample_rate) as f32;
        let cutoff = Self::normalized_cutoff(center_hz, 0.0, dt);
        Self {
            center_hz,
            dt,
            formant_shift: 0.0,
            cutoff,
            modulator_filter: FilterCascade::new(cutoff, BAND_Q),
            carrier_filter: FilterCascade::new(cutoff, BAND_Q),
            envelope: EnvelopeFollower::default(),
        }
    }

    #[inline]
    fn normalized_cutoff(center_hz: f32, formant_shift: f32, dt: f32) -> f32 {
        (center_hz * formant_shift.exp2() * dt).clamp(MIN_CUTOFF, MAX_CUTOFF)
    }

    /// Run one sample through the band and return its carrier contribution.
    #[inline]
    pub fn process(&mut self, modulator: f32, carrier: f32, formant_shift: f32) -> f32 {
        if formant_shift != self.formant_shift {
            self.formant_shift = formant_shift;
            self.cutoff = Self::normalized_cutoff(self.center_hz, formant_shift, self.dt);
        }
        self.modulator_filter.set_cutoff(self.cutoff, BAND_Q);
        self.carrier_filter.set_cutoff(self.cutoff, BAND_Q);

        let modulated = self.modulator_filter.process(modulator);
        let level = self.envelope.process(modulated.abs());
        self.carrier_filter.process(carrier) * level
    }

    pub fn center_hz(&self) -> f32 {
        self.center_hz
    }

    /// Normalized cutoff currently applied to both filter paths.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn envelope(&self) -> f32 {
        self.envelope.current_envelope()
    }

    pub fn modulator_filter(&self) -> &FilterCascade<2> {
        &self.modulator_filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cutoff_follows_formant_shift() {
        let mut band = BandProcessor::new(1000.0, 40000.0);
        assert_relative_eq!(band.cutoff(), 0.025, epsilon = 1e-6);

        band.process(0.0, 0.0, 1.0);
        assert_relative_eq!(band.cutoff(), 0.05, epsilon = 1e-6);

        band.process(0.0, 0.0, -2.0);
        assert_relative_eq!(band.cutoff(), 0.00625, epsilon = 1e-6);
    }

    #[test]
    fn test_cutoff_is_clamped_below_nyquist() {
        let mut band = BandProcessor::new(4865.0, 8000.0);
        band.process(0.0, 0.0, 2.0);
        assert_eq!(band.cutoff(), MAX_CUTOFF);
    }

    #[test]
    fn test_coefficients_only_recomputed_on_shift_change() {
        let mut band = BandProcessor::new(481.0, 44100.0);
        for _ in 0..512 {
            band.process(0.1, 0.1, 0.5);
        }
        for stage in band.modulator_filter().stages() {
            assert_eq!(stage.recompute_count(), 2);
        }
    }

    #[test]
    fn test_silent_modulator_mutes_carrier() {
        let mut band = BandProcessor::new(294.0, 44100.0);
        for i in 0..4410 {
            let carrier = if i % 100 < 50 { 1.0 } else { -1.0 };
            assert_eq!(band.process(0.0, carrier, 0.0), 0.0);
        }
        assert_eq!(band.envelope(), 0.0);
    }
}
