//! Zero-delay-feedback state-variable band-pass.
//!
//! Trapezoidal (TPT) SVF after Simper. Each [`BiquadFilterStage::process`]
//! clocks the core update twice with the same input, i.e. the filter runs at
//! twice the sample rate with a held input. The prewarp uses `fc * 0.5` to
//! match.
//!
//! Stability requires `cutoff ∈ (0, 0.5)` (normalized to the sample rate) and
//! `q > 0`. Neither is checked here; callers clamp.

use std::f32::consts::PI;

/// Coefficients for one SVF stage, derived purely from `(cutoff, q)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCoefficients {
    pub g: f32,
    pub k: f32,
    pub a1: f32,
    pub a2: f32,
    pub a3: f32,
}

impl FilterCoefficients {
    /// `cutoff` is normalized to the sample rate (Hz / sample rate).
    pub fn new(cutoff: f32, q: f32) -> Self {
        let g = (PI * cutoff * 0.5).tan();
        let k = 1.0 / q;
        let a1 = 1.0 / (1.0 + g * (g + k));
        let a2 = g * a1;
        let a3 = g * a2;
        Self { g, k, a1, a2, a3 }
    }
}

/// One band-pass SVF stage with memoized coefficients.
#[derive(Debug, Clone)]
pub struct BiquadFilterStage {
    coeffs: FilterCoefficients,
    key: (f32, f32),
    ic1eq: f32,
    ic2eq: f32,
    recomputes: u32,
}

impl BiquadFilterStage {
    pub fn new(cutoff: f32, q: f32) -> Self {
        Self {
            coeffs: FilterCoefficients::new(cutoff, q),
            key: (cutoff, q),
            ic1eq: 0.0,
            ic2eq: 0.0,
            recomputes: 1,
        }
    }

    /// Retune. Coefficients are only recomputed when `(cutoff, q)` changed.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff: f32, q: f32) {
        if self.key == (cutoff, q) {
            return;
        }
        self.coeffs = FilterCoefficients::new(cutoff, q);
        self.key = (cutoff, q);
        self.recomputes = self.recomputes.wrapping_add(1);
    }

    /// Filter one sample, returning the band-pass tap of the second clocking.
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        self.tick(x);
        self.tick(x)
    }

    #[inline]
    fn tick(&mut self, x: f32) -> f32 {
        let FilterCoefficients { a1, a2, a3, .. } = self.coeffs;
        let v3 = x - self.ic2eq;
        let v1 = a1 * self.ic1eq + a2 * v3;
        let v2 = self.ic2eq + a2 * self.ic1eq + a3 * v3;
        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;
        v1
    }

    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coeffs
    }

    /// Number of coefficient computations since construction (including the first).
    pub fn recompute_count(&self) -> u32 {
        self.recomputes
    }
}

/// `N` identical stages in series sharing one cutoff.
#[derive(Debug, Clone)]
pub struct FilterCascade<const N: usize> {
    stages: [BiquadFilterStage; N],
}

impl<const N: usize> FilterCascade<N> {
    pub fn new(cutoff: f32, q: f32) -> Self {
        Self {
            stages: std::array::from_fn(|_| BiquadFilterStage::new(cutoff, q)),
        }
    }

    #[inline]
    pub fn set_cutoff(&mut self, cutoff: f32, q: f32) {
        for stage in self.stages.iter_mut() {
            stage.set_cutoff(cutoff, q);
        }
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        self.stages
            .iter_mut()
            .fold(x, |acc, stage| stage.process(acc))
    }

    pub fn stages(&self) -> &[BiquadFilterStage; N] {
        &self.stages
    }
}
