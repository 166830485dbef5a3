//! Parameter snapshots and the control → audio handoff.
//!
//! ```text
//! ┌───────────────┐   publish()    ┌──────────────────────────┐   load()    ┌─────────────┐
//! │ control thread│ ─────────────▶ │ ArcSwap<ParameterSnapshot>│ ──────────▶ │ audio thread│
//! └───────────────┘  (allocates)   └──────────────────────────┘ (lock-free) └─────────────┘
//! ```
//!
//! Only whole snapshots are ever swapped in. Intermediate publications that
//! land between two audio blocks are simply never observed.

use crate::parameter::{FORMANT_SHIFT_RANGE, NOISE_MIX_RANGE, PITCH_OFFSET_RANGE};
use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Engine-facing control values, replaced wholesale on every update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSnapshot {
    /// 0.0 = pure unison tone, 1.0 = pure noise
    pub carrier_noise_mix: f32,
    /// Band center shift in octaves (-2..2)
    pub formant_shift: f32,
    /// Carrier pitch offset in semitones (-24..24)
    pub pitch_offset: f32,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            carrier_noise_mix: NOISE_MIX_RANGE.default,
            formant_shift: FORMANT_SHIFT_RANGE.default,
            pitch_offset: PITCH_OFFSET_RANGE.default,
        }
    }
}

impl ParameterSnapshot {
    pub fn new(carrier_noise_mix: f32, formant_shift: f32, pitch_offset: f32) -> Self {
        Self {
            carrier_noise_mix,
            formant_shift,
            pitch_offset,
        }
    }

    /// Project every field into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            carrier_noise_mix: NOISE_MIX_RANGE.clamp(self.carrier_noise_mix),
            formant_shift: FORMANT_SHIFT_RANGE.clamp(self.formant_shift),
            pitch_offset: PITCH_OFFSET_RANGE.clamp(self.pitch_offset),
        }
    }

    pub fn with_carrier_noise_mix(mut self, mix: f32) -> Self {
        self.carrier_noise_mix = mix;
        self
    }

    pub fn with_formant_shift(mut self, octaves: f32) -> Self {
        self.formant_shift = octaves;
        self
    }

    pub fn with_pitch_offset(mut self, semitones: f32) -> Self {
        self.pitch_offset = semitones;
        self
    }
}

/// Single-slot snapshot cell shared between one writer and one reader.
///
/// Cloning shares the same slot.
#[derive(Clone)]
pub struct SharedParameters {
    slot: Arc<ArcSwap<ParameterSnapshot>>,
}

impl SharedParameters {
    pub fn new(initial: ParameterSnapshot) -> Self {
        Self {
            slot: Arc::new(ArcSwap::from_pointee(initial.clamped())),
        }
    }

    /// Replace the current snapshot. Not for use on the audio thread.
    pub fn publish(&self, snapshot: ParameterSnapshot) {
        self.slot.store(Arc::new(snapshot.clamped()));
    }

    /// Latest published snapshot. Lock-free and allocation-free.
    #[inline]
    pub fn load(&self) -> ParameterSnapshot {
        **self.slot.load()
    }
}

impl Default for SharedParameters {
    fn default() -> Self {
        Self::new(ParameterSnapshot::default())
    }
}

impl std::fmt::Debug for SharedParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedParameters").field(&self.load()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_neutral() {
        let snapshot = ParameterSnapshot::default();
        assert_eq!(snapshot.carrier_noise_mix, 0.0);
        assert_eq!(snapshot.formant_shift, 0.0);
        assert_eq!(snapshot.pitch_offset, 0.0);
    }

    #[test]
    fn test_clamped() {
        let snapshot = ParameterSnapshot::new(1.5, -3.0, 30.0).clamped();
        assert_eq!(snapshot, ParameterSnapshot::new(1.0, -2.0, 24.0));
    }

    #[test]
    fn test_publish_replaces_whole_snapshot() {
        let shared = SharedParameters::default();
        let reader = shared.clone();

        shared.publish(ParameterSnapshot::new(0.5, 1.0, 7.0));
        assert_eq!(reader.load(), ParameterSnapshot::new(0.5, 1.0, 7.0));

        shared.publish(ParameterSnapshot::new(0.1, 0.0, 0.0));
        assert_eq!(reader.load(), ParameterSnapshot::new(0.1, 0.0, 0.0));
    }

    #[test]
    fn test_publish_clamps() {
        let shared = SharedParameters::default();
        shared.publish(ParameterSnapshot::new(f32::NAN, 5.0, -99.0));
        assert_eq!(shared.load(), ParameterSnapshot::new(0.0, 2.0, -24.0));
    }

    #[test]
    fn test_latest_snapshot_wins_across_threads() {
        let shared = SharedParameters::default();
        let writer = shared.clone();

        std::thread::spawn(move || {
            for i in 0..=24 {
                writer.publish(ParameterSnapshot::default().with_pitch_offset(i as f32));
            }
        })
        .join()
        .unwrap();

        assert_eq!(shared.load().pitch_offset, 24.0);
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_string(&ParameterSnapshot::new(0.25, -1.0, 12.0)).unwrap();
        assert_eq!(
            json,
            r#"{"carrierNoiseMix":0.25,"formantShift":-1.0,"pitchOffset":12.0}"#
        );
        let back: ParameterSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pitch_offset, 12.0);
    }
}
