//! Control-side parameter handle.

use robovox_core::{ParameterSnapshot, SharedParameters};

/// Cloneable control surface for a live session.
///
/// Every setter publishes a complete new snapshot; the audio thread applies
/// whichever snapshot is newest when its next block starts. Intended for a
/// single control thread: concurrent setters on different threads may drop
/// each other's field changes.
#[derive(Clone, Debug)]
pub struct ParameterHandle {
    shared: SharedParameters,
}

impl ParameterHandle {
    pub(crate) fn new(shared: SharedParameters) -> Self {
        Self { shared }
    }

    /// Snapshot the audio thread will see next (after clamping).
    pub fn current(&self) -> ParameterSnapshot {
        self.shared.load()
    }

    /// Replace all parameters at once.
    pub fn update(&self, snapshot: ParameterSnapshot) {
        tracing::debug!(?snapshot, "publishing parameter snapshot");
        self.shared.publish(snapshot);
    }

    pub fn set_carrier_noise_mix(&self, mix: f32) {
        self.update(self.current().with_carrier_noise_mix(mix));
    }

    pub fn set_formant_shift(&self, octaves: f32) {
        self.update(self.current().with_formant_shift(octaves));
    }

    pub fn set_pitch_offset(&self, semitones: f32) {
        self.update(self.current().with_pitch_offset(semitones));
    }
}
