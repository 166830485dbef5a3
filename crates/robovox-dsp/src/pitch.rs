//! Pitch conversions.

/// MIDI note number (fractional allowed) to frequency in Hz, A4 = 440 Hz.
#[inline]
pub fn midi_to_hz(note: f32) -> f32 {
    440.0 * semitones_to_ratio(note - 69.0)
}

/// Frequency ratio of an interval given in semitones.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    (semitones / 12.0).exp2()
}
