//! RT-safe DSP for the robovox channel vocoder.
//!
//! Leaves first: [`BiquadFilterStage`] (ZDF band-pass), [`EnvelopeFollower`],
//! [`CarrierOscillatorBank`], [`BandProcessor`], and the [`VocoderEngine`] that
//! owns eight bands plus the carrier and turns one modulator sample into one
//! output sample.
//!
//! Nothing here allocates after construction, blocks, or logs.

mod pitch;
pub use pitch::{midi_to_hz, semitones_to_ratio};

mod svf;
pub use svf::{BiquadFilterStage, FilterCascade, FilterCoefficients};

mod envelope_follower;
pub use envelope_follower::{EnvelopeFollower, DEFAULT_ATTACK_COEFF, DEFAULT_RELEASE_COEFF};

mod oscillator;
pub use oscillator::{
    CarrierOscillatorBank, OscillatorVoice, BASE_MIDI_NOTE, DETUNE_SPREAD_SEMITONES, UNISON_VOICES,
};

mod band;
pub use band::{BandProcessor, BAND_CENTERS_HZ, BAND_COUNT, BAND_Q, MAX_CUTOFF, MIN_CUTOFF};

mod engine;
pub use engine::{VocoderEngine, OUTPUT_GAIN};
