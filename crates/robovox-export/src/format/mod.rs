//! Audio container encoders
//!
//! - `wav`: canonical 16-bit PCM RIFF/WAVE

pub mod wav;
