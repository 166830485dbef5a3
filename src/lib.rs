//! # Robovox - Real-time Channel Vocoder
//!
//! Imposes the spectral envelope of a modulator (a voice) onto a synthetic
//! unison carrier, producing the classic robotic, formant-shifted voice.
//!
//! ## Architecture
//!
//! Robovox is an umbrella crate that coordinates:
//! - **robovox-core** - Parameter snapshots, lock-free handoff, configuration, seedable RNG
//! - **robovox-dsp** - ZDF band-pass stages, envelope followers, unison carrier, 8-band engine
//! - **robovox-export** - Deterministic offline rendering and 16-bit PCM WAV encoding
//!
//! ## Live mode
//!
//! ```
//! use robovox::prelude::*;
//!
//! let mut session = VocoderSession::builder()
//!     .sample_rate(48000.0)
//!     .channels(2)
//!     .block_size(128)
//!     .build()?;
//!
//! // Control thread
//! let params = session.parameters();
//! params.set_formant_shift(0.5);
//!
//! // Audio callback
//! let voice = [0.0f32; 128];
//! let mut out = [0.0f32; 256];
//! session.process_interleaved(Some(&voice), &mut out);
//! # Ok::<(), robovox::Error>(())
//! ```
//!
//! ## Render mode
//!
//! ```
//! use robovox::prelude::*;
//!
//! let job = RenderJob::new(44100, vec![0.0; 44100])
//!     .with_parameters(ParameterSnapshot::new(0.1, 0.0, -12.0));
//! let wav: Vec<u8> = robovox::render_wav(&job)?;
//! # Ok::<(), robovox::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Engine, sessions, offline rendering
//! - `output` - Live playback through the default audio device (CPAL)

/// Re-export of robovox-core for direct access
pub use robovox_core as core;

/// Re-export of robovox-dsp for direct access to the building blocks
pub use robovox_dsp as dsp;

/// Re-export of robovox-export
pub use robovox_export as export;

// Core types
pub use robovox_core::{
    AtomicFlag, AtomicFloat, EngineConfig, ParameterRange, ParameterSnapshot, SharedParameters,
    FORMANT_SHIFT_RANGE, NOISE_MIX_RANGE, PITCH_OFFSET_RANGE, PLAYBACK_SPEED_RANGE,
};

// Engine
pub use robovox_dsp::{VocoderEngine, BAND_CENTERS_HZ, BAND_COUNT};

// Export
pub use robovox_export::{encode_pcm16, RenderJob, RenderResult, VocoderRenderer};

mod error;
pub use error::{Error, Result};

mod builder;
mod handle;
mod session;
mod source;

pub use builder::VocoderSessionBuilder;
pub use handle::ParameterHandle;
pub use session::VocoderSession;
pub use source::{capture_feed, downmix, ModulatorFeed, ModulatorPlayer};

#[cfg(feature = "output")]
mod output;
#[cfg(feature = "output")]
pub use output::LiveOutput;

/// Render a job on a fresh engine and encode it as 16-bit PCM WAV bytes.
pub fn render_wav(job: &RenderJob) -> Result<Vec<u8>> {
    Ok(VocoderRenderer::new().render_wav(job)?)
}

/// Convenience prelude for common imports
pub mod prelude {
    // Live session
    pub use crate::{ParameterHandle, VocoderSession, VocoderSessionBuilder};

    // Sources
    pub use crate::{ModulatorFeed, ModulatorPlayer};

    // Essential types
    pub use crate::{EngineConfig, ParameterSnapshot, VocoderEngine};

    // Offline
    pub use crate::{RenderJob, RenderResult, VocoderRenderer};

    #[cfg(feature = "output")]
    pub use crate::LiveOutput;
}
