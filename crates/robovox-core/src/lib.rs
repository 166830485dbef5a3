//! Core types shared by the robovox vocoder crates.
//!
//! # Primary API
//!
//! - [`ParameterSnapshot`]: Immutable control record consumed once per block
//! - [`SharedParameters`]: Single-slot, lock-free snapshot handoff (control → audio)
//! - [`EngineConfig`]: Sample rate, channel count, block size and seed
//! - [`EngineRng`] / [`create_rng`]: Seedable random source for oscillator phases and noise
//!
//! # Example
//!
//! ```
//! use robovox_core::{ParameterSnapshot, SharedParameters};
//!
//! let shared = SharedParameters::new(ParameterSnapshot::default());
//!
//! // Control thread publishes a whole snapshot...
//! shared.publish(ParameterSnapshot::new(0.25, 1.0, -12.0));
//!
//! // ...audio thread picks up the latest one at the next block boundary.
//! let current = shared.load();
//! assert_eq!(current.formant_shift, 1.0);
//! ```

pub mod error;
pub use error::{Error, Result};

mod config;
pub use config::EngineConfig;

pub(crate) mod lockfree;
pub use lockfree::{AtomicFlag, AtomicFloat};

pub mod parameter;
pub use parameter::{
    ParameterRange, FORMANT_SHIFT_RANGE, NOISE_MIX_RANGE, PITCH_OFFSET_RANGE,
    PLAYBACK_SPEED_RANGE,
};

mod snapshot;
pub use snapshot::{ParameterSnapshot, SharedParameters};

pub mod rng;
pub use rng::{create_rng, seed_or_entropy, EngineRng};

pub use std::sync::Arc;
