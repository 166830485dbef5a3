//! # Robovox Export
//!
//! Offline rendering and file-artifact encoding for the robovox vocoder.
//!
//! - **Rendering**: [`VocoderRenderer`] runs a fresh engine over a whole
//!   modulator buffer, deterministically, outside any real-time callback
//! - **Encoding**: [`encode_pcm16`] turns the rendered channels into a
//!   canonical 16-bit PCM WAV byte stream
//!
//! No file I/O happens here; callers persist the returned bytes.
//!
//! ```
//! use robovox_export::{RenderJob, VocoderRenderer};
//!
//! let voice = vec![0.0f32; 4410];
//! let job = RenderJob::new(44100, voice).with_channels(2);
//! let wav = VocoderRenderer::new().render_wav(&job)?;
//! assert_eq!(&wav[0..4], b"RIFF");
//! # Ok::<(), robovox_export::ExportError>(())
//! ```

// Core modules
pub mod error;
mod renderer;
mod types;

// Advanced APIs
pub mod format;

// Re-exports
pub use error::{ExportError, Result};
pub use format::wav::{encode_pcm16, quantize_i16, WAV_HEADER_LEN};
pub use renderer::{RenderProgressCallback, RenderResult, VocoderRenderer, RENDER_BLOCK_SIZE};
pub use types::{RenderJob, DEFAULT_RENDER_SEED};
