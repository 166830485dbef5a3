//! Centralized error type for the robovox umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] robovox_core::Error),

    #[error("Export: {0}")]
    Export(#[from] robovox_export::ExportError),

    #[cfg(feature = "output")]
    #[error("Invalid device: {0}")]
    InvalidDevice(String),

    #[cfg(feature = "output")]
    #[error("Audio device not available")]
    DeviceNotAvailable(#[from] cpal::DefaultStreamConfigError),

    #[cfg(feature = "output")]
    #[error("Failed to build audio stream")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[cfg(feature = "output")]
    #[error("Failed to play audio stream")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[cfg(feature = "output")]
    #[error("Failed to enumerate devices")]
    Devices(#[from] cpal::DevicesError),

    #[cfg(feature = "output")]
    #[error("Failed to get device name")]
    DeviceName(#[from] cpal::DeviceNameError),
}

pub type Result<T> = std::result::Result<T, Error>;
