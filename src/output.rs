//! Live playback through a CPAL output device.

use crate::builder::VocoderSessionBuilder;
use crate::error::{Error, Result};
use crate::session::VocoderSession;
use crate::source::ModulatorFeed;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// Wrapper to hold a `cpal::Stream` in a `Send` context.
///
/// `cpal::Stream` is `!Send` on some platforms. `LiveOutput` only touches the
/// stream from `start` and `stop`, both of which take `&mut self`.
struct StreamHandle(#[allow(dead_code)] cpal::Stream);

// SAFETY: the stream is never shared; it is created, held and dropped through
// `&mut LiveOutput`, so no two threads can reach it at once.
unsafe impl Send for StreamHandle {}

/// Runs a [`VocoderSession`] inside the device's output callback.
pub struct LiveOutput {
    sample_rate: f64,
    channels: usize,
    device_index: Option<usize>,
    stream: Option<StreamHandle>,
}

impl LiveOutput {
    /// Open an output device. `None` picks the host default.
    pub fn open(device_index: Option<usize>) -> Result<Self> {
        let device = Self::get_device(device_index)?;
        let config = device.default_output_config()?;

        Ok(Self {
            sample_rate: config.sample_rate().0 as f64,
            channels: config.channels() as usize,
            device_index,
            stream: None,
        })
    }

    /// Session builder preconfigured for this device's rate and channel count.
    pub fn session_builder(&self) -> VocoderSessionBuilder {
        VocoderSession::builder()
            .sample_rate(self.sample_rate)
            .channels(self.channels)
    }

    /// Move `session` and `feed` onto the audio thread and start playback.
    pub fn start<F>(&mut self, session: VocoderSession, feed: F) -> Result<()>
    where
        F: ModulatorFeed + Send + 'static,
    {
        if self.stream.is_some() {
            return Ok(());
        }
        if session.channels() != self.channels || session.sample_rate() != self.sample_rate {
            return Err(robovox_core::Error::InvalidConfig(format!(
                "session is {} Hz / {} ch, device is {} Hz / {} ch",
                session.sample_rate(),
                session.channels(),
                self.sample_rate,
                self.channels
            ))
            .into());
        }

        let device = Self::get_device(self.device_index)?;
        let config = device.default_output_config()?;

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32, F>(&device, &config.into(), session, feed)?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16, F>(&device, &config.into(), session, feed)?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16, F>(&device, &config.into(), session, feed)?
            }
            format => {
                return Err(Error::InvalidDevice(format!(
                    "Unsupported sample format: {:?}",
                    format
                )));
            }
        };

        stream.play()?;
        self.stream = Some(StreamHandle(stream));

        tracing::info!(
            sample_rate = self.sample_rate,
            channels = self.channels,
            "live output started"
        );
        Ok(())
    }

    /// Stop playback. The session is dropped with the stream.
    pub fn stop(&mut self) {
        if self.stream.take().is_some() {
            tracing::info!("live output stopped");
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    /// List available output devices.
    pub fn list_output_devices() -> Result<Vec<String>> {
        let host = cpal::default_host();
        host.output_devices()?
            .enumerate()
            .map(|(idx, device)| Ok(format!("{}: {}", idx, device.name()?)))
            .collect()
    }

    fn get_device(index: Option<usize>) -> Result<cpal::Device> {
        let host = cpal::default_host();

        if let Some(idx) = index {
            let devices: Vec<_> = host.output_devices()?.collect();

            let device_count = devices.len();
            devices.into_iter().nth(idx).ok_or_else(|| {
                Error::InvalidDevice(format!(
                    "Output device index {} out of range (available: {})",
                    idx, device_count
                ))
            })
        } else {
            host.default_output_device()
                .ok_or_else(|| Error::InvalidDevice("No output device available".to_string()))
        }
    }
}

impl Drop for LiveOutput {
    fn drop(&mut self) {
        self.stop();
    }
}

fn build_stream<T, F>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut session: VocoderSession,
    mut feed: F,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
    F: ModulatorFeed + Send + 'static,
{
    let mut scratch = vec![0.0f32; session.block_size() * session.channels()];

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                for chunk in data.chunks_mut(scratch.len()) {
                    let rendered = &mut scratch[..chunk.len()];
                    session.render_from(&mut feed, rendered);
                    for (sample, &value) in chunk.iter_mut().zip(rendered.iter()) {
                        *sample = T::from_sample(value);
                    }
                }
            }));

            if result.is_err() {
                // Panic in callback - output silence
                for sample in data.iter_mut() {
                    *sample = T::from_sample(0.0);
                }
            }
        },
        |_err| {
            // Audio stream error - cannot log from callback
        },
        None,
    )?;

    Ok(stream)
}
