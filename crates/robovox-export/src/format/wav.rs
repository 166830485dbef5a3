//! Canonical 16-bit PCM WAV encoder
//!
//! Always emits the 44-byte RIFF header (plain `fmt ` chunk, format tag 1)
//! followed by interleaved little-endian samples, for any channel count.

use crate::error::{ExportError, Result};
use std::io::Write;

/// Size of the canonical RIFF/WAVE header.
pub const WAV_HEADER_LEN: usize = 44;

const PCM_FORMAT_TAG: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;

/// Encode planar float channels (`channels[c][frame]`) into WAV bytes.
///
/// Pure: the same input always yields byte-identical output.
///
/// # Errors
/// - [`ExportError::InvalidData`] for zero channels, too many channels, or
///   channels of different lengths
/// - [`ExportError::Encoding`] when the data would overflow the 32-bit RIFF sizes
pub fn encode_pcm16<C: AsRef<[f32]>>(channels: &[C], sample_rate: u32) -> Result<Vec<u8>> {
    let frames = match channels.first() {
        Some(first) => first.as_ref().len(),
        None => return Err(ExportError::InvalidData("no channels to encode".into())),
    };
    if channels.iter().any(|c| c.as_ref().len() != frames) {
        return Err(ExportError::InvalidData(
            "channels have different lengths".into(),
        ));
    }
    let channel_count = u16::try_from(channels.len())
        .map_err(|_| ExportError::InvalidData(format!("{} channels", channels.len())))?;

    let data_len = frames as u64 * channel_count as u64 * BYTES_PER_SAMPLE as u64;
    let riff_len = data_len + (WAV_HEADER_LEN as u64 - 8);
    if riff_len > u32::MAX as u64 {
        return Err(ExportError::Encoding(format!(
            "{data_len} bytes of sample data exceed the RIFF size limit"
        )));
    }

    let block_align = channel_count * BYTES_PER_SAMPLE;
    let byte_rate = sample_rate as u64 * block_align as u64;
    let byte_rate = u32::try_from(byte_rate)
        .map_err(|_| ExportError::Encoding(format!("byte rate {byte_rate} out of range")))?;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);
    out.write_all(b"RIFF")?;
    out.write_all(&(riff_len as u32).to_le_bytes())?;
    out.write_all(b"WAVE")?;

    out.write_all(b"fmt ")?;
    out.write_all(&16u32.to_le_bytes())?;
    out.write_all(&PCM_FORMAT_TAG.to_le_bytes())?;
    out.write_all(&channel_count.to_le_bytes())?;
    out.write_all(&sample_rate.to_le_bytes())?;
    out.write_all(&byte_rate.to_le_bytes())?;
    out.write_all(&block_align.to_le_bytes())?;
    out.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    out.write_all(b"data")?;
    out.write_all(&(data_len as u32).to_le_bytes())?;

    for frame in 0..frames {
        for channel in channels {
            out.write_all(&quantize_i16(channel.as_ref()[frame]).to_le_bytes())?;
        }
    }

    Ok(out)
}

/// Convert a float sample to 16-bit PCM.
///
/// Clamps to `[-1, 1]`, scales positives by 32767 and negatives by 32768 so
/// both extremes map exactly onto the integer range, then rounds to nearest.
/// NaN encodes as silence.
#[inline]
pub fn quantize_i16(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    let clamped = sample.clamp(-1.0, 1.0);
    let scaled = if clamped >= 0.0 {
        clamped * 32767.0
    } else {
        clamped * 32768.0
    };
    scaled.round() as i16
}
