//! WAV file reading and writing with planar (per-channel) buffers.
//!
//! The EQ engine filters each channel independently, so audio moves through
//! this crate as one `Vec<f32>` per channel rather than interleaved frames.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file into planar f32 channel buffers.
///
/// Integer formats are normalized to [-1.0, 1.0); float files are read as
/// is. Every channel in the file is kept, in file order.
///
/// # Example
/// ```ignore
/// let (channels, spec) = read_wav("input.wav")?;
/// println!("{} channels at {} Hz", channels.len(), spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(Error::EmptyFile);
    }

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            let max_val = (1i32 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channels;
    let mut planar: Vec<Vec<f32>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();
    for frame in interleaved.chunks_exact(channels) {
        for (channel, &sample) in planar.iter_mut().zip(frame.iter()) {
            channel.push(sample);
        }
    }

    Ok((planar, spec))
}

/// Write planar f32 channel buffers to a WAV file.
///
/// All channels must have equal length; `spec.channels` is taken from the
/// buffer count, not from the caller's spec.
pub fn write_wav<P: AsRef<Path>>(path: P, channels: &[Vec<f32>], spec: WavSpec) -> Result<()> {
    let Some(first) = channels.first() else {
        return Err(Error::EmptyFile);
    };
    let frames = first.len();
    if channels.iter().any(|c| c.len() != frames) {
        return Err(Error::ChannelLengthMismatch);
    }

    let mut out_spec = spec;
    out_spec.channels = channels.len() as u16;
    let mut writer = WavWriter::create(path, hound::WavSpec::from(out_spec))?;

    if out_spec.bits_per_sample == 32 {
        for frame in 0..frames {
            for channel in channels {
                writer.write_sample(channel[frame])?;
            }
        }
    } else {
        let max_val = (1i32 << (out_spec.bits_per_sample - 1)) as f32;
        for frame in 0..frames {
            for channel in channels {
                let int_sample =
                    (channel[frame] * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}
