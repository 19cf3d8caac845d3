//! WAV reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use tracing::debug;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Sample frames per channel.
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// WAV file specification for writing.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Sample rate in Hz (e.g. 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample: 16 or 24 (PCM), 32 (float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            bits_per_sample: 32,
        }
    }
}

impl WavSpec {
    fn to_hound(self, channels: u16) -> Result<hound::WavSpec> {
        let sample_format = match self.bits_per_sample {
            16 | 24 => SampleFormat::Int,
            32 => SampleFormat::Float,
            other => return Err(Error::UnsupportedBitDepth(other)),
        };
        Ok(hound::WavSpec {
            channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format,
        })
    }
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len());
    let num_frames = total_samples / u64::from(spec.channels);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
        format: match spec.sample_format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        },
    })
}

/// Read a WAV file as mono `f32` samples along with its spec.
///
/// Integer formats are normalized to `[-1, 1]`; multi-channel files are
/// mixed down by averaging.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels);

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    debug!(
        path = %path.display(),
        frames = mono.len(),
        sample_rate = spec.sample_rate,
        channels,
        "read WAV"
    );

    Ok((
        mono,
        WavSpec {
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        },
    ))
}

/// Write mono samples to a WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WavWriter::create(path, spec.to_hound(1)?)?;
    write_samples(&mut writer, spec.bits_per_sample, samples.iter().copied())?;
    writer.finalize()?;
    debug!(path = %path.display(), frames = samples.len(), "wrote mono WAV");
    Ok(())
}

/// Write left/right channels, interleaved, to a stereo WAV file.
///
/// Both channels must have the same length.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    left: &[f32],
    right: &[f32],
    spec: WavSpec,
) -> Result<()> {
    if left.len() != right.len() {
        return Err(Error::ChannelMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let path = path.as_ref();
    let mut writer = WavWriter::create(path, spec.to_hound(2)?)?;
    let interleaved = left.iter().zip(right.iter()).flat_map(|(&l, &r)| [l, r]);
    write_samples(&mut writer, spec.bits_per_sample, interleaved)?;
    writer.finalize()?;
    debug!(path = %path.display(), frames = left.len(), "wrote stereo WAV");
    Ok(())
}

fn write_samples<W>(
    writer: &mut WavWriter<W>,
    bits_per_sample: u16,
    samples: impl Iterator<Item = f32>,
) -> Result<()>
where
    W: std::io::Write + std::io::Seek,
{
    match bits_per_sample {
        32 => {
            for sample in samples {
                writer.write_sample(sample)?;
            }
        }
        16 | 24 => {
            let max_val = (1i32 << (bits_per_sample - 1)) - 1;
            for sample in samples {
                let scaled = (sample.clamp(-1.0, 1.0) * max_val as f32) as i32;
                writer.write_sample(scaled)?;
            }
        }
        other => return Err(Error::UnsupportedBitDepth(other)),
    }
    Ok(())
}
