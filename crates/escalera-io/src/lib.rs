//! WAV file I/O for the escalera filter tools.
//!
//! Offline rendering needs exactly three things from disk: read a file as
//! mono `f32` samples, write a mono result, and write the filter's
//! broadcast stereo result. This crate provides those on top of `hound`,
//! plus a cheap metadata probe.
//!
//! ```rust,ignore
//! use escalera_io::{read_wav, write_wav_stereo, WavSpec};
//!
//! let (samples, spec) = read_wav("input.wav")?;
//! // ... process into left/right ...
//! write_wav_stereo("output.wav", &left, &right, spec)?;
//! ```

mod wav;

pub use wav::{
    WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav, write_wav_stereo,
};

/// Error type for audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV encode/decode error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Unsupported bit depth requested for writing.
    #[error("Unsupported bit depth: {0} (use 16, 24, or 32)")]
    UnsupportedBitDepth(u16),

    /// Mismatched channel buffer lengths for stereo writing.
    #[error("Stereo channel length mismatch: left {left}, right {right}")]
    ChannelMismatch {
        /// Left channel length in samples.
        left: usize,
        /// Right channel length in samples.
        right: usize,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
