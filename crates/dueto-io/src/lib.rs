//! WAV file I/O for the dueto EQ.
//!
//! Loads and saves audio as planar f32 channel buffers — the layout the
//! engine processes — via [`read_wav`] and [`write_wav`].

mod wav;

pub use wav::{WavSpec, read_wav, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// A file or buffer set with no channels.
    #[error("no audio channels present")]
    EmptyFile,

    /// Planar buffers of unequal length were passed for writing.
    #[error("channel buffers have mismatched lengths")]
    ChannelLengthMismatch,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
