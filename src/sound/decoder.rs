//! Error types and the block codec contract
//!
//! Every failure in container scanning or transcoding maps onto one
//! `TranscodeError`; `ErrorKind` is the flat discriminant reported across
//! the host boundary.

use std::io;

/// Container-level problems found while scanning the WAVE header
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Not a RIFF file")]
    NotRiff,

    #[error("Not a WAVE file")]
    NotWave,

    #[error("Missing fmt chunk")]
    MissingFmt,

    #[error("fmt chunk too small ({0} bytes), expected at least 16")]
    FmtTooSmall(u32),

    #[error("Unsupported audio format tag: 0x{0:04X}")]
    UnsupportedFormat(u16),

    #[error("Invalid block align ({block_align}) for {channels} channel(s)")]
    InvalidBlockGeometry { block_align: u16, channels: u16 },

    #[error("No data chunk found")]
    NoDataChunk,

    #[error("Truncated {0} chunk")]
    Truncated(&'static str),
}

/// Any fatal failure of a transcode run
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid container: {0}")]
    Format(#[from] FormatError),

    #[error("Failed to allocate {bytes} bytes for block buffers")]
    Allocation { bytes: usize },

    #[error("Codec rejected block {block_index} ({bytes} bytes)")]
    Codec { block_index: u64, bytes: usize },
}

/// Flat error category, one per fatal path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorKind {
    Io = 1,
    Format = 2,
    Allocation = 3,
    Codec = 4,
}

impl TranscodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscodeError::Io(_) => ErrorKind::Io,
            TranscodeError::Format(_) => ErrorKind::Format,
            TranscodeError::Allocation { .. } => ErrorKind::Allocation,
            TranscodeError::Codec { .. } => ErrorKind::Codec,
        }
    }

    /// The container error, if this is one
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            TranscodeError::Format(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for container and transcode operations
pub type TranscodeResult<T> = Result<T, TranscodeError>;

/// Block-oriented ADPCM decoder.
///
/// One call turns one compressed block into interleaved 16-bit frames.
/// Implementations keep no state between blocks.
pub trait BlockCodec {
    /// Returns the codec name for logging
    fn name(&self) -> &'static str;

    /// Decode `input` (one block, possibly truncated) into `output`.
    ///
    /// `output` holds at least `samples_per_block * channels` samples.
    /// Returns the number of decoded sample-frames; zero means the block
    /// was rejected.
    fn decode_block(&mut self, output: &mut [i16], input: &[u8], channels: usize) -> usize;
}

impl<C: BlockCodec + ?Sized> BlockCodec for &mut C {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode_block(&mut self, output: &mut [i16], input: &[u8], channels: usize) -> usize {
        (**self).decode_block(output, input, channels)
    }
}
