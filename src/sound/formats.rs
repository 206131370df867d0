//! Format descriptors for the compressed input and the PCM output
//!
//! `FormatDescriptor` is the validated form of the input `fmt ` chunk and
//! carries the block geometry the transcode loop sizes its buffers from.

use super::decoder::FormatError;

/// WAVE format tag for linear PCM
pub const WAVE_FORMAT_PCM: u16 = 0x0001;
/// WAVE format tag for IMA (DVI) ADPCM
pub const WAVE_FORMAT_IMA_ADPCM: u16 = 0x0011;

/// Size of the fixed part of a `fmt ` chunk
pub const FMT_BASE_SIZE: u32 = 16;

/// Bytes of per-channel header at the start of every IMA-ADPCM block
const BLOCK_HEADER_BYTES: u32 = 4;

/// Decoded sample-frames in one IMA-ADPCM block.
///
/// `((block_align / channels) - 4) * 2 + 1`, defined only when
/// `channels > 0` and `block_align > 4 * channels`.
pub fn samples_per_block(block_align: u16, channels: u16) -> Option<u32> {
    let block_align = block_align as u32;
    let channels = channels as u32;
    if channels == 0 || block_align <= BLOCK_HEADER_BYTES * channels {
        return None;
    }
    Some((block_align / channels - BLOCK_HEADER_BYTES) * 2 + 1)
}

/// `fmt ` chunk fields as stored in the file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveFormatHeader {
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// Extension size; zero when the chunk has no extension
    pub cb_size: u16,
    /// Zero when absent
    pub valid_bits_per_sample: u16,
}

impl WaveFormatHeader {
    /// Decode the 16-byte base record
    pub fn from_base_bytes(buf: &[u8; 16]) -> Self {
        Self {
            format_tag: u16::from_le_bytes([buf[0], buf[1]]),
            channels: u16::from_le_bytes([buf[2], buf[3]]),
            sample_rate: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            byte_rate: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            block_align: u16::from_le_bytes([buf[12], buf[13]]),
            bits_per_sample: u16::from_le_bytes([buf[14], buf[15]]),
            cb_size: 0,
            valid_bits_per_sample: 0,
        }
    }
}

/// Validated IMA-ADPCM stream format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    header: WaveFormatHeader,
    samples_per_block: u32,
}

impl FormatDescriptor {
    /// Validate a parsed `fmt ` record.
    ///
    /// Fails for any format tag other than IMA-ADPCM and for block
    /// geometry the samples-per-block formula cannot cover.
    pub fn new(header: WaveFormatHeader) -> Result<Self, FormatError> {
        if header.format_tag != WAVE_FORMAT_IMA_ADPCM {
            return Err(FormatError::UnsupportedFormat(header.format_tag));
        }
        let samples_per_block = samples_per_block(header.block_align, header.channels).ok_or(
            FormatError::InvalidBlockGeometry {
                block_align: header.block_align,
                channels: header.channels,
            },
        )?;
        Ok(Self {
            header,
            samples_per_block,
        })
    }

    pub fn header(&self) -> &WaveFormatHeader {
        &self.header
    }

    pub fn channels(&self) -> usize {
        self.header.channels as usize
    }

    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    /// Bytes per compressed block across all channels
    pub fn block_align(&self) -> usize {
        self.header.block_align as usize
    }

    pub fn samples_per_block(&self) -> u32 {
        self.samples_per_block
    }

    /// Interleaved samples in one fully decoded block
    pub fn block_output_len(&self) -> usize {
        self.samples_per_block as usize * self.channels()
    }

    pub fn cb_size(&self) -> u16 {
        self.header.cb_size
    }

    pub fn valid_bits_per_sample(&self) -> u16 {
        self.header.valid_bits_per_sample
    }

    /// Output format produced when this stream is decoded
    pub fn pcm_format(&self) -> PcmFormat {
        PcmFormat::new(self.header.channels, self.header.sample_rate)
    }
}

/// Contents of an optional `fact` chunk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactInfo {
    pub samples_per_channel: Option<u32>,
}

impl FactInfo {
    pub fn new(samples_per_channel: u32) -> Self {
        Self {
            samples_per_channel: Some(samples_per_channel),
        }
    }

    /// The stated sample count, when present and nonzero
    pub fn authoritative(&self) -> Option<u32> {
        self.samples_per_channel.filter(|&n| n > 0)
    }
}

/// 16-bit linear PCM output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub channels: u16,
    pub sample_rate: u32,
}

impl PcmFormat {
    pub const BITS_PER_SAMPLE: u16 = 16;

    pub fn new(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
        }
    }

    /// Bytes per interleaved frame
    pub fn block_align(&self) -> u16 {
        self.channels * (Self::BITS_PER_SAMPLE / 8)
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate.saturating_mul(self.block_align() as u32)
    }
}
