//! PCM WAVE header writer
//!
//! The output header is written twice: a zeroed placeholder before any
//! audio, then the real header once the payload size is known.

use std::io::{self, Seek, SeekFrom, Write};

use super::formats::{PcmFormat, FMT_BASE_SIZE, WAVE_FORMAT_PCM};
use super::riff::{ChunkHeader, DATA_ID, FMT_ID, RIFF_ID, WAVE_ID};

/// Size of the canonical PCM WAVE header
pub const PCM_HEADER_SIZE: usize = 44;

/// Bytes counted by the RIFF size field besides the `data` payload
const RIFF_OVERHEAD: u32 = (PCM_HEADER_SIZE - 8) as u32;

/// Header of a 16-bit PCM WAVE file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmWavHeader {
    pub format: PcmFormat,
    pub data_size: u32,
}

impl PcmWavHeader {
    pub fn new(format: PcmFormat, data_size: u32) -> Self {
        Self { format, data_size }
    }

    /// Value of the RIFF chunk size field
    pub fn riff_size(&self) -> u32 {
        RIFF_OVERHEAD.saturating_add(self.data_size)
    }

    pub fn to_bytes(&self) -> [u8; PCM_HEADER_SIZE] {
        let mut out = [0u8; PCM_HEADER_SIZE];
        out[0..8].copy_from_slice(&ChunkHeader::new(RIFF_ID, self.riff_size()).to_le_bytes());
        out[8..12].copy_from_slice(&WAVE_ID);
        out[12..20].copy_from_slice(&ChunkHeader::new(FMT_ID, FMT_BASE_SIZE).to_le_bytes());
        out[20..22].copy_from_slice(&WAVE_FORMAT_PCM.to_le_bytes());
        out[22..24].copy_from_slice(&self.format.channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.format.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.format.byte_rate().to_le_bytes());
        out[32..34].copy_from_slice(&self.format.block_align().to_le_bytes());
        out[34..36].copy_from_slice(&PcmFormat::BITS_PER_SAMPLE.to_le_bytes());
        out[36..44].copy_from_slice(&ChunkHeader::new(DATA_ID, self.data_size).to_le_bytes());
        out
    }
}

/// Reserve header space at the current (start) position
pub fn write_placeholder<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.write_all(&[0u8; PCM_HEADER_SIZE])
}

/// Overwrite the placeholder with the final header.
///
/// Leaves the stream positioned just after the header.
pub fn patch<W: Write + Seek>(writer: &mut W, format: PcmFormat, data_size: u32) -> io::Result<()> {
    writer.seek(SeekFrom::Start(0))?;
    writer.write_all(&PcmWavHeader::new(format, data_size).to_bytes())?;
    writer.flush()
}
