//! RIFF chunk scanner
//!
//! Forward-only cursor over a byte stream that understands nothing beyond
//! the generic chunk layout: a 4-byte ASCII tag followed by a little-endian
//! `u32` payload size. WAVE semantics live in `wav.rs`.
//!
//! Odd-sized chunks are not padded here: a skip advances by exactly the
//! declared size, matching the encoders this crate targets.

use std::fmt;
use std::io::{self, Read};

pub const RIFF_ID: [u8; 4] = *b"RIFF";
pub const WAVE_ID: [u8; 4] = *b"WAVE";
pub const FMT_ID: [u8; 4] = *b"fmt ";
pub const FACT_ID: [u8; 4] = *b"fact";
pub const DATA_ID: [u8; 4] = *b"data";

/// Size in bytes of a chunk header on disk.
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Tag and declared payload size of one chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: [u8; 4],
    pub size: u32,
}

impl ChunkHeader {
    pub fn new(id: [u8; 4], size: u32) -> Self {
        Self { id, size }
    }

    pub fn is(&self, id: &[u8; 4]) -> bool {
        &self.id == id
    }

    pub fn to_le_bytes(&self) -> [u8; CHUNK_HEADER_SIZE] {
        let mut out = [0u8; CHUNK_HEADER_SIZE];
        out[..4].copy_from_slice(&self.id);
        out[4..].copy_from_slice(&self.size.to_le_bytes());
        out
    }
}

impl fmt::Display for ChunkHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({} bytes)", tag_str(&self.id), self.size)
    }
}

/// Printable form of a chunk tag, non-ASCII bytes replaced by `?`
pub fn tag_str(id: &[u8; 4]) -> String {
    id.iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
        .collect()
}

/// Sequential reader over chunk headers and payloads.
///
/// Tracks the absolute byte position so callers can record where a payload
/// starts without requiring `Seek` on the underlying stream.
pub struct ChunkScanner<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ChunkScanner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Absolute offset of the next unread byte
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read the next chunk header.
    ///
    /// Returns `Ok(None)` when the stream ends before a full 8-byte header
    /// is available, which callers treat as "no more chunks".
    pub fn read_header(&mut self) -> io::Result<Option<ChunkHeader>> {
        let mut buf = [0u8; CHUNK_HEADER_SIZE];
        let got = self.read_up_to(&mut buf)?;
        if got < CHUNK_HEADER_SIZE {
            return Ok(None);
        }
        Ok(Some(ChunkHeader {
            id: [buf[0], buf[1], buf[2], buf[3]],
            size: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        }))
    }

    /// Fill `buf` completely or fail with `UnexpectedEof`
    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_tag(&mut self) -> io::Result<[u8; 4]> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read as many bytes as are available, up to `buf.len()`.
    ///
    /// Only a zero-length read from the underlying stream ends the fill
    /// early, so a short count means end of stream.
    pub fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }

    /// Advance past `n` bytes without keeping them.
    ///
    /// Returns the number of bytes actually skipped, which is less than `n`
    /// only when the stream ended first.
    pub fn skip(&mut self, n: u64) -> io::Result<u64> {
        let skipped = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        self.position += skipped;
        Ok(skipped)
    }
}
