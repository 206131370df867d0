//! Streaming IMA-ADPCM to PCM transcoder
//!
//! Reads one compressed block at a time, hands it to a `BlockCodec` and
//! appends the decoded samples to the output. The output header is written
//! as a placeholder first and patched once the payload size is known.
//!
//! Memory use is bounded by one input block and one decoded block,
//! independent of file size.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use super::decoder::{BlockCodec, TranscodeError, TranscodeResult};
use super::ima_adpcm::ImaAdpcmCodec;
use super::pcm_writer;
use super::riff::ChunkScanner;
use super::wav::{ContainerReader, WavInfo};

/// Receiver of whole-percent progress updates.
///
/// Called synchronously from the transcode loop, once per increase.
pub trait ProgressSink {
    fn on_progress(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn on_progress(&mut self, percent: u8) {
        self(percent)
    }
}

/// Behavior switches for a transcode run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// `sync_all` the output file after the header patch
    pub sync_output: bool,
    /// Stop writing once a nonzero `fact` sample count is reached.
    ///
    /// On by default; when off, every decoded frame is written.
    pub trim_to_fact: bool,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            sync_output: true,
            trim_to_fact: true,
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscodeReport {
    pub info: WavInfo,
    /// Blocks handed to the codec
    pub blocks: u64,
    /// Compressed payload bytes read
    pub bytes_consumed: u64,
    /// Sample-frames written to the output
    pub frames_written: u64,
    /// Value of the output `data` size field
    pub data_size: u32,
}

impl TranscodeReport {
    /// Frames the container said to expect
    pub fn expected_frames(&self) -> u64 {
        self.info.total_samples()
    }

    /// True when the compressed payload ended before its declared size
    pub fn truncated(&self) -> bool {
        self.bytes_consumed < self.info.data_size as u64
    }
}

// Stack staging for little-endian serialization of decoded samples
const STAGING_BYTES: usize = 512;

fn write_samples<W: Write>(output: &mut W, samples: &[i16]) -> std::io::Result<()> {
    let mut staging = [0u8; STAGING_BYTES];
    for chunk in samples.chunks(STAGING_BYTES / 2) {
        for (dst, sample) in staging.chunks_exact_mut(2).zip(chunk) {
            dst.copy_from_slice(&sample.to_le_bytes());
        }
        output.write_all(&staging[..chunk.len() * 2])?;
    }
    Ok(())
}

/// Mutable state of one run
#[derive(Debug)]
struct TranscodeSession {
    declared: u64,
    consumed: u64,
    last_progress: u8,
    blocks: u64,
    frames_written: u64,
    frame_limit: Option<u64>,
}

impl TranscodeSession {
    fn new(declared: u64, frame_limit: Option<u64>) -> Self {
        Self {
            declared,
            consumed: 0,
            last_progress: 0,
            blocks: 0,
            frames_written: 0,
            frame_limit,
        }
    }

    fn remaining(&self) -> u64 {
        self.declared.saturating_sub(self.consumed)
    }

    /// Account for `bytes` read; returns the new percentage when it grew
    fn advance(&mut self, bytes: usize) -> Option<u8> {
        self.consumed += bytes as u64;
        if self.declared == 0 {
            return None;
        }
        let percent = (self.consumed.min(self.declared) * 100 / self.declared) as u8;
        if percent > self.last_progress {
            self.last_progress = percent;
            Some(percent)
        } else {
            None
        }
    }

    /// How many of `decoded` frames may still be written
    fn admit(&mut self, decoded: usize) -> usize {
        let admitted = match self.frame_limit {
            Some(limit) => (limit.saturating_sub(self.frames_written)).min(decoded as u64) as usize,
            None => decoded,
        };
        self.frames_written += admitted as u64;
        admitted
    }
}

fn alloc_buffer<T: Clone + Default>(len: usize) -> TranscodeResult<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| TranscodeError::Allocation {
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    buf.resize(len, T::default());
    Ok(buf)
}

/// Transcode an IMA-ADPCM WAVE stream into a 16-bit PCM WAVE stream.
///
/// `output` must be positioned at its start. The 44-byte placeholder is
/// written before the input is parsed, so a container error leaves just the
/// placeholder behind. A short final read ends the loop and the header is
/// still patched; a block the codec rejects aborts the run.
pub fn transcode<R, W, C>(
    input: R,
    output: &mut W,
    mut codec: C,
    mut progress: Option<&mut dyn ProgressSink>,
    options: &TranscodeOptions,
) -> TranscodeResult<TranscodeReport>
where
    R: Read,
    W: Write + Seek,
    C: BlockCodec,
{
    pcm_writer::write_placeholder(output)?;

    let mut scanner = ChunkScanner::new(input);
    let info = ContainerReader::new(&mut scanner).read_info()?;
    let format = info.format;
    let channels = format.channels();
    log::debug!(
        "{} stream: {} ch, {} Hz, block align {}, {} samples/block, {} data bytes at offset {}",
        codec.name(),
        channels,
        format.sample_rate(),
        format.block_align(),
        format.samples_per_block(),
        info.data_size,
        info.data_offset
    );
    match info.fact.authoritative() {
        Some(n) => log::debug!("Using fact sample count: {}", n),
        None => log::debug!("No fact sample count, expecting {} frames", info.total_samples()),
    }

    let mut in_buf: Vec<u8> = alloc_buffer(format.block_align())?;
    let mut samples: Vec<i16> = alloc_buffer(format.block_output_len())?;

    let frame_limit = if options.trim_to_fact {
        info.fact.authoritative().map(u64::from)
    } else {
        None
    };
    let mut session = TranscodeSession::new(info.data_size as u64, frame_limit);

    while session.remaining() > 0 {
        let want = session.remaining().min(in_buf.len() as u64) as usize;
        let got = scanner.read_up_to(&mut in_buf[..want])?;
        if got == 0 {
            log::warn!(
                "Data ended after {} of {} declared bytes",
                session.consumed,
                session.declared
            );
            break;
        }
        if got < want {
            log::warn!("Short final block: {} of {} bytes", got, want);
        }

        let decoded = codec.decode_block(&mut samples, &in_buf[..got], channels);
        if decoded == 0 {
            log::error!("{} decode failed at block {}", codec.name(), session.blocks);
            return Err(TranscodeError::Codec {
                block_index: session.blocks,
                bytes: got,
            });
        }
        session.blocks += 1;

        let frames = session.admit(decoded.min(samples.len() / channels));
        write_samples(output, &samples[..frames * channels])?;

        if let Some(percent) = session.advance(got) {
            if let Some(sink) = progress.as_deref_mut() {
                sink.on_progress(percent);
            }
        }
    }

    let expected = info.total_samples();
    if session.frames_written != expected {
        log::warn!(
            "Wrote {} frames, container declares {}",
            session.frames_written,
            expected
        );
    }

    let data_bytes = session.frames_written * channels as u64 * 2;
    let data_size = u32::try_from(data_bytes).unwrap_or_else(|_| {
        log::warn!("PCM payload of {} bytes exceeds the WAVE size field", data_bytes);
        u32::MAX
    });
    pcm_writer::patch(output, format.pcm_format(), data_size)?;

    log::info!(
        "Decoded {} blocks into {} frames ({} bytes)",
        session.blocks,
        session.frames_written,
        data_size
    );

    Ok(TranscodeReport {
        info,
        blocks: session.blocks,
        bytes_consumed: session.consumed,
        frames_written: session.frames_written,
        data_size,
    })
}

/// Transcode `input` into a new file at `output` with the IMA-ADPCM codec.
///
/// The output is created (or truncated) before the input is parsed. On
/// error the file is left in place and closed.
pub fn transcode_file(
    input: &Path,
    output: &Path,
    progress: Option<&mut dyn ProgressSink>,
    options: &TranscodeOptions,
) -> TranscodeResult<TranscodeReport> {
    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);

    let report = match transcode(reader, &mut writer, ImaAdpcmCodec::new(), progress, options) {
        Ok(report) => report,
        Err(e) => {
            // Keep what was produced; the transcode error wins over a flush failure.
            let _ = writer.flush();
            return Err(e);
        }
    };
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    if options.sync_output {
        file.sync_all()?;
    }
    Ok(report)
}

/// Host-facing entry: transcode with default options, reporting only
/// success or failure. Failures are logged.
pub fn decode_to_pcm(input: &Path, output: &Path, progress: Option<&mut dyn ProgressSink>) -> bool {
    match transcode_file(input, output, progress, &TranscodeOptions::default()) {
        Ok(report) => {
            log::debug!(
                "{} -> {}: {} frames",
                input.display(),
                output.display(),
                report.frames_written
            );
            true
        }
        Err(e) => {
            log::error!("Failed to decode {}: {}", input.display(), e);
            false
        }
    }
}
