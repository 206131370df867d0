//! WAVE container reader for IMA-ADPCM streams
//!
//! Walks the RIFF chunk list up to the `data` chunk and produces a
//! `WavInfo`: the validated format, the optional `fact` sample count and the
//! location of the compressed payload. The reader stops with the scanner
//! positioned at the first payload byte so decoding can continue streaming
//! from the same handle.
//!
//! Tolerated anomalies:
//! - `fmt ` extension fields missing from a short chunk default to zero
//! - `fact` chunks smaller than 4 bytes are skipped
//! - any chunk other than `fmt `, `fact` and `data` is skipped

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use super::decoder::{FormatError, TranscodeError, TranscodeResult};
use super::formats::{
    FactInfo, FormatDescriptor, WaveFormatHeader, FMT_BASE_SIZE, WAVE_FORMAT_IMA_ADPCM,
};
use super::riff::{tag_str, ChunkScanner, DATA_ID, FACT_ID, FMT_ID, RIFF_ID, WAVE_ID};

/// Everything learned from the container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub format: FormatDescriptor,
    pub fact: FactInfo,
    /// Absolute offset of the first `data` payload byte
    pub data_offset: u64,
    /// Declared size of the `data` payload
    pub data_size: u32,
}

impl WavInfo {
    /// Samples per channel the stream should decode to.
    ///
    /// The `fact` count when present and nonzero, otherwise whole blocks
    /// times samples per block.
    pub fn total_samples(&self) -> u64 {
        match self.fact.authoritative() {
            Some(n) => n as u64,
            None => {
                let blocks = self.data_size as u64 / self.format.block_align() as u64;
                blocks * self.format.samples_per_block() as u64
            }
        }
    }

    /// Playing time in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.format.sample_rate() == 0 {
            return 0.0;
        }
        self.total_samples() as f64 / self.format.sample_rate() as f64
    }
}

/// Scanning state; each step consumes input and moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectRiff,
    ExpectWave,
    ExpectFmt,
    ParseFmtExtension { base: WaveFormatHeader, declared: u32 },
    ScanningChunks { format: FormatDescriptor },
    Found(WavInfo),
}

/// Drives a `ChunkScanner` through the WAVE header
pub struct ContainerReader<'a, R> {
    scanner: &'a mut ChunkScanner<R>,
    fact: FactInfo,
}

impl<'a, R: Read> ContainerReader<'a, R> {
    pub fn new(scanner: &'a mut ChunkScanner<R>) -> Self {
        Self {
            scanner,
            fact: FactInfo::default(),
        }
    }

    /// Run the state machine to completion
    pub fn read_info(mut self) -> TranscodeResult<WavInfo> {
        let mut state = State::ExpectRiff;
        loop {
            state = match state {
                State::ExpectRiff => self.expect_riff()?,
                State::ExpectWave => self.expect_wave()?,
                State::ExpectFmt => self.expect_fmt()?,
                State::ParseFmtExtension { base, declared } => {
                    self.parse_fmt_extension(base, declared)?
                }
                State::ScanningChunks { format } => self.scan_chunks(format)?,
                State::Found(info) => return Ok(info),
            };
        }
    }

    fn expect_riff(&mut self) -> TranscodeResult<State> {
        match self.scanner.read_header()? {
            Some(header) if header.is(&RIFF_ID) => {
                log::debug!("RIFF chunk, size: {}", header.size);
                Ok(State::ExpectWave)
            }
            _ => Err(FormatError::NotRiff.into()),
        }
    }

    fn expect_wave(&mut self) -> TranscodeResult<State> {
        let tag = self
            .scanner
            .read_tag()
            .map_err(|e| eof_as(e, FormatError::NotWave))?;
        if tag != WAVE_ID {
            return Err(FormatError::NotWave.into());
        }
        Ok(State::ExpectFmt)
    }

    fn expect_fmt(&mut self) -> TranscodeResult<State> {
        let header = match self.scanner.read_header()? {
            Some(h) if h.is(&FMT_ID) => h,
            _ => return Err(FormatError::MissingFmt.into()),
        };
        log::debug!("fmt chunk: {}", header);
        if header.size < FMT_BASE_SIZE {
            return Err(FormatError::FmtTooSmall(header.size).into());
        }

        let mut base = [0u8; FMT_BASE_SIZE as usize];
        self.scanner
            .read_exact(&mut base)
            .map_err(|e| eof_as(e, FormatError::Truncated("fmt")))?;
        Ok(State::ParseFmtExtension {
            base: WaveFormatHeader::from_base_bytes(&base),
            declared: header.size,
        })
    }

    fn parse_fmt_extension(
        &mut self,
        mut header: WaveFormatHeader,
        declared: u32,
    ) -> TranscodeResult<State> {
        if header.format_tag != WAVE_FORMAT_IMA_ADPCM {
            log::error!("Unsupported audio format tag: 0x{:04X}", header.format_tag);
            return Err(FormatError::UnsupportedFormat(header.format_tag).into());
        }

        let mut consumed = FMT_BASE_SIZE;
        if declared - consumed >= 2 {
            header.cb_size = self
                .scanner
                .read_u16()
                .map_err(|e| eof_as(e, FormatError::Truncated("fmt")))?;
            consumed += 2;
        } else {
            log::warn!(
                "ADPCM fmt extension (cbSize) too small: expected 2 bytes, found {}",
                declared - consumed
            );
        }

        if header.cb_size >= 2 {
            if declared - consumed >= 2 {
                header.valid_bits_per_sample = self
                    .scanner
                    .read_u16()
                    .map_err(|e| eof_as(e, FormatError::Truncated("fmt")))?;
                consumed += 2;
            } else {
                log::warn!(
                    "ADPCM fmt extension (validBitsPerSample) too small: expected 2 bytes, found {}",
                    declared - consumed
                );
            }
        }

        let extra = declared - consumed;
        if extra > 0 {
            self.scanner.skip(extra as u64)?;
            log::debug!("Skipped {} extra bytes in fmt chunk", extra);
        }

        let format = FormatDescriptor::new(header)?;
        Ok(State::ScanningChunks { format })
    }

    fn scan_chunks(&mut self, format: FormatDescriptor) -> TranscodeResult<State> {
        while let Some(header) = self.scanner.read_header()? {
            log::debug!("Found chunk: {}", header);
            match header.id {
                DATA_ID => {
                    if header.size == 0 {
                        log::error!("data chunk is empty");
                        return Err(FormatError::NoDataChunk.into());
                    }
                    return Ok(State::Found(WavInfo {
                        format,
                        fact: self.fact,
                        data_offset: self.scanner.position(),
                        data_size: header.size,
                    }));
                }
                FACT_ID if header.size >= 4 => {
                    let samples = self
                        .scanner
                        .read_u32()
                        .map_err(|e| eof_as(e, FormatError::Truncated("fact")))?;
                    self.fact = FactInfo::new(samples);
                    self.scanner.skip(header.size as u64 - 4)?;
                }
                FACT_ID => {
                    log::warn!(
                        "fact chunk too small ({} bytes), expected at least 4",
                        header.size
                    );
                    self.scanner.skip(header.size as u64)?;
                }
                other => {
                    log::debug!("Skipping chunk '{}'", tag_str(&other));
                    self.scanner.skip(header.size as u64)?;
                }
            }
        }
        Err(FormatError::NoDataChunk.into())
    }
}

/// Map a short read onto a container error, keeping real I/O failures
fn eof_as(err: io::Error, format_err: FormatError) -> TranscodeError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        format_err.into()
    } else {
        err.into()
    }
}

/// Read the container header from a stream
pub fn probe<R: Read>(reader: R) -> TranscodeResult<WavInfo> {
    let mut scanner = ChunkScanner::new(reader);
    ContainerReader::new(&mut scanner).read_info()
}

/// Read the container header of a file on disk
pub fn probe_file(path: &Path) -> TranscodeResult<WavInfo> {
    let file = File::open(path)?;
    probe(BufReader::new(file))
}

/// True when the chunk right after `WAVE` is a `fmt ` declaring IMA-ADPCM.
///
/// Only looks at the format tag; the rest of the header is not validated.
pub fn is_ima_adpcm<R: Read>(reader: R) -> io::Result<bool> {
    let mut scanner = ChunkScanner::new(reader);
    match scanner.read_header()? {
        Some(h) if h.is(&RIFF_ID) => {}
        _ => return Ok(false),
    }
    let mut tag = [0u8; 4];
    if scanner.read_up_to(&mut tag)? < 4 || tag != WAVE_ID {
        return Ok(false);
    }
    match scanner.read_header()? {
        Some(h) if h.is(&FMT_ID) && h.size >= 2 => {}
        _ => return Ok(false),
    }
    let mut format_tag = [0u8; 2];
    if scanner.read_up_to(&mut format_tag)? < 2 {
        return Ok(false);
    }
    Ok(u16::from_le_bytes(format_tag) == WAVE_FORMAT_IMA_ADPCM)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sound::decoder::ErrorKind;
    use crate::sound::formats::WAVE_FORMAT_PCM;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::io::Cursor;

    /// Build a synthetic WAVE file for testing.
    pub(crate) struct WavBuilder {
        riff_id: [u8; 4],
        wave_id: [u8; 4],
        format_tag: u16,
        channels: u16,
        sample_rate: u32,
        block_align: u16,
        /// Raw bytes appended after the 16-byte base record
        fmt_extension: Vec<u8>,
        /// Overrides the declared fmt size when set
        fmt_declared: Option<u32>,
        fact: Option<Vec<u8>>,
        chunks_before_fmt: Vec<([u8; 4], Vec<u8>)>,
        extra_chunks: Vec<([u8; 4], Vec<u8>)>,
        data: Option<Vec<u8>>,
        data_declared: Option<u32>,
    }

    impl WavBuilder {
        pub(crate) fn new() -> Self {
            Self {
                riff_id: RIFF_ID,
                wave_id: WAVE_ID,
                format_tag: WAVE_FORMAT_IMA_ADPCM,
                channels: 1,
                sample_rate: 8000,
                block_align: 256,
                fmt_extension: vec![0x02, 0x00, 0xf9, 0x01], // cbSize = 2, 505 samples
                fmt_declared: None,
                fact: None,
                chunks_before_fmt: Vec::new(),
                extra_chunks: Vec::new(),
                data: Some(vec![0u8; 256]),
                data_declared: None,
            }
        }

        pub(crate) fn riff_id(mut self, id: [u8; 4]) -> Self {
            self.riff_id = id;
            self
        }

        pub(crate) fn wave_id(mut self, id: [u8; 4]) -> Self {
            self.wave_id = id;
            self
        }

        pub(crate) fn format_tag(mut self, tag: u16) -> Self {
            self.format_tag = tag;
            self
        }

        pub(crate) fn channels(mut self, ch: u16) -> Self {
            self.channels = ch;
            self
        }

        pub(crate) fn sample_rate(mut self, rate: u32) -> Self {
            self.sample_rate = rate;
            self
        }

        pub(crate) fn block_align(mut self, align: u16) -> Self {
            self.block_align = align;
            self
        }

        pub(crate) fn fmt_extension(mut self, ext: Vec<u8>) -> Self {
            self.fmt_extension = ext;
            self
        }

        pub(crate) fn fmt_declared(mut self, size: u32) -> Self {
            self.fmt_declared = Some(size);
            self
        }

        pub(crate) fn fact_samples(mut self, samples: u32) -> Self {
            self.fact = Some(samples.to_le_bytes().to_vec());
            self
        }

        pub(crate) fn fact_raw(mut self, payload: Vec<u8>) -> Self {
            self.fact = Some(payload);
            self
        }

        pub(crate) fn chunk_before_fmt(mut self, id: [u8; 4], payload: Vec<u8>) -> Self {
            self.chunks_before_fmt.push((id, payload));
            self
        }

        pub(crate) fn extra_chunk(mut self, id: [u8; 4], payload: Vec<u8>) -> Self {
            self.extra_chunks.push((id, payload));
            self
        }

        pub(crate) fn data(mut self, data: Vec<u8>) -> Self {
            self.data = Some(data);
            self
        }

        pub(crate) fn data_declared(mut self, size: u32) -> Self {
            self.data_declared = Some(size);
            self
        }

        pub(crate) fn no_data(mut self) -> Self {
            self.data = None;
            self
        }

        fn push_chunk(out: &mut Vec<u8>, id: &[u8; 4], declared: u32, payload: &[u8]) {
            out.extend_from_slice(id);
            out.extend_from_slice(&declared.to_le_bytes());
            out.extend_from_slice(payload);
        }

        pub(crate) fn build(self) -> Vec<u8> {
            let mut body = Vec::new();
            body.extend_from_slice(&self.wave_id);

            for (id, payload) in &self.chunks_before_fmt {
                Self::push_chunk(&mut body, id, payload.len() as u32, payload);
            }

            let mut fmt = Vec::new();
            fmt.extend_from_slice(&self.format_tag.to_le_bytes());
            fmt.extend_from_slice(&self.channels.to_le_bytes());
            fmt.extend_from_slice(&self.sample_rate.to_le_bytes());
            let byte_rate = self.sample_rate * self.block_align as u32 / 505;
            fmt.extend_from_slice(&byte_rate.to_le_bytes());
            fmt.extend_from_slice(&self.block_align.to_le_bytes());
            fmt.extend_from_slice(&4u16.to_le_bytes());
            fmt.extend_from_slice(&self.fmt_extension);
            let fmt_declared = self.fmt_declared.unwrap_or(fmt.len() as u32);
            Self::push_chunk(&mut body, &FMT_ID, fmt_declared, &fmt);

            if let Some(ref fact) = self.fact {
                Self::push_chunk(&mut body, &FACT_ID, fact.len() as u32, fact);
            }

            for (id, payload) in &self.extra_chunks {
                Self::push_chunk(&mut body, id, payload.len() as u32, payload);
            }

            if let Some(ref data) = self.data {
                let declared = self.data_declared.unwrap_or(data.len() as u32);
                Self::push_chunk(&mut body, &DATA_ID, declared, data);
            }

            let mut file = Vec::new();
            file.extend_from_slice(&self.riff_id);
            file.extend_from_slice(&(body.len() as u32).to_le_bytes());
            file.extend_from_slice(&body);
            file
        }
    }

    fn probe_bytes(data: Vec<u8>) -> TranscodeResult<WavInfo> {
        probe(Cursor::new(data))
    }

    fn format_err(result: TranscodeResult<WavInfo>) -> FormatError {
        match result {
            Err(TranscodeError::Format(e)) => e,
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_probe_valid_mono() {
        let info = probe_bytes(WavBuilder::new().fact_samples(1000).build()).unwrap();
        assert_eq!(info.format.channels(), 1);
        assert_eq!(info.format.sample_rate(), 8000);
        assert_eq!(info.format.block_align(), 256);
        assert_eq!(info.format.samples_per_block(), 505);
        assert_eq!(info.format.cb_size(), 2);
        assert_eq!(info.format.valid_bits_per_sample(), 505);
        assert_eq!(info.fact.authoritative(), Some(1000));
        assert_eq!(info.data_size, 256);
        // RIFF(8) + WAVE(4) + fmt(8 + 20) + fact(8 + 4) + data header(8)
        assert_eq!(info.data_offset, 60);
        assert_eq!(info.total_samples(), 1000);
    }

    #[test]
    fn test_probe_stereo() {
        let info = probe_bytes(
            WavBuilder::new()
                .channels(2)
                .sample_rate(44100)
                .block_align(2048)
                .data(vec![0u8; 4096])
                .build(),
        )
        .unwrap();
        assert_eq!(info.format.channels(), 2);
        assert_eq!(info.format.samples_per_block(), 2041);
        assert_eq!(info.total_samples(), 2 * 2041);
    }

    #[test]
    fn test_total_samples_fallback_without_fact() {
        let info = probe_bytes(WavBuilder::new().data(vec![0u8; 256 * 3 + 100]).build()).unwrap();
        assert_eq!(info.fact.authoritative(), None);
        assert_eq!(info.total_samples(), 3 * 505);
    }

    #[test]
    fn test_zero_fact_falls_back() {
        let info = probe_bytes(WavBuilder::new().fact_samples(0).build()).unwrap();
        assert_eq!(info.fact.samples_per_channel, Some(0));
        assert_eq!(info.total_samples(), 505);
    }

    #[test]
    fn test_duration() {
        let info = probe_bytes(WavBuilder::new().fact_samples(4000).build()).unwrap();
        assert!((info.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[rstest]
    #[case(WavBuilder::new().riff_id(*b"RIFX"), FormatError::NotRiff)]
    #[case(WavBuilder::new().riff_id(*b"\0\0\0\0"), FormatError::NotRiff)]
    #[case(WavBuilder::new().wave_id(*b"AVI "), FormatError::NotWave)]
    #[case(WavBuilder::new().chunk_before_fmt(*b"LIST", vec![0; 4]), FormatError::MissingFmt)]
    #[case(WavBuilder::new().fmt_extension(vec![]).fmt_declared(14), FormatError::FmtTooSmall(14))]
    #[case(WavBuilder::new().format_tag(WAVE_FORMAT_PCM), FormatError::UnsupportedFormat(0x0001))]
    #[case(WavBuilder::new().format_tag(0xFFFE), FormatError::UnsupportedFormat(0xFFFE))]
    #[case(WavBuilder::new().no_data(), FormatError::NoDataChunk)]
    #[case(WavBuilder::new().data(vec![]), FormatError::NoDataChunk)]
    #[case(
        WavBuilder::new().block_align(4),
        FormatError::InvalidBlockGeometry { block_align: 4, channels: 1 }
    )]
    #[case(
        WavBuilder::new().channels(0),
        FormatError::InvalidBlockGeometry { block_align: 256, channels: 0 }
    )]
    fn test_probe_rejects(#[case] builder: WavBuilder, #[case] expected: FormatError) {
        assert_eq!(format_err(probe_bytes(builder.build())), expected);
    }

    #[test]
    fn test_empty_input_is_not_riff() {
        assert_eq!(format_err(probe_bytes(Vec::new())), FormatError::NotRiff);
    }

    #[test]
    fn test_truncated_after_riff_is_not_wave() {
        let data = WavBuilder::new().build()[..10].to_vec();
        assert_eq!(format_err(probe_bytes(data)), FormatError::NotWave);
    }

    #[test]
    fn test_truncated_fmt_base() {
        let data = WavBuilder::new().build()[..28].to_vec();
        assert_eq!(format_err(probe_bytes(data)), FormatError::Truncated("fmt"));
    }

    #[test]
    fn test_fmt_without_extension_tolerated() {
        let info = probe_bytes(WavBuilder::new().fmt_extension(vec![]).build()).unwrap();
        assert_eq!(info.format.cb_size(), 0);
        assert_eq!(info.format.valid_bits_per_sample(), 0);
        assert_eq!(info.data_offset, 12 + 8 + 16 + 8);
    }

    #[test]
    fn test_fmt_cb_size_without_valid_bits_tolerated() {
        let info = probe_bytes(WavBuilder::new().fmt_extension(vec![0x02, 0x00]).build()).unwrap();
        assert_eq!(info.format.cb_size(), 2);
        assert_eq!(info.format.valid_bits_per_sample(), 0);
    }

    #[test]
    fn test_fmt_odd_extension_byte_skipped() {
        // 17-byte fmt chunk: one stray byte after the base record
        let info = probe_bytes(WavBuilder::new().fmt_extension(vec![0xAA]).build()).unwrap();
        assert_eq!(info.format.cb_size(), 0);
        assert_eq!(info.data_size, 256);
    }

    #[test]
    fn test_fmt_trailing_bytes_skipped() {
        let ext = vec![0x06, 0x00, 0xf9, 0x01, 0xde, 0xad, 0xbe, 0xef];
        let info = probe_bytes(WavBuilder::new().fmt_extension(ext).build()).unwrap();
        assert_eq!(info.format.cb_size(), 6);
        assert_eq!(info.format.valid_bits_per_sample(), 505);
        assert_eq!(info.data_size, 256);
    }

    #[test]
    fn test_small_cb_size_skips_valid_bits() {
        let ext = vec![0x00, 0x00, 0x34, 0x12];
        let info = probe_bytes(WavBuilder::new().fmt_extension(ext).build()).unwrap();
        assert_eq!(info.format.cb_size(), 0);
        assert_eq!(info.format.valid_bits_per_sample(), 0);
        assert_eq!(info.data_size, 256);
    }

    #[test]
    fn test_small_fact_skipped() {
        let info = probe_bytes(WavBuilder::new().fact_raw(vec![1, 2]).build()).unwrap();
        assert_eq!(info.fact.samples_per_channel, None);
        assert_eq!(info.data_size, 256);
    }

    #[test]
    fn test_large_fact_remainder_skipped() {
        let mut fact = 777u32.to_le_bytes().to_vec();
        fact.extend_from_slice(&[0xff; 5]);
        let info = probe_bytes(WavBuilder::new().fact_raw(fact).build()).unwrap();
        assert_eq!(info.fact.authoritative(), Some(777));
        assert_eq!(info.data_size, 256);
    }

    #[test]
    fn test_truncated_fact() {
        let mut data = WavBuilder::new().fact_samples(1000).no_data().build();
        data.truncate(data.len() - 2);
        assert_eq!(format_err(probe_bytes(data)), FormatError::Truncated("fact"));
    }

    #[test]
    fn test_unknown_chunks_skipped() {
        let info = probe_bytes(
            WavBuilder::new()
                .extra_chunk(*b"LIST", vec![7u8; 26])
                .extra_chunk(*b"junk", vec![0u8; 3])
                .fact_samples(505)
                .build(),
        )
        .unwrap();
        assert_eq!(info.data_size, 256);
        assert_eq!(info.fact.authoritative(), Some(505));
        // RIFF(12) + fmt(28) + fact(12) + LIST(34) + junk(11) + data header(8)
        assert_eq!(info.data_offset, 12 + 28 + 12 + 34 + 11 + 8);
    }

    #[test]
    fn test_scanner_positioned_at_payload() {
        let data = WavBuilder::new().data(vec![0xAB; 256]).build();
        let mut scanner = ChunkScanner::new(Cursor::new(data));
        let info = ContainerReader::new(&mut scanner).read_info().unwrap();
        assert_eq!(scanner.position(), info.data_offset);
        let mut first = [0u8; 1];
        scanner.read_exact(&mut first).unwrap();
        assert_eq!(first[0], 0xAB);
    }

    #[test]
    fn test_io_error_kind_preserved() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
        }
        assert_eq!(probe(Broken).unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn test_is_ima_adpcm() {
        assert!(is_ima_adpcm(Cursor::new(WavBuilder::new().build())).unwrap());
        assert!(!is_ima_adpcm(Cursor::new(
            WavBuilder::new().chunk_before_fmt(*b"JUNK", vec![0; 6]).build()
        ))
        .unwrap());
        assert!(!is_ima_adpcm(Cursor::new(
            WavBuilder::new().format_tag(WAVE_FORMAT_PCM).build()
        ))
        .unwrap());
        assert!(!is_ima_adpcm(Cursor::new(b"RIFF".to_vec())).unwrap());
        assert!(!is_ima_adpcm(Cursor::new(Vec::new())).unwrap());
    }

    #[rstest]
    #[case(WavBuilder::new())]
    #[case(WavBuilder::new().chunk_before_fmt(*b"JUNK", vec![0; 6]))]
    #[case(WavBuilder::new().chunk_before_fmt(*b"LIST", vec![0; 4]))]
    #[case(WavBuilder::new().format_tag(WAVE_FORMAT_PCM))]
    fn test_is_ima_adpcm_agrees_with_probe(#[case] builder: WavBuilder) {
        let bytes = builder.build();
        let accepted = probe(Cursor::new(bytes.clone())).is_ok();
        assert_eq!(is_ima_adpcm(Cursor::new(bytes)).unwrap(), accepted);
    }

    #[test]
    fn test_probe_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = probe_file(&dir.path().join("missing.wav")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    proptest! {
        #[test]
        fn prop_unknown_chunk_skipped_exactly(size in 0usize..600, fill in any::<u8>()) {
            let data = WavBuilder::new()
                .extra_chunk(*b"zzzz", vec![fill; size])
                .build();
            let info = probe_bytes(data).unwrap();
            prop_assert_eq!(info.data_offset, (12 + 28 + 8 + size + 8) as u64);
            prop_assert_eq!(info.data_size, 256);
        }
    }
}
