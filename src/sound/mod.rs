//! IMA-ADPCM WAVE decoding
//!
//! # Architecture
//!
//! - `riff` walks generic chunk headers over any `Read`
//! - `wav` drives the scanner through the WAVE header and yields `WavInfo`
//! - `formats` validates the `fmt ` record and derives block geometry
//! - `BlockCodec` decodes one compressed block; `ImaAdpcmCodec` is the default
//! - `transcode` streams blocks through the codec into a PCM WAVE written
//!   by `pcm_writer`

pub mod decoder;
pub mod formats;
pub mod ima_adpcm;
pub mod pcm_writer;
pub mod riff;
pub mod transcode;
pub mod wav;

pub use decoder::{BlockCodec, ErrorKind, FormatError, TranscodeError, TranscodeResult};
pub use formats::{samples_per_block, FactInfo, FormatDescriptor, PcmFormat};
pub use ima_adpcm::ImaAdpcmCodec;
pub use transcode::{
    decode_to_pcm, transcode, transcode_file, ProgressSink, TranscodeOptions, TranscodeReport,
};
pub use wav::{is_ima_adpcm, probe, probe_file, WavInfo};
