// adpcm2wav library
// IMA-ADPCM WAVE to 16-bit PCM WAVE transcoding

pub mod cli;
pub mod config;
pub mod ffi;
pub mod logging;
pub mod sound;

pub use cli::Cli;
pub use config::Options;
pub use logging::LogLevel;
pub use sound::{decode_to_pcm, transcode_file, TranscodeError, TranscodeOptions};
