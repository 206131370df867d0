use std::path::{Path, PathBuf};

use crate::config::{parse_log_level, Options};
use crate::logging::LogLevel;
use anyhow::{Context, Result};
use clap::Parser;

/// Convert IMA-ADPCM WAVE files to 16-bit PCM WAVE
#[derive(Parser, Debug, Default)]
#[command(name = "adpcm2wav")]
#[command(version)]
#[command(about = "Convert IMA-ADPCM WAVE files to 16-bit PCM WAVE", long_about = None)]
pub struct Cli {
    /// IMA-ADPCM WAVE file to decode
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT stem>.pcm.wav next to the input)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Configuration directory path
    #[arg(short, long, value_name = "CONFIGDIR")]
    pub configdir: Option<String>,

    /// Log file path
    #[arg(short, long, value_name = "FILE")]
    pub logfile: Option<String>,

    /// Log level (0-6)
    #[arg(long, value_name = "LEVEL")]
    pub loglevel: Option<String>,

    /// Log debug messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not display progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip syncing the output file to disk
    #[arg(long = "no-sync")]
    pub no_sync: bool,

    /// Write every decoded sample, ignoring the fact chunk count
    #[arg(long = "no-trim")]
    pub no_trim: bool,

    /// Reuse an existing decoded output instead of decoding again
    #[arg(long = "skip-existing")]
    pub skip_existing: bool,

    /// Keep the partial output file when decoding fails
    #[arg(long = "keep-partial")]
    pub keep_partial: bool,

    /// Print the input format and exit without decoding
    #[arg(long)]
    pub probe: bool,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref config_dir) = self.configdir {
            opts.config_dir = Some(config_dir.clone());
        }

        if let Some(ref log_file) = self.logfile {
            opts.log_file = Some(log_file.clone());
        }

        if let Some(ref level) = self.loglevel {
            opts.log_level = Some(parse_log_level(level).context("Invalid --loglevel")?);
        }
        if self.verbose {
            opts.log_level = Some(LogLevel::Debug);
        }

        if self.quiet {
            opts.show_progress = Some(false);
        }
        if self.no_sync {
            opts.sync_output = Some(false);
        }
        if self.no_trim {
            opts.trim_to_fact = Some(false);
        }
        if self.skip_existing {
            opts.skip_existing = Some(true);
        }
        if self.keep_partial {
            opts.keep_partial = Some(true);
        }

        Ok(opts)
    }

    /// Output path, derived from the input when not given
    pub fn output_path(&self) -> PathBuf {
        match self.output {
            Some(ref path) => path.clone(),
            None => default_output_path(&self.input),
        }
    }
}

/// `<dir>/<stem>.pcm.wav` for an input at `<dir>/<stem>.<ext>`
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}.pcm.wav", stem))
}
