use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::logging::LogLevel;
use crate::sound::TranscodeOptions;

/// Name of the config file looked up inside the config directory
pub const CONFIG_FILE_NAME: &str = "adpcm2wav.cfg";

/// Application options that can be set via CLI or config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    // Commandline-only options
    pub config_dir: Option<String>,

    // Commandline and user config options
    pub log_file: Option<String>,
    pub log_level: Option<LogLevel>,
    pub show_progress: Option<bool>,
    pub sync_output: Option<bool>,
    pub trim_to_fact: Option<bool>,
    pub skip_existing: Option<bool>,
    pub keep_partial: Option<bool>,
}

impl Options {
    /// Library options with unset fields at their defaults
    pub fn transcode_options(&self) -> TranscodeOptions {
        let defaults = TranscodeOptions::default();
        TranscodeOptions {
            sync_output: self.sync_output.unwrap_or(defaults.sync_output),
            trim_to_fact: self.trim_to_fact.unwrap_or(defaults.trim_to_fact),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    /// Apply one `key = value` entry from the config file
    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key.to_lowercase().as_str() {
            "loglevel" => self.log_level = Some(parse_log_level(value)?),
            "logfile" => self.log_file = Some(value.to_string()),
            "progress" => self.show_progress = Some(parse_bool(value).context("progress")?),
            "sync" => self.sync_output = Some(parse_bool(value).context("sync")?),
            "trimtofact" => self.trim_to_fact = Some(parse_bool(value).context("trimtofact")?),
            "skipexisting" => {
                self.skip_existing = Some(parse_bool(value).context("skipexisting")?)
            }
            "keeppartial" => self.keep_partial = Some(parse_bool(value).context("keeppartial")?),
            _ => log::warn!("Unknown config key '{}' ignored", key),
        }
        Ok(())
    }
}

/// Split property-file text into `(key, value)` pairs.
///
/// `#` starts a comment anywhere on a line. Lines without `=` are warned
/// about and skipped.
pub fn parse_properties(data: &str) -> Vec<(&str, &str)> {
    let mut entries = Vec::new();
    for line in data.lines() {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                entries.push((key.trim(), value.trim()));
            }
            Some(_) => log::warn!("Value without key"),
            None => log::warn!("Key without value"),
        }
    }
    entries
}

/// Path of the config file for a config directory
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from `adpcm2wav.cfg` in `config_dir`.
///
/// A missing directory or file yields default options.
pub fn load_config(config_dir: &Option<String>) -> Result<Options> {
    let mut opts = Options {
        config_dir: config_dir.clone(),
        ..Options::default()
    };
    let dir = match config_dir {
        Some(dir) => Path::new(dir),
        None => return Ok(opts),
    };

    let path = config_path(dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No config file at {}", path.display());
            return Ok(opts);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    for (key, value) in parse_properties(&text) {
        opts.apply(key, value)
            .with_context(|| format!("Invalid value in {}", path.display()))?;
    }
    Ok(opts)
}

/// Parse a boolean option value
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid boolean: {}. Valid options: true, false, yes, no, 1, 0, on, off", s),
    }
}

/// Parse a log level number (0-6)
pub fn parse_log_level(s: &str) -> Result<LogLevel> {
    let level: i32 = s.trim().parse().context("Invalid log level")?;
    if !(0..=6).contains(&level) {
        anyhow::bail!("Log level out of range (0 to 6)");
    }
    Ok(LogLevel::from_i32(level))
}
