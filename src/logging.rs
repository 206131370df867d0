//! Logging backend for the `log` facade
//!
//! Records go to stderr as `[LEVEL] message` lines and, when a log file is
//! configured, are appended to it as well.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context};

/// Verbosity levels, numbered as in the config file
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Nothing = 0,
    User = 1,
    Error = 2,
    #[default]
    Warning = 3,
    Info = 4,
    Debug = 5,
    All = 6,
}

impl LogLevel {
    /// Create a LogLevel from an integer
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Nothing,
            1 => LogLevel::User,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::All,
            _ => LogLevel::Info,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Filter applied to the `log` facade for this level
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Nothing => log::LevelFilter::Off,
            LogLevel::User | LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::All => log::LevelFilter::Trace,
        }
    }
}

// Optional file sink shared by every record
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

static LOGGER: Logger = Logger;

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.args());
        eprintln!("{}", line);
        write_to_file(&line);
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

fn format_line(level: log::Level, args: &fmt::Arguments) -> String {
    format!("[{}] {}", level, args)
}

fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "{}", line);
        }
    }
}

/// Start appending log lines to `path`, replacing any previous log file
pub fn open_log_file(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let mut guard = LOG_FILE
        .lock()
        .map_err(|_| anyhow!("Log file lock poisoned"))?;
    *guard = Some(file);
    Ok(())
}

/// Stop writing to the log file, if any
pub fn close_log_file() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(mut file) = guard.take() {
            let _ = file.flush();
        }
    }
}

/// Install the logger. Fails if a logger is already installed.
pub fn init(level: LogLevel, log_file: Option<&Path>) -> anyhow::Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow!("Logger already initialized: {}", e))?;
    log::set_max_level(level.to_level_filter());
    if let Some(path) = log_file {
        open_log_file(path)?;
    }
    Ok(())
}
