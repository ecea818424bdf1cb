//! Operator log.
//!
//! Every message is printed to stdout as `[YYYY-MM-DD HH:MM:SS] LEVEL: text`
//! and, when a log file is configured, appended to it. The file is opened,
//! written with a single append and closed for each message, so concurrent
//! runners may interleave lines but never split one.
//!
//! File errors are not fatal: a warning is printed and the run continues.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::LoggingPolicy;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Severity of an operator log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        })
    }
}

/// Console + append-only file log, passed by reference to every component
#[derive(Debug, Clone, Default)]
pub struct Logger {
    /// Log file, if file logging is enabled
    file: Option<PathBuf>,
}

impl Logger {
    /// Console-only logger
    pub fn console() -> Self {
        Self { file: None }
    }

    /// Logger that also appends to `path`
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }

    /// Build from the document's logging policy
    pub fn from_policy(policy: &LoggingPolicy) -> Self {
        if policy.enabled {
            Self::with_file(policy.log_file.clone())
        } else {
            Self::console()
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Write one line to stdout and, if configured, the log file
    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let line = format_line(&timestamp, level, message.as_ref());

        println!("{}", line);

        if let Some(ref path) = self.file {
            if let Err(e) = append_line(path, &line) {
                println!("Warning: Could not write to log file: {}", e);
            }
        }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::Error, message);
    }
}

/// Render a log line without the trailing newline
pub fn format_line(timestamp: &str, level: Level, message: &str) -> String {
    format!("[{}] {}: {}", timestamp, level, message)
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format!("{}\n", line).as_bytes())
}
