//! Append-only file logging.
//!
//! Every record becomes one line of the form
//! `<YYYY-MM-DD HH:MM:SS> [<TAG>] - <message>`, using local time. The tag is
//! the record's target when one was given explicitly (`info!(target:
//! "REQUEST", ...)`), otherwise the level name.
//!
//! The file is opened in append mode for every entry and created if it does
//! not exist. Logging never fails from the caller's point of view: if the
//! file cannot be written the problem is reported on stderr and the entry is
//! dropped.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Local};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Name of the log file, relative to the working directory.
pub const LOG_FILE: &str = "myOwnWebServer.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A [`Log`] implementation writing to a single append-only file.
#[derive(Debug)]
pub struct FileLogger {
    path: PathBuf,
    level: LevelFilter,
    // Keeps lines from concurrent connections whole.
    lock: Mutex<()>,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>, level: LevelFilter) -> Self {
        Self {
            path: path.into(),
            level,
            lock: Mutex::new(()),
        }
    }

    /// Append one entry stamped with the current local time.
    pub fn append(&self, tag: &str, message: impl fmt::Display) {
        let line = format_entry(Local::now(), tag, message);
        if let Err(err) = self.try_append(&line) {
            eprintln!(
                "Logging to file {} failed: {err}. Dropped: {line}",
                self.path.display()
            );
        }
    }

    fn try_append(&self, line: &str) -> Result<(), io::Error> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.append(&tag_for(record), record.args());
        }
    }

    fn flush(&self) {}
}

/// Format a single log line, newline included.
///
/// Embedded line breaks are flattened so that one entry is always one line.
pub fn format_entry(time: DateTime<Local>, tag: &str, message: impl fmt::Display) -> String {
    let message = message.to_string().replace(['\r', '\n'], " ");
    format!("{} [{tag}] - {message}\n", time.format(TIMESTAMP_FORMAT))
}

/// Parse the timestamp at the start of a log line.
pub fn parse_timestamp(line: &str) -> Option<chrono::NaiveDateTime> {
    let stamp = line.get(..19)?;
    chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

fn tag_for(record: &Record) -> String {
    let target = record.target();
    // Module paths are the default target; they make poor tags.
    if target.is_empty() || target.contains("::") || target == env!("CARGO_CRATE_NAME") {
        record.level().as_str().to_string()
    } else {
        target.to_string()
    }
}

/// Install a [`FileLogger`] as the global logger.
pub fn init(path: impl Into<PathBuf>, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(FileLogger::new(path, level)))?;
    log::set_max_level(level);
    Ok(())
}
