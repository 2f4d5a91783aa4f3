//! In-app logging with an optional file sink
//!
//! Components log through the shared [`Logger`] so entries show up in the
//! Logs dialog. When file logging is enabled in the config, entries are also
//! appended to a log file under the XDG data directory, and the `log` crate
//! facade is bridged into the same sinks via a fern dispatch.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    enabled: bool,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl Logger {
    /// In-memory only logger with file logging disabled
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            enabled: false,
            file_writer: None,
        }
    }

    /// Build a logger from the config's logging.enabled flag
    ///
    /// When enabled, a buffered append writer is opened on the log file under
    /// the XDG data directory. In-memory logging works either way.
    pub fn from_config(enabled: bool) -> Result<Self> {
        let file_writer = if enabled {
            let path = Self::get_log_file_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(Arc::new(Mutex::new(BufWriter::new(file))))
        } else {
            None
        };

        Ok(Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            enabled,
            file_writer,
        })
    }

    /// Whether file logging was requested in the config
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a file writer is attached
    pub fn has_file_writer(&self) -> bool {
        self.file_writer.is_some()
    }

    /// Access the underlying file writer, mainly for flushing
    pub fn file_writer(&self) -> Option<Arc<Mutex<BufWriter<File>>>> {
        self.file_writer.clone()
    }

    /// Log file location: `<data_dir>/usher/usher.log`
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("usher").join("usher.log"))
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Some(ref writer) = self.file_writer {
            if let Ok(mut writer) = writer.lock() {
                let _ = writeln!(writer, "{}", formatted_message);
            }
        }

        if let Ok(mut logs) = self.logs.lock() {
            logs.push(formatted_message);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            // Reverse to show newest logs first (descending order by timestamp)
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Route `log` crate macros into this logger
    ///
    /// Installs a fern dispatch as the global logger so `log::info!` and
    /// friends land in the same in-memory buffer and file sink. Safe to call
    /// once per process; a second call fails because the global logger is
    /// already set, which callers may ignore.
    pub fn install_as_global(&self) -> Result<(), fern::InitError> {
        let sink = self.clone();
        fern::Dispatch::new()
            .format(|out, message, record| out.finish(format_args!("{} {}", record.level(), message)))
            .level(log::LevelFilter::Info)
            .chain(fern::Output::call(move |record| {
                sink.log(format!("{}", record.args()));
            }))
            .apply()?;
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
