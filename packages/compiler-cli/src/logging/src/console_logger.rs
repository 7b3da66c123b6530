// Console Logger
//
// Logger that writes to the terminal. Everything goes to stderr so that
// converted output printed to stdout stays clean.

use super::logger::{LogLevel, Logger};

/// Console logger.
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// `--verbose` wins over `--quiet`.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        let level = if verbose {
            LogLevel::Debug
        } else if quiet {
            LogLevel::Error
        } else {
            LogLevel::Info
        };
        Self::new(level)
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        if self.is_enabled(LogLevel::Debug) {
            eprintln!("[DEBUG] {}", msg);
        }
    }

    fn info(&self, msg: &str) {
        if self.is_enabled(LogLevel::Info) {
            eprintln!("[INFO] {}", msg);
        }
    }

    fn warn(&self, msg: &str) {
        if self.is_enabled(LogLevel::Warn) {
            eprintln!("[WARN] {}", msg);
        }
    }

    fn error(&self, msg: &str) {
        if self.is_enabled(LogLevel::Error) {
            eprintln!("[ERROR] {}", msg);
        }
    }
}
