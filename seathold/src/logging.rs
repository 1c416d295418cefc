//! Logging infrastructure for the seathold library.
//!
//! Library code reports through the `log` facade macros. This module
//! provides the stderr backend used by the CLI: a [`Logger`] with three
//! verbosity levels that can be installed as the global `log` logger.

use std::env;
use std::fmt;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable that selects the log level when no flag is given.
pub const LOG_MODE_ENV: &str = "SEATHOLD_LOG_MODE";

/// How much the stderr backend prints.
///
/// Ordered so that a chattier level compares greater.
///
/// # Examples
///
/// ```
/// use seathold::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing but command output.
    Quiet,
    /// Warnings and errors.
    Normal,
    /// Everything down to debug, including hold and expiry events.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => f.write_str("quiet"),
            Self::Normal => f.write_str("normal"),
            Self::Verbose => f.write_str("verbose"),
        }
    }
}

impl LogLevel {
    /// Reads a level name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Any name other than `quiet`, `normal` or `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seathold::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse(" Verbose "), Ok(LogLevel::Verbose));
    /// assert!(LogLevel::parse("trace").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            other => Err(format!("unknown log mode '{other}'")),
        }
    }

    /// The `log` crate filter matching this level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

/// Writes `log` records to stderr, filtered by a [`LogLevel`].
///
/// # Examples
///
/// ```
/// use seathold::{LogLevel, Logger};
/// use log::Log;
///
/// let logger = Logger::new(LogLevel::Normal);
/// let warn = log::Metadata::builder().level(log::Level::Warn).build();
/// let info = log::Metadata::builder().level(log::Level::Info).build();
/// assert!(logger.enabled(&warn));
/// assert!(!logger.enabled(&info));
/// ```
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Logger printing at `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Level this logger filters at.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Installs this logger as the global `log` backend.
    ///
    /// # Errors
    ///
    /// Fails if a global logger has already been installed.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let filter = self.level.filter();
        log::set_logger(Box::leak(Box::new(self)))?;
        log::set_max_level(filter);
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Picks a logger level from command-line flags, falling back to
/// `SEATHOLD_LOG_MODE` and then to [`LogLevel::Normal`].
///
/// `verbose` beats `quiet` when both are set. An unreadable
/// `SEATHOLD_LOG_MODE` is ignored.
///
/// # Examples
///
/// ```
/// use seathold::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let level = match (verbose, quiet) {
        (true, _) => LogLevel::Verbose,
        (false, true) => LogLevel::Quiet,
        (false, false) => env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| LogLevel::parse(&mode).ok())
            .unwrap_or(LogLevel::Normal),
    };
    Logger::new(level)
}
