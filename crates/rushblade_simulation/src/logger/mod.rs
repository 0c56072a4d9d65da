//! Global log sink for the simulation.
//!
//! The simulation has no opinion about where log lines end up: a host
//! (headless runner, test harness, engine binding) installs a [`LogPrinter`]
//! once, and every system reports through [`log`], [`log_info`],
//! [`log_warning`] and [`log_error`]. Nothing is printed until a printer is
//! installed.

use once_cell::sync::Lazy;
use parking_lot::Mutex;

static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

/// Severity of a log line. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Destination for log lines.
pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Replace the installed printer.
pub fn set_logger(logger: Box<dyn LogPrinter>) {
    *LOGGER.lock() = Some(logger);
}

/// Install `logger` only if no printer is installed yet.
pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut slot = LOGGER.lock();
    if slot.is_none() {
        *slot = Some(logger);
    }
}

/// Minimum level that reaches the printer.
pub fn set_log_level(level: LogLevel) {
    *LOGGER_LEVEL.lock() = level;
}

pub fn log_level() -> LogLevel {
    *LOGGER_LEVEL.lock()
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }

    // Timestamp is added here so every printer gets the same format.
    if let Some(logger) = LOGGER.lock().as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

/// Prints to stdout.
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

/// Forwards to `tracing`, for hosts that already run a subscriber.
pub struct TracingPrinter;

impl LogPrinter for TracingPrinter {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "rushblade", "{}", message),
            LogLevel::Info => tracing::info!(target: "rushblade", "{}", message),
            LogLevel::Warning => tracing::warn!(target: "rushblade", "{}", message),
            LogLevel::Error => tracing::error!(target: "rushblade", "{}", message),
        }
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
