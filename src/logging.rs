/// Structured logging for the forecast advisory service.
///
/// Provides leveled, source-tagged log output to the console and optionally
/// to a file. Provider failures are classified so that an operator can tell
/// a bad city name apart from a bad credential or a provider outage at a
/// glance.
///
/// Credentials never appear in log lines: callers pass city names and error
/// values here, never the api key or the database url.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl LogLevel {
    /// Parse a configuration string ("debug", "info", "warn", "error").
    /// Unknown values fall back to `Info`.
    pub fn from_config(s: &str) -> LogLevel {
        match s.to_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "warn" | "warning" => LogLevel::Warning,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

// ---------------------------------------------------------------------------
// Data Source Types
// ---------------------------------------------------------------------------

/// Which subsystem a log line originates from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// The weather provider HTTP API.
    Provider,
    /// The persistence store.
    Database,
    /// The service itself (config, startup, pipeline control).
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Provider => write!(f, "OWM"),
            DataSource::Database => write!(f, "DB"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - e.g. a city name the provider does not know.
    Expected,
    /// Unexpected failure - bad credential, provider outage, API change.
    Unexpected,
    /// Unknown - cannot determine from the error alone.
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>) {
        let logger = Logger { min_level, log_file };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    /// Log a message with the global logger
    fn log(&self, level: LogLevel, source: &DataSource, city: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let city_part = city.map(|c| format!(" [{}]", c)).unwrap_or_default();
        let log_entry = format!("{} {} {}{}: {}", timestamp, level, source, city_part, message);

        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
            LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    Logger::init(min_level, log_file.map(String::from));
}

/// Log a general informational message
pub fn info(source: DataSource, city: Option<&str>, message: &str) {
    with_logger(|l| l.log(LogLevel::Info, &source, city, message));
}

/// Log a warning message
pub fn warn(source: DataSource, city: Option<&str>, message: &str) {
    with_logger(|l| l.log(LogLevel::Warning, &source, city, message));
}

/// Log an error message
pub fn error(source: DataSource, city: Option<&str>, message: &str) {
    with_logger(|l| l.log(LogLevel::Error, &source, city, message));
}

/// Log a debug message
pub fn debug(source: DataSource, city: Option<&str>, message: &str) {
    with_logger(|l| l.log(LogLevel::Debug, &source, city, message));
}

fn with_logger(f: impl FnOnce(&Logger)) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            f(logger);
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a provider fetch failure.
///
/// 404 means the provider does not know the city — an expected, user-fixable
/// condition. 401 means a rejected credential; 5xx means the provider is in
/// trouble; both need operator attention. Decode errors suggest an API
/// change on the provider side.
pub fn classify_provider_failure(err: &FetchError) -> FailureType {
    match err {
        FetchError::Http(404) => FailureType::Expected,
        FetchError::Http(401) | FetchError::Http(403) => FailureType::Unexpected,
        FetchError::Http(code) if *code >= 500 => FailureType::Unexpected,
        FetchError::Http(_) => FailureType::Unknown,
        FetchError::Decode(_) => FailureType::Unexpected,
        FetchError::Network(_) => FailureType::Unknown,
    }
}

/// Log a provider fetch failure with automatic classification.
pub fn log_provider_failure(city: &str, err: &FetchError) {
    let failure_type = classify_provider_failure(err);
    let message = format!("fetch failed [{}]: {}", failure_type, err);

    match failure_type {
        FailureType::Expected => warn(DataSource::Provider, Some(city), &message),
        FailureType::Unexpected => error(DataSource::Provider, Some(city), &message),
        FailureType::Unknown => warn(DataSource::Provider, Some(city), &message),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
