//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Expose a handle that changes verbosity at runtime
//! - Map `LOG_LEVEL` names to verbosity levels

use thiserror::Error;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
    util::TryInitError, EnvFilter, Registry,
};

/// Error type for logging setup and level changes.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),

    #[error("failed to reload log filter: {0}")]
    Reload(#[from] reload::Error),
}

/// Named verbosity levels accepted in `LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Parse an exact, upper-case level name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARN" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            "OFF" => Some(LogLevel::Off),
            _ => None,
        }
    }

    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

/// Level used when `LOG_LEVEL` is unset or empty.
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Debug;

/// Level used when `LOG_LEVEL` holds an unknown name: below DEBUG, so
/// everything is emitted.
pub const UNRECOGNIZED_LEVEL: LevelFilter = LevelFilter::TRACE;

/// Where a resolved level came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSource {
    Unset,
    Named(LogLevel),
    Unrecognized(String),
}

impl LevelSource {
    /// Classify a raw `LOG_LEVEL` value.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => LevelSource::Unset,
            Some(name) => match LogLevel::parse(name) {
                Some(level) => LevelSource::Named(level),
                None => LevelSource::Unrecognized(name.to_string()),
            },
        }
    }

    pub fn filter(&self) -> LevelFilter {
        match self {
            LevelSource::Unset => DEFAULT_LOG_LEVEL.filter(),
            LevelSource::Named(level) => level.filter(),
            LevelSource::Unrecognized(_) => UNRECOGNIZED_LEVEL,
        }
    }
}

/// Something whose verbosity can be changed at runtime.
pub trait LevelSink: Send + Sync {
    fn set_level(&self, level: LevelFilter) -> Result<(), LoggingError>;
}

/// Handle to the installed subscriber's filter.
#[derive(Clone)]
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LevelSink for LogHandle {
    fn set_level(&self, level: LevelFilter) -> Result<(), LoggingError> {
        self.handle.reload(level_filter(level))?;
        Ok(())
    }
}

fn level_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::default().add_directive(level.into())
}

/// Install the global subscriber at the default level.
pub fn init_logging() -> Result<LogHandle, LoggingError> {
    let (filter, handle) = reload::Layer::new(level_filter(DEFAULT_LOG_LEVEL.filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()?;
    Ok(LogHandle { handle })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_map_to_levels() {
        let cases = [
            ("DEBUG", LevelFilter::DEBUG),
            ("INFO", LevelFilter::INFO),
            ("WARN", LevelFilter::WARN),
            ("ERROR", LevelFilter::ERROR),
            ("OFF", LevelFilter::OFF),
        ];
        for (name, expected) in cases {
            assert_eq!(LevelSource::resolve(Some(name)).filter(), expected, "{name}");
        }
    }

    #[test]
    fn test_unset_and_empty_default_to_debug() {
        assert_eq!(LevelSource::resolve(None), LevelSource::Unset);
        assert_eq!(LevelSource::resolve(Some("")), LevelSource::Unset);
        assert_eq!(LevelSource::Unset.filter(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_unknown_names_emit_everything() {
        for name in ["debug", "TRACE", "verbose"] {
            let source = LevelSource::resolve(Some(name));
            assert_eq!(source, LevelSource::Unrecognized(name.to_string()));
            assert_eq!(source.filter(), LevelFilter::TRACE);
        }
    }
}
