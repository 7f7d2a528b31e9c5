// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to enable detailed performance logging (user preference)
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            enable_performance_logging: env::var("LEXICLASS_ENABLE_PERFORMANCE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerPreferences {
    /// Whether to log a warning for each unterminated string literal
    pub log_unterminated_strings: bool,

    /// Whether to show position information in diagnostics
    pub include_position_in_errors: bool,
}

impl Default for ScannerPreferences {
    fn default() -> Self {
        Self {
            log_unterminated_strings: env::var("LEXICLASS_SCANNER_LOG_UNTERMINATED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_position_in_errors: env::var("LEXICLASS_SCANNER_INCLUDE_POSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output for non-error events
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("LEXICLASS_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("LEXICLASS_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("LEXICLASS_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            enable_cargo_style_output: env::var("LEXICLASS_LOGGING_CARGO_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_file_context: env::var("LEXICLASS_LOGGING_INCLUDE_FILE_CONTEXT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub scanner: ScannerPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // File processor
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "LEXICLASS_ENABLE_PERFORMANCE_LOGGING";

    // Scanner
    pub const SCANNER_LOG_UNTERMINATED: &str = "LEXICLASS_SCANNER_LOG_UNTERMINATED";
    pub const SCANNER_INCLUDE_POSITIONS: &str = "LEXICLASS_SCANNER_INCLUDE_POSITIONS";

    // Grammar selection
    pub const GRAMMAR_FILE: &str = "LEXICLASS_GRAMMAR";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "LEXICLASS_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "LEXICLASS_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "LEXICLASS_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "LEXICLASS_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "LEXICLASS_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(!env_vars::ENABLE_PERFORMANCE_LOGGING.is_empty());
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
        assert!(!env_vars::GRAMMAR_FILE.is_empty());
    }
}
