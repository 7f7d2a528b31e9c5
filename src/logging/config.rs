//! Configuration module for logging - using compile-time constants
//!
//! Buffer sizes are enforced at compile time; verbosity and output shape
//! are runtime user preferences.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Get minimum log level (user preference)
///
/// Info/debug chatter on the console additionally requires
/// `enable_console_logging`; errors and warnings always pass.
pub fn get_min_log_level() -> EventsLogLevel {
    let preferences = get_runtime_preferences();
    let user_level = preferences.min_log_level.to_events_log_level();

    if preferences.enable_console_logging {
        user_level
    } else {
        user_level.min(EventsLogLevel::Warning)
    }
}

/// Check if structured logging is enabled (user preference)
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled (user preference)
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Check if cargo-style output is enabled (user preference)
pub fn use_cargo_style_output() -> bool {
    get_runtime_preferences().enable_cargo_style_output
}

/// Check if file context should be included (user preference)
pub fn include_file_context() -> bool {
    get_runtime_preferences().include_file_context
}

/// Get error buffer size (compile-time constant)
pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Get maximum log events per file (compile-time constant)
pub fn get_max_log_events_per_file() -> usize {
    MAX_LOG_EVENTS_PER_FILE
}

/// Get maximum log message length (compile-time constant)
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        return Err("Max log events per file exceeds total buffer size".to_string());
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         === Compile-time Constants ===\n\
         - Log buffer size: {}\n\
         - Max events per file: {}\n\
         - Max message length: {}\n\
         === User Preferences (Runtime) ===\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Cargo-style output: {}\n\
         - Include file context: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_EVENTS_PER_FILE,
        MAX_LOG_MESSAGE_LENGTH,
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.enable_cargo_style_output,
        preferences.include_file_context,
    )
}
