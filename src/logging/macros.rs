//! Type-safe logging macros using Code types with Display support

// ============================================================================
// ERROR LOGGING MACROS
// ============================================================================

/// Log error with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($span), vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, None, context_refs)
        }
    };

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, Some($span), context_refs)
        }
    };
}

// ============================================================================
// SUCCESS LOGGING MACROS
// ============================================================================

/// Log success with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

// ============================================================================
// INFO LOGGING MACROS
// ============================================================================

/// Log informational message - accepts Display types for context values
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

// ============================================================================
// WARNING LOGGING MACROS
// ============================================================================

/// Log warning message - accepts Display types for context values
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        {
            let event = $crate::logging::LogEvent::warning($message);
            let event = if let Some(file_ctx) = $crate::logging::get_current_file_context() {
                event.with_context("file", &file_ctx.file_path.display().to_string())
            } else {
                event
            };
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                logger.log_event(event);
            }
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let mut event = $crate::logging::LogEvent::warning($message);
            $(
                event = event.with_context($key, &format!("{}", $value));
            )+
            let event = if let Some(file_ctx) = $crate::logging::get_current_file_context() {
                event.with_context("file", &file_ctx.file_path.display().to_string())
            } else {
                event
            };
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                logger.log_event(event);
            }
        }
    };
}

// ============================================================================
// DEBUG LOGGING MACROS
// ============================================================================

/// Log debug message - accepts Display types for context values
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        {
            if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
                let event = $crate::logging::LogEvent::debug($message);
                let event = if let Some(file_ctx) = $crate::logging::get_current_file_context() {
                    event.with_context("file", &file_ctx.file_path.display().to_string())
                } else {
                    event
                };
                if let Some(logger) = $crate::logging::try_get_global_logger() {
                    logger.log_event(event);
                }
            }
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
                let mut event = $crate::logging::LogEvent::debug($message);
                $(
                    event = event.with_context($key, &format!("{}", $value));
                )+
                let event = if let Some(file_ctx) = $crate::logging::get_current_file_context() {
                    event.with_context("file", &file_ctx.file_path.display().to_string())
                } else {
                    event
                };
                if let Some(logger) = $crate::logging::try_get_global_logger() {
                    logger.log_event(event);
                }
            }
        }
    };
}
