//! Lexical scanning module
//!
//! The engine of the classifier: a character-by-character state machine
//! that turns one normalized line at a time into classified tokens via a
//! fixed-priority dispatch. Category tables come from the active
//! [`Grammar`](crate::grammar::Grammar); the scanner itself is
//! language-agnostic.

pub mod scanner;

use crate::config::runtime::ScannerPreferences;
use crate::grammar::Grammar;

pub use scanner::{LineScanner, ScanMetrics, ScannedToken};

/// Create a scanner over a grammar with default preferences
pub fn create_scanner(grammar: &Grammar) -> LineScanner<'_> {
    LineScanner::new(grammar)
}

/// Create a scanner with custom runtime preferences
pub fn create_scanner_with_preferences(
    grammar: &Grammar,
    preferences: ScannerPreferences,
) -> LineScanner<'_> {
    LineScanner::with_preferences(grammar, preferences)
}

/// Validate scanner code registration (for system startup)
pub fn init_scanner_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::scanner::UNTERMINATED_STRING,
        crate::logging::codes::scanner::UNTERMINATED_BLOCK_COMMENT,
    ];

    for code in &test_codes {
        let description = crate::logging::codes::get_description(code.as_str());
        if description == "Unknown error" {
            return Err(format!(
                "Scanner error code {} has no description",
                code.as_str()
            ));
        }

        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Scanner error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}
