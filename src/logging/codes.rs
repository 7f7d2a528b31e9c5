//! Consolidated diagnostic codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and
//! classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Grammar configuration error codes
pub mod grammar {
    use super::Code;

    pub const GRAMMAR_FILE_ERROR: Code = Code::new("E015");
    pub const INVALID_DELIMITER: Code = Code::new("E016");
    pub const INVALID_OPERATOR: Code = Code::new("E017");
}

/// Scanning error codes
pub mod scanner {
    use super::Code;

    pub const UNTERMINATED_STRING: Code = Code::new("E020");
    pub const UNTERMINATED_BLOCK_COMMENT: Code = Code::new("E021");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const SCAN_COMPLETE: Code = Code::new("I020");
    pub const REPORT_COMPLETE: Code = Code::new("I021");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the failing input",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration and environment variables",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File not found at specified path",
                "Check file path and ensure file exists",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Reduce file size or raise the compile-time limit",
            ),
        );
        registry.insert(
            "E009",
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied accessing file",
                "Check file permissions and user access rights",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid UTF-8 encoding in file",
                "Convert file to UTF-8 encoding",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error during file operation",
                "Check disk space, permissions, and file system integrity",
            ),
        );
        registry.insert(
            "E012",
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid file path provided",
                "Provide a valid file path",
            ),
        );

        // Grammar configuration errors
        registry.insert(
            "E015",
            ErrorMetadata::new(
                "E015",
                "Grammar",
                Severity::Medium,
                false,
                true,
                "Grammar configuration file could not be read or parsed",
                "Check the LEXICLASS_GRAMMAR path and TOML syntax",
            ),
        );
        registry.insert(
            "E016",
            ErrorMetadata::new(
                "E016",
                "Grammar",
                Severity::Medium,
                false,
                true,
                "Delimiter entry is not a single character",
                "Use exactly one character per delimiter entry",
            ),
        );
        registry.insert(
            "E017",
            ErrorMetadata::new(
                "E017",
                "Grammar",
                Severity::Medium,
                false,
                true,
                "Operator entry is not one or two characters",
                "Use one- or two-character operator entries",
            ),
        );

        // Scanning errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Scanner",
                Severity::Low,
                true,
                false,
                "String literal not terminated before end of line",
                "Add the closing quote character",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Scanner",
                Severity::High,
                false,
                true,
                "Block comment opened but never closed",
                "Add the closing triple-quote line",
            ),
        );

        // Success codes carried in the registry for diagnostics
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed successfully",
                "Continue normal operation",
            ),
        );
        registry.insert(
            "I006",
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File processing completed successfully",
                "Continue to scanning stage",
            ),
        );
        registry.insert(
            "I020",
            ErrorMetadata::new(
                "I020",
                "Scanner",
                Severity::Low,
                true,
                false,
                "Lexical scan completed successfully",
                "Continue to report stage",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_error_codes_have_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            file_processing::FILE_NOT_FOUND,
            file_processing::FILE_TOO_LARGE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            grammar::GRAMMAR_FILE_ERROR,
            grammar::INVALID_DELIMITER,
            grammar::INVALID_OPERATOR,
            scanner::UNTERMINATED_STRING,
            scanner::UNTERMINATED_BLOCK_COMMENT,
        ];

        for code in &codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
            assert_ne!(get_description(code.as_str()), "Unknown error");
        }
    }

    #[test]
    fn test_unterminated_string_is_recoverable() {
        assert!(is_recoverable(scanner::UNTERMINATED_STRING.as_str()));
        assert!(!requires_halt(scanner::UNTERMINATED_STRING.as_str()));
    }

    #[test]
    fn test_unterminated_block_comment_halts() {
        assert!(requires_halt(scanner::UNTERMINATED_BLOCK_COMMENT.as_str()));
        assert_eq!(
            get_severity(scanner::UNTERMINATED_BLOCK_COMMENT.as_str()),
            Severity::High
        );
        assert_eq!(
            get_category(scanner::UNTERMINATED_BLOCK_COMMENT.as_str()),
            "Scanner"
        );
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_severity("E999"), Severity::Medium);
    }
}
