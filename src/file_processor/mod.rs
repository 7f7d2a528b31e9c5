//! File processor module with compile-time constants and global logging integration

mod processor;

use crate::config::constants::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    processor::process_file(file_path)
}

/// Create a file processor with default settings
pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

/// Create a file processor from runtime preferences structure
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

/// Get the compile-time large file threshold
pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

/// Initialize file processor logging validation (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    // Validate that all file processor error codes are properly configured
    let test_codes = [
        crate::logging::codes::file_processing::FILE_NOT_FOUND,
        crate::logging::codes::file_processing::FILE_TOO_LARGE,
        crate::logging::codes::file_processing::PERMISSION_DENIED,
        crate::logging::codes::file_processing::INVALID_ENCODING,
        crate::logging::codes::file_processing::IO_ERROR,
        crate::logging::codes::file_processing::INVALID_PATH,
    ];

    for code in &test_codes {
        let description = crate::logging::codes::get_description(code.as_str());
        if description == "Unknown error" {
            return Err(format!(
                "File processor error code {} has no description",
                code.as_str()
            ));
        }

        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS);

    Ok(())
}
