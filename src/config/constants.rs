pub mod compile_time {
    pub mod file_processing {
        /// Maximum file size allowed for processing (10MB)
        /// SECURITY: Prevents DoS via oversized input files
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a file "large" (1MB)
        /// PERFORMANCE: Affects logging detail, not processing strategy
        pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024;

        /// Maximum line count accepted for scanning
        /// SECURITY: Prevents algorithmic complexity attacks
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = 100_000;
    }

    pub mod logging {
        /// Log buffer size for collected events
        /// RESOURCE: Controls memory usage for logging
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log events retained per file
        /// SECURITY: Prevents log event explosion
        pub const MAX_LOG_EVENTS_PER_FILE: usize = 1_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;
    }
}
