// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count_for_analysis: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_events_per_file: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LEXICLASS_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=LEXICLASS_CONFIG_DIR");

    let profile = env::var("LEXICLASS_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("LEXICLASS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let config_path = Path::new(&manifest_dir)
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            manifest_dir,
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_security_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_security_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_LOG_BUFFER: usize = 1_000_000;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("SECURITY: max_file_size exceeds absolute maximum");
    }

    if config.file_processing.large_file_threshold > config.file_processing.max_file_size {
        panic!("SECURITY: large_file_threshold exceeds max_file_size");
    }

    if config.logging.log_buffer_size > ABSOLUTE_MAX_LOG_BUFFER {
        panic!("SECURITY: log_buffer_size exceeds absolute maximum");
    }

    if config.logging.max_log_events_per_file > config.logging.log_buffer_size {
        panic!("SECURITY: max_log_events_per_file exceeds log_buffer_size");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        config.file_processing.max_line_count_for_analysis,
        config.logging.log_buffer_size,
        config.logging.max_log_events_per_file,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
