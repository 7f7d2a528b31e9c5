//! Configuration module for the lexical classifier
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from the TOML profile
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

// Keep original constants file for reference and runtime configuration
pub mod constants;
pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("LEXICLASS_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("LEXICLASS_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
