//! Grammar configuration for the lexical classifier
//!
//! The scanner is polymorphic over three read-only category tables:
//! delimiters (single characters), operators (one- or two-character
//! strings), and keywords (exact-match strings). A built-in Python-flavored
//! profile is the default; an alternative profile can be loaded from a TOML
//! file named by the `LEXICLASS_GRAMMAR` environment variable.

mod tables;

pub use tables::{default_profile, Grammar, GrammarError};

use crate::config::runtime::env_vars;
use crate::log_debug;

/// Load the grammar for this run: the file named by `LEXICLASS_GRAMMAR`, or
/// the built-in default profile when the variable is unset.
pub fn load_grammar() -> Result<Grammar, GrammarError> {
    match std::env::var(env_vars::GRAMMAR_FILE) {
        Ok(path) if !path.is_empty() => {
            log_debug!("Loading grammar from file", "path" => path);
            Grammar::from_file(&path)
        }
        _ => Ok(default_profile()),
    }
}

/// Validate grammar code registration (for system startup)
pub fn init_grammar_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::grammar::GRAMMAR_FILE_ERROR,
        crate::logging::codes::grammar::INVALID_DELIMITER,
        crate::logging::codes::grammar::INVALID_OPERATOR,
    ];

    for code in &test_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Grammar error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_grammar_logging() {
        assert!(init_grammar_logging().is_ok());
    }

    #[test]
    fn test_default_load_without_env() {
        // The env var is unset in the test environment by default
        if std::env::var(env_vars::GRAMMAR_FILE).is_ok() {
            return;
        }
        let grammar = load_grammar().unwrap();
        assert!(grammar.is_keyword("def"));
    }
}
