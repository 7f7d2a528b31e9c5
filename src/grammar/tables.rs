//! Category tables and their validation
//!
//! A `Grammar` is immutable once built. Construction validates that every
//! delimiter is a single character and every operator is one or two
//! characters, so the scanner never has to re-check table shape.

use crate::logging::codes;
use serde::Deserialize;
use std::collections::HashSet;

/// Grammar configuration errors
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("Failed to read grammar file '{path}': {message}")]
    FileRead { path: String, message: String },

    #[error("Failed to parse grammar file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid delimiter entry '{entry}': must be exactly one character")]
    InvalidDelimiter { entry: String },

    #[error("Invalid operator entry '{entry}': must be one or two characters")]
    InvalidOperator { entry: String },
}

impl GrammarError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            GrammarError::FileRead { .. } | GrammarError::Parse(_) => {
                codes::grammar::GRAMMAR_FILE_ERROR
            }
            GrammarError::InvalidDelimiter { .. } => codes::grammar::INVALID_DELIMITER,
            GrammarError::InvalidOperator { .. } => codes::grammar::INVALID_OPERATOR,
        }
    }
}

/// The three category tables the scanner dispatches on.
#[derive(Debug, Clone)]
pub struct Grammar {
    delimiters: HashSet<char>,
    operators: HashSet<String>,
    keywords: HashSet<String>,
}

/// On-disk shape of a grammar profile.
#[derive(Debug, Deserialize)]
struct GrammarFile {
    grammar: GrammarSpec,
}

#[derive(Debug, Deserialize)]
struct GrammarSpec {
    delimiters: Vec<String>,
    operators: Vec<String>,
    keywords: Vec<String>,
}

impl Grammar {
    /// Build a grammar from raw table entries, validating arity.
    pub fn new<D, O, K>(delimiters: D, operators: O, keywords: K) -> Result<Self, GrammarError>
    where
        D: IntoIterator<Item = char>,
        O: IntoIterator<Item = String>,
        K: IntoIterator<Item = String>,
    {
        let delimiters: HashSet<char> = delimiters.into_iter().collect();

        let mut operator_set = HashSet::new();
        for op in operators {
            let len = op.chars().count();
            if len == 0 || len > 2 {
                return Err(GrammarError::InvalidOperator { entry: op });
            }
            operator_set.insert(op);
        }

        Ok(Self {
            delimiters,
            operators: operator_set,
            keywords: keywords.into_iter().collect(),
        })
    }

    /// Parse a grammar profile from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, GrammarError> {
        let file: GrammarFile = toml::from_str(content)?;

        let mut delimiters = Vec::with_capacity(file.grammar.delimiters.len());
        for entry in file.grammar.delimiters {
            let mut chars = entry.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => delimiters.push(ch),
                _ => return Err(GrammarError::InvalidDelimiter { entry }),
            }
        }

        Self::new(delimiters, file.grammar.operators, file.grammar.keywords)
    }

    /// Load a grammar profile from a TOML file on disk.
    pub fn from_file(path: &str) -> Result<Self, GrammarError> {
        let content = std::fs::read_to_string(path).map_err(|e| GrammarError::FileRead {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Membership test for the delimiter table.
    pub fn is_delimiter(&self, ch: char) -> bool {
        self.delimiters.contains(&ch)
    }

    /// Membership test for the operator table (exact string match).
    pub fn is_operator(&self, lexeme: &str) -> bool {
        self.operators.contains(lexeme)
    }

    /// Whether this character alone is an operator table entry.
    pub fn is_operator_char(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        let entry: &str = ch.encode_utf8(&mut buf);
        self.operators.contains(entry)
    }

    /// Membership test for the keyword table (exact string match).
    pub fn is_keyword(&self, lexeme: &str) -> bool {
        self.keywords.contains(lexeme)
    }

    pub fn delimiter_count(&self) -> usize {
        self.delimiters.len()
    }

    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

/// The built-in Python-flavored profile.
pub fn default_profile() -> Grammar {
    // '.' is deliberately not a delimiter so decimal literals stay whole
    let delimiters = ['(', ')', '[', ']', '{', '}', ',', ':', ';'];

    let operators = [
        "=", "==", "+", "-", "*", "/", "%", "<", ">", "<=", ">=", "!=", "**", "//", "+=", "-=",
        "*=", "/=", "&", "|", "^", "~", "&=", "|=", "->",
    ];

    let keywords = [
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
    ];

    Grammar::new(
        delimiters,
        operators.iter().map(|s| s.to_string()),
        keywords.iter().map(|s| s.to_string()),
    )
    .expect("built-in profile is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_profile_membership() {
        let grammar = default_profile();

        assert!(grammar.is_delimiter('('));
        assert!(grammar.is_delimiter(','));
        assert!(!grammar.is_delimiter('x'));

        assert!(grammar.is_operator("="));
        assert!(grammar.is_operator("=="));
        assert!(grammar.is_operator_char('='));
        assert!(!grammar.is_operator("==="));

        assert!(grammar.is_keyword("def"));
        assert!(grammar.is_keyword("return"));
        assert!(!grammar.is_keyword("counter1"));
    }

    #[test]
    fn test_operator_arity_validation() {
        let result = Grammar::new(
            std::iter::empty::<char>(),
            ["===".to_string()],
            std::iter::empty::<String>(),
        );
        assert_matches!(result, Err(GrammarError::InvalidOperator { .. }));

        let result = Grammar::new(
            std::iter::empty::<char>(),
            ["".to_string()],
            std::iter::empty::<String>(),
        );
        assert_matches!(result, Err(GrammarError::InvalidOperator { .. }));
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
            [grammar]
            delimiters = [",", "(", ")"]
            operators = ["=", "=="]
            keywords = ["if", "else"]
        "#;

        let grammar = Grammar::from_toml_str(content).unwrap();
        assert!(grammar.is_delimiter(','));
        assert!(grammar.is_operator("=="));
        assert!(grammar.is_keyword("if"));
        assert_eq!(grammar.delimiter_count(), 3);
        assert_eq!(grammar.operator_count(), 2);
        assert_eq!(grammar.keyword_count(), 2);
    }

    #[test]
    fn test_from_toml_rejects_multichar_delimiter() {
        let content = r#"
            [grammar]
            delimiters = ["::"]
            operators = []
            keywords = []
        "#;

        let result = Grammar::from_toml_str(content);
        assert_matches!(result, Err(GrammarError::InvalidDelimiter { .. }));
    }

    #[test]
    fn test_from_file_round_trip() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grammar.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[grammar]\ndelimiters = [\",\"]\noperators = [\"=\"]\nkeywords = [\"let\"]"
        )
        .unwrap();

        let grammar = Grammar::from_file(path.to_str().unwrap()).unwrap();
        assert!(grammar.is_keyword("let"));
    }

    #[test]
    fn test_missing_file_error() {
        let result = Grammar::from_file("/nonexistent/grammar.toml");
        assert_matches!(result, Err(GrammarError::FileRead { .. }));
    }

    #[test]
    fn test_error_codes() {
        let error = GrammarError::InvalidDelimiter {
            entry: "::".to_string(),
        };
        assert_eq!(error.error_code().as_str(), "E016");
    }
}
