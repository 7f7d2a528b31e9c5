//! Core line scanner implementation
//!
//! Each cursor position is resolved by exactly one of seven mutually
//! exclusive rules, tried in priority order: whitespace, inline comment,
//! delimiter, numeric literal, string literal, operator, and
//! identifier-or-keyword. Every rule advances the cursor by at least one
//! character, so a line of length L is scanned in at most L dispatch steps.

use crate::config::runtime::ScannerPreferences;
use crate::grammar::Grammar;
use crate::logging::codes;
use crate::preprocess::NormalizedLine;
use crate::tokens::Token;
use crate::utils::Span;

/// A classified token with its character span within the scanned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedToken {
    pub token: Token,
    /// Start char offset within the line (inclusive)
    pub start: usize,
    /// End char offset within the line (exclusive)
    pub end: usize,
}

impl ScannedToken {
    fn new(token: Token, start: usize, end: usize) -> Self {
        Self { token, start, end }
    }
}

/// Scan metrics in the per-stage metrics style.
#[derive(Debug, Default, Clone)]
pub struct ScanMetrics {
    pub lines_scanned: usize,
    pub dispatch_steps: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub operator_tokens: usize,
    pub delimiter_tokens: usize,
    pub literal_tokens: usize,
    pub comment_tokens: usize,
    pub unterminated_strings: usize,
}

impl ScanMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        use crate::tokens::Category::*;
        match token.category {
            Keyword => self.keyword_tokens += 1,
            Identifier => self.identifier_tokens += 1,
            Operator => self.operator_tokens += 1,
            Delimiter => self.delimiter_tokens += 1,
            Literal => self.literal_tokens += 1,
            Comment => self.comment_tokens += 1,
        }
    }

    /// Total tokens emitted, duplicates included.
    pub fn total_tokens(&self) -> usize {
        self.keyword_tokens
            + self.identifier_tokens
            + self.operator_tokens
            + self.delimiter_tokens
            + self.literal_tokens
            + self.comment_tokens
    }
}

/// Character-by-character scanner over normalized lines.
pub struct LineScanner<'g> {
    grammar: &'g Grammar,
    preferences: ScannerPreferences,
    metrics: ScanMetrics,
}

impl<'g> LineScanner<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            preferences: ScannerPreferences::default(),
            metrics: ScanMetrics::default(),
        }
    }

    pub fn with_preferences(grammar: &'g Grammar, preferences: ScannerPreferences) -> Self {
        Self {
            grammar,
            preferences,
            metrics: ScanMetrics::default(),
        }
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &ScannerPreferences {
        &self.preferences
    }

    /// Scan one normalized line into classified tokens.
    ///
    /// Every character is consumed exactly once; the emitted spans plus the
    /// skipped whitespace positions partition the line.
    pub fn scan_line(&mut self, line: &NormalizedLine) -> Vec<ScannedToken> {
        let chars: Vec<char> = line.text.chars().collect();
        let len = chars.len();
        let mut tokens = Vec::new();
        let mut curr = 0usize;

        while curr < len {
            self.metrics.dispatch_steps += 1;
            let ch = chars[curr];

            // Rule 1: whitespace is skipped, one character at a time
            if ch.is_whitespace() {
                curr += 1;
                continue;
            }

            // Rule 2: '#' turns the rest of the line into a comment
            if ch == '#' {
                let rest: String = chars[curr + 1..].iter().collect();
                let lexeme = format!("# {}", rest.trim());
                self.emit(&mut tokens, Token::comment(lexeme), curr, len);
                curr = len;
                continue;
            }

            // Rule 3: single-character delimiter
            if self.grammar.is_delimiter(ch) {
                self.emit(&mut tokens, Token::delimiter(ch.to_string()), curr, curr + 1);
                curr += 1;
                continue;
            }

            // Rule 4: numeric literal, captured verbatim to the next boundary
            if ch.is_ascii_digit() {
                let end = self.find_boundary(&chars, curr);
                let lexeme: String = chars[curr..end].iter().collect();
                self.emit(&mut tokens, Token::literal(lexeme), curr, end);
                curr = end;
                continue;
            }

            // Rule 5: string literal delimited by a matching quote
            if ch == '"' || ch == '\'' {
                match Self::find_char(&chars, curr + 1, ch) {
                    Some(closing) => {
                        let lexeme: String = chars[curr..=closing].iter().collect();
                        self.emit(&mut tokens, Token::literal(lexeme), curr, closing + 1);
                        curr = closing + 1;
                    }
                    None => {
                        // Tolerated: capture to end of line and keep going
                        let lexeme: String = chars[curr..].iter().collect();
                        self.emit(&mut tokens, Token::literal(lexeme), curr, len);
                        self.metrics.unterminated_strings += 1;
                        self.warn_unterminated_string(line, curr);
                        curr = len;
                    }
                }
                continue;
            }

            // Rule 6: operator, longest match first
            if self.grammar.is_operator_char(ch) {
                let two: Option<String> = if curr + 1 < len {
                    let candidate: String = chars[curr..curr + 2].iter().collect();
                    self.grammar.is_operator(&candidate).then_some(candidate)
                } else {
                    None
                };

                match two {
                    Some(lexeme) => {
                        self.emit(&mut tokens, Token::operator(lexeme), curr, curr + 2);
                        curr += 2;
                    }
                    None => {
                        self.emit(&mut tokens, Token::operator(ch.to_string()), curr, curr + 1);
                        curr += 1;
                    }
                }
                continue;
            }

            // Rule 7: everything else is an identifier or keyword
            let end = self.find_boundary(&chars, curr);
            let lexeme: String = chars[curr..end].iter().collect();
            let token = if self.grammar.is_keyword(&lexeme) {
                Token::keyword(lexeme)
            } else {
                Token::identifier(lexeme)
            };
            self.emit(&mut tokens, token, curr, end);
            curr = end;
        }

        self.metrics.lines_scanned += 1;
        tokens
    }

    fn emit(&mut self, tokens: &mut Vec<ScannedToken>, token: Token, start: usize, end: usize) {
        self.metrics.record_token(&token);
        tokens.push(ScannedToken::new(token, start, end));
    }

    /// First index at or after `start` holding whitespace or a delimiter,
    /// or the line length when no boundary exists.
    fn find_boundary(&self, chars: &[char], start: usize) -> usize {
        chars[start..]
            .iter()
            .position(|&c| c.is_whitespace() || self.grammar.is_delimiter(c))
            .map(|offset| start + offset)
            .unwrap_or(chars.len())
    }

    /// First index at or after `start` holding `target`.
    fn find_char(chars: &[char], start: usize, target: char) -> Option<usize> {
        chars[start..]
            .iter()
            .position(|&c| c == target)
            .map(|offset| start + offset)
    }

    fn warn_unterminated_string(&self, line: &NormalizedLine, column: usize) {
        if !self.preferences.log_unterminated_strings {
            return;
        }

        if let Some(logger) = crate::logging::try_get_global_logger() {
            let mut event = crate::logging::LogEvent::warning_with_code(
                codes::scanner::UNTERMINATED_STRING,
                "String literal not terminated before end of line",
            );
            if self.preferences.include_position_in_errors {
                event = event.with_span(Span::on_line(line.number, column, line.text.chars().count()));
            }
            logger.log_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{self, Grammar};
    use crate::tokens::Category;

    fn grammar_with(delims: &[char], ops: &[&str], keywords: &[&str]) -> Grammar {
        Grammar::new(
            delims.iter().copied(),
            ops.iter().map(|s| s.to_string()),
            keywords.iter().map(|s| s.to_string()),
        )
        .unwrap()
    }

    fn line(text: &str) -> NormalizedLine {
        NormalizedLine::new(1, text)
    }

    fn lexemes(tokens: &[ScannedToken]) -> Vec<(Category, String)> {
        tokens
            .iter()
            .map(|t| (t.token.category, t.token.lexeme.clone()))
            .collect()
    }

    #[test]
    fn test_classification_determinism() {
        let g = grammar_with(&[], &[], &["if", "else"]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("if"));
        assert_eq!(lexemes(&tokens), [(Category::Keyword, "if".to_string())]);

        let tokens = scanner.scan_line(&line("counter1"));
        assert_eq!(
            lexemes(&tokens),
            [(Category::Identifier, "counter1".to_string())]
        );
    }

    #[test]
    fn test_numeric_literal_boundary() {
        let g = grammar_with(&[','], &[], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("42, 7"));
        assert_eq!(
            lexemes(&tokens),
            [
                (Category::Literal, "42".to_string()),
                (Category::Delimiter, ",".to_string()),
                (Category::Literal, "7".to_string()),
            ]
        );
    }

    #[test]
    fn test_numeric_literal_captured_verbatim() {
        // No validation of decimal points; captured as-is to the boundary
        let g = grammar_with(&[','], &[], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("3.14.15, 2e5"));
        assert_eq!(
            lexemes(&tokens),
            [
                (Category::Literal, "3.14.15".to_string()),
                (Category::Delimiter, ",".to_string()),
                (Category::Literal, "2e5".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_literal_matching_quote() {
        let g = grammar_with(&[], &[], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("'hello' \"world\""));
        assert_eq!(
            lexemes(&tokens),
            [
                (Category::Literal, "'hello'".to_string()),
                (Category::Literal, "\"world\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_literal_tolerates_missing_quote() {
        let g = grammar_with(&[], &[], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("'unterminated"));
        assert_eq!(
            lexemes(&tokens),
            [(Category::Literal, "'unterminated".to_string())]
        );
        assert_eq!(scanner.metrics().unterminated_strings, 1);
    }

    #[test]
    fn test_string_interior_whitespace_preserved() {
        let g = grammar_with(&[], &["="], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("s = 'a  b'"));
        assert_eq!(
            lexemes(&tokens),
            [
                (Category::Identifier, "s".to_string()),
                (Category::Operator, "=".to_string()),
                (Category::Literal, "'a  b'".to_string()),
            ]
        );
    }

    #[test]
    fn test_double_equals_is_one_token() {
        let g = grammar_with(&[], &["=", "=="], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("x == y"));
        assert_eq!(
            lexemes(&tokens),
            [
                (Category::Identifier, "x".to_string()),
                (Category::Operator, "==".to_string()),
                (Category::Identifier, "y".to_string()),
            ]
        );
    }

    #[test]
    fn test_single_operator_fallback() {
        let g = grammar_with(&[], &["=", "=="], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("x = y"));
        assert_eq!(
            lexemes(&tokens),
            [
                (Category::Identifier, "x".to_string()),
                (Category::Operator, "=".to_string()),
                (Category::Identifier, "y".to_string()),
            ]
        );
    }

    #[test]
    fn test_operator_at_end_of_line() {
        let g = grammar_with(&[], &["=", "=="], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("x ="));
        assert_eq!(
            lexemes(&tokens),
            [
                (Category::Identifier, "x".to_string()),
                (Category::Operator, "=".to_string()),
            ]
        );
    }

    #[test]
    fn test_inline_comment() {
        let g = grammar_with(&[], &["="], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("x = 5 # assign"));
        assert_eq!(
            lexemes(&tokens),
            [
                (Category::Identifier, "x".to_string()),
                (Category::Operator, "=".to_string()),
                (Category::Literal, "5".to_string()),
                (Category::Comment, "# assign".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_line_comment() {
        let g = grammar_with(&[], &[], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("# just a note"));
        assert_eq!(
            lexemes(&tokens),
            [(Category::Comment, "# just a note".to_string())]
        );
    }

    #[test]
    fn test_unknown_characters_become_identifier() {
        // No operator or delimiter tables match, so '@value?' falls through
        let g = grammar_with(&[], &[], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("@value?"));
        assert_eq!(
            lexemes(&tokens),
            [(Category::Identifier, "@value?".to_string())]
        );
    }

    #[test]
    fn test_identifier_runs_to_end_of_line() {
        let g = grammar_with(&[], &[], &["return"]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("return"));
        assert_eq!(lexemes(&tokens), [(Category::Keyword, "return".to_string())]);
    }

    #[test]
    fn test_coverage_spans_partition_line() {
        let g = grammar::default_profile();
        let mut scanner = LineScanner::new(&g);

        let text = "def add(a, b):  # sum";
        let tokens = scanner.scan_line(&line(text));

        let chars: Vec<char> = text.chars().collect();
        let mut consumed = vec![false; chars.len()];
        for t in &tokens {
            for flag in &mut consumed[t.start..t.end] {
                assert!(!*flag, "character consumed twice");
                *flag = true;
            }
        }
        for (i, flag) in consumed.iter().enumerate() {
            if !flag {
                assert!(
                    chars[i].is_whitespace(),
                    "unconsumed non-whitespace char {:?} at {}",
                    chars[i],
                    i
                );
            }
        }
    }

    #[test]
    fn test_termination_bound() {
        let g = grammar::default_profile();
        let mut scanner = LineScanner::new(&g);

        let text = "x = 'a b' + foo(1, 2) # tail";
        scanner.scan_line(&line(text));

        assert!(scanner.metrics().dispatch_steps <= text.chars().count());
    }

    #[test]
    fn test_metrics_category_counts() {
        let g = grammar_with(&[','], &["="], &["def"]);
        let mut scanner = LineScanner::new(&g);

        scanner.scan_line(&line("def x = 1, 2 # done"));
        let metrics = scanner.metrics();

        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 1);
        assert_eq!(metrics.operator_tokens, 1);
        assert_eq!(metrics.delimiter_tokens, 1);
        assert_eq!(metrics.literal_tokens, 2);
        assert_eq!(metrics.comment_tokens, 1);
        assert_eq!(metrics.total_tokens(), 7);
        assert_eq!(metrics.lines_scanned, 1);
    }

    #[test]
    fn test_operator_pair_without_single_entry_falls_through() {
        // '!' alone is not in the table, so "!=" never triggers the
        // operator rule and the word is classified by the fallback
        let g = grammar_with(&[], &["!="], &[]);
        let mut scanner = LineScanner::new(&g);

        let tokens = scanner.scan_line(&line("!=x"));
        assert_eq!(
            lexemes(&tokens),
            [(Category::Identifier, "!=x".to_string())]
        );
    }
}
