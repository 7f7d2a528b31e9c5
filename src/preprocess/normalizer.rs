//! Line normalizer
//!
//! Drops whitespace-only lines and trims the rest, keeping the 1-based
//! source line number of every surviving line for diagnostics.
//!
//! Interior whitespace is left untouched. The scanner skips whitespace runs
//! itself, which keeps consecutive spaces inside string literals intact.
//! Comment lines are not treated specially here either; the scanner's `#`
//! rule is the single comment-extraction point and handles full-line
//! comments as a degenerate case of trailing ones.

use crate::log_debug;

/// A surviving source line after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine {
    /// 1-based line number in the original file
    pub number: u32,
    /// Trimmed line content
    pub text: String,
}

impl NormalizedLine {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Normalize raw source into the ordered sequence of code lines.
pub fn normalize(source: &str) -> Vec<NormalizedLine> {
    let mut lines = Vec::new();
    let mut dropped = 0usize;

    for (idx, raw) in source.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            dropped += 1;
            continue;
        }
        lines.push(NormalizedLine::new(idx as u32 + 1, trimmed));
    }

    log_debug!("Line normalization complete",
        "lines_kept" => lines.len(),
        "lines_dropped" => dropped);

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_dropped() {
        let lines = normalize("x = 1\n\n   \t\ny = 2\n");
        assert_eq!(
            lines,
            vec![
                NormalizedLine::new(1, "x = 1"),
                NormalizedLine::new(4, "y = 2"),
            ]
        );
    }

    #[test]
    fn test_lines_are_trimmed() {
        let lines = normalize("   x = 1   \n");
        assert_eq!(lines, vec![NormalizedLine::new(1, "x = 1")]);
    }

    #[test]
    fn test_interior_whitespace_preserved() {
        // Consecutive spaces inside the line survive, so string literal
        // interiors reach the scanner intact.
        let lines = normalize("s = 'a  b'\n");
        assert_eq!(lines[0].text, "s = 'a  b'");
    }

    #[test]
    fn test_comment_lines_are_forwarded() {
        let lines = normalize("# just a comment\n");
        assert_eq!(lines, vec![NormalizedLine::new(1, "# just a comment")]);
    }

    #[test]
    fn test_line_numbers_track_source() {
        let lines = normalize("\n\nthird\n\nfifth\n");
        assert_eq!(lines[0].number, 3);
        assert_eq!(lines[1].number, 5);
    }

    #[test]
    fn test_empty_source() {
        assert!(normalize("").is_empty());
        assert!(normalize("\n\n\n").is_empty());
    }
}
