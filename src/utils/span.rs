//! Source location tracking
//!
//! Positions and spans in source text, used by scan diagnostics and the
//! logging system for precise error reporting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and character offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Character offset within the line (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Position at the start of a given line
    pub fn line_start(line: u32) -> Self {
        Self {
            offset: 0,
            line,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset || start.line < end.line,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// A span covering character columns [start, end) of one line
    pub fn on_line(line: u32, start: usize, end: usize) -> Self {
        Self {
            start: Position::new(start, line, start as u32 + 1),
            end: Position::new(end, line, end as u32 + 1),
        }
    }

    /// A whole-line span anchored at the line start
    pub fn line_anchor(line: u32) -> Self {
        let pos = Position::line_start(line);
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Character length of this span
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let pos = Position::new(4, 2, 5);
        assert_eq!(pos.to_string(), "2:5");
    }

    #[test]
    fn test_span_on_line() {
        let span = Span::on_line(3, 4, 8);
        assert_eq!(span.start.line, 3);
        assert_eq!(span.start.column, 5);
        assert_eq!(span.end.column, 9);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_line_anchor_is_empty() {
        let span = Span::line_anchor(7);
        assert!(span.is_empty());
        assert_eq!(span.start.line, 7);
    }
}
