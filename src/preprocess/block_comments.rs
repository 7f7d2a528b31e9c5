//! Block-comment detector
//!
//! Recognizes multi-line comment spans over the normalized line stream: a
//! line whose entire content is `"""` opens a block, every line up to the
//! closing `"""` is accumulated verbatim (no inserted separators), and the
//! whole span becomes one Comment token. Lines inside a block are never
//! tokenized individually.

use super::normalizer::NormalizedLine;
use crate::logging::codes;
use crate::utils::Span;

/// The line that opens and closes a block comment.
const BLOCK_DELIMITER: &str = "\"\"\"";

/// Fatal preprocessing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockCommentError {
    #[error("unterminated block comment starting at line {line}")]
    Unterminated { line: u32 },
}

impl BlockCommentError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BlockCommentError::Unterminated { .. } => codes::scanner::UNTERMINATED_BLOCK_COMMENT,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            BlockCommentError::Unterminated { line } => Span::line_anchor(*line),
        }
    }
}

/// What the pipeline should do with a line after the detector has seen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineDisposition {
    /// Outside any block; hand the line to the scanner.
    Code,
    /// Inside an open block; the line was accumulated.
    InsideBlock,
    /// This line closed a block; the finished comment lexeme is returned.
    BlockClosed(String),
}

/// State machine over the normalized line stream.
#[derive(Debug, Default)]
pub struct BlockCommentDetector {
    open: Option<OpenBlock>,
}

#[derive(Debug)]
struct OpenBlock {
    start_line: u32,
    content: String,
}

impl BlockCommentDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one normalized line through the detector.
    pub fn feed(&mut self, line: &NormalizedLine) -> LineDisposition {
        match self.open.take() {
            None => {
                if line.text == BLOCK_DELIMITER {
                    self.open = Some(OpenBlock {
                        start_line: line.number,
                        content: String::new(),
                    });
                    LineDisposition::InsideBlock
                } else {
                    LineDisposition::Code
                }
            }
            Some(mut block) => {
                if line.text == BLOCK_DELIMITER {
                    LineDisposition::BlockClosed(format!(
                        "{}{}{}",
                        BLOCK_DELIMITER, block.content, BLOCK_DELIMITER
                    ))
                } else {
                    block.content.push_str(&line.text);
                    self.open = Some(block);
                    LineDisposition::InsideBlock
                }
            }
        }
    }

    /// Whether the detector is currently inside an open block.
    pub fn in_block(&self) -> bool {
        self.open.is_some()
    }

    /// Verify no block is left open at end of input.
    pub fn finish(self) -> Result<(), BlockCommentError> {
        match self.open {
            None => Ok(()),
            Some(block) => Err(BlockCommentError::Unterminated {
                line: block.start_line,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn lines(texts: &[&str]) -> Vec<NormalizedLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| NormalizedLine::new(i as u32 + 1, *t))
            .collect()
    }

    #[test]
    fn test_block_comment_reconstruction() {
        let mut detector = BlockCommentDetector::new();
        let input = lines(&["\"\"\"", "line one", "line two", "\"\"\""]);

        assert_eq!(detector.feed(&input[0]), LineDisposition::InsideBlock);
        assert_eq!(detector.feed(&input[1]), LineDisposition::InsideBlock);
        assert_eq!(detector.feed(&input[2]), LineDisposition::InsideBlock);
        assert_eq!(
            detector.feed(&input[3]),
            LineDisposition::BlockClosed("\"\"\"line oneline two\"\"\"".to_string())
        );
        assert!(detector.finish().is_ok());
    }

    #[test]
    fn test_code_lines_pass_through() {
        let mut detector = BlockCommentDetector::new();
        let line = NormalizedLine::new(1, "x = 5");

        assert_eq!(detector.feed(&line), LineDisposition::Code);
        assert!(!detector.in_block());
        assert!(detector.finish().is_ok());
    }

    #[test]
    fn test_empty_block() {
        let mut detector = BlockCommentDetector::new();
        let input = lines(&["\"\"\"", "\"\"\""]);

        assert_eq!(detector.feed(&input[0]), LineDisposition::InsideBlock);
        assert_eq!(
            detector.feed(&input[1]),
            LineDisposition::BlockClosed("\"\"\"\"\"\"".to_string())
        );
    }

    #[test]
    fn test_unterminated_block_is_error() {
        let mut detector = BlockCommentDetector::new();
        let input = lines(&["\"\"\"", "left open"]);

        detector.feed(&input[0]);
        detector.feed(&input[1]);
        assert!(detector.in_block());

        let error = detector.finish().unwrap_err();
        assert_matches!(error, BlockCommentError::Unterminated { line: 1 });
        assert_eq!(error.error_code().as_str(), "E021");
        assert_eq!(error.span().start.line, 1);
    }

    #[test]
    fn test_unterminated_reports_opening_line() {
        let mut detector = BlockCommentDetector::new();
        detector.feed(&NormalizedLine::new(3, "x = 1"));
        detector.feed(&NormalizedLine::new(7, "\"\"\""));

        let error = detector.finish().unwrap_err();
        assert_matches!(error, BlockCommentError::Unterminated { line: 7 });
    }

    #[test]
    fn test_inline_triple_quote_is_not_a_block() {
        // Only a line that is exactly the delimiter opens a block
        let mut detector = BlockCommentDetector::new();
        let line = NormalizedLine::new(1, "x = \"\"\"");

        assert_eq!(detector.feed(&line), LineDisposition::Code);
    }

    #[test]
    fn test_two_blocks_in_sequence() {
        let mut detector = BlockCommentDetector::new();
        let input = lines(&["\"\"\"", "a", "\"\"\"", "\"\"\"", "b", "\"\"\""]);

        detector.feed(&input[0]);
        detector.feed(&input[1]);
        assert_eq!(
            detector.feed(&input[2]),
            LineDisposition::BlockClosed("\"\"\"a\"\"\"".to_string())
        );
        detector.feed(&input[3]);
        detector.feed(&input[4]);
        assert_eq!(
            detector.feed(&input[5]),
            LineDisposition::BlockClosed("\"\"\"b\"\"\"".to_string())
        );
        assert!(detector.finish().is_ok());
    }
}
