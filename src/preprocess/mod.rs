//! Line-level preprocessing for the scanner
//!
//! Two stages feed the scanner: the line normalizer (blank-line removal and
//! trimming) and the block-comment detector (multi-line triple-quote spans
//! over the normalized line stream).

mod block_comments;
mod normalizer;

pub use block_comments::{BlockCommentDetector, BlockCommentError, LineDisposition};
pub use normalizer::{normalize, NormalizedLine};
