mod error;
mod result;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use result::RunResult;
pub use validation::validate_pipeline;

use crate::grammar;
use crate::lexical;
use crate::logging;
use crate::preprocess::{self, BlockCommentDetector, LineDisposition};
use crate::tokens::{Token, TokenStore};
use crate::{log_error, log_info, log_success};
use std::path::PathBuf;
use std::time::Instant;

/// Process a single file through the complete pipeline
/// (file -> normalize -> block comments -> scan -> store)
pub fn process_file(file_path: &str) -> Result<RunResult, PipelineError> {
    let start_time = Instant::now();

    // Set up file context for global logging
    logging::with_file_context(PathBuf::from(file_path), 0, || {
        log_info!("Starting classification pipeline", "file" => file_path);

        // Stage 1: grammar configuration
        let grammar = grammar::load_grammar().map_err(|e| {
            log_error!(e.error_code(), "Grammar configuration failed", "detail" => e);
            e
        })?;

        // Stage 2: file processing
        let file_result = crate::file_processor::process_file(file_path)?;

        // Stage 3: line normalization
        let lines = preprocess::normalize(&file_result.source);

        // Stage 4: block-comment detection and per-line scanning
        let mut store = TokenStore::new();
        let mut scanner = lexical::create_scanner(&grammar);
        let mut detector = BlockCommentDetector::new();

        for line in &lines {
            match detector.feed(line) {
                LineDisposition::Code => {
                    for scanned in scanner.scan_line(line) {
                        store.record(scanned.token);
                    }
                }
                LineDisposition::InsideBlock => {}
                LineDisposition::BlockClosed(lexeme) => {
                    store.record(Token::comment(lexeme));
                }
            }
        }

        if let Err(e) = detector.finish() {
            log_error!(e.error_code(), "Block comment never closed",
                span = e.span(),
                "file" => file_path);
            return Err(e.into());
        }

        let metrics = scanner.metrics().clone();
        log_success!(logging::codes::success::SCAN_COMPLETE,
            "Lexical scan completed successfully",
            "file" => file_path,
            "lines_scanned" => metrics.lines_scanned,
            "tokens_emitted" => metrics.total_tokens(),
            "distinct_tokens" => store.total_count(),
            "unterminated_strings" => metrics.unterminated_strings,
            "dispatch_steps" => metrics.dispatch_steps);

        let result = RunResult::new(
            file_result.metadata,
            lines,
            store,
            metrics,
            start_time.elapsed(),
        );

        result.log_success(file_path);

        Ok(result)
    })
}
