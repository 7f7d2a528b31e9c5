use crate::file_processor::FileProcessorError;
use crate::grammar::GrammarError;
use crate::preprocess::BlockCommentError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Grammar configuration failed: {0}")]
    Grammar(#[from] GrammarError),

    #[error("Scanning failed: {0}")]
    BlockComment(#[from] BlockCommentError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }
}
