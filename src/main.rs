use lexiclass::{logging, pipeline};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize global logging system
    logging::init_global_logging()?;

    // Validate pipeline configuration
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <source-file>", args[0]);
        std::process::exit(1);
    }

    match pipeline::process_file(&args[1]) {
        Ok(result) => {
            print!("{}", result.render_report());
        }
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            print_detailed_error(&error);

            // Print cargo-style error summary
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_detailed_error(error: &pipeline::PipelineError) {
    match error {
        pipeline::PipelineError::FileProcessing(ref file_err) => {
            eprintln!("File processing stage failed:");
            eprintln!("  {}", file_err);
        }
        pipeline::PipelineError::Grammar(ref grammar_err) => {
            eprintln!("Grammar configuration failed:");
            eprintln!("  {}", grammar_err);
        }
        pipeline::PipelineError::BlockComment(ref block_err) => {
            eprintln!("Scanning stage failed:");
            eprintln!("  {}", block_err);
        }
        pipeline::PipelineError::Pipeline { message } => {
            eprintln!("Pipeline error: {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_detailed_error_variants() {
        // print_detailed_error writes to stderr; just verify it does not
        // panic for each variant
        print_detailed_error(&pipeline::PipelineError::pipeline_error("test"));
        print_detailed_error(&pipeline::PipelineError::FileProcessing(
            lexiclass::file_processor::FileProcessorError::FileNotFound {
                path: "missing.py".to_string(),
            },
        ));
    }
}
