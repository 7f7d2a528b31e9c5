/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    // Validate file processor integration
    crate::file_processor::init_file_processor_logging()?;

    // Validate grammar integration
    crate::grammar::init_grammar_logging()?;

    // Validate scanner integration
    crate::lexical::init_scanner_logging()?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 3,
        "file_processing" => true,
        "grammar" => true,
        "scanning" => true
    );

    Ok(())
}
