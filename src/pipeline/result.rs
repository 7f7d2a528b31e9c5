use crate::file_processor::FileMetadata;
use crate::lexical::ScanMetrics;
use crate::preprocess::NormalizedLine;
use crate::tokens::TokenStore;
use std::time::Duration;

/// Width of the rule lines framing the normalized source in the report.
const REPORT_RULE_WIDTH: usize = 40;

/// Complete classification result for one input file
#[derive(Debug)]
pub struct RunResult {
    pub file_metadata: FileMetadata,
    pub normalized: Vec<NormalizedLine>,
    pub store: TokenStore,
    pub scan_metrics: ScanMetrics,
    pub processing_duration: Duration,
}

impl RunResult {
    pub fn new(
        file_metadata: FileMetadata,
        normalized: Vec<NormalizedLine>,
        store: TokenStore,
        scan_metrics: ScanMetrics,
        processing_duration: Duration,
    ) -> Self {
        Self {
            file_metadata,
            normalized,
            store,
            scan_metrics,
            processing_duration,
        }
    }

    /// Render the human-readable report: normalized source, the six
    /// categories with their members, and the total token count.
    pub fn render_report(&self) -> String {
        let rule = "*".repeat(REPORT_RULE_WIDTH);
        let mut out = String::new();

        out.push_str("Code:\n");
        out.push_str(&rule);
        out.push('\n');
        for line in &self.normalized {
            out.push_str(&line.text);
            out.push('\n');
        }
        out.push_str(&rule);
        out.push_str("\n\n");

        for (category, members) in self.store.report_order() {
            out.push_str(&format!(
                "{}: [{}]\n",
                category.label(),
                members.join(", ")
            ));
        }

        out.push_str(&format!("\ntotal tokens: {}\n", self.store.total_count()));
        out
    }

    pub fn log_success(&self, file_path: &str) {
        crate::log_success!(
            crate::logging::codes::success::REPORT_COMPLETE,
            "Classification pipeline succeeded",
            "file" => file_path,
            "lines" => self.normalized.len(),
            "distinct_tokens" => self.store.total_count(),
            "token_occurrences" => self.store.occurrences(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;
    use std::path::PathBuf;

    fn metadata() -> FileMetadata {
        FileMetadata {
            path: PathBuf::from("input.py"),
            size: 10,
            extension: Some("py".to_string()),
            line_count: 1,
            modified: None,
        }
    }

    #[test]
    fn test_render_report_grouping() {
        let mut store = TokenStore::new();
        store.record(Token::identifier("x"));
        store.record(Token::operator("="));
        store.record(Token::literal("5"));
        store.record(Token::comment("# assign"));

        let result = RunResult::new(
            metadata(),
            vec![NormalizedLine::new(1, "x = 5 # assign")],
            store,
            ScanMetrics::default(),
            Duration::from_millis(1),
        );

        let report = result.render_report();
        assert!(report.contains("Code:"));
        assert!(report.contains("x = 5 # assign"));
        assert!(report.contains("keywords: []"));
        assert!(report.contains("identifiers: [x]"));
        assert!(report.contains("operators: [=]"));
        assert!(report.contains("literals: [5]"));
        assert!(report.contains("comments: [# assign]"));
        assert!(report.contains("total tokens: 4"));
    }

    #[test]
    fn test_categories_appear_in_declaration_order() {
        let result = RunResult::new(
            metadata(),
            vec![],
            TokenStore::new(),
            ScanMetrics::default(),
            Duration::from_millis(1),
        );

        let report = result.render_report();
        let keyword_pos = report.find("keywords:").unwrap();
        let identifier_pos = report.find("identifiers:").unwrap();
        let operator_pos = report.find("operators:").unwrap();
        let delimiter_pos = report.find("delimiters:").unwrap();
        let literal_pos = report.find("literals:").unwrap();
        let comment_pos = report.find("comments:").unwrap();

        assert!(keyword_pos < identifier_pos);
        assert!(identifier_pos < operator_pos);
        assert!(operator_pos < delimiter_pos);
        assert!(delimiter_pos < literal_pos);
        assert!(literal_pos < comment_pos);
    }
}
