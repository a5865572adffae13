use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::TraversalFormatter;

/// Factory for creating report formatters
///
/// Encapsulates the selection of formatter adapters based on the requested
/// output format. Lives in the application layer because it orchestrates
/// infrastructure on behalf of the use case flow.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    pub fn create(format: OutputFormat) -> Box<dyn TraversalFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON report...",
            OutputFormat::Markdown => "📝 Generating Markdown report...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{QueryKind, QueryOutcome, QueryResponse};
    use crate::application::read_models::TraversalReport;
    use crate::graph_inspection::domain::{NodeTraversal, ReportMetadata};

    fn empty_report() -> TraversalReport {
        let response = QueryResponse::new(
            QueryOutcome::Neighborhood(NodeTraversal::not_found()),
            ReportMetadata::new(
                "2026-01-01T00:00:00Z".to_string(),
                "sbom-graph".to_string(),
                "0.4.1".to_string(),
                "urn:uuid:test".to_string(),
                false,
            ),
            None,
            false,
        );
        TraversalReport::build(QueryKind::Full, "a@1.0.0", &response)
    }

    #[test]
    fn test_create_json_formatter_produces_json() {
        let formatter = FormatterFactory::create(OutputFormat::Json);
        let output = formatter.format(&empty_report()).unwrap();
        assert!(output.trim_start().starts_with('{'));
    }

    #[test]
    fn test_create_markdown_formatter_produces_markdown() {
        let formatter = FormatterFactory::create(OutputFormat::Markdown);
        let output = formatter.format(&empty_report()).unwrap();
        assert!(output.starts_with('#'));
    }

    #[test]
    fn test_progress_messages() {
        assert!(FormatterFactory::progress_message(OutputFormat::Json).contains("JSON"));
        assert!(FormatterFactory::progress_message(OutputFormat::Markdown).contains("Markdown"));
    }
}
