use crate::application::read_models::TraversalReport;
use crate::shared::Result;

/// TraversalFormatter port for rendering a query report
///
/// Implementations turn the formatter-facing read model into the final
/// output text (JSON, Markdown).
pub trait TraversalFormatter {
    /// Formats the report into output text
    fn format(&self, report: &TraversalReport) -> Result<String>;
}
