use crate::application::read_models::{ReportSection, TraversalReport};
use crate::ports::outbound::TraversalFormatter;
use crate::shared::Result;

/// Markdown table header for node sections
const TABLE_HEADER: &str = "| Package | Direct dependents | Direct dependencies |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|-------------------|---------------------|\n";

/// Markdown table header for the vulnerability section
const VULN_TABLE_HEADER: &str = "| Package | Advisory | Severity | Fixed version | Summary |\n";

/// Markdown table separator line for the vulnerability table
const VULN_TABLE_SEPARATOR: &str = "|---------|----------|----------|---------------|---------|\n";

/// MarkdownFormatter adapter rendering the query report as Markdown
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_header(&self, output: &mut String, report: &TraversalReport) {
        output.push_str("# Dependency Graph Query\n\n");
        output.push_str(&format!("- **Query**: {}\n", report.query));
        output.push_str(&format!(
            "- **Target**: `{}`\n",
            Self::escape_table_cell(&report.target_id)
        ));
        output.push_str(&format!(
            "- **Generated**: {} ({} {})\n\n",
            report.metadata.timestamp, report.metadata.tool_name, report.metadata.tool_version
        ));
    }

    fn render_section(&self, output: &mut String, section: &ReportSection) {
        output.push_str(&format!(
            "## {} ({})\n\n",
            section.title,
            section.nodes.len()
        ));

        if section.nodes.is_empty() {
            output.push_str("None.\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for node in &section.nodes {
            output.push_str(&format!(
                "| `{}` | {} | {} |\n",
                Self::escape_table_cell(&node.id),
                node.direct_dependents,
                node.direct_dependencies
            ));
        }
        output.push('\n');
    }

    fn render_vulnerabilities(&self, output: &mut String, report: &TraversalReport) {
        let Some(views) = &report.vulnerabilities else {
            return;
        };

        output.push_str(&format!("## Known Vulnerabilities ({})\n\n", views.len()));

        if views.is_empty() {
            output.push_str("No known vulnerabilities in the result set.\n\n");
            return;
        }

        output.push_str(VULN_TABLE_HEADER);
        output.push_str(VULN_TABLE_SEPARATOR);
        for view in views {
            output.push_str(&format!(
                "| `{}` | {} | {} | {} | {} |\n",
                Self::escape_table_cell(&view.package_id),
                Self::escape_table_cell(&view.advisory_id),
                view.severity,
                view.fixed_version.as_deref().unwrap_or("-"),
                Self::escape_table_cell(view.summary.as_deref().unwrap_or("-")),
            ));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TraversalFormatter for MarkdownFormatter {
    fn format(&self, report: &TraversalReport) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, report);

        if !report.target_found {
            output.push_str(&format!(
                "Target `{}` was not found in the graph.\n",
                Self::escape_table_cell(&report.target_id)
            ));
            return Ok(output);
        }

        for section in &report.sections {
            self.render_section(&mut output, section);
        }
        self.render_vulnerabilities(&mut output, report);

        Ok(output)
    }
}
