//! Formatter-facing read model
//!
//! Flattens the domain response into the plain strings and counts the
//! formatters render, so no formatter reaches into domain types.

use crate::application::dto::{QueryKind, QueryOutcome, QueryResponse};
use crate::graph_inspection::domain::GraphDependency;

/// Query report ready for rendering
#[derive(Debug, Clone)]
pub struct TraversalReport {
    pub query: String,
    pub target_id: String,
    pub target_found: bool,
    pub sections: Vec<ReportSection>,
    pub metadata: MetadataView,
    /// None = vulnerability check not performed
    pub vulnerabilities: Option<Vec<VulnerabilityView>>,
}

/// One titled group of result nodes
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub title: String,
    pub nodes: Vec<NodeView>,
}

/// View of one graph node
#[derive(Debug, Clone)]
pub struct NodeView {
    pub id: String,
    pub direct_dependents: usize,
    pub direct_dependencies: usize,
}

/// View of the report metadata
#[derive(Debug, Clone)]
pub struct MetadataView {
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    pub serial_number: String,
}

/// View of one advisory attached to a result node
#[derive(Debug, Clone)]
pub struct VulnerabilityView {
    pub package_id: String,
    pub advisory_id: String,
    pub severity: String,
    pub cvss_vector: Option<String>,
    pub fixed_version: Option<String>,
    pub summary: Option<String>,
}

impl TraversalReport {
    /// Builds the report for one executed query.
    pub fn build(kind: QueryKind, target_id: &str, response: &QueryResponse) -> Self {
        let sections = match &response.outcome {
            QueryOutcome::Neighborhood(traversal) => {
                let (dependents_title, dependencies_title) = match kind {
                    QueryKind::Direct => ("Direct dependents", "Direct dependencies"),
                    _ => ("Dependents", "Dependencies"),
                };
                vec![
                    ReportSection {
                        title: dependents_title.to_string(),
                        nodes: node_views(traversal.parents()),
                    },
                    ReportSection {
                        title: dependencies_title.to_string(),
                        nodes: node_views(traversal.children()),
                    },
                ]
            }
            QueryOutcome::Subgraph(nodes) => {
                let title = match kind {
                    QueryKind::Provenance => "Provenance",
                    _ => "Connected packages",
                };
                vec![ReportSection {
                    title: title.to_string(),
                    nodes: node_views(nodes),
                }]
            }
        };

        let vulnerabilities = response.vulnerability_report.as_ref().map(|report| {
            report
                .iter()
                .flat_map(|package| {
                    package.vulnerabilities().iter().map(|v| VulnerabilityView {
                        package_id: package.package_id(),
                        advisory_id: v.id().to_string(),
                        severity: v.severity().to_string(),
                        cvss_vector: v.cvss_vector().map(String::from),
                        fixed_version: v.fixed_version().map(String::from),
                        summary: v.summary().map(String::from),
                    })
                })
                .collect()
        });

        Self {
            query: kind.label().to_string(),
            target_id: target_id.to_string(),
            target_found: response.outcome.target_found(),
            sections,
            metadata: MetadataView {
                timestamp: response.metadata.timestamp().to_string(),
                tool_name: response.metadata.tool_name().to_string(),
                tool_version: response.metadata.tool_version().to_string(),
                serial_number: response.metadata.serial_number().to_string(),
            },
            vulnerabilities,
        }
    }

    /// Total number of nodes across all sections
    pub fn result_count(&self) -> usize {
        self.sections.iter().map(|s| s.nodes.len()).sum()
    }
}

fn node_views(nodes: &[GraphDependency]) -> Vec<NodeView> {
    nodes
        .iter()
        .map(|node| NodeView {
            id: node.id().to_string(),
            direct_dependents: node.parent_ids().len(),
            direct_dependencies: node.children_ids().len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_inspection::domain::{
        NodeTraversal, PackageVulnerabilities, ReportMetadata, Severity, Vulnerability,
    };

    fn metadata() -> ReportMetadata {
        ReportMetadata::new(
            "2026-01-01T00:00:00Z".to_string(),
            "sbom-graph".to_string(),
            "0.4.1".to_string(),
            "urn:uuid:test".to_string(),
            false,
        )
    }

    #[test]
    fn test_build_neighborhood_report() {
        let traversal = NodeTraversal::new(
            Some(GraphDependency::root("a@1.0.0")),
            vec![GraphDependency::new(
                "b@1.0.0",
                vec!["c@1.0.0".to_string()],
                vec![],
            )],
            vec![],
        );
        let response = QueryResponse::new(
            QueryOutcome::Neighborhood(traversal),
            metadata(),
            None,
            false,
        );

        let report = TraversalReport::build(QueryKind::Full, "a@1.0.0", &response);

        assert!(report.target_found);
        assert_eq!(report.query, "full");
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.sections[0].title, "Dependents");
        assert_eq!(report.sections[0].nodes[0].id, "b@1.0.0");
        assert_eq!(report.sections[0].nodes[0].direct_dependents, 1);
        assert_eq!(report.result_count(), 1);
        assert!(report.vulnerabilities.is_none());
    }

    #[test]
    fn test_build_direct_report_titles() {
        let response = QueryResponse::new(
            QueryOutcome::Neighborhood(NodeTraversal::not_found()),
            metadata(),
            None,
            false,
        );
        let report = TraversalReport::build(QueryKind::Direct, "a@1.0.0", &response);

        assert!(!report.target_found);
        assert_eq!(report.sections[0].title, "Direct dependents");
        assert_eq!(report.sections[1].title, "Direct dependencies");
    }

    #[test]
    fn test_build_subgraph_report_provenance_title() {
        let response = QueryResponse::new(
            QueryOutcome::Subgraph(vec![GraphDependency::root("a@1.0.0")]),
            metadata(),
            None,
            false,
        );
        let report = TraversalReport::build(QueryKind::Provenance, "a@1.0.0", &response);

        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].title, "Provenance");
        assert_eq!(report.result_count(), 1);
    }

    #[test]
    fn test_build_flattens_vulnerabilities() {
        let vulnerability = Vulnerability::new(
            "GHSA-aaaa".to_string(),
            Severity::High,
            None,
            Some("4.17.21".to_string()),
            Some("Prototype pollution".to_string()),
        )
        .unwrap();
        let report_entry = PackageVulnerabilities::new(
            "lodash".to_string(),
            "4.17.20".to_string(),
            vec![vulnerability],
        );
        let response = QueryResponse::new(
            QueryOutcome::Subgraph(vec![GraphDependency::root("lodash@4.17.20")]),
            metadata(),
            Some(vec![report_entry]),
            true,
        );

        let report = TraversalReport::build(QueryKind::Related, "lodash@4.17.20", &response);
        let views = report.vulnerabilities.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].package_id, "lodash@4.17.20");
        assert_eq!(views[0].advisory_id, "GHSA-aaaa");
        assert_eq!(views[0].severity, "High");
        assert_eq!(views[0].fixed_version.as_deref(), Some("4.17.21"));
    }
}
