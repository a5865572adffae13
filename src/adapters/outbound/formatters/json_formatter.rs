use crate::application::read_models::TraversalReport;
use crate::ports::outbound::TraversalFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    query: String,
    target: String,
    target_found: bool,
    sections: Vec<Section>,
    metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    vulnerabilities: Option<Vec<Vulnerability>>,
}

#[derive(Debug, Serialize)]
struct Section {
    title: String,
    nodes: Vec<Node>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Node {
    id: String,
    direct_dependents: usize,
    direct_dependencies: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    serial_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Vulnerability {
    package: String,
    id: String,
    severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cvss_vector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixed_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
}

/// JsonFormatter adapter rendering the query report as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TraversalFormatter for JsonFormatter {
    fn format(&self, report: &TraversalReport) -> Result<String> {
        let document = Report {
            query: report.query.clone(),
            target: report.target_id.clone(),
            target_found: report.target_found,
            sections: report
                .sections
                .iter()
                .map(|section| Section {
                    title: section.title.clone(),
                    nodes: section
                        .nodes
                        .iter()
                        .map(|node| Node {
                            id: node.id.clone(),
                            direct_dependents: node.direct_dependents,
                            direct_dependencies: node.direct_dependencies,
                        })
                        .collect(),
                })
                .collect(),
            metadata: Metadata {
                timestamp: report.metadata.timestamp.clone(),
                tool_name: report.metadata.tool_name.clone(),
                tool_version: report.metadata.tool_version.clone(),
                serial_number: report.metadata.serial_number.clone(),
            },
            vulnerabilities: report.vulnerabilities.as_ref().map(|views| {
                views
                    .iter()
                    .map(|view| Vulnerability {
                        package: view.package_id.clone(),
                        id: view.advisory_id.clone(),
                        severity: view.severity.clone(),
                        cvss_vector: view.cvss_vector.clone(),
                        fixed_version: view.fixed_version.clone(),
                        summary: view.summary.clone(),
                    })
                    .collect()
            }),
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{QueryKind, QueryOutcome, QueryResponse};
    use crate::graph_inspection::domain::{
        GraphDependency, NodeTraversal, PackageVulnerabilities, ReportMetadata, Severity,
        Vulnerability as DomainVulnerability,
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
    fn test_format_neighborhood_report() {
        let traversal = NodeTraversal::new(
            Some(GraphDependency::root("lodash@4.17.21")),
            vec![GraphDependency::new(
                "app@1.0.0",
                vec![],
                vec!["lodash@4.17.21".to_string()],
            )],
            vec![],
        );
        let response = QueryResponse::new(
            QueryOutcome::Neighborhood(traversal),
            metadata(),
            None,
            false,
        );
        let report = TraversalReport::build(QueryKind::Full, "lodash@4.17.21", &response);

        let output = JsonFormatter::new().format(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["query"], "full");
        assert_eq!(value["target"], "lodash@4.17.21");
        assert_eq!(value["targetFound"], true);
        assert_eq!(value["sections"][0]["title"], "Dependents");
        assert_eq!(value["sections"][0]["nodes"][0]["id"], "app@1.0.0");
        assert_eq!(value["sections"][0]["nodes"][0]["directDependencies"], 1);
        assert_eq!(value["metadata"]["toolName"], "sbom-graph");
        assert!(value.get("vulnerabilities").is_none());
    }

    #[test]
    fn test_format_includes_vulnerabilities_when_checked() {
        let vulnerability = DomainVulnerability::new(
            "GHSA-aaaa".to_string(),
            Severity::High,
            Some("CVSS:3.1/AV:N".to_string()),
            Some("4.17.21".to_string()),
            Some("Prototype pollution".to_string()),
        )
        .unwrap();
        let response = QueryResponse::new(
            QueryOutcome::Subgraph(vec![GraphDependency::root("lodash@4.17.20")]),
            metadata(),
            Some(vec![PackageVulnerabilities::new(
                "lodash".to_string(),
                "4.17.20".to_string(),
                vec![vulnerability],
            )]),
            true,
        );
        let report = TraversalReport::build(QueryKind::Related, "lodash@4.17.20", &response);

        let output = JsonFormatter::new().format(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["vulnerabilities"][0]["package"], "lodash@4.17.20");
        assert_eq!(value["vulnerabilities"][0]["id"], "GHSA-aaaa");
        assert_eq!(value["vulnerabilities"][0]["severity"], "High");
        assert_eq!(value["vulnerabilities"][0]["fixedVersion"], "4.17.21");
    }

    #[test]
    fn test_format_not_found_report() {
        let response = QueryResponse::new(
            QueryOutcome::Subgraph(Vec::new()),
            metadata(),
            None,
            false,
        );
        let report = TraversalReport::build(QueryKind::Provenance, "ghost@0.0.0", &response);

        let output = JsonFormatter::new().format(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["targetFound"], false);
        assert_eq!(value["sections"][0]["nodes"].as_array().unwrap().len(), 0);
    }
}
