use crate::graph_inspection::domain::{
    GraphDependency, NodeTraversal, PackageVulnerabilities, ReportMetadata,
};

/// Shape of one query's result set.
///
/// Neighborhood queries (full, direct) keep dependents and dependencies
/// apart; subgraph queries (related, provenance) return one flat sequence
/// with the target first.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Neighborhood(NodeTraversal),
    Subgraph(Vec<GraphDependency>),
}

impl QueryOutcome {
    /// Whether the requested target was present in the graph
    pub fn target_found(&self) -> bool {
        match self {
            QueryOutcome::Neighborhood(traversal) => traversal.is_found(),
            QueryOutcome::Subgraph(nodes) => !nodes.is_empty(),
        }
    }

    /// Every node in the result set, target included when found
    pub fn result_nodes(&self) -> Vec<&GraphDependency> {
        match self {
            QueryOutcome::Neighborhood(traversal) => traversal
                .node()
                .into_iter()
                .chain(traversal.parents())
                .chain(traversal.children())
                .collect(),
            QueryOutcome::Subgraph(nodes) => nodes.iter().collect(),
        }
    }
}

/// QueryResponse - Internal response DTO from the graph query use case
#[derive(Debug, Clone)]
pub struct QueryResponse {
    /// The traversal result
    pub outcome: QueryOutcome,
    /// Report metadata (timestamp, tool info, serial number)
    pub metadata: ReportMetadata,
    /// None = not checked, Some(vec) = checked (empty means all clean)
    pub vulnerability_report: Option<Vec<PackageVulnerabilities>>,
    /// Whether vulnerabilities at or above the fail threshold were found
    pub has_vulnerabilities_above_threshold: bool,
}

impl QueryResponse {
    pub fn new(
        outcome: QueryOutcome,
        metadata: ReportMetadata,
        vulnerability_report: Option<Vec<PackageVulnerabilities>>,
        has_vulnerabilities_above_threshold: bool,
    ) -> Self {
        Self {
            outcome,
            metadata,
            vulnerability_report,
            has_vulnerabilities_above_threshold,
        }
    }
}
