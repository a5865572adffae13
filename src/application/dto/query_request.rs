use super::QueryKind;
use crate::graph_inspection::domain::Severity;
use std::path::PathBuf;

/// QueryRequest - Internal request DTO for the graph query use case
///
/// Represents one fully-resolved query after CLI flags and config file
/// have been merged.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// Path to the analysis document containing the dependency graph
    pub document_path: PathBuf,
    /// Id of the target node (`package@version`)
    pub target_id: String,
    /// Which of the four traversal queries to run
    pub kind: QueryKind,
    /// Patterns for excluding nodes from the snapshot before traversal
    pub exclude_patterns: Vec<String>,
    /// Whether to annotate the result set with known vulnerabilities
    pub check_vulnerabilities: bool,
    /// Advisory ecosystem to query (e.g. "npm", "PyPI")
    pub ecosystem: String,
    /// Advisory ids to drop from the vulnerability report
    pub ignored_vulnerabilities: Vec<String>,
    /// Minimum severity that makes the run exit non-zero
    pub fail_severity: Option<Severity>,
}

impl QueryRequest {
    pub fn new(document_path: PathBuf, target_id: String, kind: QueryKind) -> Self {
        Self {
            document_path,
            target_id,
            kind,
            exclude_patterns: Vec::new(),
            check_vulnerabilities: false,
            ecosystem: "npm".to_string(),
            ignored_vulnerabilities: Vec::new(),
            fail_severity: None,
        }
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_vulnerability_check(
        mut self,
        ecosystem: String,
        ignored: Vec<String>,
        fail_severity: Option<Severity>,
    ) -> Self {
        self.check_vulnerabilities = true;
        self.ecosystem = ecosystem;
        self.ignored_vulnerabilities = ignored;
        self.fail_severity = fail_severity;
        self
    }
}
