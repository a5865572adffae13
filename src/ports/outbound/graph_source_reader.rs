use crate::graph_inspection::domain::GraphDependency;
use crate::shared::Result;
use serde::Deserialize;
use std::path::Path;

/// One parsed analysis document: the dependency graph persisted by an
/// analysis run, plus the envelope fields that identify it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    #[serde(default)]
    pub analysis_id: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
    pub dependencies: Vec<GraphDependency>,
}

/// GraphSourceReader port for loading analysis documents
///
/// This port abstracts where the persisted dependency graph comes from
/// (local file today; an object store in the hosted deployment).
pub trait GraphSourceReader {
    /// Reads and parses the analysis document at the given path
    ///
    /// # Errors
    /// Returns an error if:
    /// - The document does not exist or cannot be read
    /// - The document is not a valid JSON dependency graph
    fn read_graph(&self, document_path: &Path) -> Result<GraphSnapshot>;
}
