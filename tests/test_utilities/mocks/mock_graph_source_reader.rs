use sbom_graph::prelude::*;
use std::path::Path;

/// Mock GraphSourceReader serving a canned document
pub struct MockGraphSourceReader {
    content: String,
}

impl MockGraphSourceReader {
    pub fn new(content: String) -> Self {
        Self { content }
    }
}

impl GraphSourceReader for MockGraphSourceReader {
    fn read_graph(&self, _document_path: &Path) -> Result<GraphSnapshot> {
        Ok(serde_json::from_str(&self.content)?)
    }
}
