use crate::ports::outbound::{GraphSnapshot, GraphSourceReader};
use crate::shared::error::GraphQueryError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for loading analysis documents from disk
///
/// Implements the GraphSourceReader port with the safe-read checks applied
/// to every document before parsing.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Safely read a file:
    /// - Reject symbolic links
    /// - Validate it is a regular file
    /// - Enforce the size limit before reading
    fn safe_read_file(&self, path: &Path) -> Result<String> {
        validate_regular_file(path, "analysis document")?;

        let metadata = fs::symlink_metadata(path).map_err(|e| GraphQueryError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

        fs::read_to_string(path).map_err(|e| {
            GraphQueryError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphSourceReader for FileSystemReader {
    fn read_graph(&self, document_path: &Path) -> Result<GraphSnapshot> {
        if !document_path.exists() {
            return Err(GraphQueryError::DocumentNotFound {
                path: document_path.to_path_buf(),
                suggestion:
                    "Run an analysis first, or pass the document location with --input".to_string(),
            }
            .into());
        }

        let content = self.safe_read_file(document_path)?;

        let snapshot: GraphSnapshot =
            serde_json::from_str(&content).map_err(|e| GraphQueryError::DocumentParseError {
                path: document_path.to_path_buf(),
                details: e.to_string(),
            })?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_graph_valid_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("analysis.json");
        fs::write(
            &path,
            r#"{
                "analysisId": "an-42",
                "dependencies": [
                    {"id": "app@1.0.0"},
                    {"id": "lodash@4.17.21", "parentIds": ["app@1.0.0"]}
                ]
            }"#,
        )
        .unwrap();

        let snapshot = FileSystemReader::new().read_graph(&path).unwrap();
        assert_eq!(snapshot.analysis_id.as_deref(), Some("an-42"));
        assert_eq!(snapshot.dependencies.len(), 2);
    }

    #[test]
    fn test_read_graph_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let result = FileSystemReader::new().read_graph(&path);
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("Analysis document not found"));
    }

    #[test]
    fn test_read_graph_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("analysis.json");
        fs::write(&path, "not json at all").unwrap();

        let result = FileSystemReader::new().read_graph(&path);
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("Failed to parse"));
    }

    #[test]
    fn test_read_graph_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("analysis.json");
        fs::create_dir(&dir_path).unwrap();

        let result = FileSystemReader::new().read_graph(&dir_path);
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_graph_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        fs::write(&target, r#"{"dependencies": []}"#).unwrap();
        let link = temp_dir.path().join("analysis.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = FileSystemReader::new().read_graph(&link);
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("symbolic link"));
    }
}
