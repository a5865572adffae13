use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Maximum length for package ids (security limit)
const MAX_PACKAGE_ID_LENGTH: usize = 512;

/// A node in the dependency graph of one analysis snapshot.
///
/// The id uniquely identifies a package+version (e.g. `"lodash@4.17.21"`).
/// Adjacency is advisory: an id listed in `parent_ids` or `children_ids`
/// may not correspond to any node in the snapshot (dangling reference),
/// and traversal must tolerate that rather than fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDependency {
    id: String,
    /// Ids of packages that directly depend on this node. Empty for roots
    /// and for nodes the analysis has not linked yet.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    parent_ids: Vec<String>,
    /// Ids of packages this node directly depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children_ids: Vec<String>,
}

impl GraphDependency {
    pub fn new(id: impl Into<String>, parent_ids: Vec<String>, children_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            parent_ids,
            children_ids,
        }
    }

    /// A node with no recorded adjacency (root or unprocessed).
    pub fn root(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new(), Vec::new())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent_ids(&self) -> &[String] {
        &self.parent_ids
    }

    pub fn children_ids(&self) -> &[String] {
        &self.children_ids
    }

    /// Parses the node id into its package name and version parts.
    pub fn package_ref(&self) -> Result<PackageRef> {
        PackageRef::parse(&self.id)
    }
}

/// NewType wrapper for a `name@version` package reference with validation.
///
/// The version separator is the last `@` in the id, so scoped names such as
/// `@angular/core@14.0.0` parse correctly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    name: String,
    version: Option<String>,
}

impl PackageRef {
    pub fn parse(id: &str) -> Result<Self> {
        if id.is_empty() {
            anyhow::bail!("Package id cannot be empty");
        }

        // Security: Length limit to keep ids bounded
        if id.len() > MAX_PACKAGE_ID_LENGTH {
            anyhow::bail!(
                "Package id is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_PACKAGE_ID_LENGTH
            );
        }

        let (name, version) = match id.rfind('@') {
            // An '@' at index 0 is a scope prefix, not a version separator
            Some(0) | None => (id, None),
            Some(pos) => {
                let (name, version) = id.split_at(pos);
                (name, Some(&version[1..]))
            }
        };

        if name.is_empty() {
            anyhow::bail!("Package id '{}' has an empty name part", id);
        }
        if let Some(v) = version {
            if v.is_empty() {
                anyhow::bail!("Package id '{}' has an empty version part", id);
            }
        }

        Ok(Self {
            name: name.to_string(),
            version: version.map(String::from),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl std::fmt::Display for PackageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_dependency_accessors() {
        let node = GraphDependency::new(
            "lodash@4.17.21",
            vec!["app@1.0.0".to_string()],
            vec!["tiny@0.1.0".to_string()],
        );
        assert_eq!(node.id(), "lodash@4.17.21");
        assert_eq!(node.parent_ids(), ["app@1.0.0".to_string()]);
        assert_eq!(node.children_ids(), ["tiny@0.1.0".to_string()]);
    }

    #[test]
    fn test_graph_dependency_root_has_no_adjacency() {
        let node = GraphDependency::root("app@1.0.0");
        assert!(node.parent_ids().is_empty());
        assert!(node.children_ids().is_empty());
    }

    #[test]
    fn test_graph_dependency_deserialize_missing_adjacency() {
        let node: GraphDependency = serde_json::from_str(r#"{"id": "lodash@4.17.21"}"#).unwrap();
        assert_eq!(node.id(), "lodash@4.17.21");
        assert!(node.parent_ids().is_empty());
        assert!(node.children_ids().is_empty());
    }

    #[test]
    fn test_graph_dependency_deserialize_camel_case() {
        let node: GraphDependency = serde_json::from_str(
            r#"{"id": "a@1.0.0", "parentIds": ["b@2.0.0"], "childrenIds": ["c@3.0.0"]}"#,
        )
        .unwrap();
        assert_eq!(node.parent_ids(), ["b@2.0.0".to_string()]);
        assert_eq!(node.children_ids(), ["c@3.0.0".to_string()]);
    }

    #[test]
    fn test_package_ref_parse_name_and_version() {
        let package = PackageRef::parse("lodash@4.17.21").unwrap();
        assert_eq!(package.name(), "lodash");
        assert_eq!(package.version(), Some("4.17.21"));
        assert_eq!(format!("{}", package), "lodash@4.17.21");
    }

    #[test]
    fn test_package_ref_parse_scoped_name() {
        let package = PackageRef::parse("@angular/core@14.0.0").unwrap();
        assert_eq!(package.name(), "@angular/core");
        assert_eq!(package.version(), Some("14.0.0"));
    }

    #[test]
    fn test_package_ref_parse_no_version() {
        let package = PackageRef::parse("lodash").unwrap();
        assert_eq!(package.name(), "lodash");
        assert_eq!(package.version(), None);
    }

    #[test]
    fn test_package_ref_parse_scope_only_is_a_name() {
        // The leading '@' is a scope marker, not a version separator
        let package = PackageRef::parse("@types").unwrap();
        assert_eq!(package.name(), "@types");
        assert_eq!(package.version(), None);
    }

    #[test]
    fn test_package_ref_parse_empty() {
        assert!(PackageRef::parse("").is_err());
    }

    #[test]
    fn test_package_ref_parse_empty_version() {
        assert!(PackageRef::parse("lodash@").is_err());
    }

    #[test]
    fn test_package_ref_parse_too_long() {
        let id = "a".repeat(600);
        assert!(PackageRef::parse(&id).is_err());
    }
}
