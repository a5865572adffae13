use super::GraphDependency;

/// Outcome of an ancestor/descendant query against one graph snapshot.
///
/// "Target not found" is represented structurally: `node` is `None` and both
/// result sets are empty. Traversal never signals absence through an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeTraversal {
    node: Option<GraphDependency>,
    parents: Vec<GraphDependency>,
    children: Vec<GraphDependency>,
}

impl NodeTraversal {
    pub fn new(
        node: Option<GraphDependency>,
        parents: Vec<GraphDependency>,
        children: Vec<GraphDependency>,
    ) -> Self {
        Self {
            node,
            parents,
            children,
        }
    }

    /// The empty result returned when the requested id is not in the graph.
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn node(&self) -> Option<&GraphDependency> {
        self.node.as_ref()
    }

    pub fn parents(&self) -> &[GraphDependency] {
        &self.parents
    }

    pub fn children(&self) -> &[GraphDependency] {
        &self.children
    }

    pub fn is_found(&self) -> bool {
        self.node.is_some()
    }

    /// Decomposes the traversal into (node, parents, children).
    pub fn into_parts(
        self,
    ) -> (
        Option<GraphDependency>,
        Vec<GraphDependency>,
        Vec<GraphDependency>,
    ) {
        (self.node, self.parents, self.children)
    }
}
