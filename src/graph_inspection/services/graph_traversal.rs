use crate::graph_inspection::domain::{GraphDependency, NodeTraversal};
use std::collections::{HashMap, HashSet};

/// GraphTraversal service for ancestor/descendant queries over one snapshot
///
/// This service contains pure business logic with no I/O dependencies. Every
/// operation takes the complete node sequence, builds its own transient
/// lookup structures, and leaves the input untouched, so calls are
/// independent and safe to run from concurrent request handlers.
///
/// Stored adjacency is parent-pointing; descendant queries run over a child
/// map derived by inverting every node's parent ids. Cycles are broken with
/// per-call visited-sets keyed by id, and adjacency entries that resolve to
/// no node in the snapshot are skipped.
pub struct GraphTraversal;

impl GraphTraversal {
    /// Resolves the target and collects its full ancestor and descendant
    /// closures, each in discovery (pre-order) sequence.
    ///
    /// Returns the empty traversal when `node_id` is not in the graph.
    pub fn find_all_parents_and_children(
        node_id: &str,
        graph: &[GraphDependency],
    ) -> NodeTraversal {
        let index = GraphIndex::build(graph);
        let Some(target) = index.resolve(node_id) else {
            return NodeTraversal::not_found();
        };

        let mut parents = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(target.id());
        Self::collect_ancestors(target, &index, &mut parents, &mut visited);

        let mut children = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(target.id());
        Self::collect_descendants(target, &index, &mut children, &mut visited);

        NodeTraversal::new(Some(target.clone()), parents, children)
    }

    /// Resolves the target and collects only one-hop neighbors: parents from
    /// the target's own parent ids, children by scanning the input sequence
    /// for nodes that list the target as a parent.
    ///
    /// No recursion occurs, so no cycle handling is needed here.
    pub fn find_direct_parents_and_children(
        node_id: &str,
        graph: &[GraphDependency],
    ) -> NodeTraversal {
        let Some(target) = graph.iter().find(|node| node.id() == node_id) else {
            return NodeTraversal::not_found();
        };

        let parents: Vec<GraphDependency> = target
            .parent_ids()
            .iter()
            .filter_map(|parent_id| graph.iter().find(|node| node.id() == parent_id))
            .cloned()
            .collect();

        let children: Vec<GraphDependency> = graph
            .iter()
            .filter(|node| node.parent_ids().iter().any(|id| id == node_id))
            .cloned()
            .collect();

        NodeTraversal::new(Some(target.clone()), parents, children)
    }

    /// Every node that lies on some path passing through the target: the
    /// target itself plus its full ancestor and descendant closures, as one
    /// deduplicated sequence.
    ///
    /// Returns an empty sequence when the target is not in the graph.
    pub fn find_paths_containing(target_id: &str, graph: &[GraphDependency]) -> Vec<GraphDependency> {
        let traversal = Self::find_all_parents_and_children(target_id, graph);
        let (node, parents, children) = traversal.into_parts();
        let Some(target) = node else {
            return Vec::new();
        };

        // In a cyclic graph a node can be both ancestor and descendant of
        // the target; the union keeps its first occurrence only.
        let mut seen: HashSet<String> = HashSet::new();
        let mut result = Vec::with_capacity(1 + parents.len() + children.len());
        seen.insert(target.id().to_string());
        result.push(target);

        for node in parents.into_iter().chain(children) {
            if seen.insert(node.id().to_string()) {
                result.push(node);
            }
        }

        result
    }

    /// Every node on some root-to-target path: the target plus its full
    /// ancestor closure. Answers "why is this dependency present".
    ///
    /// Returns an empty sequence when the target is not in the graph.
    pub fn find_minimal_paths_to_target(
        target_id: &str,
        graph: &[GraphDependency],
    ) -> Vec<GraphDependency> {
        let traversal = Self::find_all_parents_and_children(target_id, graph);
        let (node, parents, _children) = traversal.into_parts();
        let Some(target) = node else {
            return Vec::new();
        };

        let mut result = Vec::with_capacity(1 + parents.len());
        result.push(target);
        result.extend(parents);
        result
    }

    fn collect_ancestors<'a>(
        node: &'a GraphDependency,
        index: &GraphIndex<'a>,
        ancestors: &mut Vec<GraphDependency>,
        visited: &mut HashSet<&'a str>,
    ) {
        for parent_id in node.parent_ids() {
            // Dangling reference: no such node in this snapshot, skip
            let Some(parent) = index.resolve(parent_id) else {
                continue;
            };
            if visited.insert(parent.id()) {
                ancestors.push(parent.clone());
                Self::collect_ancestors(parent, index, ancestors, visited);
            }
        }
    }

    fn collect_descendants<'a>(
        node: &'a GraphDependency,
        index: &GraphIndex<'a>,
        descendants: &mut Vec<GraphDependency>,
        visited: &mut HashSet<&'a str>,
    ) {
        for child in index.children_of(node.id()) {
            if visited.insert(child.id()) {
                descendants.push((*child).clone());
                Self::collect_descendants(child, index, descendants, visited);
            }
        }
    }
}

/// Per-invocation lookup structures shared by both closure directions.
///
/// `by_id` resolves any id encountered during traversal; `children_of`
/// inverts every node's parent ids into forward edges, since the stored
/// adjacency only points upward.
struct GraphIndex<'a> {
    by_id: HashMap<&'a str, &'a GraphDependency>,
    children_of: HashMap<&'a str, Vec<&'a GraphDependency>>,
}

impl<'a> GraphIndex<'a> {
    fn build(graph: &'a [GraphDependency]) -> Self {
        let mut by_id = HashMap::with_capacity(graph.len());
        for node in graph {
            by_id.insert(node.id(), node);
        }

        let mut children_of: HashMap<&str, Vec<&GraphDependency>> = HashMap::new();
        for node in graph {
            for parent_id in node.parent_ids() {
                children_of.entry(parent_id.as_str()).or_default().push(node);
            }
        }

        Self { by_id, children_of }
    }

    fn resolve(&self, id: &str) -> Option<&'a GraphDependency> {
        self.by_id.get(id).copied()
    }

    fn children_of(&self, id: &str) -> &[&'a GraphDependency] {
        self.children_of.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
