use crate::graph_inspection::domain::GraphDependency;
use crate::shared::Result;
use std::cell::RefCell;

/// Maximum number of exclude patterns to keep filter setup bounded
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// NodeFilter - Removes nodes from a graph snapshot by exclusion pattern
///
/// Supports wildcard patterns using '*' to match zero or more characters
/// against node ids (e.g. `"debug-*"`, `"lodash@*"`). A filtered node is
/// removed from the snapshot and scrubbed from every remaining node's
/// adjacency lists, so traversal never re-discovers it through an edge.
#[derive(Debug)]
pub struct NodeFilter {
    patterns: Vec<ExcludePattern>,
}

impl NodeFilter {
    /// Creates a new NodeFilter from raw pattern strings
    ///
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern (length, characters)
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let mut compiled_patterns = Vec::new();
        for pattern in patterns {
            compiled_patterns.push(ExcludePattern::new(pattern)?);
        }

        Ok(Self {
            patterns: compiled_patterns,
        })
    }

    /// Filters the snapshot, dropping matching nodes and scrubbing their ids
    /// from the adjacency lists of the nodes that remain.
    pub fn filter_graph(&self, graph: Vec<GraphDependency>) -> Vec<GraphDependency> {
        graph
            .into_iter()
            .filter(|node| !self.matches(node.id()))
            .map(|node| {
                let parent_ids = node
                    .parent_ids()
                    .iter()
                    .filter(|id| !self.matches(id))
                    .cloned()
                    .collect();
                let children_ids = node
                    .children_ids()
                    .iter()
                    .filter(|id| !self.matches(id))
                    .cloned()
                    .collect();
                GraphDependency::new(node.id(), parent_ids, children_ids)
            })
            .collect()
    }

    /// Checks if a node id matches any exclusion pattern
    fn matches(&self, node_id: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(node_id))
    }

    /// Returns the patterns that did not match any node id.
    ///
    /// Call after filtering to surface patterns that had no effect.
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !*p.matched.borrow())
            .map(|p| p.original.clone())
            .collect()
    }
}

/// A single exclusion pattern with its compiled matcher
#[derive(Debug)]
struct ExcludePattern {
    original: String,
    segments: Vec<String>,
    matched: RefCell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;

        let segments = pattern.split('*').map(String::from).collect();

        Ok(Self {
            original: pattern,
            segments,
            matched: RefCell::new(false),
        })
    }

    fn matches(&self, node_id: &str) -> bool {
        let is_match = match_segments(&self.segments, node_id);
        if is_match {
            *self.matched.borrow_mut() = true;
        }
        is_match
    }
}

/// Matches `*`-separated literal segments against a candidate: the first
/// segment anchors at the start, the last at the end, and the rest must
/// appear in order between them.
fn match_segments(segments: &[String], candidate: &str) -> bool {
    match segments {
        [] => candidate.is_empty(),
        [only] => candidate == only,
        [first, middle @ .., last] => {
            if candidate.len() < first.len() + last.len()
                || !candidate.starts_with(first.as_str())
                || !candidate.ends_with(last.as_str())
            {
                return false;
            }
            let mut rest = &candidate[first.len()..candidate.len() - last.len()];
            for segment in middle {
                match rest.find(segment.as_str()) {
                    Some(pos) => rest = &rest[pos + segment.len()..],
                    None => return false,
                }
            }
            true
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long ({} bytes). Maximum allowed: {} bytes",
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    // Character whitelist covers package ids: scoped names, versions, wildcards
    if !pattern.chars().all(|c| {
        c.is_alphanumeric()
            || c == '*'
            || c == '-'
            || c == '_'
            || c == '.'
            || c == '@'
            || c == '/'
            || c == '+'
    }) {
        anyhow::bail!(
            "Exclusion pattern '{}' contains invalid characters. Only alphanumeric, '-', '_', '.', '@', '/', '+' and '*' are allowed.",
            pattern
        );
    }

    Ok(())
}
