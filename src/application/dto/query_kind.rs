use std::fmt;
use std::str::FromStr;

/// The four traversal queries exposed by the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Full ancestor and descendant closures of the target
    Full,
    /// One-hop dependents and dependencies of the target
    Direct,
    /// Every node on some path passing through the target
    Related,
    /// Every node on some root-to-target path
    Provenance,
}

impl QueryKind {
    /// Short label used in reports and progress messages
    pub fn label(&self) -> &'static str {
        match self {
            QueryKind::Full => "full",
            QueryKind::Direct => "direct",
            QueryKind::Related => "related",
            QueryKind::Provenance => "provenance",
        }
    }

    /// Human description of what the query answers
    pub fn describe(&self) -> &'static str {
        match self {
            QueryKind::Full => "all transitive dependents and dependencies",
            QueryKind::Direct => "direct dependents and dependencies",
            QueryKind::Related => "every package connected through the target",
            QueryKind::Provenance => "why the target is present",
        }
    }
}

impl FromStr for QueryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(QueryKind::Full),
            "direct" => Ok(QueryKind::Direct),
            "related" => Ok(QueryKind::Related),
            "provenance" => Ok(QueryKind::Provenance),
            _ => Err(format!(
                "Invalid query: {}. Please specify 'full', 'direct', 'related' or 'provenance'",
                s
            )),
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
