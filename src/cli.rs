use clap::Parser;

use crate::application::dto::{OutputFormat, QueryKind};
use crate::graph_inspection::domain::Severity;

/// Query dependency relationships in an SBOM analysis document
#[derive(Parser, Debug)]
#[command(name = "sbom-graph")]
#[command(version)]
#[command(
    about = "Query dependents, dependencies and provenance paths in an SBOM dependency graph",
    long_about = None
)]
pub struct Args {
    /// Target package id (`name@version`), e.g. "lodash@4.17.21"
    pub target: String,

    /// Query to run: full, direct, related or provenance
    #[arg(short, long, default_value = "full")]
    pub query: QueryKind,

    /// Path to the analysis document (defaults to ./analysis.json)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Exclude nodes matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "debug-*" -e "left-pad@*"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Check the result set against the OSV advisory database
    #[arg(long = "check-vulnerabilities")]
    pub check_vulnerabilities: bool,

    /// Exit non-zero when a vulnerability at or above this severity is found
    #[arg(long = "fail-on", value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,

    /// Advisory ecosystem for OSV queries (e.g. npm, PyPI, crates.io)
    #[arg(long)]
    pub ecosystem: Option<String>,

    /// Path to a config file (defaults to sbom-graph.config.yml next to the input)
    #[arg(long)]
    pub config: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
