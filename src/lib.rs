//! sbom-graph - Dependency graph inspection for SBOM analysis results
//!
//! This library answers dependents/dependencies/provenance queries over the
//! dependency graph persisted by an SBOM analysis run, following hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`graph_inspection`): Pure traversal logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_graph::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let graph_reader = FileSystemReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case: InspectGraphUseCase<_, _, ()> =
//!     InspectGraphUseCase::new(graph_reader, progress_reporter, None);
//!
//! // Execute
//! let request = QueryRequest::new(
//!     PathBuf::from("analysis.json"),
//!     "lodash@4.17.21".to_string(),
//!     QueryKind::Full,
//! );
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let report = TraversalReport::build(QueryKind::Full, "lodash@4.17.21", &response);
//! let formatter = JsonFormatter::new();
//! println!("{}", formatter.format(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod graph_inspection;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::{CachingVulnerabilityRepository, OsvClient};
    pub use crate::application::dto::{
        OutputFormat, QueryKind, QueryOutcome, QueryRequest, QueryResponse,
    };
    pub use crate::application::factories::FormatterFactory;
    pub use crate::application::read_models::TraversalReport;
    pub use crate::application::use_cases::{CheckVulnerabilitiesUseCase, InspectGraphUseCase};
    pub use crate::graph_inspection::domain::{
        GraphDependency, NodeTraversal, PackageRef, PackageVulnerabilities, ReportMetadata,
        Severity, Vulnerability,
    };
    pub use crate::graph_inspection::services::{GraphTraversal, NodeFilter, ReportGenerator};
    pub use crate::ports::outbound::{
        GraphSnapshot, GraphSourceReader, OutputPresenter, ProgressReporter, TraversalFormatter,
        VulnerabilityRepository,
    };
    pub use crate::shared::Result;
}
