pub mod traversal_report;

pub use traversal_report::{
    MetadataView, NodeView, ReportSection, TraversalReport, VulnerabilityView,
};
