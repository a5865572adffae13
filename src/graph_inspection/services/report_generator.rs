use crate::graph_inspection::domain::ReportMetadata;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// ReportGenerator service producing metadata for query reports
pub struct ReportGenerator;

impl ReportGenerator {
    /// Generates default metadata for one report: current UTC timestamp,
    /// tool identity from the build, and a fresh urn:uuid serial number.
    pub fn generate_default_metadata(vulnerability_checked: bool) -> ReportMetadata {
        ReportMetadata::new(
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "sbom-graph".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
            format!("urn:uuid:{}", Uuid::new_v4()),
            vulnerability_checked,
        )
    }
}
