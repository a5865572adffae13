use async_trait::async_trait;
use sbom_graph::ports::outbound::ProgressCallback;
use sbom_graph::prelude::*;

/// Mock VulnerabilityRepository serving a canned report
#[derive(Clone, Default)]
pub struct MockVulnerabilityRepository {
    report: Vec<PackageVulnerabilities>,
}

impl MockVulnerabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vulnerability(
        mut self,
        package_name: &str,
        version: &str,
        advisory_id: &str,
        severity: Severity,
    ) -> Self {
        let vulnerability = Vulnerability::new(
            advisory_id.to_string(),
            severity,
            None,
            None,
            Some(format!("Test advisory {}", advisory_id)),
        )
        .expect("valid advisory id");
        self.report.push(PackageVulnerabilities::new(
            package_name.to_string(),
            version.to_string(),
            vec![vulnerability],
        ));
        self
    }
}

#[async_trait]
impl VulnerabilityRepository for MockVulnerabilityRepository {
    async fn fetch_vulnerabilities(
        &self,
        _packages: Vec<PackageRef>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        Ok(self.report.clone())
    }

    async fn fetch_vulnerabilities_with_progress(
        &self,
        _packages: Vec<PackageRef>,
        _progress_callback: ProgressCallback<'static>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        Ok(self.report.clone())
    }
}
