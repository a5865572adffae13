use crate::graph_inspection::domain::{PackageRef, PackageVulnerabilities};
use crate::shared::Result;
use async_trait::async_trait;

/// Callback invoked as vulnerability details are fetched: (current, total)
pub type ProgressCallback<'a> = Box<dyn Fn(usize, usize) + Send + 'a>;

/// VulnerabilityRepository port for fetching known-vulnerability data
///
/// Implementations query an advisory database (OSV) for the given package
/// versions and return only the packages that have vulnerabilities.
#[async_trait]
pub trait VulnerabilityRepository {
    /// Fetches vulnerabilities for the given packages
    async fn fetch_vulnerabilities(
        &self,
        packages: Vec<PackageRef>,
    ) -> Result<Vec<PackageVulnerabilities>>;

    /// Fetches vulnerabilities, invoking the callback as details arrive
    async fn fetch_vulnerabilities_with_progress(
        &self,
        packages: Vec<PackageRef>,
        progress_callback: ProgressCallback<'static>,
    ) -> Result<Vec<PackageVulnerabilities>>;
}

#[async_trait]
impl<T: VulnerabilityRepository + Sync> VulnerabilityRepository for &T {
    async fn fetch_vulnerabilities(
        &self,
        packages: Vec<PackageRef>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        (**self).fetch_vulnerabilities(packages).await
    }

    async fn fetch_vulnerabilities_with_progress(
        &self,
        packages: Vec<PackageRef>,
        progress_callback: ProgressCallback<'static>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        (**self)
            .fetch_vulnerabilities_with_progress(packages, progress_callback)
            .await
    }
}

/// Unit implementation used when no vulnerability source is configured.
#[async_trait]
impl VulnerabilityRepository for () {
    async fn fetch_vulnerabilities(
        &self,
        _packages: Vec<PackageRef>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        Ok(Vec::new())
    }

    async fn fetch_vulnerabilities_with_progress(
        &self,
        _packages: Vec<PackageRef>,
        _progress_callback: ProgressCallback<'static>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        Ok(Vec::new())
    }
}
