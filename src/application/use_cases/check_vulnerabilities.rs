use crate::graph_inspection::domain::{PackageRef, PackageVulnerabilities, Severity};
use crate::ports::outbound::VulnerabilityRepository;
use crate::shared::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// CheckVulnerabilitiesUseCase - Use case for checking vulnerabilities
///
/// Encapsulates the progress bar display around advisory fetching and the
/// post-processing applied to the raw report (ignore list, threshold).
///
/// # Type Parameters
/// * `R` - VulnerabilityRepository implementation
pub struct CheckVulnerabilitiesUseCase<R: VulnerabilityRepository> {
    vulnerability_repository: R,
}

impl<R: VulnerabilityRepository> CheckVulnerabilitiesUseCase<R> {
    pub fn new(vulnerability_repository: R) -> Self {
        Self {
            vulnerability_repository,
        }
    }

    /// Fetches vulnerabilities for packages with progress bar display
    ///
    /// Shows a spinner during the batch query phase and a progress bar
    /// while individual advisory details are fetched.
    pub async fn check_with_progress(
        &self,
        packages: Vec<PackageRef>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        // Atomic counters shared with the progress bar thread
        let progress_current = Arc::new(AtomicUsize::new(0));
        let progress_total = Arc::new(AtomicUsize::new(0));
        let is_done = Arc::new(AtomicBool::new(false));

        let current_clone = progress_current.clone();
        let total_clone = progress_total.clone();
        let done_clone = is_done.clone();

        let progress_handle = thread::spawn(move || {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} - {msg}")
                    .expect("Failed to set progress bar template")
                    .progress_chars("=>-"),
            );
            pb.set_message("Fetching advisory details...");

            while !done_clone.load(Ordering::Relaxed) {
                let current = current_clone.load(Ordering::Relaxed);
                let total = total_clone.load(Ordering::Relaxed);

                if total > 0 {
                    pb.set_length(total as u64);
                    pb.set_position(current as u64);
                } else {
                    // Still in batch query phase - show spinner
                    pb.tick();
                }

                thread::sleep(Duration::from_millis(50));
            }

            pb.finish_and_clear();
        });

        let progress_callback: Box<dyn Fn(usize, usize) + Send> =
            Box::new(move |current: usize, total: usize| {
                progress_current.store(current, Ordering::Relaxed);
                progress_total.store(total, Ordering::Relaxed);
            });

        let vulnerabilities = self
            .vulnerability_repository
            .fetch_vulnerabilities_with_progress(packages, progress_callback)
            .await?;

        is_done.store(true, Ordering::Relaxed);
        let _ = progress_handle.join();

        Ok(vulnerabilities)
    }

    /// Drops ignored advisory ids from the report, removing packages whose
    /// report becomes empty.
    pub fn apply_ignore_list(
        report: Vec<PackageVulnerabilities>,
        ignored_ids: &[String],
    ) -> Vec<PackageVulnerabilities> {
        if ignored_ids.is_empty() {
            return report;
        }
        report
            .into_iter()
            .filter_map(|package| package.without_ignored(ignored_ids))
            .collect()
    }

    /// Returns (total_vulnerabilities, affected_packages_count)
    pub fn summarize(report: &[PackageVulnerabilities]) -> (usize, usize) {
        let total_vulns: usize = report.iter().map(|v| v.vulnerabilities().len()).sum();
        (total_vulns, report.len())
    }

    /// Whether any reported vulnerability reaches the fail threshold.
    /// With no threshold configured, any vulnerability at all qualifies.
    pub fn exceeds_threshold(
        report: &[PackageVulnerabilities],
        threshold: Option<Severity>,
    ) -> bool {
        match threshold {
            None => !report.is_empty(),
            Some(threshold) => report
                .iter()
                .filter_map(|package| package.max_severity())
                .any(|severity| severity >= threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::ProgressCallback;
    use async_trait::async_trait;

    struct MockVulnerabilityRepository {
        report: Vec<PackageVulnerabilities>,
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

    fn package_ref(id: &str) -> PackageRef {
        PackageRef::parse(id).unwrap()
    }

    fn vulnerability(id: &str, severity: Severity) -> crate::graph_inspection::domain::Vulnerability {
        crate::graph_inspection::domain::Vulnerability::new(
            id.to_string(),
            severity,
            None,
            None,
            Some(format!("Test vulnerability {}", id)),
        )
        .unwrap()
    }

    fn package_report(
        name: &str,
        version: &str,
        vulns: Vec<crate::graph_inspection::domain::Vulnerability>,
    ) -> PackageVulnerabilities {
        PackageVulnerabilities::new(name.to_string(), version.to_string(), vulns)
    }

    #[test]
    fn test_summarize_empty() {
        let (total, packages) =
            CheckVulnerabilitiesUseCase::<MockVulnerabilityRepository>::summarize(&[]);
        assert_eq!(total, 0);
        assert_eq!(packages, 0);
    }

    #[test]
    fn test_summarize_multiple_packages() {
        let report = vec![
            package_report(
                "lodash",
                "4.17.20",
                vec![
                    vulnerability("GHSA-aaaa", Severity::High),
                    vulnerability("GHSA-bbbb", Severity::Low),
                ],
            ),
            package_report("minimist", "1.2.5", vec![vulnerability("GHSA-cccc", Severity::Critical)]),
        ];

        let (total, packages) =
            CheckVulnerabilitiesUseCase::<MockVulnerabilityRepository>::summarize(&report);
        assert_eq!(total, 3);
        assert_eq!(packages, 2);
    }

    #[test]
    fn test_apply_ignore_list_drops_emptied_packages() {
        let report = vec![
            package_report("lodash", "4.17.20", vec![vulnerability("GHSA-aaaa", Severity::High)]),
            package_report(
                "minimist",
                "1.2.5",
                vec![
                    vulnerability("GHSA-cccc", Severity::Critical),
                    vulnerability("GHSA-dddd", Severity::Low),
                ],
            ),
        ];

        let filtered = CheckVulnerabilitiesUseCase::<MockVulnerabilityRepository>::apply_ignore_list(
            report,
            &["GHSA-aaaa".to_string(), "GHSA-cccc".to_string()],
        );

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].package_name(), "minimist");
        assert_eq!(filtered[0].vulnerabilities().len(), 1);
    }

    #[test]
    fn test_exceeds_threshold_without_threshold() {
        let report = vec![package_report(
            "lodash",
            "4.17.20",
            vec![vulnerability("GHSA-aaaa", Severity::Low)],
        )];
        assert!(
            CheckVulnerabilitiesUseCase::<MockVulnerabilityRepository>::exceeds_threshold(
                &report, None
            )
        );
        assert!(
            !CheckVulnerabilitiesUseCase::<MockVulnerabilityRepository>::exceeds_threshold(
                &[],
                None
            )
        );
    }

    #[test]
    fn test_exceeds_threshold_with_severity() {
        let report = vec![package_report(
            "lodash",
            "4.17.20",
            vec![vulnerability("GHSA-aaaa", Severity::Medium)],
        )];

        assert!(
            CheckVulnerabilitiesUseCase::<MockVulnerabilityRepository>::exceeds_threshold(
                &report,
                Some(Severity::Medium)
            )
        );
        assert!(
            !CheckVulnerabilitiesUseCase::<MockVulnerabilityRepository>::exceeds_threshold(
                &report,
                Some(Severity::High)
            )
        );
    }

    #[tokio::test]
    async fn test_check_with_progress_no_vulnerabilities() {
        let repo = MockVulnerabilityRepository { report: vec![] };
        let use_case = CheckVulnerabilitiesUseCase::new(repo);

        let result = use_case
            .check_with_progress(vec![package_ref("lodash@4.17.21")])
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_check_with_progress_with_vulnerabilities() {
        let repo = MockVulnerabilityRepository {
            report: vec![package_report(
                "lodash",
                "4.17.20",
                vec![vulnerability("GHSA-aaaa", Severity::Critical)],
            )],
        };
        let use_case = CheckVulnerabilitiesUseCase::new(repo);

        let result = use_case
            .check_with_progress(vec![package_ref("lodash@4.17.20")])
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].package_name(), "lodash");
        assert_eq!(result[0].vulnerabilities().len(), 1);
    }
}
