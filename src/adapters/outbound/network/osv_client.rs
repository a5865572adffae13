use crate::graph_inspection::domain::{
    PackageRef, PackageVulnerabilities, Severity, Vulnerability,
};
use crate::ports::outbound::{ProgressCallback, VulnerabilityRepository};
use crate::shared::Result;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OSV API client for fetching vulnerability data
///
/// Uses the OSV.dev Batch Query API to check many packages in one request,
/// then fetches per-advisory details individually (the batch response only
/// carries ids).
///
/// # Security
/// - Request timeout (30 seconds)
/// - Rate limiting between detail batches
/// - Bounded batch size (OSV API limit)
pub struct OsvClient {
    client: reqwest::Client,
    api_url: String,
    ecosystem: String,
}

impl OsvClient {
    const API_ENDPOINT: &'static str = "https://api.osv.dev/v1";
    const TIMEOUT_SECONDS: u64 = 30;
    const RATE_LIMIT_MS: u64 = 100;
    const MAX_BATCH_SIZE: usize = 100; // OSV API limit
    const DETAIL_CONCURRENCY: usize = 4;

    /// Creates a new OSV API client querying the given advisory ecosystem
    pub fn new(ecosystem: String) -> Result<Self> {
        let user_agent = format!("sbom-graph/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: Self::API_ENDPOINT.to_string(),
            ecosystem,
        })
    }

    /// Overrides the API base URL (testing)
    #[cfg(test)]
    fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }

    /// Queries one batch of packages, returning the advisory id lists in
    /// the same order as the input
    async fn fetch_batch(&self, packages: &[PackageRef]) -> Result<Vec<OsvResult>> {
        let queries: Vec<OsvQuery> = packages
            .iter()
            .map(|package| OsvQuery {
                package: OsvPackage {
                    name: package.name().to_string(),
                    ecosystem: self.ecosystem.clone(),
                },
                version: package.version().unwrap_or_default().to_string(),
            })
            .collect();

        let batch_query = OsvBatchQuery { queries };

        let response = self
            .client
            .post(format!("{}/querybatch", self.api_url))
            .json(&batch_query)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }

        let batch_response: OsvBatchResponse = response.json().await?;
        Ok(batch_response.results)
    }

    /// Fetches detailed advisory information by id
    ///
    /// The batch API returns minimal information; severity, fix versions
    /// and summaries require individual queries.
    async fn fetch_vulnerability_details(&self, advisory_id: &str) -> Result<OsvVulnerability> {
        let url = format!("{}/vulns/{}", self.api_url, advisory_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "OSV API returned status code {} for advisory {}",
                response.status(),
                advisory_id
            );
        }

        Ok(response.json().await?)
    }

    async fn fetch_all(
        &self,
        packages: Vec<PackageRef>,
        progress_callback: Option<ProgressCallback<'static>>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        // Phase 1: batch queries for advisory ids
        let mut id_lists: Vec<Vec<String>> = Vec::with_capacity(packages.len());
        for chunk in packages.chunks(Self::MAX_BATCH_SIZE) {
            let results = self.fetch_batch(chunk).await?;
            if results.len() != chunk.len() {
                anyhow::bail!(
                    "OSV API returned {} results for {} queries",
                    results.len(),
                    chunk.len()
                );
            }
            for result in results {
                id_lists.push(result.vulns.into_iter().map(|v| v.id).collect());
            }
            tokio::time::sleep(Duration::from_millis(Self::RATE_LIMIT_MS)).await;
        }

        // Phase 2: detail fetches, bounded concurrency with rate limiting
        let advisory_ids: Vec<&str> = id_lists
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        let total = advisory_ids.len();
        let mut details: Vec<OsvVulnerability> = Vec::with_capacity(total);

        for chunk in advisory_ids.chunks(Self::DETAIL_CONCURRENCY) {
            let fetches = chunk.iter().map(|id| self.fetch_vulnerability_details(id));
            for detail in join_all(fetches).await {
                details.push(detail?);
            }
            if let Some(callback) = &progress_callback {
                callback(details.len(), total);
            }
            if details.len() < total {
                tokio::time::sleep(Duration::from_millis(Self::RATE_LIMIT_MS)).await;
            }
        }

        // Phase 3: map details back onto their packages
        let mut report = Vec::new();
        let mut detail_iter = details.into_iter();
        for (package, ids) in packages.iter().zip(id_lists) {
            if ids.is_empty() {
                continue;
            }
            let vulnerabilities: Vec<Vulnerability> = detail_iter
                .by_ref()
                .take(ids.len())
                .map(|detail| detail.into_vulnerability(package.name()))
                .collect::<Result<_>>()?;
            report.push(PackageVulnerabilities::new(
                package.name().to_string(),
                package.version().unwrap_or_default().to_string(),
                vulnerabilities,
            ));
        }

        Ok(report)
    }
}

#[async_trait]
impl VulnerabilityRepository for OsvClient {
    async fn fetch_vulnerabilities(
        &self,
        packages: Vec<PackageRef>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        self.fetch_all(packages, None).await
    }

    async fn fetch_vulnerabilities_with_progress(
        &self,
        packages: Vec<PackageRef>,
        progress_callback: ProgressCallback<'static>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        self.fetch_all(packages, Some(progress_callback)).await
    }
}

#[derive(Debug, Serialize)]
struct OsvBatchQuery {
    queries: Vec<OsvQuery>,
}

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackage,
    version: String,
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
    ecosystem: String,
}

#[derive(Debug, Default, Deserialize)]
struct OsvBatchResponse {
    #[serde(default)]
    results: Vec<OsvResult>,
}

#[derive(Debug, Default, Deserialize)]
struct OsvResult {
    #[serde(default)]
    vulns: Vec<OsvVulnRef>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnRef {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct OsvVulnerability {
    #[serde(default)]
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    severity: Vec<OsvSeverity>,
    #[serde(default)]
    affected: Vec<OsvAffected>,
    #[serde(default)]
    database_specific: Option<OsvDatabaseSpecific>,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    score: String,
}

#[derive(Debug, Default, Deserialize)]
struct OsvAffected {
    #[serde(default)]
    package: Option<OsvAffectedPackage>,
    #[serde(default)]
    ranges: Vec<OsvRange>,
}

#[derive(Debug, Deserialize)]
struct OsvAffectedPackage {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct OsvRange {
    #[serde(default)]
    events: Vec<OsvEvent>,
}

#[derive(Debug, Default, Deserialize)]
struct OsvEvent {
    #[serde(default)]
    fixed: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OsvDatabaseSpecific {
    #[serde(default)]
    severity: Option<String>,
}

impl OsvVulnerability {
    /// Maps one OSV record into the domain vulnerability for the given
    /// package name
    fn into_vulnerability(self, package_name: &str) -> Result<Vulnerability> {
        let severity = self
            .database_specific
            .as_ref()
            .and_then(|db| db.severity.as_deref())
            .map(Severity::from_advisory_label)
            .unwrap_or(Severity::Unknown);

        let cvss_vector = self.severity.first().map(|s| s.score.clone());

        let fixed_version = self
            .affected
            .iter()
            .filter(|affected| match &affected.package {
                Some(package) => package.name.eq_ignore_ascii_case(package_name),
                None => true,
            })
            .flat_map(|affected| &affected.ranges)
            .flat_map(|range| &range.events)
            .find_map(|event| event.fixed.clone());

        Vulnerability::new(self.id, severity, cvss_vector, fixed_version, self.summary)
    }
}
