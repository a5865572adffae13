use crate::graph_inspection::domain::{PackageRef, PackageVulnerabilities, Vulnerability};
use crate::ports::outbound::{ProgressCallback, VulnerabilityRepository};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key for one checked package version
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    package_name: String,
    version: String,
}

impl CacheKey {
    fn for_package(package: &PackageRef) -> Self {
        Self {
            package_name: package.name().to_string(),
            version: package.version().unwrap_or_default().to_string(),
        }
    }
}

/// CachingVulnerabilityRepository wraps a VulnerabilityRepository and adds
/// in-memory caching.
///
/// Decorator over any VulnerabilityRepository implementation. The cache is
/// thread-safe and keyed by package version; a clean package is cached as an
/// empty entry, so repeated queries for the same snapshot skip the network
/// entirely.
pub struct CachingVulnerabilityRepository<R: VulnerabilityRepository> {
    inner: R,
    cache: Arc<DashMap<CacheKey, Vec<Vulnerability>>>,
}

impl<R: VulnerabilityRepository> CachingVulnerabilityRepository<R> {
    /// Creates a new caching repository wrapping the given inner repository
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    fn partition_cached(
        &self,
        packages: Vec<PackageRef>,
    ) -> (Vec<PackageVulnerabilities>, Vec<PackageRef>) {
        let mut hits = Vec::new();
        let mut misses = Vec::new();

        for package in packages {
            let key = CacheKey::for_package(&package);
            match self.cache.get(&key) {
                Some(cached) if cached.is_empty() => {}
                Some(cached) => hits.push(PackageVulnerabilities::new(
                    key.package_name,
                    key.version,
                    cached.clone(),
                )),
                None => misses.push(package),
            }
        }

        (hits, misses)
    }

    fn store(&self, misses: &[PackageRef], fetched: &[PackageVulnerabilities]) {
        // Every miss starts as a clean entry; fetched reports overwrite
        for package in misses {
            self.cache
                .insert(CacheKey::for_package(package), Vec::new());
        }
        for report in fetched {
            let key = CacheKey {
                package_name: report.package_name().to_string(),
                version: report.version().to_string(),
            };
            self.cache.insert(key, report.vulnerabilities().to_vec());
        }
    }
}

#[async_trait]
impl<R: VulnerabilityRepository + Send + Sync> VulnerabilityRepository
    for CachingVulnerabilityRepository<R>
{
    async fn fetch_vulnerabilities(
        &self,
        packages: Vec<PackageRef>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        let (mut results, misses) = self.partition_cached(packages);

        if !misses.is_empty() {
            let fetched = self.inner.fetch_vulnerabilities(misses.clone()).await?;
            self.store(&misses, &fetched);
            results.extend(fetched);
        }

        Ok(results)
    }

    async fn fetch_vulnerabilities_with_progress(
        &self,
        packages: Vec<PackageRef>,
        progress_callback: ProgressCallback<'static>,
    ) -> Result<Vec<PackageVulnerabilities>> {
        let (mut results, misses) = self.partition_cached(packages);

        if !misses.is_empty() {
            let fetched = self
                .inner
                .fetch_vulnerabilities_with_progress(misses.clone(), progress_callback)
                .await?;
            self.store(&misses, &fetched);
            results.extend(fetched);
        }

        Ok(results)
    }
}
