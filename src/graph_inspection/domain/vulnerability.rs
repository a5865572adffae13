use crate::shared::Result;
use std::fmt;
use std::str::FromStr;

/// Severity rating of a single advisory.
///
/// Ordering follows declaration order, so `Severity::High > Severity::Low`
/// holds and threshold checks can use plain comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parses the severity strings reported by advisory databases
    /// (GHSA uses MODERATE where others use MEDIUM).
    pub fn from_advisory_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" | "MODERATE" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Unknown,
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" | "moderate" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!(
                "Invalid severity: {}. Please specify 'critical', 'high', 'medium' or 'low'",
                s
            )),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

/// A single known vulnerability affecting one package version
#[derive(Debug, Clone, PartialEq)]
pub struct Vulnerability {
    id: String,
    severity: Severity,
    cvss_vector: Option<String>,
    fixed_version: Option<String>,
    summary: Option<String>,
}

impl Vulnerability {
    pub fn new(
        id: String,
        severity: Severity,
        cvss_vector: Option<String>,
        fixed_version: Option<String>,
        summary: Option<String>,
    ) -> Result<Self> {
        if id.trim().is_empty() {
            anyhow::bail!("Vulnerability id cannot be empty");
        }
        Ok(Self {
            id,
            severity,
            cvss_vector,
            fixed_version,
            summary,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn cvss_vector(&self) -> Option<&str> {
        self.cvss_vector.as_deref()
    }

    pub fn fixed_version(&self) -> Option<&str> {
        self.fixed_version.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

/// All known vulnerabilities for one package version
#[derive(Debug, Clone, PartialEq)]
pub struct PackageVulnerabilities {
    package_name: String,
    version: String,
    vulnerabilities: Vec<Vulnerability>,
}

impl PackageVulnerabilities {
    pub fn new(package_name: String, version: String, vulnerabilities: Vec<Vulnerability>) -> Self {
        Self {
            package_name,
            version,
            vulnerabilities,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The graph node id this report refers to.
    pub fn package_id(&self) -> String {
        format!("{}@{}", self.package_name, self.version)
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    /// Drops the given advisory ids, returning None when nothing remains.
    pub fn without_ignored(self, ignored_ids: &[String]) -> Option<Self> {
        let remaining: Vec<Vulnerability> = self
            .vulnerabilities
            .into_iter()
            .filter(|v| !ignored_ids.iter().any(|ignored| ignored == v.id()))
            .collect();

        if remaining.is_empty() {
            None
        } else {
            Some(Self {
                package_name: self.package_name,
                version: self.version,
                vulnerabilities: remaining,
            })
        }
    }

    /// The highest severity among this package's vulnerabilities.
    pub fn max_severity(&self) -> Option<Severity> {
        self.vulnerabilities.iter().map(|v| v.severity()).max()
    }
}
