use crate::application::dto::{QueryKind, QueryOutcome, QueryRequest, QueryResponse};
use crate::application::use_cases::CheckVulnerabilitiesUseCase;
use crate::graph_inspection::domain::{GraphDependency, PackageRef, PackageVulnerabilities};
use crate::graph_inspection::services::{GraphTraversal, NodeFilter, ReportGenerator};
use crate::ports::outbound::{GraphSourceReader, ProgressReporter, VulnerabilityRepository};
use crate::shared::Result;

/// InspectGraphUseCase - Core use case for dependency graph queries
///
/// Orchestrates the query workflow: load the analysis document, filter the
/// snapshot, run the requested traversal, and optionally annotate the result
/// set with known vulnerabilities. Infrastructure is injected generically.
///
/// # Type Parameters
/// * `GR` - GraphSourceReader implementation
/// * `PR` - ProgressReporter implementation
/// * `VR` - VulnerabilityRepository implementation (optional)
pub struct InspectGraphUseCase<GR, PR, VR> {
    graph_reader: GR,
    progress_reporter: PR,
    vulnerability_repository: Option<VR>,
}

impl<GR, PR, VR> InspectGraphUseCase<GR, PR, VR>
where
    GR: GraphSourceReader,
    PR: ProgressReporter,
    VR: VulnerabilityRepository + Sync,
{
    pub fn new(graph_reader: GR, progress_reporter: PR, vulnerability_repository: Option<VR>) -> Self {
        Self {
            graph_reader,
            progress_reporter,
            vulnerability_repository,
        }
    }

    /// Executes one graph query
    ///
    /// # Arguments
    /// * `request` - Query parameters after CLI/config merging
    ///
    /// # Returns
    /// QueryResponse with the traversal outcome, metadata, and the optional
    /// vulnerability report
    pub async fn execute(&self, request: QueryRequest) -> Result<QueryResponse> {
        // Step 1: Load the analysis document
        let graph = self.read_and_report_graph(&request)?;

        // Step 2: Apply exclusion filters
        let graph = self.apply_exclusion_filters(graph, &request)?;

        // Step 3: Run the requested traversal
        let outcome = self.run_traversal(&request, &graph);

        // Step 4: Vulnerability annotation if requested
        let vulnerability_report = self
            .check_vulnerabilities_if_requested(&request, &outcome)
            .await?;

        // Step 5: Threshold evaluation and response assembly
        let has_vulnerabilities_above_threshold = vulnerability_report
            .as_ref()
            .map(|report| {
                CheckVulnerabilitiesUseCase::<VR>::exceeds_threshold(report, request.fail_severity)
            })
            .unwrap_or(false);

        let metadata = ReportGenerator::generate_default_metadata(vulnerability_report.is_some());

        Ok(QueryResponse::new(
            outcome,
            metadata,
            vulnerability_report,
            has_vulnerabilities_above_threshold,
        ))
    }

    fn read_and_report_graph(&self, request: &QueryRequest) -> Result<Vec<GraphDependency>> {
        self.progress_reporter.report(&format!(
            "📖 Loading analysis document: {}",
            request.document_path.display()
        ));

        let snapshot = self.graph_reader.read_graph(&request.document_path)?;

        if let Some(analysis_id) = &snapshot.analysis_id {
            self.progress_reporter
                .report(&format!("   - Analysis: {}", analysis_id));
        }
        self.progress_reporter.report(&format!(
            "✅ Loaded {} node(s)",
            snapshot.dependencies.len()
        ));

        Ok(snapshot.dependencies)
    }

    /// # Errors
    /// Returns an error if the filters exclude every node in the snapshot
    fn apply_exclusion_filters(
        &self,
        graph: Vec<GraphDependency>,
        request: &QueryRequest,
    ) -> Result<Vec<GraphDependency>> {
        if request.exclude_patterns.is_empty() {
            return Ok(graph);
        }

        let filter = NodeFilter::new(request.exclude_patterns.clone())?;
        let original_count = graph.len();
        let filtered = filter.filter_graph(graph);

        let excluded_count = original_count - filtered.len();
        if excluded_count > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Excluded {} node(s) based on filters",
                excluded_count
            ));
        }

        if filtered.is_empty() && original_count > 0 {
            anyhow::bail!(
                "All {} node(s) were excluded by the provided filters. \
                 The query would run against an empty graph. Please adjust your exclusion patterns.",
                original_count
            );
        }

        for pattern in filter.unmatched_patterns() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Exclude pattern '{}' did not match any nodes.",
                pattern
            ));
        }

        Ok(filtered)
    }

    fn run_traversal(&self, request: &QueryRequest, graph: &[GraphDependency]) -> QueryOutcome {
        self.progress_reporter.report(&format!(
            "🔎 Querying {} for '{}'...",
            request.kind.describe(),
            request.target_id
        ));

        let outcome = match request.kind {
            QueryKind::Full => QueryOutcome::Neighborhood(
                GraphTraversal::find_all_parents_and_children(&request.target_id, graph),
            ),
            QueryKind::Direct => QueryOutcome::Neighborhood(
                GraphTraversal::find_direct_parents_and_children(&request.target_id, graph),
            ),
            QueryKind::Related => QueryOutcome::Subgraph(GraphTraversal::find_paths_containing(
                &request.target_id,
                graph,
            )),
            QueryKind::Provenance => QueryOutcome::Subgraph(
                GraphTraversal::find_minimal_paths_to_target(&request.target_id, graph),
            ),
        };

        if outcome.target_found() {
            match &outcome {
                QueryOutcome::Neighborhood(traversal) => {
                    self.progress_reporter.report(&format!(
                        "   - Dependents: {}",
                        traversal.parents().len()
                    ));
                    self.progress_reporter.report(&format!(
                        "   - Dependencies: {}",
                        traversal.children().len()
                    ));
                }
                QueryOutcome::Subgraph(nodes) => {
                    self.progress_reporter
                        .report(&format!("   - Nodes in result: {}", nodes.len()));
                }
            }
        } else {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: '{}' is not present in this graph.",
                request.target_id
            ));
        }

        outcome
    }

    async fn check_vulnerabilities_if_requested(
        &self,
        request: &QueryRequest,
        outcome: &QueryOutcome,
    ) -> Result<Option<Vec<PackageVulnerabilities>>> {
        if !request.check_vulnerabilities {
            return Ok(None);
        }

        let Some(repo) = &self.vulnerability_repository else {
            // No advisory source configured - skip the check
            return Ok(None);
        };

        let (packages, skipped) = Self::collect_package_refs(outcome);
        if skipped > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} node(s) have no version and were skipped by the advisory check.",
                skipped
            ));
        }
        if packages.is_empty() {
            return Ok(Some(Vec::new()));
        }

        self.progress_reporter
            .report("🔐 Checking result set for known vulnerabilities...");

        let check = CheckVulnerabilitiesUseCase::new(repo);
        let report = check.check_with_progress(packages).await?;
        let report =
            CheckVulnerabilitiesUseCase::<&VR>::apply_ignore_list(report, &request.ignored_vulnerabilities);

        let (total_vulns, affected) = CheckVulnerabilitiesUseCase::<&VR>::summarize(&report);
        eprintln!(); // Newline after progress bar
        if total_vulns > 0 {
            self.progress_reporter.report_completion(&format!(
                "✅ Vulnerability check complete: {} vulnerabilities found in {} packages",
                total_vulns, affected
            ));
        } else {
            self.progress_reporter
                .report_completion("✅ Vulnerability check complete: No known vulnerabilities found");
        }

        // Some even when empty: the check ran
        Ok(Some(report))
    }

    /// Parses every result node id into a PackageRef, returning the refs
    /// that carry a version and the count of nodes that do not.
    fn collect_package_refs(outcome: &QueryOutcome) -> (Vec<PackageRef>, usize) {
        let mut packages = Vec::new();
        let mut skipped = 0;
        for node in outcome.result_nodes() {
            match node.package_ref() {
                Ok(package) if package.version().is_some() => packages.push(package),
                _ => skipped += 1,
            }
        }
        (packages, skipped)
    }
}
