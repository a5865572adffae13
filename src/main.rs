mod adapters;
mod application;
mod cli;
mod config;
mod graph_inspection;
mod ports;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{FileSystemReader, FileSystemWriter, StdoutPresenter};
use adapters::outbound::network::{CachingVulnerabilityRepository, OsvClient};
use application::dto::{OutputFormat, QueryRequest};
use application::factories::FormatterFactory;
use application::read_models::TraversalReport;
use application::use_cases::InspectGraphUseCase;
use cli::Args;
use config::ConfigFile;
use ports::outbound::OutputPresenter;
use shared::error::{ExitCode, GraphQueryError};
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_DOCUMENT: &str = "analysis.json";

#[tokio::main]
async fn main() {
    match run().await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Resolve and validate the input document
    let document_path = PathBuf::from(args.input.as_deref().unwrap_or(DEFAULT_DOCUMENT));
    validate_document_path(&document_path)?;

    // Load config: explicit path wins, otherwise discover next to the input
    let config = load_config(&args, &document_path)?;

    // Merge CLI flags over config values
    let format = match args.format {
        Some(format) => format,
        None => config.output_format()?.unwrap_or(OutputFormat::Json),
    };
    let check_vulnerabilities =
        args.check_vulnerabilities || config.check_vulnerabilities.unwrap_or(false);
    let ecosystem = args
        .ecosystem
        .clone()
        .or_else(|| config.ecosystem.clone())
        .unwrap_or_else(|| "npm".to_string());
    let fail_severity = match args.fail_on {
        Some(severity) => Some(severity),
        None => config.fail_severity()?,
    };
    let mut exclude_patterns = args.exclude.clone();
    if let Some(config_patterns) = &config.exclude_packages {
        exclude_patterns.extend(config_patterns.iter().cloned());
    }

    // Create adapters (Dependency Injection)
    let graph_reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();
    let vulnerability_repository = if check_vulnerabilities {
        Some(CachingVulnerabilityRepository::new(OsvClient::new(
            ecosystem.clone(),
        )?))
    } else {
        None
    };

    // Create use case with injected dependencies
    let use_case = InspectGraphUseCase::new(graph_reader, progress_reporter, vulnerability_repository);

    // Create request
    let mut request = QueryRequest::new(document_path, args.target.clone(), args.query)
        .with_exclude_patterns(exclude_patterns);
    if check_vulnerabilities {
        request = request.with_vulnerability_check(ecosystem, config.ignored_ids(), fail_severity);
    }

    // Execute use case
    let response = use_case.execute(request).await?;
    let vulnerabilities_above_threshold = response.has_vulnerabilities_above_threshold;

    // Build the read model and format it
    eprintln!("{}", FormatterFactory::progress_message(format));
    let report = TraversalReport::build(args.query, &args.target, &response);
    let formatter = FormatterFactory::create(format);
    let formatted_output = formatter.format(&report)?;

    // Present output
    let presenter: Box<dyn OutputPresenter> = if let Some(output_path) = args.output {
        Box::new(FileSystemWriter::new(PathBuf::from(output_path)))
    } else {
        Box::new(StdoutPresenter::new())
    };

    presenter.present(&formatted_output)?;

    if vulnerabilities_above_threshold {
        return Ok(ExitCode::VulnerabilitiesDetected);
    }
    Ok(ExitCode::Success)
}

fn load_config(args: &Args, document_path: &Path) -> Result<ConfigFile> {
    if let Some(config_path) = &args.config {
        return config::load_config_from_path(Path::new(config_path));
    }

    let document_dir = document_path.parent().unwrap_or_else(|| Path::new("."));
    let search_dir = if document_dir == Path::new("") {
        Path::new(".")
    } else {
        document_dir
    };
    Ok(config::discover_config(search_dir)?.unwrap_or_default())
}

fn validate_document_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(GraphQueryError::InvalidInputPath {
            path: path.to_path_buf(),
            reason: "File does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for input documents
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| GraphQueryError::InvalidInputPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(GraphQueryError::InvalidInputPath {
            path: path.to_path_buf(),
            reason: "Security: Input path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(GraphQueryError::InvalidInputPath {
            path: path.to_path_buf(),
            reason: "Not a regular file".to_string(),
        }
        .into());
    }

    Ok(())
}
