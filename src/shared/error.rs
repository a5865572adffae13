use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - query completed, no vulnerabilities above the threshold
    Success = 0,
    /// Vulnerabilities were detected above the configured threshold
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, file I/O error, malformed document, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for graph queries.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum GraphQueryError {
    #[error("Analysis document not found: {path}\n\n💡 Hint: {suggestion}")]
    DocumentNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse analysis document: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the document contains a JSON dependency graph")]
    DocumentParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid input path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid analysis document")]
    InvalidInputPath { path: PathBuf, reason: String },

    /// Validation error for domain value objects
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::VulnerabilitiesDetected.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::VulnerabilitiesDetected),
            "Vulnerabilities Detected (1)"
        );
    }

    #[test]
    fn test_document_not_found_display() {
        let error = GraphQueryError::DocumentNotFound {
            path: PathBuf::from("/work/analysis.json"),
            suggestion: "Run an analysis first".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Analysis document not found"));
        assert!(display.contains("/work/analysis.json"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Run an analysis first"));
    }

    #[test]
    fn test_document_parse_error_display() {
        let error = GraphQueryError::DocumentParseError {
            path: PathBuf::from("/work/analysis.json"),
            details: "expected value at line 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse analysis document"));
        assert!(display.contains("expected value at line 1"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = GraphQueryError::FileWriteError {
            path: PathBuf::from("/out/report.json"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_invalid_input_path_display() {
        let error = GraphQueryError::InvalidInputPath {
            path: PathBuf::from("/nowhere"),
            reason: "File does not exist".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid input path"));
        assert!(display.contains("File does not exist"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = GraphQueryError::Validation {
            message: "Package id cannot be empty".to_string(),
        };
        assert!(format!("{}", error).contains("Package id cannot be empty"));
    }
}
