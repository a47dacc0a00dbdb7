//! Error types for bedrock-setup.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! The taxonomy is deliberately small: everything that aborts a run is a
//! filesystem-level problem (directory creation, backup copy, file write) or
//! an argument problem. Advisory probe failures never become errors — they
//! are rendered as warnings by the probe layer and swallowed.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the bedrock-setup binary.
///
/// Only two outcomes exist: success (including `--help`) and failure
/// (unrecognized flag or a fatal filesystem error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unrecognized flag or fatal filesystem error
    GeneralError = 1,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Main error type for bedrock-setup operations.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Home directory could not be determined.
    #[error("could not determine home directory")]
    HomeNotFound,

    /// Backup copy failed before an overwrite; the original file is untouched.
    #[error("failed to back up {path} before overwrite: {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create a parent directory for an artifact.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an artifact failed.
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an existing file failed.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deleting an artifact failed (missing files are no-ops, not errors).
    #[error("failed to remove {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External command could not be spawned or timed out.
    #[error("command {program} failed: {reason}")]
    CommandFailed { program: String, reason: String },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    /// Map error to exit code. Every fatal error exits 1.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::GeneralError
    }
}

/// Result type alias for bedrock-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_map_to_one() {
        let err = SetupError::HomeNotFound;
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
        assert_eq!(i32::from(err.exit_code()), 1);

        let err = SetupError::CommandFailed {
            program: "aws".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }

    #[test]
    fn backup_failed_names_path() {
        let err = SetupError::BackupFailed {
            path: PathBuf::from("/tmp/settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/settings.json"));
        assert!(msg.contains("back up"));
    }
}
