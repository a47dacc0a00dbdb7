//! Artifact rendering and backup-before-overwrite writes.
//!
//! Renders the resolved configuration into the two on-disk artifacts:
//! the structured settings file (JSON) and the shell-sourceable env snippet.
//! Writes are full replaces, never merges; a pre-existing file is copied to a
//! timestamped backup before it is touched, and a failed backup aborts the
//! write entirely.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::config::ResolvedConfig;
use crate::error::{Result, SetupError};
use crate::util::time::{backup_timestamp, header_timestamp};

/// What a write call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    /// Content was persisted to disk.
    Written,
    /// Dry run; nothing touched disk.
    DryRun,
}

/// Outcome of a single artifact write, aggregated by the orchestrator for the
/// end-of-run summary.
#[derive(Debug)]
pub struct WriteReport {
    pub path: PathBuf,
    pub backup: Option<PathBuf>,
    pub action: WriteAction,
}

/// Settings file shape consumed by Claude Code.
///
/// Field order is the serialized key order, which keeps output stable across
/// runs.
#[derive(Serialize)]
struct SettingsFile<'a> {
    #[serde(rename = "awsAuthRefresh")]
    aws_auth_refresh: &'a str,
    env: SettingsEnv<'a>,
}

#[derive(Serialize)]
struct SettingsEnv<'a> {
    #[serde(rename = "CLAUDE_CODE_USE_BEDROCK")]
    use_bedrock: &'a str,
    #[serde(rename = "AWS_REGION")]
    region: &'a str,
    /// Absent means "use default credentials" downstream.
    #[serde(rename = "AWS_PROFILE", skip_serializing_if = "Option::is_none")]
    profile: Option<&'a str>,
    #[serde(rename = "ANTHROPIC_MODEL")]
    model: &'a str,
    #[serde(rename = "ANTHROPIC_SMALL_FAST_MODEL")]
    small_model: &'a str,
    #[serde(rename = "CLAUDE_CODE_MAX_OUTPUT_TOKENS")]
    max_output_tokens: &'a str,
    #[serde(rename = "MAX_THINKING_TOKENS")]
    max_thinking_tokens: &'a str,
}

/// Render the settings file content (pretty JSON, trailing newline).
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_settings(config: &ResolvedConfig) -> Result<String> {
    let settings = SettingsFile {
        aws_auth_refresh: &config.auth_refresh,
        env: SettingsEnv {
            use_bedrock: "1",
            region: &config.region,
            profile: config.profile.as_deref(),
            model: &config.model,
            small_model: &config.small_model,
            max_output_tokens: &config.max_output_tokens,
            max_thinking_tokens: &config.max_thinking_tokens,
        },
    };
    let mut out = serde_json::to_string_pretty(&settings)?;
    out.push('\n');
    Ok(out)
}

/// Render the shell env snippet: a two-line header, then one export per line
/// in fixed order. Without a profile the snippet has exactly six exports.
#[must_use]
pub fn render_env_snippet(config: &ResolvedConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Generated by bedrock-setup v{}\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str(&format!("# Date: {}\n", header_timestamp()));
    out.push_str("export CLAUDE_CODE_USE_BEDROCK=1\n");
    out.push_str(&format!("export AWS_REGION=\"{}\"\n", config.region));
    if let Some(profile) = &config.profile {
        out.push_str(&format!("export AWS_PROFILE=\"{profile}\"\n"));
    }
    out.push_str(&format!("export ANTHROPIC_MODEL=\"{}\"\n", config.model));
    out.push_str(&format!(
        "export ANTHROPIC_SMALL_FAST_MODEL=\"{}\"\n",
        config.small_model
    ));
    out.push_str(&format!(
        "export CLAUDE_CODE_MAX_OUTPUT_TOKENS={}\n",
        config.max_output_tokens
    ));
    out.push_str(&format!(
        "export MAX_THINKING_TOKENS={}\n",
        config.max_thinking_tokens
    ));
    out
}

/// Copy `path` to `<path>.backup.<YYYYMMDD-HHMMSS>` if it exists.
///
/// Returns the backup path when one was made. Used before every destructive
/// rewrite (artifacts and the shell rc file alike).
///
/// # Errors
///
/// Returns [`SetupError::BackupFailed`] if the copy fails; callers must not
/// proceed with the overwrite in that case.
pub fn backup_if_exists(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let backup = PathBuf::from(format!(
        "{}.backup.{}",
        path.display(),
        backup_timestamp()
    ));
    std::fs::copy(path, &backup).map_err(|source| SetupError::BackupFailed {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), backup = %backup.display(), "backed up file");
    Ok(Some(backup))
}

/// Write `content` to `path`, backing up any existing file first.
///
/// Dry-run performs no I/O at all; the caller is responsible for showing the
/// rendered content.
///
/// # Errors
///
/// Returns an error if directory creation, the backup copy, or the write
/// fails. The backup happens strictly before the overwrite.
pub fn write_artifact(path: &Path, content: &str, dry_run: bool) -> Result<WriteReport> {
    if dry_run {
        tracing::info!(path = %path.display(), "dry run, skipping write");
        return Ok(WriteReport {
            path: path.to_path_buf(),
            backup: None,
            action: WriteAction::DryRun,
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SetupError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let backup = backup_if_exists(path)?;

    std::fs::write(path, content).map_err(|source| SetupError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote file");

    Ok(WriteReport {
        path: path.to_path_buf(),
        backup,
        action: WriteAction::Written,
    })
}

/// Delete a file if it exists. Missing files are a no-op, not an error.
///
/// Returns whether a file was actually removed.
///
/// # Errors
///
/// Returns an error only when an existing file cannot be removed.
pub fn delete_if_exists(path: &Path, dry_run: bool) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    if dry_run {
        tracing::info!(path = %path.display(), "dry run, skipping delete");
        return Ok(true);
    }
    std::fs::remove_file(path).map_err(|source| SetupError::RemoveFile {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "removed file");
    Ok(true)
}
