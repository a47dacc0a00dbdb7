//! Idempotent insertion and exact removal of the shell rc marker block.
//!
//! The block this tool appends to the user's shell startup file is:
//!
//! ```text
//!
//! # Claude Code Bedrock environment (added by bedrock-setup on YYYY-MM-DD)
//! [ -f "<snippet>" ] && . "<snippet>"
//! ```
//!
//! Insertion is append-only and guarded by a containment check on the snippet
//! path, so it tolerates marker formats written by earlier versions. Removal
//! filters by content: every line carrying the marker phrase or referencing
//! the snippet filename is dropped, all other lines are preserved verbatim in
//! order, and trailing blank lines are collapsed to a single final newline.

use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};
use crate::storage::writer::backup_if_exists;
use crate::util::time::marker_date;

/// Fixed literal phrase identifying the marker comment line.
pub const MARKER_PHRASE: &str = "Claude Code Bedrock environment";

/// Outcome of [`ensure_present`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The rc file already references the snippet; nothing was changed.
    AlreadyPresent,
    /// The block was appended.
    Added,
    /// Dry run; nothing was changed.
    DryRun,
}

/// Outcome of [`remove_block`].
#[derive(Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Block lines were filtered out; the rc backup path is recorded.
    Removed { backup: PathBuf },
    /// The rc file does not exist; nothing to do.
    Missing,
    /// Dry run; nothing was changed.
    DryRun,
}

/// Render the source directive for a snippet path.
///
/// The `-f` guard keeps shell startup working even if the snippet is later
/// deleted.
#[must_use]
pub fn source_line(snippet_path: &Path) -> String {
    format!(
        "[ -f \"{0}\" ] && . \"{0}\"",
        snippet_path.display()
    )
}

/// Append the marker block to `rc_path` unless the snippet is already wired in.
///
/// Creates the rc file (and parents) when absent. Append-only: existing
/// content is never rewritten or reordered. Calling this twice is equivalent
/// to calling it once.
///
/// # Errors
///
/// Returns an error on any filesystem failure (directory creation, read,
/// append).
pub fn ensure_present(rc_path: &Path, snippet_path: &Path, dry_run: bool) -> Result<InsertOutcome> {
    if dry_run {
        tracing::info!(rc = %rc_path.display(), "dry run, skipping rc update");
        return Ok(InsertOutcome::DryRun);
    }

    if let Some(parent) = rc_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SetupError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let content = if rc_path.exists() {
        std::fs::read_to_string(rc_path).map_err(|source| SetupError::ReadFile {
            path: rc_path.to_path_buf(),
            source,
        })?
    } else {
        String::new()
    };

    // Containment check on the snippet path string, not the marker format:
    // stays tolerant of blocks written by prior versions.
    let needle = snippet_path.display().to_string();
    if content.contains(&needle) {
        tracing::debug!(rc = %rc_path.display(), "snippet already referenced");
        return Ok(InsertOutcome::AlreadyPresent);
    }

    let mut appended = content;
    if !appended.is_empty() && !appended.ends_with('\n') {
        appended.push('\n');
    }
    appended.push('\n');
    appended.push_str(&format!(
        "# {MARKER_PHRASE} (added by bedrock-setup on {})\n",
        marker_date()
    ));
    appended.push_str(&source_line(snippet_path));
    appended.push('\n');

    std::fs::write(rc_path, appended).map_err(|source| SetupError::WriteFile {
        path: rc_path.to_path_buf(),
        source,
    })?;
    tracing::info!(rc = %rc_path.display(), "appended rc block");
    Ok(InsertOutcome::Added)
}

/// Remove the marker block from `rc_path`.
///
/// The rc file is backed up before any modification. Removal drops every line
/// containing the marker phrase and every line referencing the snippet
/// filename; unrelated lines survive byte-for-byte in their original order.
///
/// # Errors
///
/// Returns an error if the backup copy or the rewrite fails. A missing rc
/// file is a no-op, not an error.
pub fn remove_block(rc_path: &Path, snippet_path: &Path, dry_run: bool) -> Result<RemoveOutcome> {
    if !rc_path.exists() {
        return Ok(RemoveOutcome::Missing);
    }
    if dry_run {
        tracing::info!(rc = %rc_path.display(), "dry run, skipping rc block removal");
        return Ok(RemoveOutcome::DryRun);
    }

    let backup = backup_if_exists(rc_path)?.ok_or_else(|| {
        // exists() was checked above; a race here must still abort before the rewrite
        SetupError::BackupFailed {
            path: rc_path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "rc file vanished"),
        }
    })?;

    let content = std::fs::read_to_string(rc_path).map_err(|source| SetupError::ReadFile {
        path: rc_path.to_path_buf(),
        source,
    })?;

    let snippet_name = snippet_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("bedrock-env.sh")
        .to_string();

    let mut kept: Vec<&str> = Vec::new();
    for line in content.lines() {
        if line.contains(MARKER_PHRASE) || line.contains(&snippet_name) {
            // The block starts with a blank separator line; drop it along
            // with the marker so mid-file removal leaves no residual gap.
            if line.contains(MARKER_PHRASE) && kept.last().is_some_and(|l| l.trim().is_empty()) {
                kept.pop();
            }
            continue;
        }
        kept.push(line);
    }

    // Trailing blank-line normalization.
    while kept.last().is_some_and(|l| l.trim().is_empty()) {
        kept.pop();
    }

    let mut rewritten = kept.join("\n");
    if !rewritten.is_empty() {
        rewritten.push('\n');
    }

    std::fs::write(rc_path, rewritten).map_err(|source| SetupError::WriteFile {
        path: rc_path.to_path_buf(),
        source,
    })?;
    tracing::info!(rc = %rc_path.display(), backup = %backup.display(), "removed rc block");
    Ok(RemoveOutcome::Removed { backup })
}
