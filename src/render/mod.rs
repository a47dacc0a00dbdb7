//! Human-readable terminal output.
//!
//! All user-facing text is built here so install/uninstall flows stay free of
//! formatting concerns. Every function returns a `String`; callers print.

use colored::Colorize;

use crate::core::config::ResolvedConfig;
use crate::core::probe::{ProbeReport, ProbeStatus};
use crate::storage::writer::WriteReport;

/// A green check line.
#[must_use]
pub fn ok_line(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[ok] {message}")
    } else {
        format!("{} {message}", "✓".green())
    }
}

/// A clearly marked warning line. Warnings never abort a run.
#[must_use]
pub fn warn_line(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[warn] {message}")
    } else {
        format!("{} {message}", "⚠".yellow())
    }
}

/// A clearly marked error line, printed before a non-zero exit.
#[must_use]
pub fn error_line(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[error] {message}")
    } else {
        format!("{} {message}", "✗".red())
    }
}

/// An informational note (optional dependencies, skipped steps).
#[must_use]
pub fn info_line(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[info] {message}")
    } else {
        format!("{} {message}", "·".blue())
    }
}

/// Header + content block for dry-run mode: the exact content a real run
/// would persist, behind a `[DRY RUN]` prefix.
#[must_use]
pub fn dry_run_file(path: &std::path::Path, content: &str, no_color: bool) -> String {
    let header = format!("[DRY RUN] would write {}:", path.display());
    let header = if no_color {
        header
    } else {
        header.cyan().to_string()
    };
    format!("{header}\n{content}")
}

/// Render one probe result.
#[must_use]
pub fn probe_report(report: &ProbeReport, no_color: bool) -> String {
    let mut out = match report.status {
        ProbeStatus::Passed => ok_line(report.name, no_color),
        ProbeStatus::Skipped => info_line(report.name, no_color),
        ProbeStatus::Warned => warn_line(report.name, no_color),
    };
    for line in &report.lines {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out
}

/// End-of-run install summary: written files, backups, next steps.
#[must_use]
pub fn install_summary(
    config: &ResolvedConfig,
    reports: &[WriteReport],
    no_color: bool,
) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&ok_line("Claude Code Bedrock setup complete", no_color));
    out.push('\n');

    for report in reports {
        out.push_str(&format!("  wrote   {}\n", report.path.display()));
        if let Some(backup) = &report.backup {
            out.push_str(&format!("  backup  {}\n", backup.display()));
        }
    }

    out.push_str("\nNext steps:\n");
    if let Some(profile) = &config.profile {
        out.push_str(&format!(
            "  1. Log in once: aws sso login --profile {profile}\n"
        ));
    } else {
        out.push_str("  1. Make sure your AWS credentials are configured (aws configure)\n");
    }
    if config.auto_source {
        out.push_str("  2. Restart your shell (or source your rc file)\n");
    } else {
        out.push_str("  2. Source the env snippet in your shell, or re-run with --auto-source\n");
    }
    out.push_str("  3. Start claude; model calls now go through Bedrock\n");
    out
}
