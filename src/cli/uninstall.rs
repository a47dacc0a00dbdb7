//! Uninstall flow: delete generated files and unwire the shell rc.

use crate::cli::args::Cli;
use crate::error::Result;
use crate::render;
use crate::storage::rc_block::RemoveOutcome;
use crate::storage::writer::delete_if_exists;
use crate::storage::{AppPaths, remove_block};
use crate::util::env::should_use_color;

/// Execute the uninstall flow.
///
/// Deleting a file that does not exist is a no-op, not an error. The rc file
/// is backed up before its block is removed.
///
/// # Errors
///
/// Returns an error only when an existing file cannot be removed or the rc
/// rewrite fails.
pub fn execute(cli: &Cli) -> Result<()> {
    let no_color = !should_use_color(cli.no_color);
    let paths = AppPaths::new()?;
    let settings_path = paths.settings_file();
    let snippet_path = paths.env_snippet_file();
    let rc_path = paths.rc_file();

    let prefix = if cli.dry_run { "[DRY RUN] would remove" } else { "removed" };

    if delete_if_exists(&snippet_path, cli.dry_run)? {
        println!(
            "{}",
            render::ok_line(&format!("{prefix} {}", snippet_path.display()), no_color)
        );
    }
    if delete_if_exists(&settings_path, cli.dry_run)? {
        println!(
            "{}",
            render::ok_line(&format!("{prefix} {}", settings_path.display()), no_color)
        );
    }

    match remove_block(&rc_path, &snippet_path, cli.dry_run)? {
        RemoveOutcome::Removed { backup } => {
            println!(
                "{}",
                render::ok_line(
                    &format!("removed source block from {}", rc_path.display()),
                    no_color
                )
            );
            println!(
                "{}",
                render::info_line(&format!("rc backup at {}", backup.display()), no_color)
            );
        }
        RemoveOutcome::Missing => {
            tracing::debug!(rc = %rc_path.display(), "no rc file, nothing to unwire");
        }
        RemoveOutcome::DryRun => {
            println!(
                "{}",
                render::info_line(
                    &format!("[DRY RUN] would remove source block from {}", rc_path.display()),
                    no_color
                )
            );
        }
    }

    if cli.dry_run {
        println!(
            "{}",
            render::info_line("Dry run complete; no files were changed", no_color)
        );
    } else {
        println!(
            "{}",
            render::ok_line("Claude Code Bedrock setup removed", no_color)
        );
    }
    Ok(())
}
