//! Install flow: write artifacts, optionally wire the shell rc, run probes.

use crate::cli::args::Cli;
use crate::core::config::ResolvedConfig;
use crate::core::probe::{self, aws_cli_available};
use crate::core::{ProcessRunner, SystemRunner};
use crate::error::Result;
use crate::render;
use crate::storage::rc_block::InsertOutcome;
use crate::storage::writer::{render_env_snippet, render_settings, write_artifact};
use crate::storage::{AppPaths, WriteAction, WriteReport, ensure_present};
use crate::util::env::should_use_color;

/// Execute the install (or dry-run install) flow.
///
/// Order matters: both artifacts are written before any probe runs, so an
/// advisory failure can never block or partially undo the configuration.
///
/// # Errors
///
/// Returns an error only for fatal filesystem problems (directory creation,
/// backup copy, file write). Probe failures are rendered as warnings.
pub async fn execute(cli: &Cli) -> Result<()> {
    let no_color = !should_use_color(cli.no_color);
    let config = ResolvedConfig::resolve(cli);
    tracing::debug!(?config.sources, region = %config.region, "resolved configuration");

    let paths = AppPaths::new()?;
    let settings_path = paths.settings_file();
    let snippet_path = paths.env_snippet_file();

    let settings_content = render_settings(&config)?;
    let snippet_content = render_env_snippet(&config);

    if cli.dry_run {
        println!(
            "{}",
            render::dry_run_file(&settings_path, &settings_content, no_color)
        );
        println!(
            "{}",
            render::dry_run_file(&snippet_path, &snippet_content, no_color)
        );
    }

    let mut reports: Vec<WriteReport> = Vec::new();
    reports.push(write_artifact(&settings_path, &settings_content, cli.dry_run)?);
    reports.push(write_artifact(&snippet_path, &snippet_content, cli.dry_run)?);

    if config.auto_source {
        let rc_path = paths.rc_file();
        match ensure_present(&rc_path, &snippet_path, cli.dry_run)? {
            InsertOutcome::Added => {
                println!(
                    "{}",
                    render::ok_line(
                        &format!("added source block to {}", rc_path.display()),
                        no_color
                    )
                );
            }
            InsertOutcome::AlreadyPresent => {
                println!(
                    "{}",
                    render::info_line(
                        &format!("{} already sources the snippet", rc_path.display()),
                        no_color
                    )
                );
            }
            InsertOutcome::DryRun => {
                println!(
                    "{}",
                    render::info_line(
                        &format!("[DRY RUN] would add source block to {}", rc_path.display()),
                        no_color
                    )
                );
            }
        }
    }

    run_probes(&SystemRunner, &config, no_color).await;

    if cli.dry_run {
        println!(
            "{}",
            render::info_line("Dry run complete; no files were changed", no_color)
        );
    } else {
        let written: Vec<WriteReport> = reports
            .into_iter()
            .filter(|r| r.action == WriteAction::Written)
            .collect();
        print!("{}", render::install_summary(&config, &written, no_color));
    }

    Ok(())
}

/// Run both advisory probes and render their reports. Never fails.
async fn run_probes<R: ProcessRunner>(runner: &R, config: &ResolvedConfig, no_color: bool) {
    let aws_available = aws_cli_available();

    let creds = probe::check_credentials(runner, config, aws_available).await;
    println!("{}", render::probe_report(&creds, no_color));

    let models = probe::check_model_access(runner, config, aws_available).await;
    println!("{}", render::probe_report(&models, no_color));
}
