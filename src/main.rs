//! bedrock-setup - Configure Claude Code for AWS Bedrock.
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use clap::error::ErrorKind;
use std::process::ExitCode;

use bedrock_setup::cli::{Cli, install, uninstall};
use bedrock_setup::core::{config, logging};
use bedrock_setup::render;
use bedrock_setup::util::env::should_use_color;

#[tokio::main]
async fn main() -> ExitCode {
    // clap exits 2 on parse errors by default; the contract here is 1 for an
    // unrecognized flag and 0 for help/version.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    logging::init(cli.verbose || config::debug_from_env());

    let result = if cli.uninstall {
        uninstall::execute(&cli)
    } else {
        install::execute(&cli).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            let no_color = !should_use_color(cli.no_color);
            eprintln!("{}", render::error_line(&e.to_string(), no_color));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
