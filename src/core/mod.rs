//! Core logic: configuration resolution, subprocess execution, probes.

pub mod cli_runner;
pub mod config;
pub mod logging;
pub mod probe;

pub use cli_runner::{CliOutput, ProcessRunner, SystemRunner};
pub use config::{ConfigSource, ConfigSources, ResolvedConfig};
pub use probe::{ProbeReport, ProbeStatus};
