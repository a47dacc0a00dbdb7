//! CLI surface: argument definitions and the install/uninstall flows.

pub mod args;
pub mod install;
pub mod uninstall;

pub use args::Cli;
