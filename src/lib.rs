//! bedrock-setup - Configure Claude Code for AWS Bedrock.
//!
//! Writes the Claude Code settings file and a shell-sourceable env snippet,
//! optionally wires the snippet into the shell rc file, and runs best-effort
//! credential/model-access probes against the `aws` CLI.

// Note: deny (not forbid) to allow #[allow(unsafe_code)] in test helpers for env var manipulation
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod render;
pub mod storage;
pub mod util;

/// Test utilities module - included in test builds or when test-utils feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{ExitCode, Result, SetupError};
