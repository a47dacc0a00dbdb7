//! Best-effort credential and model-access probes.
//!
//! Both probes are strictly advisory: they run after the artifacts are
//! written, their failures surface as warnings, and they never change the
//! exit code of an install run. The `aws` CLI is an optional dependency;
//! when it is missing the probes report an informational note and bail.

use crate::core::cli_runner::ProcessRunner;
use crate::core::config::ResolvedConfig;

/// How a probe concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The external CLI ran and reported success.
    Passed,
    /// The external CLI is not installed; informational only.
    Skipped,
    /// The external CLI ran but failed; advisory warning.
    Warned,
}

/// Result of one probe, rendered by the orchestrator.
#[derive(Debug)]
pub struct ProbeReport {
    pub name: &'static str,
    pub status: ProbeStatus,
    /// Detail lines shown under the status marker.
    pub lines: Vec<String>,
}

/// Check whether the `aws` CLI is on `PATH`.
#[must_use]
pub fn aws_cli_available() -> bool {
    which::which("aws").is_ok()
}

fn profile_args(config: &ResolvedConfig) -> Vec<String> {
    config.profile.as_ref().map_or_else(Vec::new, |p| {
        vec!["--profile".to_string(), p.clone()]
    })
}

/// Verify that AWS credentials currently resolve, via `sts get-caller-identity`.
///
/// On success only the account/ARN identity lines are surfaced. On failure
/// the remediation hint depends on whether a profile is configured.
pub async fn check_credentials<R: ProcessRunner>(
    runner: &R,
    config: &ResolvedConfig,
    aws_available: bool,
) -> ProbeReport {
    const NAME: &str = "AWS credentials";

    if !aws_available {
        return ProbeReport {
            name: NAME,
            status: ProbeStatus::Skipped,
            lines: vec!["aws CLI not found; skipping credential check".to_string()],
        };
    }

    let mut args = vec!["sts".to_string(), "get-caller-identity".to_string()];
    args.extend(profile_args(config));
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    match runner.run("aws", &arg_refs).await {
        Ok(output) if output.success() => {
            let identity: Vec<String> = output
                .stdout
                .lines()
                .filter(|l| l.contains("Account") || l.contains("Arn"))
                .map(|l| l.trim().to_string())
                .collect();
            ProbeReport {
                name: NAME,
                status: ProbeStatus::Passed,
                lines: identity,
            }
        }
        Ok(output) => {
            let remediation = config.profile.as_ref().map_or_else(
                || "credentials not valid; try: aws configure (or aws sso login)".to_string(),
                |p| format!("credentials not valid; try: aws sso login --profile {p}"),
            );
            let mut lines = vec![remediation];
            let stderr = output.stderr.trim();
            if !stderr.is_empty() {
                lines.push(stderr.to_string());
            }
            ProbeReport {
                name: NAME,
                status: ProbeStatus::Warned,
                lines,
            }
        }
        Err(e) => ProbeReport {
            name: NAME,
            status: ProbeStatus::Warned,
            lines: vec![e.to_string()],
        },
    }
}

/// Count Bedrock foundation models visible in the configured region.
pub async fn check_model_access<R: ProcessRunner>(
    runner: &R,
    config: &ResolvedConfig,
    aws_available: bool,
) -> ProbeReport {
    const NAME: &str = "Bedrock model access";

    if !aws_available {
        return ProbeReport {
            name: NAME,
            status: ProbeStatus::Skipped,
            lines: vec!["aws CLI not found; skipping model listing".to_string()],
        };
    }

    let mut args = vec![
        "bedrock".to_string(),
        "list-foundation-models".to_string(),
        "--region".to_string(),
        config.region.clone(),
    ];
    args.extend(profile_args(config));
    args.push("--output".to_string());
    args.push("json".to_string());
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    match runner.run("aws", &arg_refs).await {
        Ok(output) if output.success() => {
            match serde_json::from_str::<serde_json::Value>(&output.stdout) {
                Ok(value) => {
                    let count = value["modelSummaries"]
                        .as_array()
                        .map_or(0, std::vec::Vec::len);
                    ProbeReport {
                        name: NAME,
                        status: ProbeStatus::Passed,
                        lines: vec![format!(
                            "{count} foundation models available in {}",
                            config.region
                        )],
                    }
                }
                Err(e) => ProbeReport {
                    name: NAME,
                    status: ProbeStatus::Warned,
                    lines: vec![format!("could not parse model listing: {e}")],
                },
            }
        }
        Ok(output) => ProbeReport {
            name: NAME,
            status: ProbeStatus::Warned,
            lines: vec![output.stderr.trim().to_string()],
        },
        Err(e) => ProbeReport {
            name: NAME,
            status: ProbeStatus::Warned,
            lines: vec![e.to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cli_runner::CliOutput;
    use crate::core::config::{ConfigSources, derive_auth_refresh};
    use crate::error::{Result, SetupError};
    use std::sync::Mutex;

    /// Fake runner returning canned outputs and recording invocations.
    struct FakeRunner {
        output: Result<CliOutput>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeRunner {
        fn ok(stdout: &str) -> Self {
            Self::with_exit(stdout, "", 0)
        }

        fn with_exit(stdout: &str, stderr: &str, exit_code: i32) -> Self {
            Self {
                output: Ok(CliOutput {
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                    exit_code,
                }),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                output: Err(SetupError::CommandFailed {
                    program: "aws".to_string(),
                    reason: reason.to_string(),
                }),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn recorded_args(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").concat()
        }
    }

    impl ProcessRunner for FakeRunner {
        async fn run(&self, program: &str, args: &[&str]) -> Result<CliOutput> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().map(ToString::to_string));
            self.calls.lock().expect("calls lock").push(call);
            match &self.output {
                Ok(out) => Ok(out.clone()),
                Err(e) => Err(SetupError::CommandFailed {
                    program: "aws".to_string(),
                    reason: e.to_string(),
                }),
            }
        }
    }

    fn config(profile: Option<&str>) -> ResolvedConfig {
        ResolvedConfig {
            region: "us-east-1".to_string(),
            profile: profile.map(str::to_string),
            model: "m".to_string(),
            small_model: "s".to_string(),
            max_output_tokens: "4096".to_string(),
            max_thinking_tokens: "1024".to_string(),
            auth_refresh: derive_auth_refresh(profile),
            auto_source: false,
            sources: ConfigSources::default(),
        }
    }

    #[tokio::test]
    async fn missing_cli_skips_both_probes() {
        let runner = FakeRunner::ok("");
        let cfg = config(None);

        let creds = check_credentials(&runner, &cfg, false).await;
        let models = check_model_access(&runner, &cfg, false).await;

        assert_eq!(creds.status, ProbeStatus::Skipped);
        assert_eq!(models.status, ProbeStatus::Skipped);
        assert!(runner.recorded_args().is_empty());
    }

    #[tokio::test]
    async fn credentials_show_only_identity_lines() {
        let stdout = r#"{
    "UserId": "AIDAEXAMPLE",
    "Account": "123456789012",
    "Arn": "arn:aws:iam::123456789012:user/dev"
}"#;
        let runner = FakeRunner::ok(stdout);
        let report = check_credentials(&runner, &config(None), true).await;

        assert_eq!(report.status, ProbeStatus::Passed);
        assert_eq!(report.lines.len(), 2);
        assert!(report.lines[0].contains("Account"));
        assert!(report.lines[1].contains("Arn"));
    }

    #[tokio::test]
    async fn credential_failure_hints_at_profile_login() {
        let runner = FakeRunner::with_exit("", "ExpiredToken", 255);
        let report = check_credentials(&runner, &config(Some("acme")), true).await;

        assert_eq!(report.status, ProbeStatus::Warned);
        assert!(report.lines[0].contains("aws sso login --profile acme"));
        assert!(report.lines[1].contains("ExpiredToken"));
    }

    #[tokio::test]
    async fn credential_failure_without_profile_hints_at_configure() {
        let runner = FakeRunner::with_exit("", "NoCredentialProviders", 255);
        let report = check_credentials(&runner, &config(None), true).await;

        assert_eq!(report.status, ProbeStatus::Warned);
        assert!(report.lines[0].contains("aws configure"));
    }

    #[tokio::test]
    async fn profile_is_passed_through_to_aws() {
        let runner = FakeRunner::ok("{}");
        check_credentials(&runner, &config(Some("acme")), true).await;

        let args = runner.recorded_args();
        let profile_pos = args.iter().position(|a| a == "--profile");
        assert!(profile_pos.is_some_and(|i| args[i + 1] == "acme"));
    }

    #[tokio::test]
    async fn model_access_counts_summaries() {
        let stdout = r#"{"modelSummaries": [{"modelId": "a"}, {"modelId": "b"}, {"modelId": "c"}]}"#;
        let runner = FakeRunner::ok(stdout);
        let report = check_model_access(&runner, &config(None), true).await;

        assert_eq!(report.status, ProbeStatus::Passed);
        assert!(report.lines[0].starts_with("3 foundation models"));
        assert!(report.lines[0].contains("us-east-1"));

        let args = runner.recorded_args();
        let region_pos = args.iter().position(|a| a == "--region");
        assert!(region_pos.is_some_and(|i| args[i + 1] == "us-east-1"));
    }

    #[tokio::test]
    async fn model_access_failure_reports_raw_stderr() {
        let runner = FakeRunner::with_exit("", "AccessDeniedException: not authorized", 254);
        let report = check_model_access(&runner, &config(None), true).await;

        assert_eq!(report.status, ProbeStatus::Warned);
        assert!(report.lines[0].contains("AccessDeniedException"));
    }

    #[tokio::test]
    async fn spawn_failure_is_a_warning_not_an_error() {
        let runner = FakeRunner::failing("timed out after 30s");
        let report = check_credentials(&runner, &config(None), true).await;
        assert_eq!(report.status, ProbeStatus::Warned);
    }
}
