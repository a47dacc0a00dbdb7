//! E2E tests for the install flow.
//!
//! Covers:
//! - Fresh install with defaults (no profile)
//! - Profile-aware settings and snippet rendering
//! - Flag > env > default precedence
//! - Dry-run purity
//! - Idempotent rc wiring
//! - Re-install backup semantics
//! - Help and unknown-flag exit codes

use assert_cmd::Command;
use predicates::prelude::*;

use bedrock_setup::test_utils::TestHome;

/// Build a command with an isolated home and a scrubbed environment.
fn cmd(home: &TestHome) -> Command {
    let mut cmd = Command::cargo_bin("bedrock-setup").expect("binary exists");
    cmd.env("HOME", home.path())
        .env("SHELL", "/bin/zsh")
        .env_remove("AWS_REGION")
        .env_remove("AWS_PROFILE")
        .env_remove("ANTHROPIC_MODEL")
        .env_remove("ANTHROPIC_SMALL_FAST_MODEL")
        .env_remove("CLAUDE_CODE_MAX_OUTPUT_TOKENS")
        .env_remove("MAX_THINKING_TOKENS")
        .env_remove("CLAUDE_BEDROCK_AUTO_SOURCE")
        .env_remove("DEBUG");
    cmd
}

fn settings_json(home: &TestHome) -> serde_json::Value {
    serde_json::from_str(&home.read_file(".claude/settings.json")).expect("valid settings json")
}

#[test]
fn fresh_install_writes_default_artifacts() {
    let home = TestHome::new();

    cmd(&home).assert().success();

    let settings = settings_json(&home);
    assert_eq!(settings["awsAuthRefresh"], "aws sso login");
    assert_eq!(settings["env"]["CLAUDE_CODE_USE_BEDROCK"], "1");
    assert_eq!(settings["env"]["AWS_REGION"], "us-east-1");
    assert!(settings["env"].get("AWS_PROFILE").is_none());
    assert_eq!(
        settings["env"]["ANTHROPIC_MODEL"],
        "us.anthropic.claude-opus-4-5-20251101-v1:0"
    );

    let snippet = home.read_file(".claude/bedrock-env.sh");
    let exports: Vec<&str> = snippet
        .lines()
        .filter(|l| l.starts_with("export "))
        .collect();
    assert_eq!(exports.len(), 6);
    assert!(!snippet.contains("AWS_PROFILE"));
}

#[test]
fn install_with_profile_is_profile_aware_everywhere() {
    let home = TestHome::new();

    cmd(&home)
        .args(["--profile", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aws sso login --profile acme"));

    let settings = settings_json(&home);
    assert_eq!(settings["awsAuthRefresh"], "aws sso login --profile acme");
    assert_eq!(settings["env"]["AWS_PROFILE"], "acme");

    let snippet = home.read_file(".claude/bedrock-env.sh");
    assert!(snippet.contains("export AWS_PROFILE=\"acme\""));
    let exports = snippet.lines().filter(|l| l.starts_with("export ")).count();
    assert_eq!(exports, 7);
}

#[test]
fn flag_overrides_env_for_region() {
    let home = TestHome::new();

    cmd(&home)
        .env("AWS_REGION", "us-west-2")
        .args(["--region", "eu-west-1"])
        .assert()
        .success();

    assert_eq!(settings_json(&home)["env"]["AWS_REGION"], "eu-west-1");
}

#[test]
fn env_overrides_default_for_region_and_tokens() {
    let home = TestHome::new();

    cmd(&home)
        .env("AWS_REGION", "us-west-2")
        .env("CLAUDE_CODE_MAX_OUTPUT_TOKENS", "8192")
        .assert()
        .success();

    let settings = settings_json(&home);
    assert_eq!(settings["env"]["AWS_REGION"], "us-west-2");
    assert_eq!(settings["env"]["CLAUDE_CODE_MAX_OUTPUT_TOKENS"], "8192");
}

#[test]
fn dry_run_renders_content_but_writes_nothing() {
    let home = TestHome::new();

    cmd(&home)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN] would write"))
        .stdout(predicate::str::contains("CLAUDE_CODE_USE_BEDROCK"))
        .stdout(predicate::str::contains("export AWS_REGION=\"us-east-1\""));

    assert!(!home.exists(".claude"));
}

#[test]
fn dry_run_with_auto_source_reports_rc_intent() {
    let home = TestHome::new();

    cmd(&home)
        .args(["--dry-run", "--auto-source"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would add source block"));

    assert!(!home.exists(".zshrc"));
    assert!(!home.exists(".profile"));
}

#[test]
fn auto_source_wiring_is_idempotent() {
    let home = TestHome::new();
    home.write_file(".zshrc", "export EDITOR=vim\n");

    cmd(&home).arg("--auto-source").assert().success();
    let after_first = home.read_file(".zshrc");

    cmd(&home)
        .arg("--auto-source")
        .assert()
        .success()
        .stdout(predicate::str::contains("already sources"));
    let after_second = home.read_file(".zshrc");

    assert_eq!(after_first, after_second);
    assert_eq!(
        after_first.matches("Claude Code Bedrock environment").count(),
        1
    );
    assert!(after_first.starts_with("export EDITOR=vim\n"));
}

#[test]
fn reinstall_backs_up_previous_settings() {
    let home = TestHome::new();

    cmd(&home).args(["--model", "model-one"]).assert().success();
    cmd(&home).args(["--model", "model-two"]).assert().success();

    assert_eq!(settings_json(&home)["env"]["ANTHROPIC_MODEL"], "model-two");

    let backups = home.backups_of(".claude/settings.json");
    assert_eq!(backups.len(), 1);
    let backup_content =
        std::fs::read_to_string(&backups[0]).expect("read settings backup");
    assert!(backup_content.contains("model-one"));
}

#[test]
fn summary_reports_backup_paths() {
    let home = TestHome::new();

    cmd(&home).assert().success();
    cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains(".backup."));
}

#[test]
fn help_exits_zero() {
    let home = TestHome::new();
    cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_flag_exits_one() {
    let home = TestHome::new();
    cmd(&home).arg("--bogus").assert().code(1);
}
