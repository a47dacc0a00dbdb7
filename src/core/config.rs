//! Configuration resolution.
//!
//! ## Precedence
//!
//! Every field is resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Built-in defaults
//!
//! First non-empty value wins per field. Resolution is pure and total: it
//! cannot fail, and with no flags and no environment it yields the defaults.
//!
//! ## Environment Variables
//!
//! - `AWS_REGION`: Bedrock region
//! - `AWS_PROFILE`: named AWS credential profile (absent = default credentials)
//! - `ANTHROPIC_MODEL`: primary model id or inference profile ARN
//! - `ANTHROPIC_SMALL_FAST_MODEL`: small/fast model id
//! - `CLAUDE_CODE_MAX_OUTPUT_TOKENS`: max output tokens (opaque, passed through)
//! - `MAX_THINKING_TOKENS`: max thinking tokens (opaque, passed through)
//! - `CLAUDE_BEDROCK_AUTO_SOURCE`: "1" enables shell rc wiring
//! - `DEBUG`: truthy value enables verbose diagnostics

use crate::cli::args::Cli;
use crate::util::env::{env_is_truthy, env_non_empty};

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable for the Bedrock region.
pub const ENV_REGION: &str = "AWS_REGION";
/// Environment variable for the AWS credential profile.
pub const ENV_PROFILE: &str = "AWS_PROFILE";
/// Environment variable for the primary model id or ARN.
pub const ENV_MODEL: &str = "ANTHROPIC_MODEL";
/// Environment variable for the small/fast model id.
pub const ENV_SMALL_MODEL: &str = "ANTHROPIC_SMALL_FAST_MODEL";
/// Environment variable for max output tokens.
pub const ENV_MAX_OUTPUT_TOKENS: &str = "CLAUDE_CODE_MAX_OUTPUT_TOKENS";
/// Environment variable for max thinking tokens.
pub const ENV_MAX_THINKING_TOKENS: &str = "MAX_THINKING_TOKENS";
/// Environment variable enabling shell rc wiring ("1" enables).
pub const ENV_AUTO_SOURCE: &str = "CLAUDE_BEDROCK_AUTO_SOURCE";
/// Environment variable gating verbose diagnostic output.
pub const ENV_DEBUG: &str = "DEBUG";

// =============================================================================
// Built-in Defaults
// =============================================================================

/// Default Bedrock region.
pub const DEFAULT_REGION: &str = "us-east-1";
/// Default primary model (cross-region inference profile id).
pub const DEFAULT_MODEL: &str = "us.anthropic.claude-opus-4-5-20251101-v1:0";
/// Default small/fast model.
pub const DEFAULT_SMALL_MODEL: &str = "us.anthropic.claude-haiku-4-5-20251001-v1:0";
/// Default max output tokens. Opaque text, never parsed.
pub const DEFAULT_MAX_OUTPUT_TOKENS: &str = "4096";
/// Default max thinking tokens. Opaque text, never parsed.
pub const DEFAULT_MAX_THINKING_TOKENS: &str = "1024";

/// The SSO login invocation used when no profile is configured.
pub const SSO_LOGIN_COMMAND: &str = "aws sso login";

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved configuration for one run.
///
/// Constructed once from CLI flags, environment variables, and defaults;
/// immutable thereafter. Never persisted as an object — only serialized into
/// the settings file and env snippet.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Bedrock region.
    pub region: String,
    /// AWS credential profile; `None` means ambient/default credentials.
    pub profile: Option<String>,
    /// Primary model id or inference profile ARN (opaque, not validated).
    pub model: String,
    /// Small/fast model id (opaque, not validated).
    pub small_model: String,
    /// Max output tokens, passed through verbatim.
    pub max_output_tokens: String,
    /// Max thinking tokens, passed through verbatim.
    pub max_thinking_tokens: String,
    /// Derived credential-refresh command; always a pure function of `profile`.
    pub auth_refresh: String,
    /// Whether to wire the env snippet into the shell rc file.
    pub auto_source: bool,
    /// Source of each setting, for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub region: ConfigSource,
    pub profile: ConfigSource,
    pub model: ConfigSource,
    pub small_model: ConfigSource,
    pub max_output_tokens: ConfigSource,
    pub max_thinking_tokens: ConfigSource,
    pub auto_source: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from CLI flag.
    Cli,
    /// Value from environment variable.
    Env,
    /// Built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Derive the credential-refresh command from the profile.
///
/// This is the only place `auth_refresh` may be computed.
#[must_use]
pub fn derive_auth_refresh(profile: Option<&str>) -> String {
    profile.map_or_else(
        || SSO_LOGIN_COMMAND.to_string(),
        |p| format!("{SSO_LOGIN_COMMAND} --profile {p}"),
    )
}

impl ResolvedConfig {
    /// Resolve final configuration from CLI args, environment, and defaults.
    ///
    /// Resolution cannot fail; missing everything yields the defaults.
    #[must_use]
    pub fn resolve(cli: &Cli) -> Self {
        let mut sources = ConfigSources::default();

        let region = Self::resolve_field(
            cli.region.as_deref(),
            ENV_REGION,
            DEFAULT_REGION,
            &mut sources.region,
        );
        let profile = Self::resolve_optional(cli.profile.as_deref(), ENV_PROFILE, &mut sources.profile);
        let model = Self::resolve_field(
            cli.model.as_deref(),
            ENV_MODEL,
            DEFAULT_MODEL,
            &mut sources.model,
        );
        let small_model = Self::resolve_field(
            cli.small_model.as_deref(),
            ENV_SMALL_MODEL,
            DEFAULT_SMALL_MODEL,
            &mut sources.small_model,
        );
        let max_output_tokens = Self::resolve_field(
            None,
            ENV_MAX_OUTPUT_TOKENS,
            DEFAULT_MAX_OUTPUT_TOKENS,
            &mut sources.max_output_tokens,
        );
        let max_thinking_tokens = Self::resolve_field(
            None,
            ENV_MAX_THINKING_TOKENS,
            DEFAULT_MAX_THINKING_TOKENS,
            &mut sources.max_thinking_tokens,
        );

        let auto_source = if cli.auto_source {
            sources.auto_source = ConfigSource::Cli;
            true
        } else if std::env::var(ENV_AUTO_SOURCE).is_ok_and(|v| v.trim() == "1") {
            sources.auto_source = ConfigSource::Env;
            true
        } else {
            false
        };

        let auth_refresh = derive_auth_refresh(profile.as_deref());

        Self {
            region,
            profile,
            model,
            small_model,
            max_output_tokens,
            max_thinking_tokens,
            auth_refresh,
            auto_source,
            sources,
        }
    }

    /// Resolve one required field: flag > env > default, first non-empty wins.
    fn resolve_field(
        flag: Option<&str>,
        env_var: &str,
        default: &str,
        source: &mut ConfigSource,
    ) -> String {
        if let Some(value) = flag.map(str::trim).filter(|v| !v.is_empty()) {
            *source = ConfigSource::Cli;
            return value.to_string();
        }
        if let Some(value) = env_non_empty(env_var) {
            *source = ConfigSource::Env;
            return value;
        }
        *source = ConfigSource::Default;
        default.to_string()
    }

    /// Resolve one optional field: flag > env, absent if neither is set.
    fn resolve_optional(
        flag: Option<&str>,
        env_var: &str,
        source: &mut ConfigSource,
    ) -> Option<String> {
        if let Some(value) = flag.map(str::trim).filter(|v| !v.is_empty()) {
            *source = ConfigSource::Cli;
            return Some(value.to_string());
        }
        if let Some(value) = env_non_empty(env_var) {
            *source = ConfigSource::Env;
            return Some(value);
        }
        *source = ConfigSource::Default;
        None
    }
}

/// Check whether verbose diagnostics were requested via the `DEBUG` env var.
#[must_use]
pub fn debug_from_env() -> bool {
    env_is_truthy(ENV_DEBUG)
}
