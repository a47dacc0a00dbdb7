//! CLI argument definitions using clap.

use clap::Parser;

/// Configure Claude Code to route model calls through AWS Bedrock.
#[derive(Parser, Debug)]
#[command(name = "bedrock-setup")]
#[command(author, version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Bedrock region
    #[arg(short, long, value_name = "REGION")]
    pub region: Option<String>,

    /// AWS credential profile (omit to use default credentials)
    #[arg(short, long, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Primary model id or inference profile ARN
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Small/fast model id
    #[arg(short, long, value_name = "MODEL")]
    pub small_model: Option<String>,

    /// Source the env snippet from your shell rc file
    #[arg(long)]
    pub auto_source: bool,

    /// Show what would be written without touching disk
    #[arg(long)]
    pub dry_run: bool,

    /// Remove generated files and the shell rc block
    #[arg(long)]
    pub uninstall: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long)]
    pub verbose: bool,
}

const AFTER_HELP: &str = "\
Environment variables (fallback layer below flags):
  AWS_REGION, AWS_PROFILE, ANTHROPIC_MODEL, ANTHROPIC_SMALL_FAST_MODEL,
  CLAUDE_CODE_MAX_OUTPUT_TOKENS, MAX_THINKING_TOKENS,
  CLAUDE_BEDROCK_AUTO_SOURCE (\"1\" enables), DEBUG

Examples:
  bedrock-setup                          # install with defaults
  bedrock-setup -p acme --auto-source    # named profile, wire into shell rc
  bedrock-setup --dry-run                # preview generated files
  bedrock-setup --uninstall              # reverse the install";
