//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for session results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Day-by-day transcript with phase summaries
    Full,
    /// Phase summaries only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for realtalk_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for realtalk
#[derive(Parser, Debug)]
#[command(name = "realtalk")]
#[command(author, version, about = "Real-time talk server for agent social-deduction games")]
#[command(long_about = r#"
realtalk seats remote agents over TCP and runs timed, free-form talk phases
among them. Every agent may speak at any moment; accepted messages are
broadcast to everyone immediately.

Each day has:
1. Talk: public discussion among all connected agents
2. Whisper: restricted discussion among the whisper group (if configured)

A phase ends when every agent says OVER, when the phase-wide quota is used,
when nobody speaks for the silence timeout, or at the phase timeout.

Configuration files are loaded from (in priority order):
1. REALTALK_* environment variables
2. --config <path>     Explicit config file
3. ./realtalk.toml     Project-level config
4. ~/.config/realtalk/config.toml   Global config

Example:
  realtalk serve --agents 5
  realtalk serve --bind 0.0.0.0:8080 --days 2 -o json
  realtalk serve --viewer-log viewer.jsonl
  realtalk --show-config
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Accept agents and run a game session
    Serve(ServeArgs),
}

/// Overrides for the `[server]` section
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Number of agents to wait for
    #[arg(short, long, value_name = "N")]
    pub agents: Option<usize>,

    /// Number of days to play
    #[arg(short, long, value_name = "N")]
    pub days: Option<u32>,

    /// Game id used in packets and transcript file names
    #[arg(long, value_name = "ID")]
    pub game_id: Option<String>,

    /// Record the live viewer feed as JSON Lines to this file
    #[arg(long, value_name = "PATH")]
    pub viewer_log: Option<PathBuf>,
}
