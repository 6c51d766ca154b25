//! CLI argument parsing for the landscape checker.
//!
//! The CLI is thin: each command loads inputs, calls into the library, and
//! prints the result as text or JSON.
use crate::model::parse_timestamp;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "landscape",
    version,
    about = "SAP landscape inventory checks and guided remediation",
    after_help = "Examples:\n  landscape check\n  landscape check --snapshot landscape.json --now 2025-08-01T00:00:00Z --json\n  landscape summary\n  landscape upload exports/rfc_dest.csv exports/jobs.csv\n  landscape collect --host prd-pas-00.aws.example.com --sid PRD\n  landscape status --session <id>",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logs to stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Path to config.json (default: <config dir>/sap-landscape/config.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run validation rules against a landscape snapshot
    Check(CheckArgs),
    /// List the systems in a landscape snapshot
    Systems(SystemsArgs),
    /// Show module counts and the landscape health breakdown
    Summary(SummaryArgs),
    /// Write the bundled sample landscape
    Sample(SampleArgs),
    /// Upload exported files to the backend for validation
    Upload(UploadArgs),
    /// Trigger simulated agentless collection on the backend
    Collect(CollectArgs),
    /// Print a collection session's status as returned by the backend
    Status(StatusArgs),
}

/// Snapshot selection shared by the read-only commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SnapshotArgs {
    /// Landscape snapshot JSON (default: bundled sample)
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
}

/// Reference time for certificate expiry.
#[derive(Args, Debug, Clone, Default)]
pub struct NowArgs {
    /// Evaluate as of this instant (RFC 3339 or YYYY-MM-DD; default: current time)
    #[arg(long, value_name = "TIME", value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    #[command(flatten)]
    pub now: NowArgs,

    /// Emit findings as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct SystemsArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    #[command(flatten)]
    pub now: NowArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Output path (default: stdout)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct UploadArgs {
    /// Exported files (CSV/XLSX) sent in a single request
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Backend base URL
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Also list rule findings for this snapshot ahead of the upload result
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    #[command(flatten)]
    pub now: NowArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Application server host
    #[arg(long)]
    pub host: String,

    /// System identifier
    #[arg(long)]
    pub sid: String,

    /// SAP client
    #[arg(long)]
    pub client: Option<String>,

    /// RFC user for the collectors
    #[arg(long)]
    pub rfc_user: Option<String>,

    /// Backend base URL
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Session id returned by `collect`
    #[arg(long)]
    pub session: String,

    /// Backend base URL
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw)
        .ok_or_else(|| format!("invalid time {raw:?}; expected RFC 3339 or YYYY-MM-DD"))
}
