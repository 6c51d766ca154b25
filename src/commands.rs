//! Command handlers behind the CLI.
//!
//! Each handler loads its inputs, calls into the library, and writes text or
//! JSON to the given writer.
use crate::backend::{BackendClient, CollectionRequest};
use crate::cli::{
    CheckArgs, CollectArgs, Command, NowArgs, SampleArgs, StatusArgs, SummaryArgs, SystemsArgs,
    UploadArgs,
};
use crate::config::{resolve_api_base, ToolConfig};
use crate::feed::FindingFeed;
use crate::loader::{load_or_sample, load_snapshot, write_snapshot};
use crate::render::{render_entries, render_summary, render_systems};
use crate::rules::evaluate_with;
use crate::summary::{HealthBreakdown, LandscapeSummary};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

pub fn run(command: Command, config: &ToolConfig, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Check(args) => run_check(args, config, out),
        Command::Systems(args) => run_systems(args, out),
        Command::Summary(args) => run_summary(args, config, out),
        Command::Sample(args) => run_sample(args, out),
        Command::Upload(args) => run_upload(args, config, out),
        Command::Collect(args) => run_collect(args, config, out),
        Command::Status(args) => run_status(args, config, out),
    }
}

fn resolve_now(args: &NowArgs) -> DateTime<Utc> {
    args.now.unwrap_or_else(Utc::now)
}

fn run_check(args: CheckArgs, config: &ToolConfig, out: &mut dyn Write) -> Result<()> {
    let snapshot = load_or_sample(args.snapshot.snapshot.as_deref())?;
    let findings = evaluate_with(&snapshot, resolve_now(&args.now), &config.engine_options());
    if args.json {
        return write_json(out, &findings);
    }
    let mut feed = FindingFeed::new();
    feed.extend_rules(findings);
    write_text(out, &render_entries(feed.entries()))
}

fn run_systems(args: SystemsArgs, out: &mut dyn Write) -> Result<()> {
    let snapshot = load_or_sample(args.snapshot.snapshot.as_deref())?;
    if args.json {
        return write_json(out, &snapshot.systems);
    }
    write_text(out, &render_systems(&snapshot))
}

#[derive(Serialize)]
struct SummaryReport {
    summary: LandscapeSummary,
    health: HealthBreakdown,
}

fn run_summary(args: SummaryArgs, config: &ToolConfig, out: &mut dyn Write) -> Result<()> {
    let snapshot = load_or_sample(args.snapshot.snapshot.as_deref())?;
    let report = SummaryReport {
        summary: LandscapeSummary::from_snapshot(&snapshot),
        health: HealthBreakdown::compute(
            &snapshot,
            resolve_now(&args.now),
            &config.engine_options(),
        ),
    };
    if args.json {
        return write_json(out, &report);
    }
    write_text(out, &render_summary(&report.summary, &report.health))
}

fn run_sample(args: SampleArgs, out: &mut dyn Write) -> Result<()> {
    let snapshot = load_or_sample(None)?;
    match args.out {
        Some(path) => {
            write_snapshot(&path, &snapshot)?;
            tracing::info!(path = %path.display(), "sample landscape written");
            Ok(())
        }
        None => write_json(out, &snapshot),
    }
}

fn run_upload(args: UploadArgs, config: &ToolConfig, out: &mut dyn Write) -> Result<()> {
    let mut feed = FindingFeed::new();
    if let Some(path) = args.snapshot.as_deref() {
        let snapshot = load_snapshot(path)?;
        feed.extend_rules(evaluate_with(
            &snapshot,
            resolve_now(&args.now),
            &config.engine_options(),
        ));
    }

    let client = BackendClient::new(&resolve_api_base(args.api_base.as_deref(), config));
    if let Some(outcome) = client.validate_files(&args.files) {
        feed.record_upload(&outcome);
    }
    write_feed(out, &feed, args.json)
}

fn run_collect(args: CollectArgs, config: &ToolConfig, out: &mut dyn Write) -> Result<()> {
    let request = CollectionRequest {
        host: args.host,
        sid: args.sid,
        client: args.client,
        rfc_user: args.rfc_user,
    };
    let client = BackendClient::new(&resolve_api_base(args.api_base.as_deref(), config));
    let outcome = client.start_collection(&request);

    let mut feed = FindingFeed::new();
    feed.record_collection(&outcome);
    write_feed(out, &feed, args.json)
}

fn run_status(args: StatusArgs, config: &ToolConfig, out: &mut dyn Write) -> Result<()> {
    let client = BackendClient::new(&resolve_api_base(args.api_base.as_deref(), config));
    let reply = client.collection_status(&args.session)?;
    write_text(out, &reply.body)?;
    if !reply.body.is_empty() && !reply.body.ends_with('\n') {
        write_text(out, "\n")?;
    }
    if !(200..300).contains(&reply.status) {
        return Err(anyhow!("status request returned HTTP {}", reply.status));
    }
    Ok(())
}

fn write_feed(out: &mut dyn Write, feed: &FindingFeed, json: bool) -> Result<()> {
    if json {
        return write_json(out, feed);
    }
    write_text(out, &render_entries(feed.entries()))
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    writeln!(out, "{json}").context("write output")?;
    Ok(())
}

fn write_text(out: &mut dyn Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).context("write output")?;
    Ok(())
}
