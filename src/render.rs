//! Plain-text rendering for terminal output.
use crate::feed::FeedEntry;
use crate::model::{LandscapeSnapshot, Severity};
use crate::summary::{HealthBreakdown, LandscapeSummary};

fn marker(level: Severity) -> &'static str {
    match level {
        Severity::Critical => "[CRIT]",
        Severity::Warn => "[WARN]",
        Severity::Ok => "[ OK ]",
    }
}

/// Render display entries, one title line plus an indented detail each.
pub fn render_entries(entries: &[FeedEntry]) -> String {
    if entries.is_empty() {
        return "No issues found\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let finding = &entry.finding;
        out.push_str(&format!("{} {}\n", marker(finding.level), finding.title));
        for line in finding.detail.lines() {
            out.push_str(&format!("       {line}\n"));
        }
    }
    out
}

pub fn render_systems(snapshot: &LandscapeSnapshot) -> String {
    if snapshot.systems.is_empty() {
        return "No systems loaded\n".to_string();
    }
    let mut out = String::new();
    for system in &snapshot.systems {
        out.push_str(&format!("{} — {}\n", system.sid, system.name));
        out.push_str(&format!(
            "    {} • {}    Instances: {}\n",
            system.system_type,
            system.environment,
            system.instances.len()
        ));
    }
    out
}

pub fn render_summary(summary: &LandscapeSummary, health: &HealthBreakdown) -> String {
    let mut out = String::new();
    out.push_str("Modules\n");
    out.push_str(&format!("  Systems: {}\n", summary.systems));
    out.push_str(&format!("  RFCs: {}\n", summary.rfc_connections));
    out.push_str(&format!("  Transports: {}\n", summary.transport_queues));
    out.push_str(&format!("  SLD entries: {}\n", summary.sld_registered));
    out.push_str(&format!("  Instances: {}\n", summary.instances));
    out.push_str("\nLandscape Health\n");
    for slice in health.slices() {
        out.push_str(&format!("  {}: {}\n", slice.name, slice.value));
    }
    out
}
