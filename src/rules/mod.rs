//! Landscape validation rules.
//!
//! The engine is a pure function of a snapshot and an explicit `now`: it never
//! reads the clock, never mutates its input, and never fails. Findings come out
//! in system-list order; within a system, rules run in registry order.
//!
//! ## Rule order per system
//! 1. SID format (`critical`)
//! 2. SLD registration (`warn`)
//! 3. Transport targets, per queue then per target (`warn`)
//! 4. RFC destinations, per connection: target check then auth check (`warn`)
//! 5. Certificate expiry, per certificate (`critical`)
mod certificate;
mod rfc;
mod sid;
mod sld;
mod transport;

use crate::model::{Finding, LandscapeSnapshot, SapSystem};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt;

pub use rfc::WILDCARD_TARGET;
pub use sid::is_valid_sid;

/// Stable identifiers for each rule, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleId {
    SidFormat,
    SldRegistration,
    TransportTarget,
    RfcDestination,
    CertificateExpiry,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::SidFormat => "sid_format",
            RuleId::SldRegistration => "sld_registration",
            RuleId::TransportTarget => "transport_target",
            RuleId::RfcDestination => "rfc_destination",
            RuleId::CertificateExpiry => "certificate_expiry",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stateless check applied to one system at a time.
///
/// Rules push every violation they see; none stop early.
pub trait Rule: Send + Sync {
    fn id(&self) -> RuleId;
    fn check(&self, system: &SapSystem, ctx: &RuleContext<'_>, findings: &mut Vec<Finding>);
}

static RULES: &[&dyn Rule] = &[
    &sid::SidFormat,
    &sld::SldRegistration,
    &transport::TransportTargets,
    &rfc::RfcDestinations,
    &certificate::CertificateExpiry,
];

/// Knobs for a single evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// SIDs from an external registry that count as known in addition to
    /// the snapshot's own systems.
    pub extra_known_sids: Vec<String>,
}

/// Per-invocation state shared by every rule.
#[derive(Debug)]
pub struct RuleContext<'a> {
    known_sids: BTreeSet<&'a str>,
    now: DateTime<Utc>,
}

impl<'a> RuleContext<'a> {
    /// Build the known-SID set once from the full system list.
    pub fn new(
        snapshot: &'a LandscapeSnapshot,
        now: DateTime<Utc>,
        options: &'a EngineOptions,
    ) -> Self {
        let known_sids = snapshot
            .sids()
            .chain(options.extra_known_sids.iter().map(String::as_str))
            .collect();
        Self { known_sids, now }
    }

    pub fn is_known(&self, sid: &str) -> bool {
        self.known_sids.contains(sid)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Evaluate every rule against the snapshot, scoped to its own SIDs.
pub fn evaluate(snapshot: &LandscapeSnapshot, now: DateTime<Utc>) -> Vec<Finding> {
    evaluate_with(snapshot, now, &EngineOptions::default())
}

/// Evaluate every rule against the snapshot with explicit options.
pub fn evaluate_with(
    snapshot: &LandscapeSnapshot,
    now: DateTime<Utc>,
    options: &EngineOptions,
) -> Vec<Finding> {
    let ctx = RuleContext::new(snapshot, now, options);
    let findings: Vec<Finding> = snapshot
        .systems
        .iter()
        .flat_map(|system| evaluate_system(system, &ctx))
        .collect();
    tracing::debug!(
        systems = snapshot.systems.len(),
        findings = findings.len(),
        "landscape evaluated"
    );
    findings
}

/// Evaluate every rule against a single system.
pub fn evaluate_system(system: &SapSystem, ctx: &RuleContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    for rule in RULES {
        let start = findings.len();
        rule.check(system, ctx, &mut findings);
        for finding in &findings[start..] {
            tracing::debug!(
                rule = %rule.id(),
                sid = %system.sid,
                level = %finding.level,
                title = %finding.title,
                "rule fired"
            );
        }
    }
    findings
}
