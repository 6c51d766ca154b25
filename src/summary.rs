//! Aggregate counts derived from a snapshot.
//!
//! These are reductions over the system list consumed by the presentation
//! layer; they are not part of the rule engine's output.
use crate::model::{LandscapeSnapshot, Severity};
use crate::rules::{evaluate_system, EngineOptions, RuleContext};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Module counts shown next to the systems list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LandscapeSummary {
    pub systems: usize,
    pub rfc_connections: usize,
    pub transport_queues: usize,
    pub sld_registered: usize,
    pub instances: usize,
}

impl LandscapeSummary {
    pub fn from_snapshot(snapshot: &LandscapeSnapshot) -> Self {
        let systems = &snapshot.systems;
        Self {
            systems: systems.len(),
            rfc_connections: systems.iter().map(|s| s.rfc_connections.len()).sum(),
            transport_queues: systems.iter().map(|s| s.transport_queues.len()).sum(),
            sld_registered: systems.iter().filter(|s| s.sld_registered()).count(),
            instances: systems.iter().map(|s| s.instances.len()).sum(),
        }
    }
}

/// Health bucket a single system falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Ok,
    Warn,
    Critical,
    NotCollected,
}

impl HealthState {
    pub fn label(&self) -> &'static str {
        match self {
            HealthState::Ok => "OK",
            HealthState::Warn => "Warn",
            HealthState::Critical => "Critical",
            HealthState::NotCollected => "NotCollected",
        }
    }
}

/// One slice of the health chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthSlice {
    pub name: &'static str,
    pub value: usize,
}

/// Per-system health counts for the dashboard chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthBreakdown {
    pub ok: usize,
    pub warn: usize,
    pub critical: usize,
    pub not_collected: usize,
}

impl HealthBreakdown {
    /// Bucket every system by its worst finding.
    ///
    /// A system without findings counts as not collected when it lists no
    /// instances, otherwise as ok.
    pub fn compute(
        snapshot: &LandscapeSnapshot,
        now: DateTime<Utc>,
        options: &EngineOptions,
    ) -> Self {
        let ctx = RuleContext::new(snapshot, now, options);
        let mut breakdown = Self::default();
        for system in &snapshot.systems {
            let worst = evaluate_system(system, &ctx)
                .iter()
                .map(|finding| finding.level)
                .max();
            let state = match worst {
                Some(Severity::Critical) => HealthState::Critical,
                Some(Severity::Warn) => HealthState::Warn,
                Some(Severity::Ok) | None if system.instances.is_empty() => {
                    HealthState::NotCollected
                }
                Some(Severity::Ok) | None => HealthState::Ok,
            };
            breakdown.record(state);
        }
        breakdown
    }

    fn record(&mut self, state: HealthState) {
        match state {
            HealthState::Ok => self.ok += 1,
            HealthState::Warn => self.warn += 1,
            HealthState::Critical => self.critical += 1,
            HealthState::NotCollected => self.not_collected += 1,
        }
    }

    /// Chart slices in display order: OK, Warn, Critical, NotCollected.
    pub fn slices(&self) -> Vec<HealthSlice> {
        [
            (HealthState::Ok, self.ok),
            (HealthState::Warn, self.warn),
            (HealthState::Critical, self.critical),
            (HealthState::NotCollected, self.not_collected),
        ]
        .into_iter()
        .map(|(state, value)| HealthSlice {
            name: state.label(),
            value,
        })
        .collect()
    }
}
