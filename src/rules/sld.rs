use super::{Rule, RuleContext, RuleId};
use crate::model::{Finding, SapSystem};

/// Flags systems without a registered SLD entry.
pub struct SldRegistration;

impl Rule for SldRegistration {
    fn id(&self) -> RuleId {
        RuleId::SldRegistration
    }

    fn check(&self, system: &SapSystem, _ctx: &RuleContext<'_>, findings: &mut Vec<Finding>) {
        if !system.sld_registered() {
            findings.push(Finding::warn(
                format!("SLD missing for {}", system.sid),
                "Register system in SolMan LMDB/SLD.",
            ));
        }
    }
}
