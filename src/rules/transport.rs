use super::{Rule, RuleContext, RuleId};
use crate::model::{Finding, SapSystem};

/// Flags transport targets that are not part of the inventory.
pub struct TransportTargets;

impl Rule for TransportTargets {
    fn id(&self) -> RuleId {
        RuleId::TransportTarget
    }

    fn check(&self, system: &SapSystem, ctx: &RuleContext<'_>, findings: &mut Vec<Finding>) {
        for queue in &system.transport_queues {
            for target in &queue.target_systems {
                if ctx.is_known(target) {
                    continue;
                }
                findings.push(Finding::warn(
                    format!(
                        "Transport target {target} missing for {}",
                        queue.transport_id
                    ),
                    "Target not in inventory.",
                ));
            }
        }
    }
}
