use super::{Rule, RuleContext, RuleId};
use crate::model::{Finding, RfcConnection, SapSystem};

/// Target value meaning "any system"; never reported as missing.
pub const WILDCARD_TARGET: &str = "*";

/// Flags RFC destinations pointing outside the inventory and RFC
/// destinations authenticating with user/password.
///
/// Both checks run per connection so a connection's findings stay adjacent.
pub struct RfcDestinations;

impl Rule for RfcDestinations {
    fn id(&self) -> RuleId {
        RuleId::RfcDestination
    }

    fn check(&self, system: &SapSystem, ctx: &RuleContext<'_>, findings: &mut Vec<Finding>) {
        for connection in &system.rfc_connections {
            if let Some(target) = missing_target(connection, ctx) {
                findings.push(Finding::warn(
                    format!("RFC target {target} for {} not found", connection.name),
                    "Check RFC destination or inventory.",
                ));
            }
            if uses_password_auth(connection) {
                findings.push(Finding::warn(
                    format!("RFC {} uses password auth", connection.name),
                    "Consider SNC or certificate auth.",
                ));
            }
        }
    }
}

fn missing_target<'c>(connection: &'c RfcConnection, ctx: &RuleContext<'_>) -> Option<&'c str> {
    connection
        .target()
        .filter(|target| *target != WILDCARD_TARGET && !ctx.is_known(target))
}

// Substring match anywhere, so "SuperUserAuth" counts too.
fn uses_password_auth(connection: &RfcConnection) -> bool {
    connection.auth_method.to_lowercase().contains("user")
}
