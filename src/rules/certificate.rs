use super::{Rule, RuleContext, RuleId};
use crate::model::{Finding, SapSystem};

/// Flags certificates whose expiry lies strictly before `now`.
///
/// Certificates without an expiry are unverifiable and skipped.
pub struct CertificateExpiry;

impl Rule for CertificateExpiry {
    fn id(&self) -> RuleId {
        RuleId::CertificateExpiry
    }

    fn check(&self, system: &SapSystem, ctx: &RuleContext<'_>, findings: &mut Vec<Finding>) {
        for certificate in &system.certificates {
            let Some(not_after) = certificate.not_after else {
                continue;
            };
            if not_after < ctx.now() {
                findings.push(Finding::critical(
                    format!("Expired cert on {}: {}", system.sid, certificate.subject),
                    "Renew certificate.",
                ));
            }
        }
    }
}
