use super::{Rule, RuleContext, RuleId};
use crate::model::{Finding, SapSystem};
use regex::Regex;
use std::sync::OnceLock;

const SID_PATTERN: &str = r"^[A-Z0-9]{3}$";

fn sid_regex() -> &'static Regex {
    static SID_RE: OnceLock<Regex> = OnceLock::new();
    SID_RE.get_or_init(|| Regex::new(SID_PATTERN).expect("SID pattern compiles"))
}

/// True when `sid` is exactly three uppercase ASCII letters or digits.
///
/// No normalization: lowercase SIDs are invalid.
pub fn is_valid_sid(sid: &str) -> bool {
    sid_regex().is_match(sid)
}

/// Flags SIDs that do not match the three-character SID format.
pub struct SidFormat;

impl Rule for SidFormat {
    fn id(&self) -> RuleId {
        RuleId::SidFormat
    }

    fn check(&self, system: &SapSystem, _ctx: &RuleContext<'_>, findings: &mut Vec<Finding>) {
        if !is_valid_sid(&system.sid) {
            findings.push(Finding::critical(
                format!("SID invalid: {}", system.sid),
                "SID must be 3 uppercase letters or numbers.",
            ));
        }
    }
}
