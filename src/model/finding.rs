use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single finding, ordered from least to most severe.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Ok,
    Warn,
    Critical,
}

impl Severity {
    /// Return the stable string identifier used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warn => "warn",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation result with remediation text.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Finding {
    pub level: Severity,
    pub title: String,
    pub detail: String,
}

impl Finding {
    pub fn new(level: Severity, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn critical(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Critical, title, detail)
    }

    pub fn warn(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Warn, title, detail)
    }

    pub fn ok(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Ok, title, detail)
    }
}
