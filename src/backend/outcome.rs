//! Backend call outcomes and their display entries.
//!
//! Every outcome, including failures, maps to exactly one finding so callers
//! can append it to the display list without branching.
use crate::model::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// Success payload of `POST /api/validate`.
///
/// Only `filename`, `valid`, and `ai` are relied on; the rest is informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateResponse {
    pub filename: String,
    pub valid: bool,
    pub ai: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Validated(ValidateResponse),
    Rejected { status: u16 },
    Failed { error: String },
}

impl UploadOutcome {
    pub fn to_finding(&self) -> Finding {
        match self {
            UploadOutcome::Validated(response) => {
                let level = if response.valid {
                    Severity::Ok
                } else {
                    Severity::Warn
                };
                Finding::new(level, response.filename.clone(), response.ai.clone())
            }
            UploadOutcome::Rejected { status } => {
                Finding::warn("Upload failed", format!("Server error {status}"))
            }
            UploadOutcome::Failed { error } => Finding::warn("Upload error", error.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    Accepted { session_id: Option<String> },
    Rejected { status: u16 },
    Failed { error: String },
}

impl CollectionOutcome {
    pub fn to_finding(&self) -> Finding {
        match self {
            CollectionOutcome::Accepted { session_id } => Finding::ok(
                "Collection started",
                format!(
                    "Poll /api/collect/status/{} to see files.",
                    session_id.as_deref().unwrap_or("<session>")
                ),
            ),
            CollectionOutcome::Rejected { status } => {
                Finding::warn("Collection failed", format!("Server error {status}"))
            }
            CollectionOutcome::Failed { error } => Finding::warn("Collection error", error.clone()),
        }
    }
}
