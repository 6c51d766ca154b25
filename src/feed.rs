//! Append-only display list of findings.
//!
//! Two producers feed it: the rule engine and backend outcomes. Entries keep
//! arrival order and are never reordered or removed.
use crate::backend::{CollectionOutcome, UploadOutcome};
use crate::model::{Finding, Severity};
use serde::Serialize;

/// Which producer an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    Rules,
    Upload,
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub source: FeedSource,
    #[serde(flatten)]
    pub finding: Finding,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FindingFeed {
    entries: Vec<FeedEntry>,
}

impl FindingFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append engine findings in the order the engine produced them.
    pub fn extend_rules(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.entries
            .extend(findings.into_iter().map(|finding| FeedEntry {
                source: FeedSource::Rules,
                finding,
            }));
    }

    pub fn record_upload(&mut self, outcome: &UploadOutcome) {
        self.push(FeedSource::Upload, outcome.to_finding());
    }

    pub fn record_collection(&mut self, outcome: &CollectionOutcome) {
        self.push(FeedSource::Collection, outcome.to_finding());
    }

    fn push(&mut self, source: FeedSource, finding: Finding) {
        self.entries.push(FeedEntry { source, finding });
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries at the given level.
    pub fn count(&self, level: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.finding.level == level)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ValidateResponse;

    #[test]
    fn producers_append_in_arrival_order() {
        let mut feed = FindingFeed::new();
        feed.extend_rules(vec![
            Finding::critical("SID invalid: prd", "SID must be 3 uppercase letters or numbers."),
            Finding::warn("SLD missing for prd", "Register system in SolMan LMDB/SLD."),
        ]);
        feed.record_upload(&UploadOutcome::Rejected { status: 503 });
        feed.record_collection(&CollectionOutcome::Accepted {
            session_id: Some("s1".to_string()),
        });
        feed.record_upload(&UploadOutcome::Validated(ValidateResponse {
            filename: "db_backups.csv".to_string(),
            valid: true,
            ai: "No issues detected. File parsed successfully.".to_string(),
            ..ValidateResponse::default()
        }));

        let sources: Vec<_> = feed.entries().iter().map(|entry| entry.source).collect();
        assert_eq!(
            sources,
            vec![
                FeedSource::Rules,
                FeedSource::Rules,
                FeedSource::Upload,
                FeedSource::Collection,
                FeedSource::Upload,
            ]
        );
        assert_eq!(feed.entries()[2].finding.detail, "Server error 503");
        assert_eq!(feed.len(), 5);
        assert_eq!(feed.count(Severity::Critical), 1);
        assert_eq!(feed.count(Severity::Warn), 2);
        assert_eq!(feed.count(Severity::Ok), 2);
    }

    #[test]
    fn entries_serialize_flat_with_source() {
        let mut feed = FindingFeed::new();
        feed.record_upload(&UploadOutcome::Failed {
            error: "io: Connection refused".to_string(),
        });
        let value = serde_json::to_value(&feed).expect("serialize feed");
        assert_eq!(
            value,
            serde_json::json!([{
                "source": "upload",
                "level": "warn",
                "title": "Upload error",
                "detail": "io: Connection refused"
            }])
        );
    }
}
