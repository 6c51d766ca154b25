//! Snapshot sources: the bundled sample or a JSON file on disk.
use crate::model::LandscapeSnapshot;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Sample landscape bundled into the binary.
pub const SAMPLE_LANDSCAPE_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/fixtures/sample_landscape.json"
));

pub fn sample_snapshot() -> Result<LandscapeSnapshot> {
    parse_snapshot(SAMPLE_LANDSCAPE_JSON).context("parse bundled sample landscape")
}

/// Decode a snapshot document.
///
/// The document must be a JSON object; fields inside it degrade to defaults.
pub fn parse_snapshot(text: &str) -> Result<LandscapeSnapshot> {
    let value: Value = serde_json::from_str(text).context("parse landscape snapshot JSON")?;
    if !value.is_object() {
        return Err(anyhow!(
            "landscape snapshot must be a JSON object with a \"systems\" list"
        ));
    }
    let snapshot = serde_json::from_value(value).context("decode landscape snapshot")?;
    Ok(snapshot)
}

pub fn load_snapshot(path: &Path) -> Result<LandscapeSnapshot> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read snapshot {}", path.display()))?;
    parse_snapshot(&text).with_context(|| format!("load snapshot {}", path.display()))
}

/// Load the snapshot at `path`, or the bundled sample when no path is given.
pub fn load_or_sample(path: Option<&Path>) -> Result<LandscapeSnapshot> {
    match path {
        Some(path) => load_snapshot(path),
        None => sample_snapshot(),
    }
}

/// Persist a snapshot in the stable pretty JSON format.
pub fn write_snapshot(path: &Path, snapshot: &LandscapeSnapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(snapshot).context("serialize snapshot")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::evaluate;
    use chrono::{TimeZone, Utc};

    #[test]
    fn bundled_sample_decodes_and_exercises_every_rule() {
        let snapshot = sample_snapshot().expect("sample snapshot");
        assert_eq!(snapshot.systems.len(), 6);

        let now = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
        let titles: Vec<_> = evaluate(&snapshot, now)
            .into_iter()
            .map(|finding| finding.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "RFC target BWP for PRD_TO_BWP not found",
                "RFC QAS_BATCH uses password auth",
                "Expired cert on QAS: CN=qas-pas-00.aws.example.com",
                "SLD missing for DEV",
                "Transport target TST missing for DEV_TO_QAS",
                "SID invalid: sm1",
                "SLD missing for sm1",
            ]
        );
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert!(parse_snapshot("[]").is_err());
        assert!(parse_snapshot(r#"[[{"sid":"prd"}]]"#).is_err());
        assert!(parse_snapshot("42").is_err());
        assert!(parse_snapshot("not json").is_err());
        assert!(parse_snapshot("{}").expect("empty object").systems.is_empty());
    }

    #[test]
    fn system_with_duplicated_alias_still_yields_findings() {
        let snapshot = parse_snapshot(
            r#"{"systems":[{"sid":"prd","sld_entry":null,"sldEntry":null},{"sid":"QAS","sld_entry":{"registered":true}}]}"#,
        )
        .expect("decode snapshot");
        let now = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
        let titles: Vec<_> = evaluate(&snapshot, now)
            .into_iter()
            .map(|finding| finding.title)
            .collect();
        assert_eq!(snapshot.systems.len(), 2);
        assert_eq!(titles, vec!["SID invalid: prd", "SLD missing for prd"]);
    }

    #[test]
    fn written_snapshot_loads_back_identically() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested/landscape.json");
        let snapshot = sample_snapshot().expect("sample snapshot");

        write_snapshot(&path, &snapshot).expect("write snapshot");
        assert_eq!(load_snapshot(&path).expect("load snapshot"), snapshot);
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = load_snapshot(Path::new("/nonexistent/landscape.json")).expect_err("missing");
        assert!(format!("{err:#}").contains("/nonexistent/landscape.json"));
    }
}
