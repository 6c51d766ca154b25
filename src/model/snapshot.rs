//! Snapshot schema for a landscape inventory document.
//!
//! Every field is default-valued: a field that is missing, `null`, or of the
//! wrong JSON type reads as its default rather than failing the document.
//! Field names are snake_case on the wire; camelCase spellings are accepted
//! on input.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A point-in-time description of SAP systems and their relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandscapeSnapshot {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub systems: Vec<SapSystem>,
}

impl LandscapeSnapshot {
    /// Iterate the SIDs of every system in display order.
    pub fn sids(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|system| system.sid.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SapSystem {
    #[serde(default, deserialize_with = "lenient")]
    pub sid: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub system_type: String,
    #[serde(default, deserialize_with = "lenient")]
    pub environment: String,
    #[serde(
        default,
        alias = "sldEntry",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub sld_entry: Option<SldEntry>,
    #[serde(default, alias = "transportQueues", deserialize_with = "lenient_seq")]
    pub transport_queues: Vec<TransportQueue>,
    #[serde(default, alias = "rfcConnections", deserialize_with = "lenient_seq")]
    pub rfc_connections: Vec<RfcConnection>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub certificates: Vec<Certificate>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub instances: Vec<Value>,
}

impl SapSystem {
    /// True when the system carries an SLD entry marked as registered.
    pub fn sld_registered(&self) -> bool {
        self.sld_entry.as_ref().is_some_and(|entry| entry.registered)
    }
}

/// Registration state in the central system directory (SLD/LMDB).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SldEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub registered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportQueue {
    #[serde(default, alias = "transportId", deserialize_with = "lenient")]
    pub transport_id: String,
    #[serde(default, alias = "targetSystems", deserialize_with = "lenient_seq")]
    pub target_systems: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfcConnection {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(
        default,
        alias = "targetSystem",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_system: Option<String>,
    #[serde(default, alias = "authMethod", deserialize_with = "lenient")]
    pub auth_method: String,
}

impl RfcConnection {
    /// The configured target, or `None` when unset or empty.
    pub fn target(&self) -> Option<&str> {
        self.target_system
            .as_deref()
            .filter(|target| !target.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default, deserialize_with = "lenient")]
    pub subject: String,
    /// Expiration; `None` means unknown and is never checked.
    #[serde(
        default,
        alias = "notAfter",
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub not_after: Option<DateTime<Utc>>,
}

/// Parse an expiration timestamp.
///
/// Accepts RFC 3339 (seconds optional), a naive `YYYY-MM-DDTHH:MM[:SS[.f]]`
/// (read as UTC), or a bare `YYYY-MM-DD` (UTC midnight). Anything else yields
/// `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Some(parsed.with_timezone(&Utc));
    }
    let naive = raw
        .strip_suffix('Z')
        .or_else(|| raw.strip_suffix('z'))
        .unwrap_or(raw);
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(parsed.and_utc());
        }
    }
    if naive.len() != raw.len() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc())
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(without_duplicate_aliases(value)).unwrap_or_default())
}

// Elements that do not decode are dropped; a non-array reads as empty.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(without_duplicate_aliases(item)).ok())
        .collect())
}

/// Drop camelCase keys whose snake_case spelling is also present.
///
/// serde rejects an object naming a field twice, which would otherwise
/// discard the whole element. The snake_case key wins.
fn without_duplicate_aliases(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };
    let shadowed: Vec<String> = map
        .keys()
        .filter(|key| key.chars().any(|c| c.is_ascii_uppercase()))
        .filter(|key| map.contains_key(&snake_case(key)))
        .cloned()
        .collect();
    for key in shadowed {
        map.remove(&key);
    }
    Value::Object(map)
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_timestamp))
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
