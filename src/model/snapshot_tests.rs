use super::*;
use chrono::TimeZone;

fn parse(value: serde_json::Value) -> LandscapeSnapshot {
    serde_json::from_value(value).expect("decode snapshot")
}

#[test]
fn snake_case_fields_decode_into_system() {
    let snapshot = parse(serde_json::json!({
        "systems": [{
            "sid": "PRD",
            "name": "ERP Production",
            "type": "S/4HANA",
            "environment": "production",
            "sld_entry": { "registered": true, "owner": "Finance" },
            "transport_queues": [{ "transport_id": "TQ1", "target_systems": ["QAS", "DEV"] }],
            "rfc_connections": [{ "name": "RFC1", "target_system": "QAS", "auth_method": "SNC" }],
            "certificates": [{ "subject": "CN=prd", "not_after": "2030-01-01T00:00:00Z" }],
            "instances": [{ "host": "prd-pas-00" }, { "host": "prd-aas-01" }]
        }]
    }));

    let system = &snapshot.systems[0];
    assert_eq!(system.sid, "PRD");
    assert_eq!(system.system_type, "S/4HANA");
    assert!(system.sld_registered());
    assert_eq!(system.transport_queues[0].target_systems, vec!["QAS", "DEV"]);
    assert_eq!(system.rfc_connections[0].target(), Some("QAS"));
    assert_eq!(
        system.certificates[0].not_after,
        Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(system.instances.len(), 2);
}

#[test]
fn camel_case_aliases_are_accepted() {
    let snapshot = parse(serde_json::json!({
        "systems": [{
            "sid": "QAS",
            "sldEntry": { "registered": true },
            "transportQueues": [{ "transportId": "TQ9", "targetSystems": ["PRD"] }],
            "rfcConnections": [{ "name": "R", "targetSystem": "*", "authMethod": "User/Password" }],
            "certificates": [{ "subject": "CN=qas", "notAfter": "2020-05-01" }]
        }]
    }));

    let system = &snapshot.systems[0];
    assert!(system.sld_registered());
    assert_eq!(system.transport_queues[0].transport_id, "TQ9");
    assert_eq!(system.rfc_connections[0].target(), Some("*"));
    assert_eq!(system.rfc_connections[0].auth_method, "User/Password");
    assert_eq!(
        system.certificates[0].not_after,
        Some(Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn malformed_optional_fields_read_as_absent() {
    let snapshot = parse(serde_json::json!({
        "systems": [{
            "sid": "DEV",
            "sld_entry": "yes",
            "transport_queues": null,
            "rfc_connections": { "name": "not-a-list" },
            "certificates": [42, { "subject": "CN=dev", "not_after": 1700000000 }],
            "instances": "many"
        }]
    }));

    let system = &snapshot.systems[0];
    assert_eq!(system.sld_entry, None);
    assert!(system.transport_queues.is_empty());
    assert!(system.rfc_connections.is_empty());
    assert_eq!(system.certificates.len(), 1);
    assert_eq!(system.certificates[0].not_after, None);
    assert!(system.instances.is_empty());
}

#[test]
fn missing_systems_and_null_sld_decode_to_defaults() {
    assert!(parse(serde_json::json!({})).systems.is_empty());

    let snapshot = parse(serde_json::json!({ "systems": [{ "sid": "prd", "sld_entry": null }] }));
    assert_eq!(snapshot.systems[0].sld_entry, None);
    assert!(!snapshot.systems[0].sld_registered());
}

#[test]
fn duplicated_alias_keys_keep_the_system() {
    let snapshot = parse(serde_json::json!({
        "systems": [
            {
                "sid": "prd",
                "sld_entry": null,
                "sldEntry": null,
                "rfc_connections": [
                    { "name": "R1", "target_system": "QAS", "targetSystem": "BWP" }
                ]
            },
            { "sid": "QAS", "sld_entry": { "registered": true } }
        ]
    }));

    assert_eq!(snapshot.systems.len(), 2);
    let system = &snapshot.systems[0];
    assert_eq!(system.sid, "prd");
    assert!(!system.sld_registered());
    assert_eq!(system.rfc_connections[0].target(), Some("QAS"));
}

#[test]
fn snake_case_spelling_wins_over_alias() {
    let snapshot = parse(serde_json::json!({
        "systems": [{
            "sid": "DEV",
            "sld_entry": { "registered": true },
            "sldEntry": { "registered": false }
        }]
    }));
    assert!(snapshot.systems[0].sld_registered());
}

#[test]
fn empty_rfc_target_counts_as_unset() {
    let connection = RfcConnection {
        name: "R".to_string(),
        target_system: Some(String::new()),
        auth_method: String::new(),
    };
    assert_eq!(connection.target(), None);
}

#[test]
fn parse_timestamp_accepts_supported_forms() {
    let midnight = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
    assert_eq!(parse_timestamp("2024-02-29"), Some(midnight));
    assert_eq!(parse_timestamp("2024-02-29T00:00:00"), Some(midnight));
    assert_eq!(parse_timestamp("2024-02-29 00:00:00"), Some(midnight));
    assert_eq!(parse_timestamp("2024-02-29T01:00:00+01:00"), Some(midnight));
    assert_eq!(parse_timestamp("2024-02-29T00:00Z"), Some(midnight));
    assert_eq!(parse_timestamp("2024-02-29T00:00"), Some(midnight));
    assert_eq!(parse_timestamp("2024-02-29T01:00+01:00"), Some(midnight));
    assert_eq!(parse_timestamp("2024-02-29Z"), None);
    assert_eq!(parse_timestamp("  "), None);
    assert_eq!(parse_timestamp("next tuesday"), None);
}

#[test]
fn serialization_emits_snake_case_and_round_trips() {
    let snapshot = parse(serde_json::json!({
        "systems": [{
            "sid": "PRD",
            "type": "ABAP",
            "sldEntry": { "registered": false },
            "certificates": [{ "subject": "CN=prd", "notAfter": "2031-06-30T12:00:00Z" }]
        }]
    }));

    let value = serde_json::to_value(&snapshot).expect("serialize snapshot");
    let system = &value["systems"][0];
    assert_eq!(system["type"], "ABAP");
    assert_eq!(system["sld_entry"]["registered"], false);
    assert!(system.get("sldEntry").is_none());
    assert!(system["certificates"][0].get("not_after").is_some());

    let decoded: LandscapeSnapshot = serde_json::from_value(value).expect("decode round trip");
    assert_eq!(decoded, snapshot);
}
