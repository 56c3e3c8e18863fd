use remora_core::{MapEnvelope, MapOptions, diff_envelopes, has_changes, synthesize_map};
use remora_core::{Signature, Wormhole};

fn sig(id: &str, system_id: &str, sig_type: &str) -> Signature {
    Signature {
        id: id.to_string(),
        system_id: system_id.to_string(),
        sig_type: sig_type.to_string(),
        ..Default::default()
    }
}

fn wormhole(id: &str, initial_id: &str, secondary_id: &str) -> Wormhole {
    Wormhole {
        id: id.to_string(),
        initial_id: initial_id.to_string(),
        secondary_id: secondary_id.to_string(),
        ..Default::default()
    }
}

/// Home plus two hops: home -> B via w1, B -> C via a second signature in B.
fn chain_records() -> (Vec<Signature>, Vec<Wormhole>) {
    let signatures = vec![
        sig("100", "31000988", "wormhole"),
        sig("101", "31000988", "gas"),
        sig("200", "31000989", "wormhole"),
        sig("201", "31000989", "wormhole"),
        sig("300", "30000142", "wormhole"),
    ];
    let wormholes = vec![wormhole("w1", "100", "200"), wormhole("w2", "201", "300")];
    (signatures, wormholes)
}

#[test]
fn records_become_a_laid_out_snapshot() {
    let (signatures, wormholes) = chain_records();

    let envelope = synthesize_map(&signatures, &wormholes, &MapOptions::new(31_000_988));

    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "data": {
                "connections": [
                    {
                        "locked": false,
                        "solar_system_source": 31000988,
                        "solar_system_target": 31000989
                    },
                    {
                        "locked": false,
                        "solar_system_source": 31000989,
                        "solar_system_target": 30000142
                    }
                ],
                "systems": [
                    {
                        "solar_system_id": 31000988,
                        "visible": true,
                        "position_x": 0.0,
                        "position_y": 0.0
                    },
                    {
                        "solar_system_id": 31000989,
                        "visible": true,
                        "position_x": 195.0,
                        "position_y": 0.0
                    },
                    {
                        "solar_system_id": 30000142,
                        "visible": true,
                        "position_x": 390.0,
                        "position_y": 0.0
                    }
                ]
            }
        })
    );
}

#[test]
fn zero_padded_system_id_collapses_to_one_node() {
    // "031000001" and "31000001" are distinct strings for the walk but the
    // same system once parsed; only one node may survive.
    let signatures = vec![
        sig("100", "31000001", "wormhole"),
        sig("200", "031000001", "wormhole"),
    ];
    let wormholes = vec![wormhole("w1", "100", "200")];

    let envelope = synthesize_map(&signatures, &wormholes, &MapOptions::new(31_000_001));

    assert_eq!(envelope.data.systems.len(), 1);
    assert_eq!(envelope.data.systems[0].solar_system_id, 31_000_001);
}

#[test]
fn fresh_snapshot_diffs_against_the_stored_map() {
    let (signatures, wormholes) = chain_records();
    let new = synthesize_map(&signatures, &wormholes, &MapOptions::new(31_000_988));

    let current: MapEnvelope = serde_json::from_value(serde_json::json!({
        "data": {
            "connections": [
                {
                    "id": "7d4cf180",
                    "solar_system_source": 31000988,
                    "solar_system_target": 31000989,
                    "mass_status": 2,
                    "ship_size_type": 1,
                    "time_status": 1,
                    "locked": false
                },
                {
                    "id": "9b21aa04",
                    "solar_system_source": 31000988,
                    "solar_system_target": 31000777,
                    "ship_size_type": 2,
                    "wormhole_type": "K162"
                }
            ],
            "systems": [
                { "solar_system_id": 31000988, "position_x": 0.0, "position_y": 0.0 },
                { "solar_system_id": 31000989, "position_x": 195.0, "position_y": 0.0 },
                { "solar_system_id": 31000777, "position_x": 195.0, "position_y": 60.0 }
            ]
        }
    }))
    .unwrap();

    assert!(has_changes(&current, &new));

    let delete = diff_envelopes(&current, &new);
    assert_eq!(delete.system_ids, [31_000_777]);
    assert_eq!(delete.connection_ids, ["9b21aa04"]);
}

#[test]
fn unchanged_chain_reports_no_changes() {
    let (signatures, wormholes) = chain_records();
    let options = MapOptions::new(31_000_988);

    let first = synthesize_map(&signatures, &wormholes, &options);
    let second = synthesize_map(&signatures, &wormholes, &options);

    assert!(!has_changes(&first, &second));
    let delete = diff_envelopes(&first, &second);
    assert!(delete.system_ids.is_empty());
    assert!(delete.connection_ids.is_empty());
}
