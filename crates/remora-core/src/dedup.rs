//! Collapses duplicate systems and connections out of a raw snapshot.

use crate::map::{MapConnection, MapData, MapEnvelope, MapSystem};
use indexmap::IndexMap;

/// Returns the envelope with each system id and each (source, target) pair
/// appearing exactly once, in first-appearance order.
///
/// The first occurrence wins; later duplicates are dropped without merging.
/// Systems with id zero mark a failed derivation and are dropped outright.
pub fn dedup_envelope(envelope: MapEnvelope) -> MapEnvelope {
    let mut systems: IndexMap<i64, MapSystem> = IndexMap::new();
    for system in envelope.data.systems {
        if system.solar_system_id == 0 {
            continue;
        }
        systems.entry(system.solar_system_id).or_insert(system);
    }

    let mut connections: IndexMap<(i64, i64), MapConnection> = IndexMap::new();
    for connection in envelope.data.connections {
        let key = (connection.solar_system_source, connection.solar_system_target);
        connections.entry(key).or_insert(connection);
    }

    MapEnvelope {
        data: MapData {
            connections: connections.into_values().collect(),
            systems: systems.into_values().collect(),
        },
    }
}
