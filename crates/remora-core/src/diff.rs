//! Compares the stored map against a freshly built one.

use crate::map::{DeleteRequest, MapEnvelope};
use rustc_hash::FxHashSet;

/// Returns the delete request that removes everything present in `current`
/// but absent from `new`, in `current` order.
///
/// Connections are matched by their ordered (source, target) pair, so a
/// link that merely flipped direction between runs is scheduled for
/// deletion. Connection ids come from `current`; the freshly built
/// envelope has none yet.
pub fn diff_envelopes(current: &MapEnvelope, new: &MapEnvelope) -> DeleteRequest {
    let new_system_ids: FxHashSet<i64> = new
        .data
        .systems
        .iter()
        .map(|system| system.solar_system_id)
        .collect();
    let system_ids = current
        .data
        .systems
        .iter()
        .map(|system| system.solar_system_id)
        .filter(|id| !new_system_ids.contains(id))
        .collect();

    let new_pairs: FxHashSet<(i64, i64)> = new
        .data
        .connections
        .iter()
        .map(|connection| (connection.solar_system_source, connection.solar_system_target))
        .collect();
    let connection_ids = current
        .data
        .connections
        .iter()
        .filter(|connection| {
            !new_pairs.contains(&(connection.solar_system_source, connection.solar_system_target))
        })
        .map(|connection| connection.id.clone())
        .collect();

    DeleteRequest {
        connection_ids,
        system_ids,
    }
}

/// Tells whether the freshly built map differs from the stored one at all.
///
/// Compares system id sets and ordered connection pair sets; positions and
/// other attributes are ignored, so a pure layout change does not count as
/// a change.
pub fn has_changes(current: &MapEnvelope, new: &MapEnvelope) -> bool {
    if current.data.systems.len() != new.data.systems.len() {
        return true;
    }
    if current.data.connections.len() != new.data.connections.len() {
        return true;
    }

    let current_systems: FxHashSet<i64> = current
        .data
        .systems
        .iter()
        .map(|system| system.solar_system_id)
        .collect();
    let new_systems: FxHashSet<i64> = new
        .data
        .systems
        .iter()
        .map(|system| system.solar_system_id)
        .collect();
    if current_systems != new_systems {
        return true;
    }

    let current_pairs: FxHashSet<(i64, i64)> = current
        .data
        .connections
        .iter()
        .map(|connection| (connection.solar_system_source, connection.solar_system_target))
        .collect();
    let new_pairs: FxHashSet<(i64, i64)> = new
        .data
        .connections
        .iter()
        .map(|connection| (connection.solar_system_source, connection.solar_system_target))
        .collect();
    current_pairs != new_pairs
}
