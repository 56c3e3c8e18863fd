//! Builds a map snapshot by walking the wormhole chain outward from home.

use crate::map::{MapConnection, MapData, MapEnvelope, MapSystem};
use crate::tripwire::{RecordIndex, Signature, Wormhole};
use rustc_hash::FxHashSet;
use tracing::warn;

/// Lowest id Tripwire assigns to a real solar system. Anything below is a
/// placeholder and never becomes a map node.
pub const MIN_VALID_SYSTEM_ID: i64 = 10_000;

/// Walks the chain from `home_system_id` and collects every reachable
/// system and connection into a raw snapshot.
///
/// Records that fail to convert are logged and skipped; the rest of the walk
/// continues. The result may contain duplicates when several signatures
/// describe the same system, so callers pass it through
/// [`dedup_envelope`](crate::dedup::dedup_envelope) before use.
pub fn build_map(
    signatures: &[Signature],
    wormholes: &[Wormhole],
    home_system_id: i64,
    min_system_id: i64,
) -> MapEnvelope {
    let index = RecordIndex::new(signatures, wormholes);
    let mut visited = FxHashSet::default();
    let mut data = MapData::default();
    visit_system(
        &home_system_id.to_string(),
        &index,
        min_system_id,
        &mut visited,
        &mut data,
    );
    MapEnvelope { data }
}

fn visit_system(
    system_id: &str,
    index: &RecordIndex<'_>,
    min_system_id: i64,
    visited: &mut FxHashSet<String>,
    data: &mut MapData,
) {
    if !visited.insert(system_id.to_string()) {
        return;
    }

    let (local_signatures, local_wormholes) = index.system_records(system_id);

    if let Some(first) = local_signatures.first() {
        match MapSystem::from_signature(first) {
            Ok(system) if system.solar_system_id >= min_system_id => data.systems.push(system),
            Ok(_) => {}
            Err(err) => warn!("failed to derive system from signature {}: {err}", first.id),
        }
    }

    for wormhole in local_wormholes {
        let connection = match MapConnection::from_wormhole(wormhole, index) {
            Ok(connection) => connection,
            Err(err) => {
                warn!("failed to derive connection from wormhole {}: {err}", wormhole.id);
                continue;
            }
        };
        // Half-built connections point at a placeholder endpoint.
        if connection.solar_system_source == 0 || connection.solar_system_target == 0 {
            continue;
        }
        data.connections.push(connection);

        let Ok(target) = index.signature(&wormhole.secondary_id) else {
            continue;
        };
        if target.system_id != "0" && !visited.contains(target.system_id.as_str()) {
            visit_system(&target.system_id, index, min_system_id, visited, data);
        }
    }
}
