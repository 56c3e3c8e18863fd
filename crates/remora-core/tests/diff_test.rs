use remora_core::diff::{diff_envelopes, has_changes};
use remora_core::{MapConnection, MapData, MapEnvelope, MapSystem};

fn system(id: i64) -> MapSystem {
    MapSystem {
        solar_system_id: id,
        visible: true,
        position_x: 0.0,
        position_y: 0.0,
    }
}

fn stored_connection(id: &str, source: i64, target: i64) -> MapConnection {
    MapConnection {
        id: id.to_string(),
        solar_system_source: source,
        solar_system_target: target,
        ..Default::default()
    }
}

fn fresh_connection(source: i64, target: i64) -> MapConnection {
    MapConnection {
        solar_system_source: source,
        solar_system_target: target,
        ..Default::default()
    }
}

fn envelope(systems: Vec<MapSystem>, connections: Vec<MapConnection>) -> MapEnvelope {
    MapEnvelope {
        data: MapData {
            connections,
            systems,
        },
    }
}

#[test]
fn vanished_system_and_connection_are_scheduled_for_deletion() {
    let current = envelope(
        vec![system(1), system(2)],
        vec![stored_connection("c1", 1, 2)],
    );
    let new = envelope(vec![system(1)], vec![]);

    let delete = diff_envelopes(&current, &new);

    assert_eq!(delete.system_ids, [2]);
    assert_eq!(delete.connection_ids, ["c1"]);
}

#[test]
fn flipped_connection_counts_as_vanished() {
    let current = envelope(
        vec![system(1), system(2)],
        vec![stored_connection("c1", 1, 2)],
    );
    let new = envelope(
        vec![system(1), system(2)],
        vec![fresh_connection(2, 1)],
    );

    let delete = diff_envelopes(&current, &new);

    assert!(delete.system_ids.is_empty());
    assert_eq!(delete.connection_ids, ["c1"]);
}

#[test]
fn identical_maps_delete_nothing() {
    let current = envelope(
        vec![system(1), system(2)],
        vec![stored_connection("c1", 1, 2)],
    );
    let new = envelope(
        vec![system(2), system(1)],
        vec![fresh_connection(1, 2)],
    );

    let delete = diff_envelopes(&current, &new);

    assert!(delete.system_ids.is_empty());
    assert!(delete.connection_ids.is_empty());
}

#[test]
fn empty_stored_map_deletes_nothing() {
    let new = envelope(vec![system(1)], vec![fresh_connection(1, 2)]);

    let delete = diff_envelopes(&MapEnvelope::default(), &new);

    assert!(delete.system_ids.is_empty());
    assert!(delete.connection_ids.is_empty());
}

#[test]
fn deletions_keep_stored_order_and_stored_ids() {
    let current = envelope(
        vec![system(5), system(1), system(3)],
        vec![
            stored_connection("a", 1, 2),
            stored_connection("b", 3, 4),
            stored_connection("c", 5, 6),
        ],
    );
    let new = envelope(vec![system(1)], vec![fresh_connection(3, 4)]);

    let delete = diff_envelopes(&current, &new);

    assert_eq!(delete.system_ids, [5, 3]);
    assert_eq!(delete.connection_ids, ["a", "c"]);
}

#[test]
fn layout_only_differences_are_not_changes() {
    let current = envelope(
        vec![system(1), system(2)],
        vec![stored_connection("c1", 1, 2)],
    );
    let mut moved = envelope(
        vec![system(2), system(1)],
        vec![fresh_connection(1, 2)],
    );
    moved.data.systems[0].position_x = 195.0;
    moved.data.systems[0].position_y = 60.0;

    assert!(!has_changes(&current, &moved));
}

#[test]
fn added_system_is_a_change() {
    let current = envelope(vec![system(1)], vec![]);
    let new = envelope(vec![system(1), system(2)], vec![]);

    assert!(has_changes(&current, &new));
}

#[test]
fn swapped_system_is_a_change() {
    let current = envelope(vec![system(1), system(2)], vec![]);
    let new = envelope(vec![system(1), system(3)], vec![]);

    assert!(has_changes(&current, &new));
}

#[test]
fn flipped_connection_is_a_change() {
    let current = envelope(
        vec![system(1), system(2)],
        vec![stored_connection("c1", 1, 2)],
    );
    let new = envelope(
        vec![system(1), system(2)],
        vec![fresh_connection(2, 1)],
    );

    assert!(has_changes(&current, &new));
}

#[test]
fn removed_connection_is_a_change() {
    let current = envelope(
        vec![system(1), system(2)],
        vec![stored_connection("c1", 1, 2)],
    );
    let new = envelope(vec![system(1), system(2)], vec![]);

    assert!(has_changes(&current, &new));
}
