//! Assigns 2-D positions to map systems in the tree style Wanderer draws.
//!
//! The chain graph is reduced to a breadth-first spanning tree rooted at the
//! home system, then placed depth-first: a system's X is its tree depth
//! times the horizontal separation, leaves stack downward in their column,
//! and each parent is re-centered on its children afterwards. Edges outside
//! the spanning tree do not influence placement.

use crate::map::MapEnvelope;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Y coordinates snap to multiples of this when a parent is centered
/// between its children.
const GRID_UNIT: f64 = 15.0;

#[derive(Clone, Copy)]
struct Position {
    x: f64,
    y: f64,
}

/// Lays out every system reachable from `home_system_id` in place.
///
/// Positions of unreachable systems are left untouched, and the whole call
/// is a no-op when the home system is not on the map. When home has exactly
/// one child the finished tree is shifted vertically so that child sits on
/// home's row.
pub fn assign_positions(
    envelope: &mut MapEnvelope,
    home_system_id: i64,
    x_separation: f64,
    y_separation: f64,
) {
    if !envelope
        .data
        .systems
        .iter()
        .any(|system| system.solar_system_id == home_system_id)
    {
        return;
    }

    let mut adjacency: FxHashMap<i64, Vec<i64>> = FxHashMap::default();
    for connection in &envelope.data.connections {
        adjacency
            .entry(connection.solar_system_source)
            .or_default()
            .push(connection.solar_system_target);
        adjacency
            .entry(connection.solar_system_target)
            .or_default()
            .push(connection.solar_system_source);
    }

    // Breadth-first spanning tree; the first path found to a system wins.
    let mut children: FxHashMap<i64, Vec<i64>> = FxHashMap::default();
    let mut visited = FxHashSet::default();
    visited.insert(home_system_id);
    let mut queue = VecDeque::from([home_system_id]);
    while let Some(current) = queue.pop_front() {
        if let Some(neighbors) = adjacency.get(&current) {
            for &neighbor in neighbors {
                if visited.insert(neighbor) {
                    children.entry(current).or_default().push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
    }

    let mut positions: FxHashMap<i64, Position> = FxHashMap::default();
    let mut next_slot: FxHashMap<i64, f64> = FxHashMap::default();
    place(
        home_system_id,
        0.0,
        home_system_id,
        x_separation,
        y_separation,
        &children,
        &mut positions,
        &mut next_slot,
    );

    // Home itself is never re-centered, so with a single branch the tree
    // ends up below it; shift the branch so its first hop shares home's row.
    if let Some(home_children) = children.get(&home_system_id) {
        if home_children.len() == 1 {
            let home_y = positions[&home_system_id].y;
            let child_y = positions[&home_children[0]].y;
            let offset = home_y - child_y;
            for (&system_id, position) in positions.iter_mut() {
                if system_id != home_system_id {
                    position.y += offset;
                }
            }
        }
    }

    for system in &mut envelope.data.systems {
        if let Some(position) = positions.get(&system.solar_system_id) {
            system.position_x = position.x;
            system.position_y = position.y;
        }
    }
}

/// Places a subtree rooted at `system_id` with its top edge at the current
/// cursor of the `depth` column, and returns the vertical extent it used.
fn place(
    system_id: i64,
    depth: f64,
    home_system_id: i64,
    x_separation: f64,
    y_separation: f64,
    children: &FxHashMap<i64, Vec<i64>>,
    positions: &mut FxHashMap<i64, Position>,
    next_slot: &mut FxHashMap<i64, f64>,
) -> f64 {
    let level = depth as i64;
    let y = next_slot.get(&level).copied().unwrap_or(0.0);
    positions.insert(system_id, Position { x: depth, y });

    let child_ids = match children.get(&system_id) {
        Some(child_ids) if !child_ids.is_empty() => child_ids,
        _ => {
            next_slot.insert(level, y + y_separation);
            return y_separation;
        }
    };

    // Align the child column's cursor with this node before descending.
    next_slot.insert((depth + x_separation) as i64, y);

    let mut total = 0.0;
    let mut first_child_y = 0.0;
    let mut last_child_y = 0.0;
    for (i, &child) in child_ids.iter().enumerate() {
        total += place(
            child,
            depth + x_separation,
            home_system_id,
            x_separation,
            y_separation,
            children,
            positions,
            next_slot,
        );
        // Read back after recursion: the child may have been re-centered.
        let child_y = positions[&child].y;
        if i == 0 {
            first_child_y = child_y;
        }
        last_child_y = child_y;
    }

    if system_id != home_system_id {
        let new_y = if child_ids.len() == 1 {
            first_child_y
        } else {
            ((first_child_y + last_child_y) / 2.0 / GRID_UNIT).round() * GRID_UNIT
        };
        positions.insert(system_id, Position { x: depth, y: new_y });
    }

    next_slot.insert(level, y + total);
    total
}
