//! Headless engine that turns flat Tripwire scanning data into a Wanderer
//! chain map.
//!
//! The pipeline has four stages, each usable on its own:
//!
//! 1. [`build_map`] walks signatures and wormholes outward from the home
//!    system and collects every reachable system and connection.
//! 2. [`dedup_envelope`] collapses the duplicates the walk produces.
//! 3. [`assign_positions`] lays the chain out as a left-to-right tree.
//! 4. [`diff_envelopes`] compares the result against the stored map and
//!    yields the stale entries to delete.
//!
//! [`synthesize_map`] runs the first three stages in one call. Everything
//! here is synchronous and transport-free; fetching and submitting maps is
//! the caller's business.

#![forbid(unsafe_code)]

pub mod chain;
pub mod dedup;
pub mod diff;
pub mod error;
pub mod layout;
pub mod map;
pub mod tripwire;

pub use chain::{MIN_VALID_SYSTEM_ID, build_map};
pub use dedup::dedup_envelope;
pub use diff::{diff_envelopes, has_changes};
pub use error::{Error, Result};
pub use layout::assign_positions;
pub use map::{DeleteRequest, MapConnection, MapData, MapEnvelope, MapSignature, MapSystem};
pub use tripwire::{RecordIndex, Signature, Wormhole};

/// Default horizontal distance between tree depths, in map units.
pub const DEFAULT_X_SEPARATION: f64 = 195.0;

/// Default vertical distance between sibling systems, in map units.
pub const DEFAULT_Y_SEPARATION: f64 = 60.0;

/// Knobs for [`synthesize_map`].
#[derive(Debug, Clone, Copy)]
pub struct MapOptions {
    /// System the chain is walked and laid out from.
    pub home_system_id: i64,
    /// Systems with a lower id are treated as placeholders and skipped.
    pub min_system_id: i64,
    pub x_separation: f64,
    pub y_separation: f64,
}

impl MapOptions {
    /// Options for the given home system with stock spacing and the
    /// standard placeholder threshold.
    pub fn new(home_system_id: i64) -> Self {
        Self {
            home_system_id,
            min_system_id: MIN_VALID_SYSTEM_ID,
            x_separation: DEFAULT_X_SEPARATION,
            y_separation: DEFAULT_Y_SEPARATION,
        }
    }
}

/// Builds, deduplicates and lays out a map snapshot from raw Tripwire
/// records in one call.
pub fn synthesize_map(
    signatures: &[Signature],
    wormholes: &[Wormhole],
    options: &MapOptions,
) -> MapEnvelope {
    let mut envelope = dedup_envelope(build_map(
        signatures,
        wormholes,
        options.home_system_id,
        options.min_system_id,
    ));
    assign_positions(
        &mut envelope,
        options.home_system_id,
        options.x_separation,
        options.y_separation,
    );
    envelope
}
