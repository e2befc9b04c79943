//! Receiver query: turn the tick's radiation map into dose notifications.

use rad_core::{EntityId, TilePos, WorldPos};
use rad_grid::StructureLayout;
use rad_propagation::RadiationMap;

/// One receiver's exposure for one tick.
///
/// Integrating this into health or cumulative dose is the consumer's job;
/// `interval_secs` doubles as the hint for when to look again.
#[derive(Debug, Clone, PartialEq)]
pub struct Irradiated {
    pub receiver:        EntityId,
    /// The tile the receiver was standing on.
    pub at:              TilePos,
    pub rads_per_second: f32,
    pub interval_secs:   f32,
}

impl Irradiated {
    /// Dose accumulated over the whole interval.
    #[inline]
    pub fn total_rads(&self) -> f32 {
        self.rads_per_second * self.interval_secs
    }
}

/// Resolve every receiver and read its tile from `map`.
///
/// Receivers in open space, and receivers whose tile has no entry in `map`,
/// are skipped: no notification, no error.  Output follows input order.
pub fn query_receivers(
    layout:        &StructureLayout,
    map:           &RadiationMap,
    receivers:     impl IntoIterator<Item = (EntityId, WorldPos)>,
    interval_secs: f32,
) -> Vec<Irradiated> {
    receivers
        .into_iter()
        .filter_map(|(receiver, pos)| {
            let at = layout.resolve(pos)?;
            let rads = map.get(at)?;
            Some(Irradiated { receiver, at, rads_per_second: rads, interval_secs })
        })
        .collect()
}
