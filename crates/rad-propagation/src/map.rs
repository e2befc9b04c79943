//! Per-tick output types.

use rad_core::{EntityId, FastMap, StructureId, Tile, TileMap, TilePos, WorldPos};

use crate::FloodStats;

// ── RadiationMap ──────────────────────────────────────────────────────────────

/// Rad rate (rads/second) per structure tile for one tick.
///
/// Tiles that received nothing are absent; [`rads_at`](Self::rads_at)
/// reports them as zero.
#[derive(Default, Debug, Clone)]
pub struct RadiationMap {
    grids: TileMap<f32>,
}

impl RadiationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `rads` to the tile at `at`.
    #[inline]
    pub fn add(&mut self, at: TilePos, rads: f32) {
        *self.grids.entry(at.structure).or_default().entry(at.tile).or_insert(0.0) += rads;
    }

    /// The computed value at `at`, or `None` if nothing reached it.
    #[inline]
    pub fn get(&self, at: TilePos) -> Option<f32> {
        self.grids.get(&at.structure).and_then(|m| m.get(&at.tile)).copied()
    }

    /// The computed value at `at`, zero if nothing reached it.
    #[inline]
    pub fn rads_at(&self, at: TilePos) -> f32 {
        self.get(at).unwrap_or(0.0)
    }

    pub fn structure(&self, id: StructureId) -> Option<&FastMap<Tile, f32>> {
        self.grids.get(&id)
    }

    /// Structures with at least one irradiated tile, in ascending id order.
    pub fn structures(&self) -> Vec<StructureId> {
        let mut ids: Vec<StructureId> = self.grids.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn tile_count(&self) -> usize {
        self.grids.values().map(FastMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Highest value on any tile, zero for an empty map.
    pub fn peak(&self) -> f32 {
        self.grids
            .values()
            .flat_map(|m| m.values().copied())
            .fold(0.0, f32::max)
    }

    /// Sum `other` into `self`, tile by tile.
    pub fn merge(&mut self, other: RadiationMap) {
        if self.grids.is_empty() {
            self.grids = other.grids;
            return;
        }
        for (structure, tiles) in other.grids {
            let dst = self.grids.entry(structure).or_default();
            for (tile, rads) in tiles {
                *dst.entry(tile).or_insert(0.0) += rads;
            }
        }
    }
}

// ── OpenSpaceRay ──────────────────────────────────────────────────────────────

/// One straight-line propagation result from a source to a receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenSpaceRay {
    pub source: EntityId,
    pub target: EntityId,
    pub from:   WorldPos,
    pub to:     WorldPos,
    /// The structure tile the receiver stands on, if any.  Positive ray
    /// results are deposited there.
    pub destination: Option<TilePos>,
    /// Rad rate left on arrival; zero if the ray was fully absorbed.
    pub rads: f32,
    /// Every resisting tile the ray crossed, with its resistance, in order.
    pub blockers: Vec<(TilePos, f32)>,
}

// ── PartialMap ────────────────────────────────────────────────────────────────

/// Everything one source contributes in one tick.
#[derive(Default, Debug, Clone)]
pub struct PartialMap {
    pub grids: RadiationMap,
    pub rays:  Vec<OpenSpaceRay>,
    pub flood: FloodStats,
}
