//! `ResistanceIndex` — the resistance map builder.

use log::{debug, trace};

use rad_core::{FastMap, MILLI_PER_RAD, StructureId, Tile, TileMap, TilePos, to_milli};
use rad_entity::RadiationBlocker;

/// Accumulated blocker attenuation per structure tile, in milli-rads.
///
/// Tiles with zero resistance are absent from the map, so a lookup miss and
/// a zero are the same thing.
#[derive(Default, Debug, Clone)]
pub struct ResistanceIndex {
    maps: TileMap<u64>,
}

impl ResistanceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Resistance at tile `at`, in rads.
    pub fn resistance_at(&self, at: TilePos) -> f32 {
        self.total_milli(at) as f32 / MILLI_PER_RAD
    }

    /// Resistance at tile `at`, in milli-rads, clamped to the `u32` path-cost
    /// range.  Hot path for propagation.
    #[inline]
    pub fn resistance_milli(&self, at: TilePos) -> u32 {
        u32::try_from(self.total_milli(at)).unwrap_or(u32::MAX)
    }

    #[inline]
    fn total_milli(&self, at: TilePos) -> u64 {
        self.maps
            .get(&at.structure)
            .and_then(|m| m.get(&at.tile))
            .copied()
            .unwrap_or(0)
    }

    /// The whole tile map of one structure, if it has any resistance.
    pub fn structure_map(&self, structure: StructureId) -> Option<&FastMap<Tile, u64>> {
        self.maps.get(&structure)
    }

    /// Number of structures with at least one resisting tile.
    pub fn structure_count(&self) -> usize {
        self.maps.len()
    }

    /// Number of resisting tiles across all structures.
    pub fn tile_count(&self) -> usize {
        self.maps.values().map(FastMap::len).sum()
    }

    // ── Structural-change handlers ────────────────────────────────────────

    /// Count `blocker` at `at`.
    ///
    /// `at` is the blocker's currently resolved tile, or `None` if it is not
    /// over any structure.  Any earlier contribution is un-counted first, so
    /// calling this twice never double counts.  A blocker that is disabled,
    /// unanchored or off-structure contributes nothing; that is not an error.
    ///
    /// Returns `true` if the blocker is counted afterwards.
    pub fn add_blocker(&mut self, blocker: &mut RadiationBlocker, at: Option<TilePos>) -> bool {
        self.remove_blocker(blocker);
        let Some(at) = at else { return false };
        if !blocker.should_count() {
            return false;
        }
        let milli = u64::from(to_milli(blocker.attenuation));
        if milli == 0 {
            return false;
        }
        *self.maps.entry(at.structure).or_default().entry(at.tile).or_insert(0) += milli;
        blocker.counted_at = Some(at);
        trace!("blocker counted at {at}: +{milli} m");
        true
    }

    /// Un-count `blocker` from the tile it was counted at, if any.
    ///
    /// Idempotent: a blocker that was never counted (or was already removed)
    /// is left alone.  Returns `true` if something was subtracted.
    pub fn remove_blocker(&mut self, blocker: &mut RadiationBlocker) -> bool {
        let Some(at) = blocker.counted_at.take() else { return false };
        let milli = u64::from(to_milli(blocker.attenuation));
        let Some(map) = self.maps.get_mut(&at.structure) else { return false };
        if let Some(cell) = map.get_mut(&at.tile) {
            *cell = cell.saturating_sub(milli);
            if *cell == 0 {
                map.remove(&at.tile);
            }
        }
        if map.is_empty() {
            self.maps.remove(&at.structure);
        }
        trace!("blocker un-counted at {at}: -{milli} m");
        true
    }

    /// Move `blocker`'s contribution to its new resolved tile: remove at the
    /// remembered tile, then add at `at`.
    pub fn reanchor_blocker(&mut self, blocker: &mut RadiationBlocker, at: Option<TilePos>) -> bool {
        self.remove_blocker(blocker);
        self.add_blocker(blocker, at)
    }

    /// Drop a destroyed structure's map in one step and forget every
    /// blocker's claim on it.
    ///
    /// `blockers` may contain blockers on other structures; they are left
    /// untouched.  Returns the number of blockers un-counted.
    pub fn drop_structure<'a>(
        &mut self,
        structure: StructureId,
        blockers:  impl IntoIterator<Item = &'a mut RadiationBlocker>,
    ) -> usize {
        self.maps.remove(&structure);
        let mut forgotten = 0;
        for b in blockers {
            if b.counted_at.is_some_and(|at| at.structure == structure) {
                b.counted_at = None;
                forgotten += 1;
            }
        }
        debug!("resistance map of {structure} dropped, {forgotten} blockers un-counted");
        forgotten
    }

    /// Forget everything.  Blockers keep their `counted_at`; use only when
    /// the blocker set is being discarded too (end of session).
    pub fn clear(&mut self) {
        self.maps.clear();
    }

    // ── Verification ──────────────────────────────────────────────────────

    /// Recompute the expected maps from scratch out of the blockers'
    /// `counted_at` fields.  Used to check the incremental invariant.
    pub fn recount<'a>(blockers: impl IntoIterator<Item = &'a RadiationBlocker>) -> TileMap<u64> {
        let mut maps: TileMap<u64> = TileMap::default();
        for b in blockers {
            if let Some(at) = b.counted_at {
                *maps.entry(at.structure).or_default().entry(at.tile).or_insert(0) +=
                    u64::from(to_milli(b.attenuation));
            }
        }
        maps.retain(|_, m| {
            m.retain(|_, v| *v > 0);
            !m.is_empty()
        });
        maps
    }

    /// `true` if the incremental maps equal a full recount over `blockers`.
    pub fn matches<'a>(&self, blockers: impl IntoIterator<Item = &'a RadiationBlocker>) -> bool {
        Self::recount(blockers) == self.maps
    }
}
