//! The set of all structures plus a spatial index over their bounds.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds one axis-aligned box per non-empty
//! structure.  Point resolution and segment queries first narrow the
//! candidates through the tree and then check exact tile membership, so the
//! cost is independent of how many structures exist elsewhere in the world.
//!
//! Boxes are re-inserted whenever a structure's bounds change.  Layout edits
//! are rare compared to per-tick queries, so the tree is kept exact rather
//! than lazily padded.

use std::collections::BTreeMap;

use log::{info, warn};
use rstar::{AABB, PointDistance, RTree, RTreeObject, SelectionFunction};

use rad_core::{FastMap, StructureId, Tile, TilePos, WorldPos};

use crate::raycast::{clip_segment, traverse};
use crate::{GridError, GridResult, Structure};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a structure's world-space bounding box.
#[derive(Clone, Debug, PartialEq)]
struct StructureEntry {
    envelope: AABB<[f32; 2]>,
    id:       StructureId,
}

impl RTreeObject for StructureEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for StructureEntry {
    /// Squared distance from `point` to the box; zero inside it.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        self.envelope.distance_2(point)
    }
}

/// Selects entries whose box is touched by a segment.
struct SegmentSelector {
    from: [f32; 2],
    to:   [f32; 2],
}

impl SegmentSelector {
    fn hits(&self, envelope: &AABB<[f32; 2]>) -> bool {
        clip_segment(self.from, self.to, envelope.lower(), envelope.upper()).is_some()
    }
}

impl SelectionFunction<StructureEntry> for SegmentSelector {
    fn should_unpack_parent(&self, envelope: &AABB<[f32; 2]>) -> bool {
        self.hits(envelope)
    }

    fn should_unpack_leaf(&self, leaf: &StructureEntry) -> bool {
        self.hits(&leaf.envelope)
    }
}

// ── StructureLayout ───────────────────────────────────────────────────────────

/// Every structure in the world, indexed by id and by world-space bounds.
///
/// Structures are stored in a `BTreeMap` so that every iteration order is
/// ascending by `StructureId`, keeping downstream accumulation deterministic.
#[derive(Default)]
pub struct StructureLayout {
    structures: BTreeMap<StructureId, Structure>,
    entries:    FastMap<StructureId, StructureEntry>,
    index:      RTree<StructureEntry>,
}

impl StructureLayout {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn structure(&self, id: StructureId) -> Option<&Structure> {
        self.structures.get(&id)
    }

    /// All structures in ascending id order.
    pub fn structures(&self) -> impl Iterator<Item = &Structure> + '_ {
        self.structures.values()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Register an empty structure anchored at `origin`.
    pub fn add_structure(&mut self, id: StructureId, origin: WorldPos) -> GridResult<()> {
        if self.structures.contains_key(&id) {
            return Err(GridError::DuplicateStructure(id));
        }
        self.structures.insert(id, Structure::new(id, origin));
        Ok(())
    }

    /// Convenience: register a structure and fill the rectangle
    /// `[0, width) × [0, height)` with tiles.
    pub fn add_rect(
        &mut self,
        id:     StructureId,
        origin: WorldPos,
        width:  i32,
        height: i32,
    ) -> GridResult<()> {
        self.add_structure(id, origin)?;
        let s = self.get_mut(id)?;
        for y in 0..height {
            for x in 0..width {
                s.add_tile(Tile::new(x, y));
            }
        }
        self.reindex(id);
        Ok(())
    }

    /// Remove a structure entirely and return it.
    pub fn remove_structure(&mut self, id: StructureId) -> GridResult<Structure> {
        let s = self.structures.remove(&id).ok_or(GridError::StructureNotFound(id))?;
        if let Some(entry) = self.entries.remove(&id) {
            self.index.remove(&entry);
        }
        info!("structure {id} removed ({} tiles)", s.tile_count());
        Ok(s)
    }

    /// Add a tile.  Returns `false` if it already existed.
    pub fn set_tile(&mut self, id: StructureId, tile: Tile) -> GridResult<bool> {
        let added = self.get_mut(id)?.add_tile(tile);
        if added {
            self.reindex(id);
        }
        Ok(added)
    }

    /// Remove a tile.  Returns `false` if it did not exist.
    pub fn clear_tile(&mut self, id: StructureId, tile: Tile) -> GridResult<bool> {
        let removed = self.get_mut(id)?.remove_tile(tile);
        if removed {
            self.reindex(id);
        }
        Ok(removed)
    }

    /// Move `tiles` out of `from` into a new structure `new_id` sharing
    /// `from`'s origin, so world positions are unchanged.
    ///
    /// Tiles that `from` does not own are skipped with a warning.  Returns the
    /// tiles actually moved.  `from` is kept even if it ends up empty; the
    /// caller decides whether to destroy it.
    pub fn split_structure(
        &mut self,
        from:   StructureId,
        new_id: StructureId,
        tiles:  &[Tile],
    ) -> GridResult<Vec<Tile>> {
        if self.structures.contains_key(&new_id) {
            return Err(GridError::DuplicateStructure(new_id));
        }
        let source = self.get_mut(from)?;
        let mut split = Structure::new(new_id, source.origin());
        let mut moved = Vec::with_capacity(tiles.len());
        for &tile in tiles {
            if source.remove_tile(tile) {
                split.add_tile(tile);
                moved.push(tile);
            } else {
                warn!("split of {from}: tile {tile} does not exist, skipped");
            }
        }
        self.structures.insert(new_id, split);
        self.reindex(from);
        self.reindex(new_id);
        info!("structure {from} split: {} tiles moved to {new_id}", moved.len());
        Ok(moved)
    }

    /// Move every tile of `from` into `into` and remove `from`.
    ///
    /// The two origins must differ by a whole number of tiles and `from` must
    /// not be `into`.  Nothing changes on error.  Returns the `(old, new)`
    /// tile pairs.
    pub fn merge_structure(
        &mut self,
        from: StructureId,
        into: StructureId,
    ) -> GridResult<Vec<(Tile, Tile)>> {
        if from == into {
            return Err(GridError::SelfMerge(from));
        }
        let src = self.structure(from).ok_or(GridError::StructureNotFound(from))?;
        let dst = self.structure(into).ok_or(GridError::StructureNotFound(into))?;
        let [dx, dy] = src.origin().offset_from(dst.origin());
        let aligned = |d: f32| (d - d.round()).abs() < 1e-3;
        if !aligned(dx) || !aligned(dy) {
            return Err(GridError::Misaligned { from, into });
        }
        let (dx, dy) = (dx.round() as i32, dy.round() as i32);

        let src = self.remove_structure(from)?;
        let dst = self.get_mut(into)?;
        let pairs: Vec<(Tile, Tile)> = src
            .tiles()
            .map(|t| (t, Tile::new(t.x + dx, t.y + dy)))
            .collect();
        for &(_, t) in &pairs {
            dst.add_tile(t);
        }
        self.reindex(into);
        info!("structure {from} merged into {into} ({} tiles)", pairs.len());
        Ok(pairs)
    }

    fn get_mut(&mut self, id: StructureId) -> GridResult<&mut Structure> {
        self.structures.get_mut(&id).ok_or(GridError::StructureNotFound(id))
    }

    /// Replace the R-tree entry of `id` with its current bounds.
    fn reindex(&mut self, id: StructureId) {
        if let Some(old) = self.entries.remove(&id) {
            self.index.remove(&old);
        }
        let Some((lower, upper)) = self.structures.get(&id).and_then(Structure::world_bounds) else {
            return;
        };
        let entry = StructureEntry { envelope: AABB::from_corners(lower, upper), id };
        self.index.insert(entry.clone());
        self.entries.insert(id, entry);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Resolve a world position to the structure tile beneath it.
    ///
    /// Returns `None` in open space.  Where boxes overlap, the lowest
    /// `StructureId` that actually owns the tile wins.
    pub fn resolve(&self, pos: WorldPos) -> Option<TilePos> {
        if !pos.is_finite() {
            return None;
        }
        self.index
            .locate_all_at_point(&[pos.x, pos.y])
            .filter_map(|entry| {
                let s = self.structures.get(&entry.id)?;
                let tile = s.tile_at(pos);
                s.has_tile(tile).then_some(TilePos::new(entry.id, tile))
            })
            .min()
    }

    #[inline]
    pub fn has_tile(&self, at: TilePos) -> bool {
        self.structures.get(&at.structure).is_some_and(|s| s.has_tile(at.tile))
    }

    /// World position of a tile's centre, if the structure exists.
    pub fn tile_center(&self, at: TilePos) -> Option<WorldPos> {
        self.structures.get(&at.structure).map(|s| s.tile_center(at.tile))
    }

    /// Every existing tile crossed by the segment `from → to`, on every
    /// structure the segment touches.
    ///
    /// Structures are visited in ascending id order; within a structure tiles
    /// are listed in traversal order.
    pub fn tiles_crossed(&self, from: WorldPos, to: WorldPos) -> Vec<TilePos> {
        if !from.is_finite() || !to.is_finite() {
            return Vec::new();
        }
        let (a, b) = ([from.x, from.y], [to.x, to.y]);
        let mut hit: Vec<StructureId> = self
            .index
            .locate_with_selection_function(SegmentSelector { from: a, to: b })
            .map(|e| e.id)
            .collect();
        hit.sort_unstable();

        let mut out = Vec::new();
        for id in hit {
            let Some(s) = self.structures.get(&id) else { continue };
            let Some((lower, upper)) = s.world_bounds() else { continue };
            let Some((ca, cb)) = clip_segment(a, b, lower, upper) else { continue };
            let origin = s.origin();
            let local = |p: [f32; 2]| [p[0] - origin.x, p[1] - origin.y];
            out.extend(
                traverse(local(ca), local(cb))
                    .into_iter()
                    .filter(|&t| s.has_tile(t))
                    .map(|t| TilePos::new(id, t)),
            );
        }
        out
    }
}
