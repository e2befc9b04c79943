//! A single structure: a sparse set of tiles anchored at a world origin.

use rad_core::{FastSet, StructureId, Tile, WorldPos};

/// Inclusive tile-space bounding box of a structure's tiles.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TileBounds {
    pub min: Tile,
    pub max: Tile,
}

impl TileBounds {
    fn single(tile: Tile) -> Self {
        Self { min: tile, max: tile }
    }

    fn include(&mut self, tile: Tile) {
        self.min.x = self.min.x.min(tile.x);
        self.min.y = self.min.y.min(tile.y);
        self.max.x = self.max.x.max(tile.x);
        self.max.y = self.max.y.max(tile.y);
    }

    fn on_edge(&self, tile: Tile) -> bool {
        tile.x == self.min.x || tile.x == self.max.x || tile.y == self.min.y || tile.y == self.max.y
    }
}

/// A structure's tile grid.
///
/// Tile `(x, y)` covers the unit square whose lower corner is
/// `origin + (x, y)` in world space.  Structures are axis-aligned; there is
/// no rotation.
#[derive(Clone, Debug)]
pub struct Structure {
    id:     StructureId,
    origin: WorldPos,
    tiles:  FastSet<Tile>,
    bounds: Option<TileBounds>,
}

impl Structure {
    pub fn new(id: StructureId, origin: WorldPos) -> Self {
        Self { id, origin, tiles: FastSet::default(), bounds: None }
    }

    #[inline]
    pub fn id(&self) -> StructureId {
        self.id
    }

    #[inline]
    pub fn origin(&self) -> WorldPos {
        self.origin
    }

    #[inline]
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    /// Bounding box of all tiles, or `None` for an empty structure.
    pub fn bounds(&self) -> Option<TileBounds> {
        self.bounds
    }

    /// Add a tile.  Returns `false` if it was already present.
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        if !self.tiles.insert(tile) {
            return false;
        }
        match &mut self.bounds {
            Some(b) => b.include(tile),
            None => self.bounds = Some(TileBounds::single(tile)),
        }
        true
    }

    /// Remove a tile.  Returns `false` if it was not present.
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        if !self.tiles.remove(&tile) {
            return false;
        }
        // Interior removals never shrink the box.
        if self.bounds.is_some_and(|b| b.on_edge(tile)) {
            self.recompute_bounds();
        }
        true
    }

    fn recompute_bounds(&mut self) {
        let mut tiles = self.tiles.iter().copied();
        self.bounds = tiles.next().map(|first| {
            let mut b = TileBounds::single(first);
            tiles.for_each(|t| b.include(t));
            b
        });
    }

    // ── Coordinate conversion ─────────────────────────────────────────────

    /// `pos` expressed in this structure's local (tile-unit) frame.
    #[inline]
    pub fn local_point(&self, pos: WorldPos) -> [f32; 2] {
        pos.offset_from(self.origin)
    }

    /// The tile whose square contains `pos`.  The tile need not exist.
    #[inline]
    pub fn tile_at(&self, pos: WorldPos) -> Tile {
        let [x, y] = self.local_point(pos);
        Tile::new(x.floor() as i32, y.floor() as i32)
    }

    /// World position of the centre of `tile`.
    #[inline]
    pub fn tile_center(&self, tile: Tile) -> WorldPos {
        WorldPos::new(
            self.origin.x + tile.x as f32 + 0.5,
            self.origin.y + tile.y as f32 + 0.5,
        )
    }

    /// World-space `[lower, upper]` corners of the tile bounding box.
    pub fn world_bounds(&self) -> Option<([f32; 2], [f32; 2])> {
        self.bounds.map(|b| {
            (
                [self.origin.x + b.min.x as f32, self.origin.y + b.min.y as f32],
                [self.origin.x + (b.max.x + 1) as f32, self.origin.y + (b.max.y + 1) as f32],
            )
        })
    }
}
