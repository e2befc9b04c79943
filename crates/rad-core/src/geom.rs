//! World and tile coordinate types.
//!
//! World space is a flat 2-D plane measured in metres.  One tile covers one
//! square metre, so tile coordinates are simply the floored offset of a world
//! point from the owning structure's origin (see `rad-grid`).

use std::fmt;

use crate::StructureId;

// ── WorldPos ──────────────────────────────────────────────────────────────────

/// A point in world space, single precision.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `self - other` as a raw `[dx, dy]` offset.
    #[inline]
    pub fn offset_from(self, other: WorldPos) -> [f32; 2] {
        [self.x - other.x, self.y - other.y]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Tile ──────────────────────────────────────────────────────────────────────

/// Local coordinate of a tile within a structure's grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four edge-adjacent tiles, in +x, −x, +y, −y order.
    #[inline]
    pub fn neighbors4(self) -> [Tile; 4] {
        [
            Tile::new(self.x + 1, self.y),
            Tile::new(self.x - 1, self.y),
            Tile::new(self.x, self.y + 1),
            Tile::new(self.x, self.y - 1),
        ]
    }

    /// Taxicab distance, i.e. the step count of a 4-connected path on an
    /// unobstructed grid.
    #[inline]
    pub fn manhattan(self, other: Tile) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

// ── TilePos ───────────────────────────────────────────────────────────────────

/// A tile addressed by its owning structure: the result of resolving an
/// entity's world position against the layout.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePos {
    pub structure: StructureId,
    pub tile:      Tile,
}

impl TilePos {
    #[inline]
    pub const fn new(structure: StructureId, tile: Tile) -> Self {
        Self { structure, tile }
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.structure, self.tile)
    }
}
