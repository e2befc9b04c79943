//! `rad-grid` — structure layouts, spatial indexing, and segment traversal.
//!
//! This crate stands in for the host game's grid/tile storage.  The engine
//! only ever asks it three kinds of question:
//!
//! - *where is this point?* [`StructureLayout::resolve`] returns the owning
//!   structure and local tile, or `None` for open space.
//! - *does this tile exist, and where is it?* [`StructureLayout::has_tile`]
//!   and [`StructureLayout::tile_center`].
//! - *which tiles does this straight line cross?*
//!   [`StructureLayout::tiles_crossed`], used by the open-space ray mode.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`structure`] | `Structure`: one tile grid with a world-space origin      |
//! | [`layout`]    | `StructureLayout` (structures + R-tree index)             |
//! | [`raycast`]   | grid traversal and segment clipping helpers               |
//! | [`error`]     | `GridError`, `GridResult<T>`                              |

pub mod error;
pub mod layout;
pub mod raycast;
pub mod structure;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use layout::StructureLayout;
pub use structure::{Structure, TileBounds};
