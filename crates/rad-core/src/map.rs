//! Hash map aliases shared by the per-tile maps of every crate.
//!
//! With the `fx-hash` feature the hasher is FxHash, which is noticeably
//! faster than SipHash on the small integer keys used here (`Tile`,
//! `StructureId`).  Maps built with these aliases must be created with
//! `FastMap::default()` rather than `new()`, which only exists for SipHash.

use crate::{StructureId, Tile};

#[cfg(feature = "fx-hash")]
pub type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub type FastMap<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "fx-hash")]
pub type FastSet<K> = rustc_hash::FxHashSet<K>;
#[cfg(not(feature = "fx-hash"))]
pub type FastSet<K> = std::collections::HashSet<K>;

/// Per-structure, per-tile value map: `structure → tile → V`.
pub type TileMap<V> = FastMap<StructureId, FastMap<Tile, V>>;
