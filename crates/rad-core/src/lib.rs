//! `rad-core` — foundational types for the `rad_engine` radiation simulation.
//!
//! This crate is a dependency of every other `rad-*` crate.  It has no `rad-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde` and `rustc-hash`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `StructureId`                             |
//! | [`geom`]        | `WorldPos`, `Tile`, `TilePos`                         |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `RadiationConfig` and its defaults                    |
//! | [`threshold`]   | `DangerLevel`, `Rgb`, `classify`                      |
//! | [`map`]         | `FastMap` / `TileMap` hash map aliases                |
//! | [`units`]       | milli-rad fixed-point conversion                      |
//! | [`error`]       | `RadError`, `RadResult`                               |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | Adds `Serialize`/`Deserialize` to all public value types.|
//! | `fx-hash` | Swaps the hasher behind `FastMap` for FxHash.            |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod map;
pub mod threshold;
pub mod time;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RadiationConfig;
pub use error::{RadError, RadResult};
pub use geom::{Tile, TilePos, WorldPos};
pub use ids::{EntityId, StructureId};
pub use map::{FastMap, FastSet, TileMap};
pub use threshold::{DangerLevel, Rgb, classify};
pub use time::{SimClock, Tick};
pub use units::{MILLI_PER_RAD, from_milli, to_milli};
