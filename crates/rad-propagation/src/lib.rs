//! `rad-propagation` — radiation propagation, recomputed from scratch every tick.
//!
//! # Two modes, one contract
//!
//! Every source goes through [`Propagator::propagate`], which returns a
//! [`PartialMap`] holding that source's grid contributions and rays.  The
//! default [`GridcastPropagator`] picks the mode from the source's resolved
//! position:
//!
//! ```text
//! source on a structure tile ─► flood fill over that structure's tiles
//!                               + rays to receivers on other structures
//! source in open space ───────► rays to every receiver
//! ```
//!
//! Grid mode always wins when source and receiver share a structure.
//!
//! # Decay law
//!
//! A source reaches `intensity / slope` units.  Each tile step costs one
//! unit plus the resistance of the tile entered; a ray costs its Euclidean
//! length plus the resistance of every tile it crosses.  What is left of the
//! reach on arrival is the rad rate:
//!
//! ```text
//! rad(tile) = intensity / slope − min over paths (steps + Σ resistance)
//! ```
//!
//! Values below `RadiationConfig::min_intensity` are zero, and the flood fill
//! does not expand past them.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`map`]        | `RadiationMap`, `OpenSpaceRay`, `PartialMap`              |
//! | [`propagator`] | `Propagator` trait, `PropagationContext`, `Emitter`, `Target`, `GridcastPropagator` |
//! | [`flood`]      | budgeted least-resistance flood fill                      |
//! | [`ray`]        | open-space / cross-structure ray cast                     |
//! | [`engine`]     | `PropagationEngine<P>`, `RadiationSnapshot`, `TickStats`  |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Propagates sources on Rayon's thread pool.              |

pub mod engine;
pub mod flood;
pub mod map;
pub mod propagator;
pub mod ray;


pub use engine::{PropagationEngine, RadiationSnapshot, TickStats};
pub use flood::{FloodStats, flood_fill};
pub use map::{OpenSpaceRay, PartialMap, RadiationMap};
pub use propagator::{Emitter, GridcastPropagator, PropagationContext, Propagator, Target};
pub use ray::cast_ray;
