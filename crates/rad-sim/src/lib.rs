//! `rad-sim` — tick orchestrator for the rad_engine simulation.
//!
//! # Tick loop
//!
//! ```text
//! any time:   structural changes (tiles, structures, blockers) update the
//!             resistance maps immediately
//!
//! per tick:
//!   ① Resolve   — sources and receivers → structure tile or open space
//!   ② Propagate — PropagationEngine::update replaces the radiation map
//!                 (parallel with the `parallel` feature)
//!   ③ Query     — one Irradiated per receiver on an irradiated tile
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Propagates sources on Rayon's thread pool.             |
//! | `fx-hash`  | FxHash for every per-tile map.                         |
//! | `serde`    | serde derives on config, geometry and components.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rad_core::{RadiationConfig, StructureId, WorldPos};
//! use rad_entity::RadiationSource;
//! use rad_propagation::GridcastPropagator;
//! use rad_sim::{NoopObserver, RadiationSimBuilder};
//!
//! let mut sim = RadiationSimBuilder::new(RadiationConfig::default(), GridcastPropagator)
//!     .build()?;
//! sim.add_rect(StructureId(0), WorldPos::new(0.0, 0.0), 10, 10)?;
//! sim.spawn_source(WorldPos::new(5.5, 5.5), RadiationSource::new(20.0))?;
//! sim.run_ticks(10, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod receiver;
pub mod sim;


pub use builder::RadiationSimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RadiationObserver};
pub use receiver::{Irradiated, query_receivers};
pub use sim::RadiationSim;
