//! `rad-entity` — radiation components and the entity store that owns them.
//!
//! The host game owns entity lifetimes and transforms; this crate is the
//! engine-side mirror of that state.  Every entity has a world position and
//! any combination of the three radiation components:
//!
//! | Component             | Role                                                  |
//! |-----------------------|-------------------------------------------------------|
//! | [`RadiationSource`]   | emits rads/second; re-cast every tick                 |
//! | [`RadiationBlocker`]  | contributes attenuation to the tile it is anchored on |
//! | [`RadiationReceiver`] | marks the entity as able to be irradiated             |
//!
//! # Crate layout
//!
//! | Module        | Contents                                       |
//! |---------------|------------------------------------------------|
//! | [`component`] | the three component types                      |
//! | [`store`]     | `EntityStore`, `Despawned`                     |

pub mod component;
pub mod store;


pub use component::{RadiationBlocker, RadiationReceiver, RadiationSource};
pub use store::{Despawned, EntityStore};
