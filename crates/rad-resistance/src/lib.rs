//! `rad-resistance` — per-structure tile resistance maps.
//!
//! # Invariant
//!
//! At every point between calls, for every structure `s` and tile `t`:
//!
//! ```text
//! resistance(s, t) = Σ attenuation(b)  for every blocker b with b.counted_at == Some((s, t))
//! ```
//!
//! A blocker's `counted_at` is set only here, at the moment its attenuation is
//! added, and cleared only here, at the moment it is subtracted.  Removal
//! always uses `counted_at`, never the blocker's current position, so a
//! blocker that moved (or whose structure split) before being removed still
//! subtracts from exactly the tile it was added to.
//!
//! The maps are never rebuilt from scratch; every structural change is
//! applied as an incremental add/subtract.  [`ResistanceIndex::recount`]
//! exists only to check the invariant in tests.

pub mod index;

#[cfg(test)]
mod tests;

pub use index::ResistanceIndex;
