//! Propagation trait and the default grid-cast implementation.
//!
//! # Pluggability
//!
//! The engine calls sources through the [`Propagator`] trait, so a host can
//! swap in a different model (inverse-square falloff, a precomputed
//! visibility graph) without touching the tick loop.

use log::trace;

use rad_core::{EntityId, FastSet, RadiationConfig, TilePos, WorldPos, to_milli};
use rad_entity::RadiationSource;
use rad_grid::StructureLayout;
use rad_resistance::ResistanceIndex;

use crate::{PartialMap, cast_ray, flood_fill};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Read-only world state shared by every source during one tick.
///
/// Resistance maps are borrowed immutably for the whole propagation phase;
/// nothing in this crate can write them.
#[derive(Clone, Copy)]
pub struct PropagationContext<'a> {
    pub layout:     &'a StructureLayout,
    pub resistance: &'a ResistanceIndex,
    pub config:     &'a RadiationConfig,
}

impl PropagationContext<'_> {
    /// Smallest recordable value in milli-rads (at least 1, so a tile whose
    /// value is exactly zero is never recorded).
    #[inline]
    pub(crate) fn floor_milli(&self) -> u32 {
        to_milli(self.config.min_intensity).max(1)
    }
}

/// A source resolved against the layout for this tick.
#[derive(Clone, Debug)]
pub struct Emitter {
    pub id:     EntityId,
    pub pos:    WorldPos,
    /// Structure tile under the source, or `None` in open space.
    pub at:     Option<TilePos>,
    pub source: RadiationSource,
}

impl Emitter {
    pub fn new(id: EntityId, pos: WorldPos, at: Option<TilePos>, source: &RadiationSource) -> Self {
        Self { id, pos, at, source: source.clone() }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.source.is_active()
    }

    /// `intensity / slope` in milli-units.
    #[inline]
    pub fn reach_milli(&self) -> u32 {
        to_milli(self.source.reach())
    }
}

/// A receiver resolved against the layout for this tick.
#[derive(Clone, Debug)]
pub struct Target {
    pub id:  EntityId,
    pub pos: WorldPos,
    pub at:  Option<TilePos>,
}

// ── Propagator trait ──────────────────────────────────────────────────────────

/// Computes one source's contribution for one tick.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so sources can be propagated on
/// Rayon worker threads with the `parallel` feature.
pub trait Propagator: Send + Sync {
    /// Everything `emitter` contributes this tick.  `targets` is the full
    /// receiver list; implementations decide which ones need rays.
    fn propagate(
        &self,
        ctx:     &PropagationContext<'_>,
        emitter: &Emitter,
        targets: &[Target],
    ) -> PartialMap;
}

// ── GridcastPropagator ────────────────────────────────────────────────────────

/// Flood fill on the source's own structure, straight rays everywhere else.
///
/// A ray is cast to every target that is not on the source's structure:
/// targets on other structures, targets in open space, and every target of
/// a source that is itself in open space.  Positive ray results for targets
/// standing on a tile are added to that tile's grid value (once per tile,
/// from the lowest-id target standing there), so the receiver query never
/// needs to know which mode produced a value.
pub struct GridcastPropagator;

impl Propagator for GridcastPropagator {
    fn propagate(
        &self,
        ctx:     &PropagationContext<'_>,
        emitter: &Emitter,
        targets: &[Target],
    ) -> PartialMap {
        let mut out = PartialMap::default();
        if !emitter.is_active() {
            return out;
        }

        if let Some(origin) = emitter.at {
            out.flood = flood_fill(ctx, origin, emitter.reach_milli(), &mut out.grids);
        }

        let home = emitter.at.map(|at| at.structure);
        let mut deposited: FastSet<TilePos> = FastSet::default();
        for target in targets {
            let same_structure = home.is_some() && target.at.map(|at| at.structure) == home;
            if same_structure {
                continue;
            }
            let Some(ray) = cast_ray(ctx, emitter, target) else { continue };
            if ray.rads > 0.0 {
                if let Some(dest) = ray.destination {
                    if deposited.insert(dest) {
                        out.grids.add(dest, ray.rads);
                    }
                }
            }
            out.rays.push(ray);
        }

        trace!(
            "source {}: {} tiles, {} rays{}",
            emitter.id,
            out.flood.tiles_visited,
            out.rays.len(),
            if out.flood.truncated { " (truncated)" } else { "" },
        );
        out
    }
}
