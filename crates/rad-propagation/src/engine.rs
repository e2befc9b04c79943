//! High-level propagation engine: runs every source and keeps the last map.

use log::debug;

use rad_core::{Tick, TilePos};

use crate::{Emitter, OpenSpaceRay, PartialMap, PropagationContext, Propagator, RadiationMap, Target};

// ── RadiationSnapshot ─────────────────────────────────────────────────────────

/// The complete result of one update: every tile's rad rate and every ray.
///
/// Replaced wholesale by each update; nothing carries over between ticks.
#[derive(Default, Debug, Clone)]
pub struct RadiationSnapshot {
    /// Tick the snapshot was computed on.
    pub tick: Tick,
    pub map:  RadiationMap,
    pub rays: Vec<OpenSpaceRay>,
}

// ── TickStats ─────────────────────────────────────────────────────────────────

/// Counters for one update, summed over all sources.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    /// Sources propagated.
    pub sources:       usize,
    /// Sources skipped because they were disabled or had no reach.
    pub skipped:       usize,
    pub tiles_visited: usize,
    pub work:          usize,
    /// Number of sources whose flood fill hit a budget.
    pub truncated:     usize,
    pub rays:          usize,
}

// ── PropagationEngine ─────────────────────────────────────────────────────────

/// Wraps a [`Propagator`] and the most recent [`RadiationSnapshot`].
///
/// # Type parameter
///
/// `P` must implement [`Propagator`] (e.g. [`crate::GridcastPropagator`]).
/// Swap it at compile time for a different model with no runtime overhead.
pub struct PropagationEngine<P: Propagator> {
    /// The propagation model.
    pub propagator: P,

    snapshot: RadiationSnapshot,
}

impl<P: Propagator> PropagationEngine<P> {
    pub fn new(propagator: P) -> Self {
        Self { propagator, snapshot: RadiationSnapshot::default() }
    }

    /// Recompute the whole radiation picture for `tick`.
    ///
    /// Sources are independent: each one produces its own [`PartialMap`]
    /// (on Rayon's thread pool with the `parallel` feature) and the partial
    /// maps are summed in `emitters` order.  The previous snapshot is
    /// discarded.
    pub fn update(
        &mut self,
        tick:     Tick,
        ctx:      &PropagationContext<'_>,
        emitters: &[Emitter],
        targets:  &[Target],
    ) -> TickStats {
        let mut stats = TickStats::default();

        let active: Vec<&Emitter> = emitters
            .iter()
            .filter(|e| {
                let ok = e.is_active();
                if !ok {
                    debug!("source {} skipped: inactive", e.id);
                }
                ok
            })
            .collect();
        stats.skipped = emitters.len() - active.len();
        stats.sources = active.len();

        let partials = self.propagate_all(ctx, &active, targets);

        let mut snapshot = RadiationSnapshot { tick, ..RadiationSnapshot::default() };
        for partial in partials {
            stats.tiles_visited += partial.flood.tiles_visited;
            stats.work          += partial.flood.work;
            stats.truncated     += usize::from(partial.flood.truncated);
            stats.rays          += partial.rays.len();
            snapshot.map.merge(partial.grids);
            snapshot.rays.extend(partial.rays);
        }
        self.snapshot = snapshot;
        stats
    }

    fn propagate_all(
        &self,
        ctx:      &PropagationContext<'_>,
        emitters: &[&Emitter],
        targets:  &[Target],
    ) -> Vec<PartialMap> {
        let propagator = &self.propagator;

        #[cfg(not(feature = "parallel"))]
        {
            emitters
                .iter()
                .map(|e| propagator.propagate(ctx, e, targets))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // `collect` on an indexed parallel iterator keeps input order.
            emitters
                .par_iter()
                .map(|e| propagator.propagate(ctx, e, targets))
                .collect()
        }
    }

    /// The most recent snapshot (empty before the first update).
    pub fn snapshot(&self) -> &RadiationSnapshot {
        &self.snapshot
    }

    /// Rad rate at `at` in the most recent snapshot, zero if unreached.
    pub fn rads_at(&self, at: TilePos) -> f32 {
        self.snapshot.map.rads_at(at)
    }

    /// Forget the current snapshot.
    pub fn clear(&mut self) {
        self.snapshot = RadiationSnapshot::default();
    }
}
