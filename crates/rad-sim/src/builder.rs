//! Fluent builder for constructing a [`RadiationSim`].

use rad_core::{RadiationConfig, SimClock};
use rad_entity::EntityStore;
use rad_grid::StructureLayout;
use rad_propagation::{PropagationEngine, Propagator};
use rad_resistance::ResistanceIndex;

use crate::{RadiationSim, SimResult};

/// Fluent builder for [`RadiationSim<P>`].
///
/// # Required inputs
///
/// - [`RadiationConfig`]: budgets, floor, tick length
/// - `P: Propagator`: the propagation model (e.g. [`rad_propagation::GridcastPropagator`])
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                    |
/// |-----------------|----------------------------|
/// | `.layout(l)`    | `StructureLayout::new()`   |
/// | `.entities(e)`  | `EntityStore::new()`       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = RadiationSimBuilder::new(RadiationConfig::default(), GridcastPropagator)
///     .layout(layout)
///     .build()?;
/// sim.run_ticks(10, &mut NoopObserver);
/// ```
pub struct RadiationSimBuilder<P: Propagator> {
    config:     RadiationConfig,
    propagator: P,
    layout:     Option<StructureLayout>,
    entities:   Option<EntityStore>,
}

impl<P: Propagator> RadiationSimBuilder<P> {
    pub fn new(config: RadiationConfig, propagator: P) -> Self {
        Self { config, propagator, layout: None, entities: None }
    }

    /// Supply a pre-built structure layout.
    pub fn layout(mut self, layout: StructureLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Supply pre-populated entities.  Their blockers are counted at build
    /// time; any stale `counted_at` they carry is discarded.
    pub fn entities(mut self, entities: EntityStore) -> Self {
        self.entities = Some(entities);
        self
    }

    /// Validate the configuration, build the resistance maps from the
    /// supplied blockers, and return a ready-to-run [`RadiationSim`].
    pub fn build(self) -> SimResult<RadiationSim<P>> {
        self.config.validate()?;

        let layout = self.layout.unwrap_or_default();
        let mut entities = self.entities.unwrap_or_default();

        // ── Initial resistance count ──────────────────────────────────────
        let anchors: Vec<_> = entities
            .blockers()
            .map(|(id, _)| (id, entities.position(id).and_then(|p| layout.resolve(p))))
            .collect();
        let mut resistance = ResistanceIndex::new();
        for (id, at) in anchors {
            let blocker = entities.blocker_mut(id)?;
            blocker.counted_at = None;
            resistance.add_blocker(blocker, at);
        }

        Ok(RadiationSim {
            clock:      SimClock::new(self.config.update_interval_secs),
            config:     self.config,
            layout,
            entities,
            resistance,
            engine:     PropagationEngine::new(self.propagator),
        })
    }
}
