//! The `RadiationSim` struct and its tick loop.

use log::debug;

use rad_core::{EntityId, RadError, RadiationConfig, SimClock, StructureId, Tile, TilePos, WorldPos};
use rad_entity::{EntityStore, RadiationBlocker, RadiationSource};
use rad_grid::{GridError, StructureLayout};
use rad_propagation::{
    Emitter, PropagationContext, PropagationEngine, Propagator, RadiationSnapshot, Target,
    TickStats,
};
use rad_resistance::ResistanceIndex;

use crate::{RadiationObserver, SimResult, query_receivers};

// ── RadiationSim ──────────────────────────────────────────────────────────────

/// One radiation session: layout, entities, resistance maps and the last
/// propagated snapshot.
///
/// Structural changes (structures, tiles, blockers) go through the methods
/// below, which keep the resistance maps in step as they happen.  Each call to
/// [`tick`](Self::tick) then runs three phases:
///
/// 1. **Resolve**: every source and receiver is resolved to a structure tile
///    (or open space).
/// 2. **Propagate** (optionally parallel with the `parallel` feature): the
///    engine recomputes the whole radiation map and ray set from scratch.
/// 3. **Query**: every receiver on an irradiated tile gets one
///    [`Irradiated`][crate::Irradiated] notification.
///
/// Create via [`RadiationSimBuilder`][crate::RadiationSimBuilder].
pub struct RadiationSim<P: Propagator> {
    /// Validated configuration.
    pub config: RadiationConfig,

    /// Simulation clock; one tick is `config.update_interval_secs`.
    pub clock: SimClock,

    pub(crate) layout:     StructureLayout,
    pub(crate) entities:   EntityStore,
    pub(crate) resistance: ResistanceIndex,
    pub(crate) engine:     PropagationEngine<P>,
}

impl<P: Propagator> RadiationSim<P> {
    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run exactly `n` ticks from the current position.
    pub fn run_ticks<O: RadiationObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    /// Propagate, notify receivers, and advance the clock by one tick.
    pub fn tick<O: RadiationObserver>(&mut self, observer: &mut O) -> TickStats {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: resolve sources and receivers ────────────────────────
        let layout = &self.layout;
        let emitters: Vec<Emitter> = self
            .entities
            .sources()
            .map(|(id, source, pos)| Emitter::new(id, pos, layout.resolve(pos), source))
            .collect();
        let targets: Vec<Target> = self
            .entities
            .receivers()
            .map(|(id, pos)| Target { id, pos, at: layout.resolve(pos) })
            .collect();

        // ── Phase 2: propagation ──────────────────────────────────────────
        //
        // Resistance maps are only read from here until the tick ends.
        let ctx = PropagationContext {
            layout:     &self.layout,
            resistance: &self.resistance,
            config:     &self.config,
        };
        let stats = self.engine.update(now, &ctx, &emitters, &targets);
        observer.on_map_updated(now, self.engine.snapshot());

        // ── Phase 3: receiver query ───────────────────────────────────────
        let doses = query_receivers(
            &self.layout,
            &self.engine.snapshot().map,
            targets.iter().map(|t| (t.id, t.pos)),
            self.config.update_interval_secs,
        );
        for dose in &doses {
            observer.on_irradiated(now, dose);
        }

        observer.on_tick_end(now, &stats);
        self.clock.advance();
        stats
    }

    /// Close the session: drop the radiation snapshot and notify `observer`.
    pub fn end_session<O: RadiationObserver>(&mut self, observer: &mut O) {
        self.engine.clear();
        observer.on_sim_end(self.clock.current_tick);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Resistance at tile `at`, in rads.
    pub fn resistance_at(&self, at: TilePos) -> f32 {
        self.resistance.resistance_at(at)
    }

    /// Rad rate at tile `at` as of the last tick, zero if unreached.
    pub fn rads_at(&self, at: TilePos) -> f32 {
        self.engine.rads_at(at)
    }

    pub fn snapshot(&self) -> &RadiationSnapshot {
        self.engine.snapshot()
    }

    pub fn layout(&self) -> &StructureLayout {
        &self.layout
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn resistance(&self) -> &ResistanceIndex {
        &self.resistance
    }

    /// `true` if the resistance maps equal a full recount over all blockers.
    pub fn resistance_consistent(&self) -> bool {
        self.resistance.matches(self.entities.blockers().map(|(_, b)| b))
    }

    /// Structure tile under `id`, or `None` in open space.
    pub fn resolve_entity(&self, id: EntityId) -> Option<TilePos> {
        self.entities.position(id).and_then(|p| self.layout.resolve(p))
    }

    // ── Structures ────────────────────────────────────────────────────────

    /// Register an empty structure.
    pub fn add_structure(&mut self, id: StructureId, origin: WorldPos) -> SimResult<()> {
        self.layout.add_structure(id, origin)?;
        Ok(())
    }

    /// Register a `width × height` rectangular structure.  Blockers already
    /// standing on it are counted.
    pub fn add_rect(
        &mut self,
        id:     StructureId,
        origin: WorldPos,
        width:  i32,
        height: i32,
    ) -> SimResult<()> {
        self.layout.add_rect(id, origin, width, height)?;
        self.refresh_blockers();
        Ok(())
    }

    /// Add one tile.  Returns `false` if it already existed.
    pub fn set_tile(&mut self, id: StructureId, tile: Tile) -> SimResult<bool> {
        let added = self.layout.set_tile(id, tile)?;
        if added {
            self.refresh_blockers();
        }
        Ok(added)
    }

    /// Remove one tile.  Blockers counted on it are un-counted.
    pub fn clear_tile(&mut self, id: StructureId, tile: Tile) -> SimResult<bool> {
        let removed = self.layout.clear_tile(id, tile)?;
        if removed {
            self.refresh_blockers();
        }
        Ok(removed)
    }

    /// Destroy a structure.  Its resistance map is dropped in one step and
    /// every blocker counted on it is forgotten.
    pub fn destroy_structure(&mut self, id: StructureId) -> SimResult<()> {
        if self.layout.structure(id).is_none() {
            return Err(GridError::StructureNotFound(id).into());
        }
        let forgotten = self
            .resistance
            .drop_structure(id, self.entities.blockers_mut().map(|(_, b)| b));
        self.layout.remove_structure(id)?;
        self.refresh_blockers();
        debug!("structure {id} destroyed, {forgotten} blockers released");
        Ok(())
    }

    /// Move `tiles` of `from` into a new structure `new_id`.  Blockers on
    /// moved tiles are re-anchored to the new structure.
    pub fn split_structure(
        &mut self,
        from:   StructureId,
        new_id: StructureId,
        tiles:  &[Tile],
    ) -> SimResult<Vec<Tile>> {
        let moved = self.layout.split_structure(from, new_id, tiles)?;
        self.refresh_blockers();
        Ok(moved)
    }

    /// Fold `from` into `into`.  Blockers on `from` are re-anchored.
    pub fn merge_structure(&mut self, from: StructureId, into: StructureId) -> SimResult<()> {
        self.layout.merge_structure(from, into)?;
        self.refresh_blockers();
        Ok(())
    }

    /// Re-resolve every blocker and re-anchor the ones whose tile changed.
    ///
    /// Structures may overlap, so a change to one structure can move a
    /// blocker's resolved tile onto or off another.
    fn refresh_blockers(&mut self) {
        let updates: Vec<(EntityId, Option<TilePos>)> = self
            .entities
            .blockers()
            .filter_map(|(id, b)| {
                let at = self.resolve_entity(id);
                (at != b.counted_at).then_some((id, at))
            })
            .collect();

        for (id, at) in updates {
            let Ok(blocker) = self.entities.blocker_mut(id) else { continue };
            self.resistance.reanchor_blocker(blocker, at);
        }
    }

    // ── Entities ──────────────────────────────────────────────────────────

    /// Spawn an entity carrying `source`.
    pub fn spawn_source(&mut self, pos: WorldPos, source: RadiationSource) -> SimResult<EntityId> {
        let id = self.entities.spawn(pos);
        self.entities.insert_source(id, source)?;
        Ok(id)
    }

    /// Spawn an entity carrying `blocker` and count it where it stands.
    pub fn spawn_blocker(&mut self, pos: WorldPos, blocker: RadiationBlocker) -> SimResult<EntityId> {
        let id = self.entities.spawn(pos);
        self.attach_blocker(id, blocker)?;
        Ok(id)
    }

    /// Spawn a receiver.
    pub fn spawn_receiver(&mut self, pos: WorldPos) -> SimResult<EntityId> {
        let id = self.entities.spawn(pos);
        self.entities.insert_receiver(id)?;
        Ok(id)
    }

    /// Spawn a bare entity; attach components with the `add_*` methods.
    pub fn spawn(&mut self, pos: WorldPos) -> EntityId {
        self.entities.spawn(pos)
    }

    pub fn add_source(&mut self, id: EntityId, source: RadiationSource) -> SimResult<()> {
        self.entities.insert_source(id, source)?;
        Ok(())
    }

    /// Attach (or replace) a blocker component and count it.
    pub fn add_blocker(&mut self, id: EntityId, blocker: RadiationBlocker) -> SimResult<()> {
        if !self.entities.contains(id) {
            return Err(RadError::EntityNotFound(id).into());
        }
        if let Ok(old) = self.entities.blocker_mut(id) {
            self.resistance.remove_blocker(old);
        }
        self.attach_blocker(id, blocker)
    }

    pub fn add_receiver(&mut self, id: EntityId) -> SimResult<()> {
        self.entities.insert_receiver(id)?;
        Ok(())
    }

    pub fn remove_source(&mut self, id: EntityId) -> Option<RadiationSource> {
        self.entities.remove_source(id)
    }

    /// Detach a blocker component, un-counting it first.
    pub fn remove_blocker(&mut self, id: EntityId) -> Option<RadiationBlocker> {
        let mut blocker = self.entities.remove_blocker(id)?;
        self.resistance.remove_blocker(&mut blocker);
        Some(blocker)
    }

    pub fn remove_receiver(&mut self, id: EntityId) -> bool {
        self.entities.remove_receiver(id)
    }

    /// Remove an entity and every component it carries.
    pub fn despawn(&mut self, id: EntityId) -> SimResult<()> {
        let despawned = self.entities.despawn(id)?;
        if let Some(mut blocker) = despawned.blocker {
            self.resistance.remove_blocker(&mut blocker);
        }
        debug!("{id} despawned");
        Ok(())
    }

    /// Move an entity.  A blocker's contribution follows it.
    pub fn move_entity(&mut self, id: EntityId, pos: WorldPos) -> SimResult<()> {
        self.entities.set_position(id, pos)?;
        let at = self.layout.resolve(pos);
        if let Ok(blocker) = self.entities.blocker_mut(id) {
            self.resistance.reanchor_blocker(blocker, at);
        }
        Ok(())
    }

    // ── Blocker mutation (remove, change, add) ────────────────────────────

    pub fn set_blocker_enabled(&mut self, id: EntityId, enabled: bool) -> SimResult<()> {
        self.update_blocker(id, |b| b.enabled = enabled)
    }

    pub fn set_blocker_anchored(&mut self, id: EntityId, anchored: bool) -> SimResult<()> {
        self.update_blocker(id, |b| b.anchored = anchored)
    }

    pub fn set_blocker_attenuation(&mut self, id: EntityId, attenuation: f32) -> SimResult<()> {
        self.update_blocker(id, |b| b.attenuation = attenuation)
    }

    fn update_blocker(
        &mut self,
        id:     EntityId,
        change: impl FnOnce(&mut RadiationBlocker),
    ) -> SimResult<()> {
        let at = self.resolve_entity(id);
        let blocker = self.entities.blocker_mut(id)?;
        self.resistance.remove_blocker(blocker);
        change(blocker);
        self.resistance.add_blocker(blocker, at);
        Ok(())
    }

    fn attach_blocker(&mut self, id: EntityId, mut blocker: RadiationBlocker) -> SimResult<()> {
        blocker.counted_at = None;
        let at = self.resolve_entity(id);
        self.resistance.add_blocker(&mut blocker, at);
        self.entities.insert_blocker(id, blocker)?;
        Ok(())
    }

    // ── Source mutation ───────────────────────────────────────────────────

    pub fn set_source_enabled(&mut self, id: EntityId, enabled: bool) -> SimResult<()> {
        self.entities.source_mut(id)?.enabled = enabled;
        Ok(())
    }

    pub fn set_source_intensity(&mut self, id: EntityId, intensity: f32) -> SimResult<()> {
        self.entities.source_mut(id)?.intensity = intensity;
        Ok(())
    }

    pub fn set_source_slope(&mut self, id: EntityId, slope: f32) -> SimResult<()> {
        self.entities.source_mut(id)?.slope = slope;
        Ok(())
    }
}
