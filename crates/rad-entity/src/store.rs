//! `EntityStore` — positions plus sparse radiation component maps.
//!
//! Components live in `BTreeMap`s keyed by `EntityId` rather than dense
//! arrays: entities are spawned and despawned constantly by the host, and
//! only a handful carry radiation components.  Ascending-id iteration keeps
//! every per-tick pass deterministic.

use std::collections::{BTreeMap, BTreeSet};

use rad_core::{EntityId, RadError, RadResult, WorldPos};

use crate::{RadiationBlocker, RadiationReceiver, RadiationSource};

/// Components removed together with a despawned entity.
#[derive(Debug, Default)]
pub struct Despawned {
    pub position: WorldPos,
    pub source:   Option<RadiationSource>,
    pub blocker:  Option<RadiationBlocker>,
    pub receiver: Option<RadiationReceiver>,
}

/// Engine-side mirror of the host's radiation-relevant entities.
///
/// Positions are written by the transform collaborator (via
/// [`set_position`](Self::set_position)) and read everywhere else.
#[derive(Default)]
pub struct EntityStore {
    next_id:   u32,
    positions: BTreeMap<EntityId, WorldPos>,
    sources:   BTreeMap<EntityId, RadiationSource>,
    blockers:  BTreeMap<EntityId, RadiationBlocker>,
    receivers: BTreeSet<EntityId>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Create a bare entity at `pos` and return its id (sequential from 0).
    pub fn spawn(&mut self, pos: WorldPos) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.positions.insert(id, pos);
        id
    }

    /// Remove an entity and all of its components.
    pub fn despawn(&mut self, id: EntityId) -> RadResult<Despawned> {
        let position = self.positions.remove(&id).ok_or(RadError::EntityNotFound(id))?;
        Ok(Despawned {
            position,
            source:   self.sources.remove(&id),
            blocker:  self.blockers.remove(&id),
            receiver: self.receivers.remove(&id).then_some(RadiationReceiver),
        })
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    // ── Position ──────────────────────────────────────────────────────────

    pub fn position(&self, id: EntityId) -> Option<WorldPos> {
        self.positions.get(&id).copied()
    }

    /// Move an entity.  Returns the previous position.
    pub fn set_position(&mut self, id: EntityId, pos: WorldPos) -> RadResult<WorldPos> {
        let slot = self.positions.get_mut(&id).ok_or(RadError::EntityNotFound(id))?;
        Ok(std::mem::replace(slot, pos))
    }

    // ── Components ────────────────────────────────────────────────────────

    /// Attach (or replace) a source component.
    pub fn insert_source(&mut self, id: EntityId, source: RadiationSource) -> RadResult<()> {
        self.require(id)?;
        self.sources.insert(id, source);
        Ok(())
    }

    /// Attach (or replace) a blocker component.
    ///
    /// A replaced blocker's `counted_at` is discarded with it, so callers
    /// must un-count the old component first.
    pub fn insert_blocker(&mut self, id: EntityId, blocker: RadiationBlocker) -> RadResult<()> {
        self.require(id)?;
        self.blockers.insert(id, blocker);
        Ok(())
    }

    pub fn insert_receiver(&mut self, id: EntityId) -> RadResult<()> {
        self.require(id)?;
        self.receivers.insert(id);
        Ok(())
    }

    pub fn remove_source(&mut self, id: EntityId) -> Option<RadiationSource> {
        self.sources.remove(&id)
    }

    pub fn remove_blocker(&mut self, id: EntityId) -> Option<RadiationBlocker> {
        self.blockers.remove(&id)
    }

    pub fn remove_receiver(&mut self, id: EntityId) -> bool {
        self.receivers.remove(&id)
    }

    pub fn source(&self, id: EntityId) -> Option<&RadiationSource> {
        self.sources.get(&id)
    }

    pub fn source_mut(&mut self, id: EntityId) -> RadResult<&mut RadiationSource> {
        self.sources
            .get_mut(&id)
            .ok_or(RadError::MissingComponent { entity: id, component: "source" })
    }

    pub fn blocker(&self, id: EntityId) -> Option<&RadiationBlocker> {
        self.blockers.get(&id)
    }

    pub fn blocker_mut(&mut self, id: EntityId) -> RadResult<&mut RadiationBlocker> {
        self.blockers
            .get_mut(&id)
            .ok_or(RadError::MissingComponent { entity: id, component: "blocker" })
    }

    pub fn is_receiver(&self, id: EntityId) -> bool {
        self.receivers.contains(&id)
    }

    // ── Iteration (ascending EntityId) ────────────────────────────────────

    /// Every source with its current position.
    pub fn sources(&self) -> impl Iterator<Item = (EntityId, &RadiationSource, WorldPos)> + '_ {
        self.sources
            .iter()
            .filter_map(|(&id, s)| self.positions.get(&id).map(|&p| (id, s, p)))
    }

    pub fn blockers(&self) -> impl Iterator<Item = (EntityId, &RadiationBlocker)> + '_ {
        self.blockers.iter().map(|(&id, b)| (id, b))
    }

    /// Mutable access to every blocker, for bulk re-anchoring.
    pub fn blockers_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut RadiationBlocker)> + '_ {
        self.blockers.iter_mut().map(|(&id, b)| (id, b))
    }

    /// Every receiver with its current position.
    pub fn receivers(&self) -> impl Iterator<Item = (EntityId, WorldPos)> + '_ {
        self.receivers
            .iter()
            .filter_map(|&id| self.positions.get(&id).map(|&p| (id, p)))
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn blocker_count(&self) -> usize {
        self.blockers.len()
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }

    fn require(&self, id: EntityId) -> RadResult<()> {
        if self.contains(id) { Ok(()) } else { Err(RadError::EntityNotFound(id)) }
    }
}
