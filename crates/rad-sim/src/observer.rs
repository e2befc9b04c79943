//! Simulation observer trait for visualization, dose delivery and progress.

use rad_core::Tick;
use rad_propagation::{RadiationSnapshot, TickStats};

use crate::Irradiated;

/// Callbacks invoked by [`RadiationSim::tick`][crate::RadiationSim::tick].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Within one tick the order is always
/// `on_tick_start`, `on_map_updated`, every `on_irradiated` (ascending
/// receiver id), `on_tick_end`.
///
/// # Example: dose accumulator
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct DoseLedger(BTreeMap<EntityId, f32>);
///
/// impl RadiationObserver for DoseLedger {
///     fn on_irradiated(&mut self, _tick: Tick, event: &Irradiated) {
///         *self.0.entry(event.receiver).or_default() += event.total_rads();
///     }
/// }
/// ```
pub trait RadiationObserver {
    /// Called at the very start of each tick, before propagation.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once propagation has replaced the radiation map.
    ///
    /// The snapshot carries every structure's tile values and the ray set;
    /// intended for visualization and debugging overlays.
    fn on_map_updated(&mut self, _tick: Tick, _snapshot: &RadiationSnapshot) {}

    /// Called once per exposed receiver per tick.
    fn on_irradiated(&mut self, _tick: Tick, _event: &Irradiated) {}

    /// Called at the end of each tick with the propagation counters.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called once when the session ends.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`RadiationObserver`] that does nothing.
pub struct NoopObserver;

impl RadiationObserver for NoopObserver {}
