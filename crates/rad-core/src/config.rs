//! Engine configuration.
//!
//! Typically deserialized by the host application (behind the `serde`
//! feature) and handed to the simulation builder, which calls
//! [`RadiationConfig::validate`] before anything runs.

use crate::{RadError, RadResult};

/// Tunables for propagation and exposure.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadiationConfig {
    /// Simulated seconds covered by one propagation tick.  Also the re-check
    /// cooldown carried by every dose notification.  Default: 1.0.
    pub update_interval_secs: f32,

    /// Smallest rad rate that counts as exposure.  A flood-fill tile whose
    /// value would fall below this is a frontier and is not recorded; a ray
    /// arriving below it carries nothing.  Default: 0.1.
    pub min_intensity: f32,

    /// Maximum number of tiles a single flood-fill search may settle.
    /// Default: 100,000.
    pub max_flood_tiles: usize,

    /// Maximum number of neighbour relaxations a single flood-fill search
    /// may perform.  Default: 1,000,000.
    pub max_flood_work: usize,

    /// Open-space rays longer than this (metres) are not cast.  Default: 50.
    pub ray_max_distance: f32,
}

impl RadiationConfig {
    pub const DEFAULT_UPDATE_INTERVAL_SECS: f32 = 1.0;
    pub const DEFAULT_MIN_INTENSITY: f32 = 0.1;
    pub const DEFAULT_MAX_FLOOD_TILES: usize = 100_000;
    pub const DEFAULT_MAX_FLOOD_WORK: usize = 1_000_000;
    pub const DEFAULT_RAY_MAX_DISTANCE: f32 = 50.0;

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> RadResult<()> {
        if !(self.update_interval_secs.is_finite() && self.update_interval_secs > 0.0) {
            return Err(RadError::Config(format!(
                "update_interval_secs must be positive, got {}",
                self.update_interval_secs
            )));
        }
        if !(self.min_intensity.is_finite() && self.min_intensity >= 0.0) {
            return Err(RadError::Config(format!(
                "min_intensity must be non-negative, got {}",
                self.min_intensity
            )));
        }
        if self.max_flood_tiles == 0 || self.max_flood_work == 0 {
            return Err(RadError::Config(
                "flood-fill budgets must be non-zero".to_string(),
            ));
        }
        if !(self.ray_max_distance.is_finite() && self.ray_max_distance >= 0.0) {
            return Err(RadError::Config(format!(
                "ray_max_distance must be non-negative, got {}",
                self.ray_max_distance
            )));
        }
        Ok(())
    }
}

impl Default for RadiationConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: Self::DEFAULT_UPDATE_INTERVAL_SECS,
            min_intensity:        Self::DEFAULT_MIN_INTENSITY,
            max_flood_tiles:      Self::DEFAULT_MAX_FLOOD_TILES,
            max_flood_work:       Self::DEFAULT_MAX_FLOOD_WORK,
            ray_max_distance:     Self::DEFAULT_RAY_MAX_DISTANCE,
        }
    }
}
