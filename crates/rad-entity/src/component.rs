//! Radiation components.

use rad_core::TilePos;

// ── RadiationSource ───────────────────────────────────────────────────────────

/// Something that emits radiation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiationSource {
    /// Emission strength in rads/second at the source tile.
    pub intensity: f32,
    /// Falloff constant: the source reaches `intensity / slope` units of
    /// combined distance and attenuation before fading out.
    pub slope: f32,
    pub enabled: bool,
}

impl RadiationSource {
    pub const DEFAULT_SLOPE: f32 = 1.0;

    /// An enabled source with the default slope.
    pub fn new(intensity: f32) -> Self {
        Self { intensity, slope: Self::DEFAULT_SLOPE, enabled: true }
    }

    pub fn with_slope(mut self, slope: f32) -> Self {
        self.slope = slope;
        self
    }

    /// `false` for sources that cannot contribute anything this tick:
    /// disabled, non-positive or non-finite intensity or slope.
    pub fn is_active(&self) -> bool {
        self.enabled
            && self.intensity.is_finite()
            && self.slope.is_finite()
            && self.intensity > 0.0
            && self.slope > 0.0
    }

    /// Total budget of distance plus attenuation this source can cross.
    #[inline]
    pub fn reach(&self) -> f32 {
        self.intensity / self.slope
    }
}

// ── RadiationBlocker ──────────────────────────────────────────────────────────

/// Something that attenuates radiation passing through its tile.
///
/// `counted_at` records the tile this blocker's attenuation was last added
/// to.  It is written only by the resistance index in `rad-resistance`; the
/// removal path reads it instead of the current position, because by the
/// time a blocker is removed it may already have moved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiationBlocker {
    /// Attenuation added to the occupied tile, in rads.
    pub attenuation: f32,
    pub enabled: bool,
    /// Whether the blocker is anchored to the floor.  Loose blockers never
    /// contribute.
    pub anchored: bool,
    pub counted_at: Option<TilePos>,
}

impl RadiationBlocker {
    /// An enabled, anchored blocker that has not been counted yet.
    pub fn new(attenuation: f32) -> Self {
        Self { attenuation, enabled: true, anchored: true, counted_at: None }
    }

    /// Whether the blocker should contribute to the tile it sits on.
    #[inline]
    pub fn should_count(&self) -> bool {
        self.enabled && self.anchored && self.attenuation.is_finite() && self.attenuation > 0.0
    }
}

// ── RadiationReceiver ─────────────────────────────────────────────────────────

/// Marker: the entity can be irradiated.  Stateless; receivers are
/// re-resolved from their position every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiationReceiver;
