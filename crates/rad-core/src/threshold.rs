//! Dose-rate danger levels for display collaborators.
//!
//! Alert icons, counters and overlays all classify through [`classify`] so
//! they agree with each other and with the engine about what "dangerous"
//! means.

use std::fmt;

/// Ordered danger classification of a rad rate (rads per second).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DangerLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    Extreme,
}

/// 8-bit sRGB color.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Lower bounds (inclusive) of `Low`, `Medium`, `High` and `Extreme`.
const BREAKPOINTS: [(f32, DangerLevel); 4] = [
    (6.0, DangerLevel::Extreme),
    (3.0, DangerLevel::High),
    (1.0, DangerLevel::Medium),
    (0.2, DangerLevel::Low),
];

/// Map a rad rate to its danger level.  NaN and negative rates are `None`.
pub fn classify(rads_per_second: f32) -> DangerLevel {
    BREAKPOINTS
        .iter()
        .find(|(floor, _)| rads_per_second >= *floor)
        .map_or(DangerLevel::None, |&(_, level)| level)
}

impl DangerLevel {
    pub const ALL: [DangerLevel; 5] = [
        DangerLevel::None,
        DangerLevel::Low,
        DangerLevel::Medium,
        DangerLevel::High,
        DangerLevel::Extreme,
    ];

    pub fn color(self) -> Rgb {
        match self {
            DangerLevel::None    => Rgb(0x00, 0x80, 0x00), // green
            DangerLevel::Low     => Rgb(0xFF, 0xFF, 0x00), // yellow
            DangerLevel::Medium  => Rgb(0xFF, 0x8C, 0x00), // dark orange
            DangerLevel::High    => Rgb(0xFF, 0x00, 0x00), // red
            DangerLevel::Extreme => Rgb(0x8B, 0x00, 0x00), // dark red
        }
    }

    /// `true` for any level a display should raise an alert for.
    #[inline]
    pub fn is_alert(self) -> bool {
        self >= DangerLevel::Low
    }
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DangerLevel::None    => "none",
            DangerLevel::Low     => "low",
            DangerLevel::Medium  => "medium",
            DangerLevel::High    => "high",
            DangerLevel::Extreme => "extreme",
        };
        f.pad(s)
    }
}
