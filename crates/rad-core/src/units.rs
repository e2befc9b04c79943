//! Fixed-point rad units.
//!
//! Attenuation sums and path costs are accumulated as integer thousandths of
//! a rad ("milli-rads").  Integer addition is exact and associative, so a
//! tile's resistance does not depend on the order blockers were added and
//! removed, and removing a blocker restores the previous value bit for bit.
//! Public query functions convert back to `f32`.

/// Milli-rads per rad.
pub const MILLI_PER_RAD: f32 = 1_000.0;

/// Convert a rad value to milli-rads, rounding to nearest.  Negative and NaN
/// inputs map to 0; values beyond range saturate.
#[inline]
pub fn to_milli(rads: f32) -> u32 {
    // `as` saturates on overflow and maps NaN to 0.
    (rads * MILLI_PER_RAD).round().max(0.0) as u32
}

#[inline]
pub fn from_milli(milli: u32) -> f32 {
    milli as f32 / MILLI_PER_RAD
}
