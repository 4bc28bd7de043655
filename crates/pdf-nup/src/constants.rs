//! Shared constants for N-up imposition
//!
//! Paper dimensions and the empirically tuned ratio bands live here so they
//! can be audited in one place.

use crate::types::ShrinkLevel;

// =============================================================================
// Sheet Dimensions
// =============================================================================

/// A4 portrait width in points
pub const A4_WIDTH_PT: f32 = 595.0;

/// A4 portrait height in points
pub const A4_HEIGHT_PT: f32 = 842.0;

/// A3 portrait width in points
pub const A3_WIDTH_PT: f32 = 842.0;

/// A3 portrait height in points
pub const A3_HEIGHT_PT: f32 = 1190.0;

// =============================================================================
// Ratio Bands
// =============================================================================

/// A diagonal ratio band: `ratio` compared after rounding both sides to
/// `decimals` places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBand {
    pub ratio: f32,
    pub decimals: i32,
    pub level: ShrinkLevel,
}

impl RatioBand {
    pub const fn new(ratio: f32, decimals: i32, level: ShrinkLevel) -> Self {
        Self {
            ratio,
            decimals,
            level,
        }
    }

    pub fn matches(&self, ratio: f32) -> bool {
        round_scaled(ratio, self.decimals) == round_scaled(self.ratio, self.decimals)
    }
}

/// Ratio at which source page and sheet are the same nominal size.
pub const SAME_SIZE_BAND: f32 = 1.0;

/// Precision used for the same-size check.
pub const SAME_SIZE_DECIMALS: i32 = 1;

/// Bands tested in order; the first match wins.
///
/// The first two are compared to one decimal place, the rest to two. Page
/// sizes carry rounding error from unit conversion, and these precisions
/// keep classification stable across it.
pub const RATIO_BANDS: [RatioBand; 5] = [
    RatioBand::new(0.7, 1, ShrinkLevel::OneStep),
    RatioBand::new(0.5, 1, ShrinkLevel::TwoStep),
    RatioBand::new(0.35, 2, ShrinkLevel::ThreeStep),
    RatioBand::new(0.25, 2, ShrinkLevel::FourStep),
    RatioBand::new(0.18, 2, ShrinkLevel::FiveStep),
];

/// `value` rounded to `decimals` places, as an integer count of the last
/// place so it compares exactly.
pub(crate) fn round_scaled(value: f32, decimals: i32) -> i64 {
    (value * 10f32.powi(decimals)).round() as i64
}
