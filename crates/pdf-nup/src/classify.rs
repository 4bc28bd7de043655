//! Size classification
//!
//! Maps the ratio between a source page diagonal and a sheet diagonal onto
//! a [`ShrinkLevel`], upgrading an A4 target to A3 once when the source is
//! already A4 sized.

use crate::constants::{RATIO_BANDS, SAME_SIZE_BAND, SAME_SIZE_DECIMALS, round_scaled};
use crate::types::*;
use log::info;

/// Outcome of classifying a source page against a target sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub level: ShrinkLevel,
    /// The sheet actually used, which may be larger than the one requested
    pub sheet: SheetSpec,
    /// Source diagonal over sheet diagonal, unrounded
    pub ratio: f32,
}

impl Classification {
    /// Whether the requested sheet was replaced by a larger one
    pub fn upgraded_from(&self, requested: SheetSpec) -> bool {
        self.sheet != requested
    }
}

/// Classify a source page diagonal against `target`.
pub fn classify(source_diagonal: f32, target: SheetSpec) -> Result<Classification> {
    let sheet = resolve_sheet(source_diagonal, target)?;
    let ratio = source_diagonal / sheet.diagonal();

    RATIO_BANDS
        .iter()
        .find(|band| band.matches(ratio))
        .map(|band| Classification {
            level: band.level,
            sheet,
            ratio,
        })
        .ok_or(NupError::UnsupportedPageSize {
            source_diagonal,
            target_diagonal: sheet.diagonal(),
        })
}

/// One-time pre-pass: a source the same nominal size as the target moves
/// the target up a size.
fn resolve_sheet(source_diagonal: f32, target: SheetSpec) -> Result<SheetSpec> {
    let ratio = source_diagonal / target.diagonal();
    if round_scaled(ratio, SAME_SIZE_DECIMALS) != round_scaled(SAME_SIZE_BAND, SAME_SIZE_DECIMALS)
    {
        return Ok(target);
    }

    let upgraded = target
        .upgrade()
        .ok_or(NupError::SameSize { sheet: target })?;
    info!("Increasing paper size to {}", upgraded);
    Ok(upgraded)
}
