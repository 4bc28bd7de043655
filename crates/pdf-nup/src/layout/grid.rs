//! Grid planning
//!
//! Each shrink level has a fixed grid. Only the one-step level can be laid
//! out either way round, selected by the caller.

use crate::types::{Orientation, ShrinkLevel};

use super::{GridCell, GridPlan};

/// Build the grid for a shrink level.
///
/// `force_portrait` only affects [`ShrinkLevel::OneStep`], switching its
/// two side-by-side cells to two stacked cells on a portrait sheet.
pub fn plan(level: ShrinkLevel, force_portrait: bool) -> GridPlan {
    let (cols, rows) = level.grid_dimensions();

    let (cols, rows, orientation) = match level {
        ShrinkLevel::OneStep if force_portrait => (rows, cols, Orientation::Portrait),
        _ => (cols, rows, level.orientation()),
    };

    GridPlan {
        cols,
        rows,
        orientation,
        tiling_order: tiling_order(cols, rows),
    }
}

/// Placement sequence: top row first, left to right within a row.
pub fn tiling_order(cols: usize, rows: usize) -> Vec<GridCell> {
    (0..rows)
        .rev()
        .flat_map(|row| (0..cols).map(move |col| GridCell::new(col, row)))
        .collect()
}
