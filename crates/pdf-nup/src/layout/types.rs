//! Layout data types for imposition

use crate::types::{Orientation, PageSize};

/// A cell in the sheet grid.
///
/// `row` counts up from the canvas origin (the bottom edge in PDF
/// coordinates), so the highest row index is the top row of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Column index (0 = leftmost column)
    pub col: usize,
    /// Row index (0 = bottom row)
    pub row: usize,
}

impl GridCell {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Translation that puts a page of `page` size into this cell
    pub fn offset(&self, page: PageSize) -> (f32, f32) {
        (
            self.col as f32 * page.width,
            self.row as f32 * page.height,
        )
    }
}

/// Grid dimensions, orientation and placement sequence for one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    /// Number of columns in the page grid
    pub cols: usize,
    /// Number of rows in the page grid
    pub rows: usize,
    /// Orientation the sheet canvas is created in
    pub orientation: Orientation,
    /// Cells in the order they receive successive pages
    pub tiling_order: Vec<GridCell>,
}

impl GridPlan {
    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}
