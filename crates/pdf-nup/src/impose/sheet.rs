//! Sheet composition
//!
//! Walks source pages in order and drops each into the next grid cell,
//! emitting a finished sheet whenever the grid fills. The page content is
//! generic so the compositor can be driven by plain page-size sequences.

use crate::layout::{GridCell, GridPlan};
use crate::types::*;
use log::{debug, warn};

/// One source page placed on a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<C> {
    pub content: C,
    pub cell: GridCell,
    /// Translation from the sheet origin, in points
    pub x: f32,
    pub y: f32,
}

impl<C> Placement<C> {
    fn at(content: C, cell: GridCell, page_size: PageSize) -> Self {
        let (x, y) = cell.offset(page_size);
        Self {
            content,
            cell,
            x,
            y,
        }
    }
}

/// A composed output sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet<C> {
    pub size: PageSize,
    pub placements: Vec<Placement<C>>,
}

impl<C> Sheet<C> {
    pub fn blank(size: PageSize) -> Self {
        Self {
            size,
            placements: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }
}

/// Check that there is at least one page and every page matches the first.
///
/// Returns the common page size.
pub fn validate_page_sizes(sizes: impl IntoIterator<Item = PageSize>) -> Result<PageSize> {
    let mut sizes = sizes.into_iter();
    let expected = sizes.next().ok_or(NupError::EmptyDocument)?;

    for (index, actual) in sizes.enumerate() {
        if actual != expected {
            return Err(NupError::InconsistentPageSize {
                page: index + 2,
                actual,
                expected,
            });
        }
    }

    Ok(expected)
}

/// Compose `pages` onto sheets of `sheet_size` following `grid`.
///
/// All pages are validated before anything is placed. With `fill` set and
/// exactly one page, that page is repeated into every cell of a single
/// sheet; with more pages `fill` is ignored.
pub fn compose<C: Clone>(
    pages: Vec<(C, PageSize)>,
    grid: &GridPlan,
    sheet_size: PageSize,
    fill: bool,
) -> Result<Vec<Sheet<C>>> {
    let page_size = validate_page_sizes(pages.iter().map(|(_, size)| *size))?;

    if grid.tiling_order.is_empty() || grid.tiling_order.len() != grid.cell_count() {
        return Err(NupError::Config(format!(
            "Grid {}x{} has {} cells in its tiling order",
            grid.cols,
            grid.rows,
            grid.tiling_order.len()
        )));
    }

    if fill && pages.len() == 1 {
        let (content, _) = &pages[0];
        return Ok(vec![fill_sheet(content, grid, sheet_size, page_size)]);
    }

    if fill {
        warn!("Fill option only works with single-page PDFs. Processing normally.");
    }

    let sheets = pages
        .into_iter()
        .fold(
            SheetAccumulator::new(grid, sheet_size, page_size),
            |acc, (content, _)| acc.place(content),
        )
        .finish();

    Ok(sheets)
}

fn fill_sheet<C: Clone>(
    content: &C,
    grid: &GridPlan,
    sheet_size: PageSize,
    page_size: PageSize,
) -> Sheet<C> {
    let mut sheet = Sheet::blank(sheet_size);
    sheet.placements = grid
        .tiling_order
        .iter()
        .map(|&cell| Placement::at(content.clone(), cell, page_size))
        .collect();
    sheet
}

/// Finished sheets plus the sheet in progress; the cell cursor is the
/// number of placements on the current sheet.
struct SheetAccumulator<'a, C> {
    grid: &'a GridPlan,
    sheet_size: PageSize,
    page_size: PageSize,
    finished: Vec<Sheet<C>>,
    current: Sheet<C>,
    placed: usize,
}

impl<'a, C> SheetAccumulator<'a, C> {
    fn new(grid: &'a GridPlan, sheet_size: PageSize, page_size: PageSize) -> Self {
        Self {
            grid,
            sheet_size,
            page_size,
            finished: Vec::new(),
            current: Sheet::blank(sheet_size),
            placed: 0,
        }
    }

    fn place(mut self, content: C) -> Self {
        let cell = self.grid.tiling_order[self.current.len()];
        self.placed += 1;
        debug!(
            "Page {} -> sheet {}, cell ({}, {})",
            self.placed,
            self.finished.len() + 1,
            cell.col,
            cell.row
        );
        self.current
            .placements
            .push(Placement::at(content, cell, self.page_size));

        if self.current.len() == self.grid.cell_count() {
            let full = std::mem::replace(&mut self.current, Sheet::blank(self.sheet_size));
            self.finished.push(full);
        }
        self
    }

    fn finish(mut self) -> Vec<Sheet<C>> {
        if !self.current.is_empty() {
            self.finished.push(self.current);
        }
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tiling_order;

    fn grid(cols: usize, rows: usize) -> GridPlan {
        GridPlan {
            cols,
            rows,
            orientation: Orientation::Portrait,
            tiling_order: tiling_order(cols, rows),
        }
    }

    #[test]
    fn test_validate_reports_one_based_page() {
        let a5 = PageSize::new(420.0, 595.0);
        let a6 = PageSize::new(298.0, 420.0);
        match validate_page_sizes([a5, a6, a5]) {
            Err(NupError::InconsistentPageSize {
                page,
                actual,
                expected,
            }) => {
                assert_eq!(page, 2);
                assert_eq!(actual, a6);
                assert_eq!(expected, a5);
            }
            other => panic!("Expected InconsistentPageSize, got {:?}", other),
        }
    }

    #[test]
    fn test_no_trailing_empty_sheet() {
        let page = PageSize::new(298.0, 420.0);
        let pages: Vec<(usize, PageSize)> = (0..8).map(|i| (i, page)).collect();
        let sheets = compose(pages, &grid(2, 2), PageSize::new(595.0, 842.0), false).unwrap();
        assert_eq!(sheets.len(), 2);
        assert!(sheets.iter().all(|s| s.len() == 4));
    }

    #[test]
    fn test_rejects_grid_without_cells() {
        let page = PageSize::new(298.0, 420.0);
        let result = compose(vec![(0, page)], &grid(0, 0), page, false);
        assert!(matches!(result, Err(NupError::Config(_))));
    }
}
