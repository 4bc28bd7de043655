use crate::classify::{Classification, classify};
use crate::options::NupOptions;
use crate::types::*;

use super::{GridPlan, plan};

/// Everything needed to impose a document whose pages are all `page_size`
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionPlan {
    pub page_size: PageSize,
    pub classification: Classification,
    pub grid: GridPlan,
}

impl ImpositionPlan {
    /// Classify `page_size` against the requested sheet and plan its grid.
    pub fn new(page_size: PageSize, options: &NupOptions) -> Result<Self> {
        let classification = classify(page_size.diagonal(), options.sheet)?;
        let grid = plan(classification.level, options.force_portrait);
        Ok(Self {
            page_size,
            classification,
            grid,
        })
    }

    /// Sheet canvas dimensions with the grid's orientation applied
    pub fn sheet_size(&self) -> PageSize {
        self.classification
            .sheet
            .dimensions_with_orientation(self.grid.orientation)
    }

    pub fn cells_per_sheet(&self) -> usize {
        self.grid.cell_count()
    }
}
