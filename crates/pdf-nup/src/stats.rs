use crate::impose::validate_page_sizes;
use crate::layout::ImpositionPlan;
use crate::options::NupOptions;
use crate::render::read_page_sizes;
use crate::types::*;
use lopdf::Document;

/// Statistics about an imposition, computed without compositing
#[derive(Debug, Clone, PartialEq)]
pub struct NupStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Common source page size
    pub page_size: PageSize,
    /// Nominal source format, e.g. "A5"
    pub source_format: String,
    pub level: ShrinkLevel,
    /// Sheet actually used (after any A4 to A3 upgrade)
    pub sheet: SheetSpec,
    pub orientation: Orientation,
    pub columns: usize,
    pub rows: usize,
    pub cells_per_sheet: usize,
    /// Number of output sheets
    pub output_sheets: usize,
    /// Whether a single page will be repeated across the whole sheet
    pub fill_applied: bool,
}

/// Calculate statistics for imposing `document`
pub fn calculate_statistics(document: &Document, options: &NupOptions) -> Result<NupStatistics> {
    let pages = read_page_sizes(document)?;
    let page_size = validate_page_sizes(pages.iter().map(|(_, size)| *size))?;
    statistics_for(pages.len(), page_size, options)
}

/// Statistics for `page_count` pages of `page_size`
pub fn statistics_for(
    page_count: usize,
    page_size: PageSize,
    options: &NupOptions,
) -> Result<NupStatistics> {
    if page_count == 0 {
        return Err(NupError::EmptyDocument);
    }

    let plan = ImpositionPlan::new(page_size, options)?;
    let cells_per_sheet = plan.cells_per_sheet();
    let fill_applied = options.fill_applies(page_count);

    let output_sheets = if fill_applied {
        1
    } else {
        page_count.div_ceil(cells_per_sheet)
    };

    let classification = plan.classification;
    Ok(NupStatistics {
        source_pages: page_count,
        page_size,
        source_format: classification.level.source_format(classification.sheet),
        level: classification.level,
        sheet: classification.sheet,
        orientation: plan.grid.orientation,
        columns: plan.grid.cols,
        rows: plan.grid.rows,
        cells_per_sheet,
        output_sheets,
        fill_applied,
    })
}
