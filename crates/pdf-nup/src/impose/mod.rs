//! N-up imposition - laying several source pages onto each sheet
//!
//! This module orchestrates the imposition process:
//! 1. Read page sizes and check they all match
//! 2. Classify the page size against the target sheet
//! 3. Plan the grid and compose pages onto sheets
//! 4. Render the sheets to an output PDF

mod io;
mod sheet;

pub use io::{load_pdf, save_pdf};
pub use sheet::{Placement, Sheet, compose, validate_page_sizes};

use crate::layout::ImpositionPlan;
use crate::options::NupOptions;
use crate::render::{read_page_sizes, render_document};
use crate::types::*;
use lopdf::Document;
use log::info;

/// Main imposition function
pub async fn impose(document: &Document, options: &NupOptions) -> Result<Document> {
    let document = document.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || impose_sync(&document, &options)).await?
}

/// Blocking imposition; every input check runs before any sheet is built.
pub fn impose_sync(document: &Document, options: &NupOptions) -> Result<Document> {
    let pages = read_page_sizes(document)?;
    let page_size = validate_page_sizes(pages.iter().map(|(_, size)| *size))?;
    let plan = ImpositionPlan::new(page_size, options)?;

    let classification = &plan.classification;
    info!(
        "{} -> {} ({:?}), {} pages, {}x{} {}",
        classification.level.source_format(classification.sheet),
        classification.sheet,
        classification.level,
        pages.len(),
        plan.grid.cols,
        plan.grid.rows,
        plan.grid.orientation
    );

    let sheets = compose(pages, &plan.grid, plan.sheet_size(), options.fill)?;
    info!("Composed {} sheets", sheets.len());

    render_document(document, &sheets)
}
