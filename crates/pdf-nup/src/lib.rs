//! N-up imposition for ISO A-series documents.
//!
//! Detects how many source pages fit onto an A4 or A3 sheet from the page
//! dimensions alone, lays them out on a fixed grid and composites them
//! into a new document without rescaling.

pub mod classify;
mod constants;
pub mod impose;
pub mod layout;
mod options;
mod render;
mod stats;
mod types;

pub use classify::{Classification, classify};
pub use constants::{RATIO_BANDS, RatioBand};
pub use impose::{
    Placement, Sheet, compose, impose, impose_sync, load_pdf, save_pdf, validate_page_sizes,
};
pub use layout::{GridCell, GridPlan, ImpositionPlan, plan, tiling_order};
pub use options::NupOptions;
pub use render::{media_box, read_page_sizes, render_document};
pub use stats::{NupStatistics, calculate_statistics, statistics_for};
pub use types::*;
