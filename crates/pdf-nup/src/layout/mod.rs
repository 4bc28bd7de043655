//! Layout planning for N-up imposition
//!
//! This module turns a classified page size into geometry:
//! - Grid dimensions and sheet orientation per shrink level
//! - The tiling order in which cells receive pages
//! - The combined plan the compositor and statistics work from

mod grid;
mod imposition;
mod types;

pub use grid::*;
pub use imposition::*;
pub use types::*;
