use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{A3_HEIGHT_PT, A3_WIDTH_PT, A4_HEIGHT_PT, A4_WIDTH_PT};

#[derive(Error, Debug)]
pub enum NupError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("PDF file has no pages")]
    EmptyDocument,
    #[error("Page {page} has no MediaBox")]
    MissingMediaBox { page: usize },
    #[error("Page {page} has different dimensions ({actual}) than first page ({expected})")]
    InconsistentPageSize {
        /// 1-based page number
        page: usize,
        actual: PageSize,
        expected: PageSize,
    },
    #[error(
        "Unknown paper size: page diagonal {source_diagonal:.1}pt matches no known fraction of the {target_diagonal:.1}pt sheet"
    )]
    UnsupportedPageSize {
        source_diagonal: f32,
        target_diagonal: f32,
    },
    #[error("Cannot merge this file: pages are already {sheet} sized")]
    SameSize { sheet: SheetSpec },
    #[error("Error writing output file '{}': {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, NupError>;

/// Sheet orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// Page dimensions in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Dimensions rounded to whole points, absorbing unit-conversion jitter
    /// such as 595.276 vs 595.
    pub fn rounded(width: f32, height: f32) -> Self {
        Self::new(width.round(), height.round())
    }

    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Target sheet sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SheetSpec {
    A3,
    #[default]
    A4,
}

impl SheetSpec {
    /// Portrait dimensions in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            SheetSpec::A3 => (A3_WIDTH_PT, A3_HEIGHT_PT),
            SheetSpec::A4 => (A4_WIDTH_PT, A4_HEIGHT_PT),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> PageSize {
        let (w, h) = self.dimensions_pt();
        match orientation {
            Orientation::Portrait => PageSize::new(w, h),
            Orientation::Landscape => PageSize::new(h, w),
        }
    }

    pub fn diagonal(self) -> f32 {
        let (w, h) = self.dimensions_pt();
        PageSize::new(w, h).diagonal()
    }

    /// The `n` in "A`n`"
    pub fn iso_number(self) -> u8 {
        match self {
            SheetSpec::A3 => 3,
            SheetSpec::A4 => 4,
        }
    }

    /// The next larger supported sheet, if any
    pub fn upgrade(self) -> Option<SheetSpec> {
        match self {
            SheetSpec::A4 => Some(SheetSpec::A3),
            SheetSpec::A3 => None,
        }
    }
}

impl fmt::Display for SheetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.iso_number())
    }
}

impl FromStr for SheetSpec {
    type Err = NupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A3" => Ok(SheetSpec::A3),
            "A4" => Ok(SheetSpec::A4),
            other => Err(NupError::Config(format!(
                "Unsupported sheet size '{}', expected A4 or A3",
                other
            ))),
        }
    }
}

/// How many halvings of area separate a source page from the sheet.
///
/// Each step shrinks the diagonal by roughly 1/sqrt(2), so one step is
/// A5 on A4, two steps A6 on A4, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShrinkLevel {
    OneStep,
    TwoStep,
    ThreeStep,
    FourStep,
    FiveStep,
}

impl ShrinkLevel {
    pub fn steps(self) -> u8 {
        match self {
            ShrinkLevel::OneStep => 1,
            ShrinkLevel::TwoStep => 2,
            ShrinkLevel::ThreeStep => 3,
            ShrinkLevel::FourStep => 4,
            ShrinkLevel::FiveStep => 5,
        }
    }

    /// Grid (columns, rows) in the level's natural orientation.
    ///
    /// `OneStep` is given in landscape; the planner transposes it when a
    /// portrait layout is forced.
    pub fn grid_dimensions(self) -> (usize, usize) {
        match self {
            ShrinkLevel::OneStep => (2, 1),
            ShrinkLevel::TwoStep => (2, 2),
            ShrinkLevel::ThreeStep => (4, 2),
            ShrinkLevel::FourStep => (4, 4),
            ShrinkLevel::FiveStep => (8, 4),
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            ShrinkLevel::OneStep | ShrinkLevel::ThreeStep | ShrinkLevel::FiveStep => {
                Orientation::Landscape
            }
            ShrinkLevel::TwoStep | ShrinkLevel::FourStep => Orientation::Portrait,
        }
    }

    pub fn cells_per_sheet(self) -> usize {
        let (cols, rows) = self.grid_dimensions();
        cols * rows
    }

    /// Nominal A-series name of a page this many steps below `sheet`
    pub fn source_format(self, sheet: SheetSpec) -> String {
        format!("A{}", sheet.iso_number() + self.steps())
    }
}
