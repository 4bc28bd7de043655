//! Whole-document PDF utilities: merge, split, rotate, text extraction and
//! Ghostscript compression.

mod compress;
mod io;
mod merge;
mod pages;
mod rotate;
mod split;
mod text;
mod types;

pub use compress::{
    CompressionLevel, CompressionReport, compress, compress_in_place, find_ghostscript,
    format_file_size,
};
pub use io::{load_pdf, save_pdf};
pub use merge::merge_documents;
pub use rotate::{Rotation, rotate_document};
pub use split::{SplitMode, SplitPart, split_document};
pub use text::{ExtractedText, TextQuality, extract_text};
pub use types::*;
