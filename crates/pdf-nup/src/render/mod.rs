//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Reading page dimensions (with page-tree inheritance)
//! - Creating XObjects from source pages
//! - Building the output document from composed sheets

mod page;
mod xobject;

pub use page::render_document;
pub use xobject::{media_box, read_page_sizes};
