//! Text extraction

use crate::pages::{flatten_inherited, page_ids};
use crate::types::*;
use lopdf::Document;
use log::{debug, warn};

/// Below this many characters a document is probably mostly images
const SPARSE_TEXT_THRESHOLD: usize = 100;

/// How much text a document yielded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextQuality {
    /// No text layer at all, likely a scan
    Empty,
    /// Only a little text, likely mostly images
    Sparse,
    Normal,
}

/// Text of each page in order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedText {
    pub pages: Vec<String>,
}

impl ExtractedText {
    /// Pages joined with newlines
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|page| page.chars().count()).sum()
    }

    pub fn quality(&self) -> TextQuality {
        match self.char_count() {
            0 => TextQuality::Empty,
            n if n < SPARSE_TEXT_THRESHOLD => TextQuality::Sparse,
            _ => TextQuality::Normal,
        }
    }
}

/// Extract the text of every page.
///
/// A page whose text cannot be decoded contributes an empty string.
pub fn extract_text(doc: &Document) -> Result<ExtractedText> {
    let ids = page_ids(doc)?;
    let total = ids.len();

    // Font lookup only sees the page's own resources
    let mut doc = doc.clone();
    for page_id in ids {
        flatten_inherited(&mut doc, page_id)?;
    }

    let pages = doc
        .get_pages()
        .into_keys()
        .map(|number| {
            debug!("  [{}/{}] Processing page {}...", number, total, number);
            doc.extract_text(&[number]).unwrap_or_else(|e| {
                warn!("Could not extract text from page {}: {}", number, e);
                String::new()
            })
        })
        .collect();

    Ok(ExtractedText { pages })
}
