//! Splitting a document into several files

use crate::pages::page_ids;
use crate::types::*;
use lopdf::Document;
use log::warn;

/// How to split a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// One file per page
    #[default]
    EveryPage,
    /// Two files: pages `1..=n` and `n+1..`
    At(usize),
}

impl From<usize> for SplitMode {
    /// `0` splits every page, any other value splits after that page
    fn from(page: usize) -> Self {
        match page {
            0 => SplitMode::EveryPage,
            n => SplitMode::At(n),
        }
    }
}

/// One output of a split
#[derive(Debug, Clone)]
pub struct SplitPart {
    /// Number used in the output file name (`<stem>_page_<n>.pdf`)
    pub number: usize,
    /// Pages taken from the source, 1-based and inclusive
    pub first_page: u32,
    pub last_page: u32,
    pub document: Document,
}

impl SplitPart {
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}_page_{}.pdf", stem, self.number)
    }

    pub fn page_count(&self) -> usize {
        (self.last_page - self.first_page + 1) as usize
    }
}

/// Split `doc` according to `mode`.
pub fn split_document(doc: &Document, mode: SplitMode) -> Result<Vec<SplitPart>> {
    let total = page_ids(doc)?.len();

    let ranges: Vec<(u32, u32)> = match mode {
        SplitMode::EveryPage | SplitMode::At(0) => {
            if total == 1 {
                warn!("PDF has only 1 page. Creating single-page output file.");
            }
            (1..=total as u32).map(|page| (page, page)).collect()
        }
        SplitMode::At(page) if total == 1 => return Err(OpsError::SplitSinglePage(page)),
        SplitMode::At(page) if page >= total => {
            return Err(OpsError::SplitOutOfRange { page, pages: total });
        }
        SplitMode::At(page) => vec![(1, page as u32), (page as u32 + 1, total as u32)],
    };

    Ok(ranges
        .into_iter()
        .enumerate()
        .map(|(index, (first_page, last_page))| SplitPart {
            number: index + 1,
            first_page,
            last_page,
            document: extract_range(doc, first_page, last_page, total as u32),
        })
        .collect())
}

/// Copy of `doc` keeping only pages `first..=last`
fn extract_range(doc: &Document, first: u32, last: u32, total: u32) -> Document {
    let mut part = doc.clone();
    let remove: Vec<u32> = (1..=total)
        .filter(|page| *page < first || *page > last)
        .collect();

    if !remove.is_empty() {
        part.delete_pages(&remove);
        part.prune_objects();
    }
    part
}
