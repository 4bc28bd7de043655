use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// N-up imposition configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NupOptions {
    /// Requested output sheet; may be upgraded from A4 to A3
    pub sheet: SheetSpec,

    /// Repeat a single source page into every cell
    pub fill: bool,

    /// Stack one-step layouts on a portrait sheet instead of side by side
    /// on a landscape one
    pub force_portrait: bool,
}

impl NupOptions {
    pub fn new(sheet: SheetSpec) -> Self {
        Self {
            sheet,
            ..Default::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| NupError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NupError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Whether fill mode applies to a document of `page_count` pages.
    ///
    /// Fill only works with a single page; otherwise the request is
    /// ignored and pages are laid out normally.
    pub fn fill_applies(&self, page_count: usize) -> bool {
        self.fill && page_count == 1
    }
}
