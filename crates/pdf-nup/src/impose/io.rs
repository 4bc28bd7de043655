//! Document I/O operations for imposition

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save the imposed document.
///
/// The document is serialised in memory first, so a failure leaves no
/// partial file at `path`.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let write_failure = |reason: String| NupError::WriteFailure {
        path: path.clone(),
        reason,
    };

    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer).map(|_| writer)
    })
    .await?
    .map_err(|e| write_failure(e.to_string()))?;

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| write_failure(e.to_string()))
}
