use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No input files provided")]
    NoInputs,
    #[error("PDF file has no pages")]
    EmptyDocument,
    #[error("Cannot split a 1-page PDF at page {0}. Use page 0 to extract the single page.")]
    SplitSinglePage(usize),
    #[error(
        "Cannot split at page {page}. PDF only has {pages} pages. Use a number between 1 and {}.",
        .pages - 1
    )]
    SplitOutOfRange { page: usize, pages: usize },
    #[error("Rotation must be 90, 180 or 270 degrees (received: {0})")]
    InvalidRotation(u16),
    #[error("Compression level must be between 0 and 4 (received: {0})")]
    InvalidCompressionLevel(u8),
    #[error("Input file must have .pdf extension: '{}'", .0.display())]
    NotPdfExtension(PathBuf),
    #[error("File does not appear to be a valid PDF: '{}'", .0.display())]
    NotPdf(PathBuf),
    #[error("No Ghostscript executable was found on path ({0})")]
    GhostscriptNotFound(String),
    #[error("Ghostscript compression failed with {0}")]
    GhostscriptFailed(ExitStatus),
    #[error("Output file '{}' was not created", .0.display())]
    MissingOutput(PathBuf),
    #[error("Backup file already exists: '{}'", .0.display())]
    BackupExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, OpsError>;
