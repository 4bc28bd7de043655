//! Compression through Ghostscript
//!
//! Ghostscript must be installed and on `PATH`.

use crate::types::*;
use log::{info, warn};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Executable names tried in order
const GHOSTSCRIPT_NAMES: [&str; 5] = ["gs", "gswin64c", "gswin32c", "gswin64", "gswin32"];

const PDF_MAGIC: &[u8; 5] = b"%PDF-";

/// Ghostscript `-dPDFSETTINGS` presets, from least to most aggressive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    Default,
    Prepress,
    #[default]
    Printer,
    Ebook,
    Screen,
}

impl CompressionLevel {
    pub fn pdf_settings(self) -> &'static str {
        match self {
            CompressionLevel::Default => "/default",
            CompressionLevel::Prepress => "/prepress",
            CompressionLevel::Printer => "/printer",
            CompressionLevel::Ebook => "/ebook",
            CompressionLevel::Screen => "/screen",
        }
    }
}

impl TryFrom<u8> for CompressionLevel {
    type Error = OpsError;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            0 => Ok(CompressionLevel::Default),
            1 => Ok(CompressionLevel::Prepress),
            2 => Ok(CompressionLevel::Printer),
            3 => Ok(CompressionLevel::Ebook),
            4 => Ok(CompressionLevel::Screen),
            other => Err(OpsError::InvalidCompressionLevel(other)),
        }
    }
}

/// File sizes before and after compression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {
    pub initial_size: u64,
    pub final_size: u64,
}

impl CompressionReport {
    /// Fraction saved; negative when the file grew
    pub fn ratio(&self) -> f64 {
        if self.initial_size == 0 {
            return 0.0;
        }
        1.0 - self.final_size as f64 / self.initial_size as f64
    }

    pub fn grew(&self) -> bool {
        self.final_size > self.initial_size
    }
}

/// Format file size in human-readable form, e.g. "1.5MB" or "345B"
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if size < KB {
        format!("{}B", size)
    } else if size < MB {
        format!("{:.1}KB", size as f64 / KB as f64)
    } else {
        format!("{:.1}MB", size as f64 / MB as f64)
    }
}

/// First Ghostscript executable found on `PATH`
pub fn find_ghostscript() -> Result<PathBuf> {
    GHOSTSCRIPT_NAMES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or_else(|| OpsError::GhostscriptNotFound(GHOSTSCRIPT_NAMES.join("/")))
}

/// Compress `input` into `output`.
pub async fn compress(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    level: CompressionLevel,
) -> Result<CompressionReport> {
    let input = input.as_ref();
    let output = output.as_ref();

    validate_pdf_input(input).await?;
    let gs = find_ghostscript()?;
    info!("Compress PDF with {}...", gs.display());

    let initial_size = tokio::fs::metadata(input).await?.len();

    let status = Command::new(&gs)
        .arg("-sDEVICE=pdfwrite")
        .arg("-dCompatibilityLevel=1.4")
        .arg(format!("-dPDFSETTINGS={}", level.pdf_settings()))
        .arg("-dNOPAUSE")
        .arg("-dQUIET")
        .arg("-dBATCH")
        .arg(format!("-sOutputFile={}", output.display()))
        .arg(input)
        .status()
        .await?;

    if !status.success() {
        return Err(OpsError::GhostscriptFailed(status));
    }

    let final_size = match tokio::fs::metadata(output).await {
        Ok(meta) => meta.len(),
        Err(_) => return Err(OpsError::MissingOutput(output.to_owned())),
    };

    let report = CompressionReport {
        initial_size,
        final_size,
    };
    if report.grew() {
        warn!(
            "Compressed file is {:.0}% larger than original",
            -report.ratio() * 100.0
        );
    }
    Ok(report)
}

/// Compress `input` and replace it with the result.
///
/// With `backup` set, the original is first copied to
/// `<stem>_BACKUP_<timestamp>.pdf` next to it. Returns the report and the
/// backup path.
pub async fn compress_in_place(
    input: impl AsRef<Path>,
    level: CompressionLevel,
    backup: bool,
) -> Result<(CompressionReport, Option<PathBuf>)> {
    let input = input.as_ref();
    let dir = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
        _ => PathBuf::from("."),
    };

    let temp = tempfile::Builder::new()
        .prefix("compress_")
        .suffix(".pdf")
        .tempfile_in(&dir)?;
    let report = compress(input, temp.path(), level).await?;

    let backup_path = if backup {
        let path = backup_path(input);
        if tokio::fs::try_exists(&path).await? {
            return Err(OpsError::BackupExists(path));
        }
        tokio::fs::copy(input, &path).await?;
        info!("Backup created: {}", path.display());
        Some(path)
    } else {
        None
    };

    tokio::fs::copy(temp.path(), input).await?;
    Ok((report, backup_path))
}

fn backup_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    input.with_file_name(format!("{}_BACKUP_{}.pdf", stem, timestamp))
}

/// Reject inputs without a `.pdf` extension or `%PDF-` header.
async fn validate_pdf_input(input: &Path) -> Result<()> {
    let has_pdf_extension = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !has_pdf_extension {
        return Err(OpsError::NotPdfExtension(input.to_owned()));
    }

    let mut header = [0u8; 5];
    let mut file = tokio::fs::File::open(input).await?;
    match file.read_exact(&mut header).await {
        Ok(_) if &header == PDF_MAGIC => Ok(()),
        Ok(_) => Err(OpsError::NotPdf(input.to_owned())),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Err(OpsError::NotPdf(input.to_owned()))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_keeps_directory() {
        let path = backup_path(Path::new("/tmp/docs/report.pdf"));
        assert_eq!(path.parent(), Some(Path::new("/tmp/docs")));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("report_BACKUP_"));
        assert!(name.ends_with(".pdf"));
    }
}
