use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdft", about = "PDF tools CLI", version)]
struct Cli {
    /// Log per-page progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Put several A-series pages onto each A4 or A3 sheet
    Nup {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file [default: ./<input stem>_out.pdf]
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output sheet size [default: a4]
        #[arg(short, long, value_enum, ignore_case = true)]
        size: Option<SizeArg>,

        /// Repeat a single-page input into every cell
        #[arg(short, long)]
        fill: bool,

        /// Stack two pages on a portrait sheet instead of side by side
        #[arg(short, long)]
        rotate: bool,

        /// Load options from a JSON file; flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,

        /// Open the result in the default viewer
        #[arg(long)]
        open: bool,
    },

    /// Merge PDF files in the given order
    Merge {
        /// Input PDF files
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long = "output", visible_alias = "out", default_value = "merge_file.pdf")]
        out: PathBuf,

        #[arg(long)]
        open: bool,
    },

    /// Split a PDF into one file per page, or in two after a page
    Split {
        input: PathBuf,

        /// Last page of the first file; 0 writes every page separately
        #[arg(short, long, default_value = "0")]
        page: usize,

        #[arg(long)]
        open: bool,
    },

    /// Rotate every page clockwise
    Rotate {
        input: PathBuf,

        /// Output PDF file [default: <input>_rotated.pdf]
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Degrees: 90, 180 or 270
        #[arg(short, long, default_value = "90")]
        rotation: u16,

        #[arg(long)]
        open: bool,
    },

    /// Extract text to a UTF-8 file
    Text {
        input: PathBuf,

        /// Output text file [default: <input>.txt]
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(long)]
        open: bool,
    },

    /// Compress a PDF with Ghostscript
    Compress {
        input: PathBuf,

        /// Output PDF file; without it the input is replaced
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// 0 default, 1 prepress, 2 printer, 3 ebook, 4 screen
        #[arg(short, long = "compress", default_value = "2")]
        compress_level: u8,

        /// Back up the input before replacing it
        #[arg(short, long)]
        backup: bool,

        #[arg(long)]
        open: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SizeArg {
    A4,
    A3,
}

impl From<SizeArg> for pdf_nup::SheetSpec {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::A4 => Self::A4,
            SizeArg::A3 => Self::A3,
        }
    }
}

/// `<dir>/<stem><suffix>` next to `input`
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    input.with_file_name(format!("{}{}", file_stem(input), suffix))
}

/// `<stem><suffix>` in the working directory
fn working_dir_path(input: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", file_stem(input), suffix))
}

fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// Launch the platform viewer; failure is only logged
fn open_in_viewer(path: &Path) {
    let program = if cfg!(target_os = "windows") {
        "explorer.exe"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    if let Err(e) = std::process::Command::new(program).arg(path).spawn() {
        warn!("Could not open {} with {}: {}", path.display(), program, e);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[allow(clippy::too_many_arguments)]
async fn run_nup(
    input: PathBuf,
    out: Option<PathBuf>,
    size: Option<SizeArg>,
    fill: bool,
    rotate: bool,
    config: Option<PathBuf>,
    stats_only: bool,
    open: bool,
) -> Result<()> {
    let mut options = match &config {
        Some(path) => pdf_nup::NupOptions::load(path)
            .await
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => pdf_nup::NupOptions::default(),
    };
    if let Some(size) = size {
        options.sheet = size.into();
    }
    options.fill |= fill;
    options.force_portrait |= rotate;

    let document = pdf_nup::load_pdf(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let stats = pdf_nup::calculate_statistics(&document, &options)?;
    println!("Imposition Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!(
        "  Page size: {} ({})",
        stats.page_size, stats.source_format
    );
    println!(
        "  Sheet: {} {} ({}x{}, {} per sheet)",
        stats.sheet, stats.orientation, stats.columns, stats.rows, stats.cells_per_sheet
    );
    println!("  Output sheets: {}", stats.output_sheets);
    if stats.fill_applied {
        println!("  Fill: repeating the page into every cell");
    }

    if stats_only {
        return Ok(());
    }

    let output = out.unwrap_or_else(|| working_dir_path(&input, "_out.pdf"));
    let imposed = pdf_nup::impose(&document, &options).await?;
    pdf_nup::save_pdf(imposed, &output).await?;
    println!("Imposed → {}", output.display());

    if open {
        open_in_viewer(&output);
    }
    Ok(())
}

async fn run_merge(inputs: Vec<PathBuf>, out: PathBuf, open: bool) -> Result<()> {
    let mut documents = Vec::with_capacity(inputs.len());
    for path in &inputs {
        let doc = pdf_ops::load_pdf(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        documents.push(doc);
    }

    let merged = pdf_ops::merge_documents(documents)?;
    let pages = merged.get_pages().len();
    pdf_ops::save_pdf(merged, &out)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!(
        "Merged {} files ({} pages) → {}",
        inputs.len(),
        pages,
        out.display()
    );

    if open {
        open_in_viewer(&out);
    }
    Ok(())
}

async fn run_split(input: PathBuf, page: usize, open: bool) -> Result<()> {
    let document = pdf_ops::load_pdf(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let parts = pdf_ops::split_document(&document, page.into())?;
    let stem = file_stem(&input);
    let total = parts.len();

    let mut first_output = None;
    for part in parts {
        let path = PathBuf::from(part.file_name(&stem));
        info!(
            "  [{}/{}] Pages {}-{} → {}",
            part.number,
            total,
            part.first_page,
            part.last_page,
            path.display()
        );
        pdf_ops::save_pdf(part.document, &path)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        first_output.get_or_insert(path);
    }
    println!("Split {} into {} files", input.display(), total);

    if let (true, Some(path)) = (open, first_output) {
        open_in_viewer(&path);
    }
    Ok(())
}

async fn run_rotate(
    input: PathBuf,
    out: Option<PathBuf>,
    rotation: u16,
    open: bool,
) -> Result<()> {
    let rotation = pdf_ops::Rotation::try_from(rotation)?;
    let mut document = pdf_ops::load_pdf(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let pages = pdf_ops::rotate_document(&mut document, rotation)?;
    let output = out.unwrap_or_else(|| sibling_path(&input, "_rotated.pdf"));
    pdf_ops::save_pdf(document, &output)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Rotated {} pages by {}° → {}",
        pages,
        rotation.degrees(),
        output.display()
    );

    if open {
        open_in_viewer(&output);
    }
    Ok(())
}

async fn run_text(input: PathBuf, out: Option<PathBuf>, open: bool) -> Result<()> {
    let document = pdf_ops::load_pdf(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let extracted = pdf_ops::extract_text(&document)?;
    match extracted.quality() {
        pdf_ops::TextQuality::Empty => {
            warn!("No text found. The PDF may be a scanned image; OCR would be needed.")
        }
        pdf_ops::TextQuality::Sparse => warn!(
            "Only {} characters extracted. The PDF may be mostly images.",
            extracted.char_count()
        ),
        pdf_ops::TextQuality::Normal => {}
    }

    let output = out.unwrap_or_else(|| sibling_path(&input, ".txt"));
    tokio::fs::write(&output, extracted.text())
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Extracted {} characters from {} pages → {}",
        extracted.char_count(),
        extracted.pages.len(),
        output.display()
    );

    if open {
        open_in_viewer(&output);
    }
    Ok(())
}

async fn run_compress(
    input: PathBuf,
    out: Option<PathBuf>,
    level: u8,
    backup: bool,
    open: bool,
) -> Result<()> {
    let level = pdf_ops::CompressionLevel::try_from(level)?;
    if !tokio::fs::try_exists(&input).await.unwrap_or(false) {
        bail!("Input file not found: {}", input.display());
    }
    if backup && out.is_some() {
        warn!("--backup only applies when compressing in place; ignoring it");
    }

    let (report, output) = match out {
        Some(output) => {
            let report = pdf_ops::compress(&input, &output, level).await?;
            (report, output)
        }
        None => {
            let (report, backup_path) = pdf_ops::compress_in_place(&input, level, backup).await?;
            if let Some(path) = backup_path {
                println!("Backup: {}", path.display());
            }
            (report, input)
        }
    };

    println!(
        "Compressed {} → {} ({:.1}% reduction) → {}",
        pdf_ops::format_file_size(report.initial_size),
        pdf_ops::format_file_size(report.final_size),
        report.ratio() * 100.0,
        output.display()
    );

    if open {
        open_in_viewer(&output);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Nup {
            input,
            out,
            size,
            fill,
            rotate,
            config,
            stats_only,
            open,
        } => run_nup(input, out, size, fill, rotate, config, stats_only, open).await,
        Commands::Merge { inputs, out, open } => run_merge(inputs, out, open).await,
        Commands::Split { input, page, open } => run_split(input, page, open).await,
        Commands::Rotate {
            input,
            out,
            rotation,
            open,
        } => run_rotate(input, out, rotation, open).await,
        Commands::Text { input, out, open } => run_text(input, out, open).await,
        Commands::Compress {
            input,
            out,
            compress_level,
            backup,
            open,
        } => run_compress(input, out, compress_level, backup, open).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_nup_flags() {
        let cli = Cli::parse_from(["pdft", "nup", "book.pdf", "-s", "A3", "-f", "-r"]);
        match cli.command {
            Commands::Nup {
                input,
                size,
                fill,
                rotate,
                out,
                ..
            } => {
                assert_eq!(input, PathBuf::from("book.pdf"));
                assert!(matches!(size, Some(SizeArg::A3)));
                assert!(fill);
                assert!(rotate);
                assert!(out.is_none());
            }
            _ => panic!("Expected nup command"),
        }
    }

    #[test]
    fn test_merge_requires_inputs() {
        assert!(Cli::try_parse_from(["pdft", "merge"]).is_err());
    }

    #[test]
    fn test_nup_and_split_outputs_land_in_working_dir() {
        assert_eq!(
            working_dir_path(Path::new("/docs/book.pdf"), "_out.pdf"),
            PathBuf::from("book_out.pdf")
        );
        assert_eq!(
            working_dir_path(Path::new("../scans/notes.PDF"), "_page_1.pdf"),
            PathBuf::from("notes_page_1.pdf")
        );
    }

    #[test]
    fn test_merge_output_flag() {
        for flag in ["-o", "--output", "--out"] {
            let cli = Cli::parse_from(["pdft", "merge", "a.pdf", "b.pdf", flag, "both.pdf"]);
            match cli.command {
                Commands::Merge { inputs, out, .. } => {
                    assert_eq!(inputs.len(), 2);
                    assert_eq!(out, PathBuf::from("both.pdf"));
                }
                _ => panic!("Expected merge command"),
            }
        }

        match Cli::parse_from(["pdft", "merge", "a.pdf"]).command {
            Commands::Merge { out, .. } => assert_eq!(out, PathBuf::from("merge_file.pdf")),
            _ => panic!("Expected merge command"),
        }
    }

    #[test]
    fn test_compress_level_flag() {
        for flag in ["-c", "--compress"] {
            let cli = Cli::parse_from(["pdft", "compress", "big.pdf", flag, "4", "-b"]);
            match cli.command {
                Commands::Compress {
                    compress_level,
                    backup,
                    ..
                } => {
                    assert_eq!(compress_level, 4);
                    assert!(backup);
                }
                _ => panic!("Expected compress command"),
            }
        }
    }

    #[test]
    fn test_sibling_path() {
        assert_eq!(
            sibling_path(Path::new("/docs/book.pdf"), "_out.pdf"),
            PathBuf::from("/docs/book_out.pdf")
        );
        assert_eq!(
            sibling_path(Path::new("book.pdf"), ".txt"),
            PathBuf::from("book.txt")
        );
    }
}
