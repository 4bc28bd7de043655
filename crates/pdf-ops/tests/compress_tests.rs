use pdf_ops::*;
use rstest::rstest;

#[rstest]
#[case(0, "/default")]
#[case(1, "/prepress")]
#[case(2, "/printer")]
#[case(3, "/ebook")]
#[case(4, "/screen")]
fn test_compression_levels(#[case] level: u8, #[case] settings: &str) {
    assert_eq!(
        CompressionLevel::try_from(level).unwrap().pdf_settings(),
        settings
    );
}

#[test]
fn test_invalid_compression_level() {
    assert!(matches!(
        CompressionLevel::try_from(5),
        Err(OpsError::InvalidCompressionLevel(5))
    ));
}

#[test]
fn test_default_compression_is_printer() {
    assert_eq!(CompressionLevel::default(), CompressionLevel::Printer);
}

#[rstest]
#[case(0, "0B")]
#[case(345, "345B")]
#[case(1023, "1023B")]
#[case(1024, "1.0KB")]
#[case(1536, "1.5KB")]
#[case(1024 * 1024, "1.0MB")]
#[case(1572864, "1.5MB")]
fn test_format_file_size(#[case] size: u64, #[case] expected: &str) {
    assert_eq!(format_file_size(size), expected);
}

#[test]
fn test_report_ratio() {
    let smaller = CompressionReport {
        initial_size: 1000,
        final_size: 250,
    };
    assert!((smaller.ratio() - 0.75).abs() < 1e-9);
    assert!(!smaller.grew());

    let larger = CompressionReport {
        initial_size: 1000,
        final_size: 1200,
    };
    assert!(larger.ratio() < 0.0);
    assert!(larger.grew());

    let empty = CompressionReport {
        initial_size: 0,
        final_size: 0,
    };
    assert_eq!(empty.ratio(), 0.0);
}

#[tokio::test]
async fn test_compress_rejects_non_pdf_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, b"%PDF-1.7\n").unwrap();

    let result = compress(&input, dir.path().join("out.pdf"), CompressionLevel::default()).await;
    assert!(matches!(result, Err(OpsError::NotPdfExtension(path)) if path == input));
}

#[rstest]
#[case(b"hello world".as_slice())]
#[case(b"%PD".as_slice())]
#[case(b"".as_slice())]
#[tokio::test]
async fn test_compress_rejects_missing_pdf_header(#[case] contents: &[u8]) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fake.pdf");
    std::fs::write(&input, contents).unwrap();

    let result = compress(&input, dir.path().join("out.pdf"), CompressionLevel::Screen).await;
    assert!(matches!(result, Err(OpsError::NotPdf(path)) if path == input));
}

#[tokio::test]
async fn test_compress_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = compress(
        dir.path().join("missing.pdf"),
        dir.path().join("out.pdf"),
        CompressionLevel::default(),
    )
    .await;
    assert!(matches!(result, Err(OpsError::Io(_))));
}
