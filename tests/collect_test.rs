//! Integration tests for run collection from real PDF bytes.

mod common;

use pdfoutline::model::HeadingLevel;
use pdfoutline::{
    collect_runs, collect_runs_bytes, outline_bytes, outline_file, Error, Outliner, PageSelection,
    PdfParser,
};

#[test]
fn test_collect_runs_from_generated_pdf() {
    let data = common::sample_report();
    let doc = collect_runs_bytes(&data).unwrap();

    assert_eq!(doc.page_count, 3);
    assert_eq!(doc.page_height, 792.0);

    let title = &doc.runs[0];
    assert_eq!(title.text, "Annual Report");
    assert_eq!(title.page, 1);
    assert!(title.bold);
    assert!((title.font_size - 24.0).abs() < 0.01);
    // Baseline 720 in PDF space; top edge flipped to the top-left origin
    assert!((title.bbox.y0 - (792.0 - 720.0 - 24.0 * 0.8)).abs() < 0.01);
    assert!(title.bbox.y0 < title.bbox.y1);

    let pages: Vec<u32> = doc.runs.iter().map(|r| r.page).collect();
    assert!(pages.windows(2).all(|w| w[0] <= w[1]));
    assert!(doc.runs.iter().any(|r| r.text == "2. Methods" && r.page == 2));
    assert!(doc.runs.iter().all(|r| r.font_size > 0.0 && r.page >= 1));
}

#[test]
fn test_outline_from_generated_pdf() {
    let outline = outline_bytes(&common::sample_report()).unwrap();

    assert_eq!(outline.title, "Annual Report");
    let shape: Vec<(usize, &str, u32, HeadingLevel)> = outline
        .iter()
        .map(|(d, n)| (d, n.text.as_str(), n.page, n.level))
        .collect();
    assert_eq!(
        shape,
        vec![
            (1, "1. Introduction", 1, HeadingLevel::H1),
            (2, "1.1 Background", 1, HeadingLevel::H2),
            (1, "2. Methods", 2, HeadingLevel::H1),
            (2, "Key findings", 3, HeadingLevel::H4),
        ]
    );
}

#[test]
fn test_outline_file_and_page_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, common::sample_report()).unwrap();

    let full = outline_file(&path).unwrap();
    assert_eq!(full.total_headings(), 4);

    let first_page = Outliner::new()
        .with_pages(PageSelection::Range(1..=1))
        .outline_file(&path)
        .unwrap();
    assert_eq!(first_page.title, "Annual Report");
    assert!(first_page.iter().all(|(_, n)| n.page == 1));

    let doc = collect_runs(&path).unwrap();
    assert_eq!(doc.page_count, 3);
}

#[test]
fn test_page_selection_beyond_document() {
    let parser = PdfParser::from_bytes(&common::sample_report())
        .unwrap()
        .with_options(pdfoutline::ParseOptions::new().with_pages(PageSelection::Pages(vec![7])));
    assert!(matches!(parser.collect(), Err(Error::PageOutOfRange(7, 3))));
}

#[test]
fn test_pdf_without_text() {
    let data = common::build_pdf(&[vec![], vec![]]);
    let doc = collect_runs_bytes(&data).unwrap();
    assert_eq!(doc.page_count, 2);
    assert!(doc.is_empty());

    let outline = outline_bytes(&data).unwrap();
    assert!(outline.is_empty());
}

#[test]
fn test_version_from_header() {
    let parser = PdfParser::from_bytes(&common::sample_report()).unwrap();
    assert_eq!(parser.version(), "1.5");
    assert_eq!(parser.page_count(), 3);
}

#[test]
fn test_rejects_non_pdf() {
    assert!(matches!(
        collect_runs_bytes(b"<html><body>nope</body></html>"),
        Err(Error::UnknownFormat)
    ));
}
