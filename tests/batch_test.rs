//! Integration tests for directory batch processing.

mod common;

use std::fs;

use pdfoutline::batch::{self, BatchOptions, DocumentStatus};
use pdfoutline::{JsonFormat, Outline};

fn read_outline(path: &std::path::Path) -> Outline {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_process_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("nested").join("outlines");

    fs::write(input.path().join("report.pdf"), common::sample_report()).unwrap();
    fs::write(input.path().join("blank.PDF"), common::build_pdf(&[vec![]])).unwrap();
    fs::write(input.path().join("broken.pdf"), b"%PDF-1.4\ntruncated").unwrap();
    fs::write(input.path().join("readme.txt"), b"not a pdf").unwrap();

    let report = batch::process_directory(input.path(), &out_dir, &BatchOptions::default()).unwrap();

    assert_eq!(report.total(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.degraded(), 1);
    assert_eq!(report.failed(), 0);

    let names: Vec<String> = report
        .documents
        .iter()
        .map(|d| d.input.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["blank.PDF", "broken.pdf", "report.pdf"]);
    assert_eq!(report.documents[0].status, DocumentStatus::Empty);

    let outline = read_outline(&out_dir.join("report.json"));
    assert_eq!(outline.title, "Annual Report");
    assert_eq!(outline.total_headings(), 4);

    assert_eq!(read_outline(&out_dir.join("blank.json")), Outline::degraded());
    assert_eq!(read_outline(&out_dir.join("broken.json")), Outline::degraded());
    assert!(!out_dir.join("readme.json").exists());
}

#[test]
fn test_sequential_matches_parallel() {
    let input = tempfile::tempdir().unwrap();
    for name in ["a", "b", "c", "d"] {
        fs::write(input.path().join(format!("{}.pdf", name)), common::sample_report()).unwrap();
    }

    let parallel_out = tempfile::tempdir().unwrap();
    let sequential_out = tempfile::tempdir().unwrap();
    batch::process_directory(input.path(), parallel_out.path(), &BatchOptions::default()).unwrap();
    batch::process_directory(
        input.path(),
        sequential_out.path(),
        &BatchOptions::new().sequential(),
    )
    .unwrap();

    for name in ["a", "b", "c", "d"] {
        let file = format!("{}.json", name);
        assert_eq!(
            fs::read(parallel_out.path().join(&file)).unwrap(),
            fs::read(sequential_out.path().join(&file)).unwrap()
        );
    }
}

#[test]
fn test_progress_callback_and_options() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("blank.pdf"), common::build_pdf(&[vec![]])).unwrap();
    fs::write(input.path().join("report.pdf"), common::sample_report()).unwrap();

    let options = BatchOptions::new()
        .with_format(JsonFormat::Compact)
        .with_filename_title(true);
    let seen = std::sync::atomic::AtomicUsize::new(0);
    let report = batch::process_directory_with_progress(input.path(), output.path(), &options, |_| {
        seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(seen.into_inner(), 2);
    assert_eq!(report.documents[0].title, "blank");

    let blank = fs::read_to_string(output.path().join("blank.json")).unwrap();
    assert_eq!(blank.trim(), r#"{"title":"blank","children":[]}"#);

    let json = fs::read_to_string(output.path().join("report.json")).unwrap();
    assert!(json.starts_with(r#"{"title":"Annual Report","children":[{"level":"H1""#));
}

#[test]
fn test_missing_input_directory() {
    let output = tempfile::tempdir().unwrap();
    let result = batch::process_directory(
        output.path().join("missing"),
        output.path(),
        &BatchOptions::default(),
    );
    assert!(result.is_err());
}
