//! Directory batch processing.
//!
//! Every `*.pdf` in an input directory becomes `<stem>.json` in the output
//! directory. A document that cannot be read still produces a file holding
//! the degraded outline, so one bad input never stops the batch.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::infer::InferOptions;
use crate::model::Outline;
use crate::parser::{ErrorMode, ParseOptions};
use crate::render::{write_json, JsonFormat};
use crate::Outliner;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Collection options (always applied leniently)
    pub parse: ParseOptions,
    /// Inference thresholds
    pub infer: InferOptions,
    /// JSON layout of the output files
    pub format: JsonFormat,
    /// Process documents in parallel
    pub parallel: bool,
    /// Use the file stem as the title when none is found
    pub filename_title: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            infer: InferOptions::default(),
            format: JsonFormat::Pretty,
            parallel: true,
            filename_title: false,
        }
    }
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set collection options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set inference options.
    pub fn with_infer_options(mut self, infer: InferOptions) -> Self {
        self.infer = infer;
        self
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable the file-stem title fallback.
    pub fn with_filename_title(mut self, enabled: bool) -> Self {
        self.filename_title = enabled;
        self
    }

    fn outliner(&self) -> Outliner {
        Outliner::new()
            .with_parse_options(self.parse.clone().with_error_mode(ErrorMode::Lenient))
            .with_infer_options(self.infer.clone())
    }
}

/// Outcome for one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Outline inferred and written
    Ok,
    /// The document had no extractable text
    Empty,
    /// The document could not be read; the degraded outline was written
    Degraded(String),
    /// The output file could not be written
    Failed(String),
}

impl DocumentStatus {
    /// Whether an output file exists for the document.
    pub fn is_written(&self) -> bool {
        !matches!(self, DocumentStatus::Failed(_))
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Ok => f.write_str("ok"),
            DocumentStatus::Empty => f.write_str("no text"),
            DocumentStatus::Degraded(reason) => write!(f, "degraded ({})", reason),
            DocumentStatus::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Report for one input document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    /// Input PDF
    pub input: PathBuf,
    /// Output JSON path
    pub output: PathBuf,
    /// Processing outcome
    pub status: DocumentStatus,
    /// Title written to the output
    pub title: String,
    /// Number of headings written to the output
    pub headings: usize,
}

/// Report for a whole batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Per-document reports
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    /// Number of documents processed.
    pub fn total(&self) -> usize {
        self.documents.len()
    }

    /// Number of documents whose outline was inferred normally.
    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Ok | DocumentStatus::Empty))
    }

    /// Number of documents written with the degraded outline.
    pub fn degraded(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Degraded(_)))
    }

    /// Number of documents with no output file.
    pub fn failed(&self) -> usize {
        self.count(|s| !s.is_written())
    }

    /// Total headings across all outputs.
    pub fn total_headings(&self) -> usize {
        self.documents.iter().map(|d| d.headings).sum()
    }

    fn count(&self, pred: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.documents.iter().filter(|d| pred(&d.status)).count()
    }
}

/// List the PDF files directly inside a directory, sorted by path.
///
/// The `.pdf` extension is matched case-insensitively.
pub fn discover_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::Other(format!("Not a directory: {}", dir.display())));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Output path for an input PDF: `<output_dir>/<stem>.json`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}.json", file_stem(input)))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Process one PDF and write its JSON outline into `output_dir`.
///
/// Never fails: read errors degrade the outline and write errors are
/// reported in the status.
pub fn process_file(input: &Path, output_dir: &Path, options: &BatchOptions) -> DocumentReport {
    let output = output_path(input, output_dir);

    let outliner = options.outliner();

    let (mut outline, mut status) = match outliner.collect_file(input) {
        Ok(doc) if doc.is_empty() => (Outline::degraded(), DocumentStatus::Empty),
        Ok(doc) => (outliner.outline_runs(&doc), DocumentStatus::Ok),
        Err(e) => {
            log::warn!("{}: {}; writing empty outline", input.display(), e);
            (Outline::degraded(), DocumentStatus::Degraded(e.to_string()))
        }
    };

    if options.filename_title && outline.title.is_empty() {
        outline.title = file_stem(input);
    }

    if let Err(e) = write_json(&outline, &output, options.format) {
        log::warn!("Failed to write {}: {}", output.display(), e);
        status = DocumentStatus::Failed(e.to_string());
    }

    log::info!(
        "{} -> {} ({} headings, {})",
        input.display(),
        output.display(),
        outline.total_headings(),
        status
    );

    DocumentReport {
        input: input.to_path_buf(),
        output,
        status,
        headings: outline.total_headings(),
        title: outline.title,
    }
}

/// Process every PDF in `input_dir`, writing outlines into `output_dir`.
///
/// The output directory is created if needed.
pub fn process_directory<P, Q>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    process_directory_with_progress(input_dir, output_dir, options, |_| {})
}

/// Like [`process_directory`], calling `on_document` as each document
/// finishes (from worker threads when running in parallel).
pub fn process_directory_with_progress<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    on_document: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&DocumentReport) + Sync,
{
    let inputs = discover_pdfs(input_dir)?;
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    log::info!("Processing {} PDF files", inputs.len());

    let run = |input: &PathBuf| {
        let report = process_file(input, output_dir, options);
        on_document(&report);
        report
    };

    let documents: Vec<DocumentReport> = if options.parallel {
        inputs.par_iter().map(run).collect()
    } else {
        inputs.iter().map(run).collect()
    };

    Ok(BatchReport { documents })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_pdfs_sorted_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.Pdf"] {
            fs::write(dir.path().join(name), b"%PDF-1.4\n").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let found: Vec<String> = discover_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(found, vec!["a.PDF", "b.pdf", "c.Pdf"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        assert!(discover_pdfs("/definitely/not/here").is_err());
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("in/report.v2.PDF"), Path::new("out")),
            PathBuf::from("out/report.v2.json")
        );
    }

    #[test]
    fn test_unreadable_pdf_degrades() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let path = input.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.7\nthis is not a real document").unwrap();

        let report = process_file(&path, output.path(), &BatchOptions::default());
        assert!(matches!(report.status, DocumentStatus::Degraded(_)));

        let json = fs::read_to_string(output.path().join("broken.json")).unwrap();
        assert_eq!(json.trim(), "{\n  \"title\": \"\",\n  \"children\": []\n}");
    }

    #[test]
    fn test_filename_title_fallback() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let path = input.path().join("quarterly.pdf");
        fs::write(&path, b"garbage").unwrap();

        let options = BatchOptions::new()
            .with_filename_title(true)
            .with_format(JsonFormat::Compact);
        let report = process_file(&path, output.path(), &options);
        assert_eq!(report.title, "quarterly");

        let json = fs::read_to_string(&report.output).unwrap();
        assert_eq!(json.trim(), r#"{"title":"quarterly","children":[]}"#);
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport {
            documents: vec![
                DocumentReport {
                    input: "a.pdf".into(),
                    output: "a.json".into(),
                    status: DocumentStatus::Ok,
                    title: "A".into(),
                    headings: 3,
                },
                DocumentReport {
                    input: "b.pdf".into(),
                    output: "b.json".into(),
                    status: DocumentStatus::Degraded("bad xref".into()),
                    title: String::new(),
                    headings: 0,
                },
                DocumentReport {
                    input: "c.pdf".into(),
                    output: "c.json".into(),
                    status: DocumentStatus::Failed("read-only".into()),
                    title: "C".into(),
                    headings: 2,
                },
            ],
        };
        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.degraded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.total_headings(), 5);
    }
}
