//! # pdfoutline
//!
//! Heading outline inference for digitally generated PDF documents.
//!
//! The library reads the text of a PDF, decides which lines are running
//! headers, page numbers and other noise, levels the remaining lines as
//! H1–H4 headings from their size, weight and numbering, and nests them
//! under the document title. Embedded bookmarks are never consulted.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{outline_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = outline_file("report.pdf")?;
//!
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Script-aware**: Latin, CJK, Hangul, Devanagari and Tamil numbering patterns
//! - **Noise filtering**: page numbers, dates, URLs, running headers and footers
//! - **Stack-based nesting**: no recursion limit on deep outlines
//! - **Batch mode**: whole directories in parallel using Rayon
//! - **Mockable input**: the PDF library sits behind the `PdfBackend` trait

pub mod batch;
pub mod detect;
pub mod error;
pub mod infer;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{process_directory, BatchOptions, BatchReport};
pub use detect::{is_pdf_bytes, pdf_version};
pub use error::{Error, Result};
pub use infer::{infer_outline, InferOptions};
pub use model::{HeadingLevel, Outline, OutlineNode, RunDocument, TextRun};
pub use parser::{ErrorMode, PageSelection, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Collect the text runs of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::collect_runs;
///
/// let doc = collect_runs("report.pdf").unwrap();
/// for run in &doc.runs {
///     println!("p{} {:>5.1}pt {}", run.page, run.font_size, run.text);
/// }
/// ```
pub fn collect_runs<P: AsRef<Path>>(path: P) -> Result<RunDocument> {
    PdfParser::open(path)?.collect()
}

/// Collect the text runs of a PDF file with custom options.
pub fn collect_runs_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<RunDocument> {
    PdfParser::open_with_options(path, options)?.collect()
}

/// Collect the text runs of a PDF held in memory.
pub fn collect_runs_bytes(data: &[u8]) -> Result<RunDocument> {
    PdfParser::from_bytes(data)?.collect()
}

/// Infer the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::outline_file;
///
/// let outline = outline_file("report.pdf").unwrap();
/// println!("{} ({} headings)", outline.title, outline.total_headings());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    Outliner::new().outline_file(path)
}

/// Infer the outline of a PDF file with custom collection options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{outline_file_with_options, PageSelection, ParseOptions};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=20));
/// let outline = outline_file_with_options("report.pdf", options).unwrap();
/// ```
pub fn outline_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<Outline> {
    Outliner::new().with_parse_options(options).outline_file(path)
}

/// Infer the outline of a PDF held in memory.
pub fn outline_bytes(data: &[u8]) -> Result<Outline> {
    Outliner::new().outline_bytes(data)
}

/// Infer the outline of a PDF from a reader.
pub fn outline_reader<R: Read>(reader: R) -> Result<Outline> {
    Outliner::new().outline_reader(reader)
}

/// Infer the outline of already-collected runs with default thresholds.
pub fn outline_runs(doc: &RunDocument) -> Outline {
    infer_outline(doc, &InferOptions::default())
}

/// Builder chaining run collection and outline inference.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{InferOptions, JsonFormat, Outliner};
///
/// let outline = Outliner::new()
///     .lenient()
///     .with_infer_options(InferOptions::default().with_dedupe(false))
///     .outline_file("report.pdf")?;
/// let json = pdfoutline::render::to_json(&outline, JsonFormat::Compact)?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    parse_options: ParseOptions,
    infer_options: InferOptions,
}

impl Outliner {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Replace the collection options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the inference options.
    pub fn with_infer_options(mut self, options: InferOptions) -> Self {
        self.infer_options = options;
        self
    }

    /// Collection options in effect.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Inference options in effect.
    pub fn infer_options(&self) -> &InferOptions {
        &self.infer_options
    }

    /// Collect runs from a PDF file.
    pub fn collect_file<P: AsRef<Path>>(&self, path: P) -> Result<RunDocument> {
        PdfParser::open_with_options(path, self.parse_options.clone())?.collect()
    }

    /// Collect runs from PDF bytes.
    pub fn collect_bytes(&self, data: &[u8]) -> Result<RunDocument> {
        PdfParser::from_bytes_with_options(data, self.parse_options.clone())?.collect()
    }

    /// Infer the outline of already-collected runs.
    pub fn outline_runs(&self, doc: &RunDocument) -> Outline {
        infer_outline(doc, &self.infer_options)
    }

    /// Infer the outline of a PDF file.
    pub fn outline_file<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let doc = self.collect_file(path)?;
        Ok(self.outline_runs(&doc))
    }

    /// Infer the outline of PDF bytes.
    pub fn outline_bytes(&self, data: &[u8]) -> Result<Outline> {
        let doc = self.collect_bytes(data)?;
        Ok(self.outline_runs(&doc))
    }

    /// Infer the outline of a PDF read from a reader.
    pub fn outline_reader<R: Read>(&self, reader: R) -> Result<Outline> {
        let parser = PdfParser::from_reader_with_options(reader, self.parse_options.clone())?;
        let doc = parser.collect()?;
        Ok(self.outline_runs(&doc))
    }

    /// Infer the outline of a PDF file, returning the degraded outline
    /// `{"title": "", "children": []}` if the file cannot be read.
    pub fn outline_file_lenient<P: AsRef<Path>>(&self, path: P) -> Outline {
        let path = path.as_ref();
        match self.collect_file(path) {
            Ok(doc) => self.outline_runs(&doc),
            Err(e) => {
                log::warn!("{}: {}; using empty outline", path.display(), e);
                Outline::degraded()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outliner_builder() {
        let outliner = Outliner::new()
            .lenient()
            .with_pages(PageSelection::Pages(vec![1, 2]))
            .with_infer_options(InferOptions::default().with_dedupe(false));

        assert_eq!(outliner.parse_options().error_mode, ErrorMode::Lenient);
        assert!(outliner.parse_options().pages.includes(2));
        assert!(!outliner.infer_options().dedupe_headings);
    }

    #[test]
    fn test_outline_bytes_rejects_non_pdf() {
        assert!(matches!(outline_bytes(b"plain text"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_outline_file_lenient_degrades() {
        let outline = Outliner::new().outline_file_lenient("/no/such/file.pdf");
        assert_eq!(outline, Outline::degraded());
    }
}
