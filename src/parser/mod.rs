//! PDF run collection module.

pub mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
pub use layout::{extract_page_spans, group_spans_into_lines, spans_to_runs, TextLine, TextSpan};
pub use options::{ErrorMode, PageSelection, ParseOptions};
pub use pdf_parser::PdfParser;
