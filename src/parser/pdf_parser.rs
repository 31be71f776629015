//! Run collector: PDF document → [`RunDocument`].

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{RunDocument, TextRun, LETTER_HEIGHT};

use super::backend::{LopdfBackend, PageId, PdfBackend};
use super::layout::{extract_page_spans, spans_to_runs};
use super::options::{ErrorMode, PageSelection, ParseOptions};

/// PDF run collector.
///
/// Generic over the backend so the page walk can be exercised without real
/// PDF files.
pub struct PdfParser<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ParseOptions,
}

impl PdfParser<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_file(path)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_reader(reader)?;
        Ok(Self { backend, options })
    }

    /// PDF version from the file header (e.g., "1.7").
    pub fn version(&self) -> &str {
        self.backend.version()
    }
}

impl<B: PdfBackend> PdfParser<B> {
    /// Wrap an already-loaded backend.
    pub fn with_backend(backend: B, options: ParseOptions) -> Self {
        Self { backend, options }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Collect the document's text runs, page by page in reading order.
    ///
    /// `page_height` is the tallest page seen; `page_count` counts every page
    /// in the document even when a page selection is active.
    pub fn collect(&self) -> Result<RunDocument> {
        let pages = self.backend.pages();
        let page_count = pages.len() as u32;
        let strict = self.options.error_mode == ErrorMode::Strict;

        if page_count == 0 && strict {
            return Err(Error::Corrupted("document has no pages".to_string()));
        }
        if strict {
            if let Some(missing) = self.missing_selected_page(page_count) {
                return Err(Error::PageOutOfRange(missing, page_count));
            }
        }

        let mut runs = Vec::new();
        let mut page_height: f32 = 0.0;

        for (&page_num, &page_id) in &pages {
            let height = match self.backend.page_size(page_id) {
                Ok((_, h)) if h > 0.0 => h,
                Ok(_) => LETTER_HEIGHT,
                Err(e) if strict => return Err(e),
                Err(e) => {
                    log::warn!("Failed to read size of page {}: {}", page_num, e);
                    LETTER_HEIGHT
                }
            };
            page_height = page_height.max(height);

            if !self.options.pages.includes(page_num) {
                continue;
            }

            match self.collect_page(page_num, page_id, height) {
                Ok(page_runs) => runs.extend(page_runs),
                Err(e) if strict => return Err(e),
                Err(e) => log::warn!("Skipping page {}: {}", page_num, e),
            }
        }

        if page_height <= 0.0 {
            page_height = LETTER_HEIGHT;
        }

        log::debug!("Collected {} runs from {} pages", runs.len(), page_count);
        Ok(RunDocument::new(page_count, page_height, runs))
    }

    fn collect_page(&self, page_num: u32, page_id: PageId, height: f32) -> Result<Vec<TextRun>> {
        let spans = extract_page_spans(&self.backend, page_id)?;
        Ok(spans_to_runs(spans, page_num, height))
    }

    fn missing_selected_page(&self, page_count: u32) -> Option<u32> {
        match &self.options.pages {
            PageSelection::All => None,
            PageSelection::Range(range) => (*range.end() > page_count).then_some(*range.end()),
            PageSelection::Pages(pages) => pages.iter().copied().find(|&p| p > page_count),
        }
    }
}
