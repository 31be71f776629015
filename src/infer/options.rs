//! Heading inference configuration.

/// Thresholds and switches for the heading inference engine.
#[derive(Debug, Clone, PartialEq)]
pub struct InferOptions {
    /// Minimum font size ratio to body text for H1
    pub h1_min_ratio: f32,

    /// Minimum font size ratio to body text for H2
    pub h2_min_ratio: f32,

    /// Minimum font size ratio to body text for H3
    pub h3_min_ratio: f32,

    /// Ratio above 1.0 that still counts as body size (0.0 keeps every
    /// larger run eligible for H4)
    pub ratio_tolerance: f32,

    /// Whether bold runs at body size may qualify as H4
    pub detect_from_bold: bool,

    /// Bold runs smaller than this ratio to body text are ignored
    pub bold_min_ratio: f32,

    /// Maximum word count for a bold-only heading
    pub bold_max_words: usize,

    /// Whether structural patterns ("1.1", "Chapter 3", "第2章") qualify runs
    pub detect_from_patterns: bool,

    /// Longest heading text in characters
    pub max_heading_chars: usize,

    /// Shortest meaningful text in characters
    pub min_text_chars: usize,

    /// Shortest meaningful text when written purely in a non-Latin script
    pub min_non_latin_chars: usize,

    /// Minimum share of letters among visible characters
    pub min_alphabetic_ratio: f32,

    /// Fraction of the page height treated as header/footer band
    pub edge_band_fraction: f32,

    /// Fraction of pages a text must recur on to count as repeated
    pub repeat_page_fraction: f32,

    /// Minimum number of pages a text must recur on to count as repeated
    pub min_repeat_pages: usize,

    /// Number of distinct vertical positions at the top of page 1 searched
    /// for the title
    pub title_top_positions: usize,

    /// Minimum font size ratio for a title chosen by size
    pub title_min_ratio: f32,

    /// Join continuation lines of a multi-line title
    pub merge_title_lines: bool,

    /// Drop headings whose text already appeared earlier in the document
    pub dedupe_headings: bool,
}

impl InferOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size ratio bands for H1, H2 and H3.
    pub fn with_ratio_bands(mut self, h1: f32, h2: f32, h3: f32) -> Self {
        self.h1_min_ratio = h1;
        self.h2_min_ratio = h2;
        self.h3_min_ratio = h3;
        self
    }

    /// Treat ratios up to `1.0 + tolerance` as body size.
    pub fn with_ratio_tolerance(mut self, tolerance: f32) -> Self {
        self.ratio_tolerance = tolerance.max(0.0);
        self
    }

    /// Enable or disable bold-only headings.
    pub fn with_bold_detection(mut self, enabled: bool) -> Self {
        self.detect_from_bold = enabled;
        self
    }

    /// Enable or disable pattern-based headings.
    pub fn with_pattern_detection(mut self, enabled: bool) -> Self {
        self.detect_from_patterns = enabled;
        self
    }

    /// Set the maximum heading length in characters.
    pub fn with_max_heading_chars(mut self, chars: usize) -> Self {
        self.max_heading_chars = chars;
        self
    }

    /// Set the repeated-text thresholds.
    pub fn with_repeat_threshold(mut self, page_fraction: f32, min_pages: usize) -> Self {
        self.repeat_page_fraction = page_fraction;
        self.min_repeat_pages = min_pages;
        self
    }

    /// Set the header/footer band as a fraction of page height.
    pub fn with_edge_band(mut self, fraction: f32) -> Self {
        self.edge_band_fraction = fraction.clamp(0.0, 0.5);
        self
    }

    /// Enable or disable multi-line title merging.
    pub fn with_title_merging(mut self, enabled: bool) -> Self {
        self.merge_title_lines = enabled;
        self
    }

    /// Enable or disable heading de-duplication.
    pub fn with_dedupe(mut self, enabled: bool) -> Self {
        self.dedupe_headings = enabled;
        self
    }

    /// Number of distinct pages a text must appear on to count as repeated
    /// in a document with `page_count` pages.
    pub fn repeat_threshold(&self, page_count: u32) -> usize {
        // f32 products like 10 * 0.3 land a hair above the integer
        let by_fraction = (page_count as f32 * self.repeat_page_fraction - 1e-4).ceil() as usize;
        by_fraction.max(self.min_repeat_pages)
    }
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            h1_min_ratio: 1.5,
            h2_min_ratio: 1.3,
            h3_min_ratio: 1.15,
            ratio_tolerance: 0.0,
            detect_from_bold: true,
            bold_min_ratio: 0.9,
            bold_max_words: 12,
            detect_from_patterns: true,
            max_heading_chars: 150,
            min_text_chars: 4,
            min_non_latin_chars: 2,
            min_alphabetic_ratio: 0.4,
            edge_band_fraction: 0.1,
            repeat_page_fraction: 0.3,
            min_repeat_pages: 3,
            title_top_positions: 3,
            title_min_ratio: 1.15,
            merge_title_lines: true,
            dedupe_headings: true,
        }
    }
}
