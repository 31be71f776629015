//! Document-level statistics gathered in a single pass over all runs.

use std::collections::{HashMap, HashSet};

use crate::model::{RunDocument, TextRun};

use super::options::InferOptions;
use super::script::normalize_text;

/// Vertical band of a page where running headers and footers live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeBand {
    /// Top of the page
    Top,
    /// Bottom of the page
    Bottom,
}

impl EdgeBand {
    /// Band a run falls into, if any.
    pub fn of(run: &TextRun, page_height: f32, fraction: f32) -> Option<EdgeBand> {
        if page_height <= 0.0 {
            return None;
        }
        if run.bbox.y0 < page_height * fraction {
            Some(EdgeBand::Top)
        } else if run.bbox.y1 > page_height * (1.0 - fraction) {
            Some(EdgeBand::Bottom)
        } else {
            None
        }
    }
}

/// Read-only statistics for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentProfile {
    /// Body text font size (0 when the document has no runs)
    pub body_font_size: f32,
    /// Page height in points
    pub page_height: f32,
    /// Number of pages
    pub page_count: u32,
    /// Normalized texts recurring in the header or footer band
    pub repeated_texts: HashSet<String>,
}

impl DocumentProfile {
    /// Build the profile for a document.
    pub fn build(doc: &RunDocument, options: &InferOptions) -> Self {
        let page_count = doc
            .runs
            .iter()
            .map(|r| r.page)
            .max()
            .unwrap_or(0)
            .max(doc.page_count);

        let profile = Self {
            body_font_size: body_font_size(&doc.runs),
            page_height: doc.page_height,
            page_count,
            repeated_texts: repeated_texts(doc, page_count, options),
        };

        log::debug!(
            "Profile: body size {:.1}pt, {} pages, {} repeated texts",
            profile.body_font_size,
            profile.page_count,
            profile.repeated_texts.len()
        );

        profile
    }

    /// Whether the profile carries no statistics (empty document).
    pub fn is_empty(&self) -> bool {
        self.body_font_size <= 0.0
    }

    /// Check if normalized text recurs as a running header or footer.
    pub fn is_repeated(&self, normalized: &str) -> bool {
        self.repeated_texts.contains(normalized)
    }

    /// Font size ratio to body text, if the body size is known.
    pub fn size_ratio(&self, font_size: f32) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(font_size / self.body_font_size)
        }
    }
}

/// Round a font size to 0.1pt precision for bucketing.
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// Most common font size weighted by character count.
///
/// Ties go to the smaller size. Returns 0.0 for an empty run list.
fn body_font_size(runs: &[TextRun]) -> f32 {
    let mut histogram: HashMap<i32, usize> = HashMap::new();
    for run in runs.iter().filter(|r| r.font_size > 0.0) {
        let chars = run.text.chars().filter(|c| !c.is_whitespace()).count();
        if chars > 0 {
            *histogram.entry(size_key(run.font_size)).or_insert(0) += chars;
        }
    }

    histogram
        .into_iter()
        .max_by(|(size_a, count_a), (size_b, count_b)| {
            count_a.cmp(count_b).then_with(|| size_b.cmp(size_a))
        })
        .map(|(size, _)| size as f32 / 10.0)
        .unwrap_or(0.0)
}

/// Normalized texts appearing in the same edge band on enough pages.
fn repeated_texts(doc: &RunDocument, page_count: u32, options: &InferOptions) -> HashSet<String> {
    let threshold = options.repeat_threshold(page_count);
    let mut pages_by_text: HashMap<(String, EdgeBand), HashSet<u32>> = HashMap::new();

    for run in &doc.runs {
        let Some(band) = EdgeBand::of(run, doc.page_height, options.edge_band_fraction) else {
            continue;
        };
        let normalized = normalize_text(&run.text);
        if normalized.is_empty() {
            continue;
        }
        pages_by_text
            .entry((normalized, band))
            .or_default()
            .insert(run.page);
    }

    pages_by_text
        .into_iter()
        .filter(|(_, pages)| pages.len() >= threshold)
        .map(|((text, _), _)| text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn run(text: &str, page: u32, size: f32, y0: f32) -> TextRun {
        TextRun::new(text, page, size, false, BBox::new(72.0, y0, 300.0, y0 + size))
    }

    #[test]
    fn test_body_size_weighted_by_chars() {
        let runs = vec![
            run("A long paragraph of body text", 1, 10.0, 100.0),
            run("Another paragraph of body text", 1, 10.0, 120.0),
            run("Heading", 1, 18.0, 80.0),
            run("Heading two", 1, 18.0, 160.0),
            run("Heading three", 1, 18.0, 200.0),
        ];
        assert!((body_font_size(&runs) - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_body_size_tie_prefers_smaller() {
        let runs = vec![run("abcd", 1, 12.0, 100.0), run("wxyz", 1, 9.0, 120.0)];
        assert!((body_font_size(&runs) - 9.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_profile() {
        let profile = DocumentProfile::build(&RunDocument::empty(), &InferOptions::default());
        assert_eq!(profile.body_font_size, 0.0);
        assert!(profile.repeated_texts.is_empty());
        assert!(profile.is_empty());
        assert_eq!(profile.size_ratio(12.0), None);
    }

    #[test]
    fn test_repeated_footer_detected() {
        let mut runs = Vec::new();
        for page in 1..=5 {
            runs.push(run("ACME Corp  Quarterly", page, 9.0, 760.0));
            runs.push(run("Body text on the page", page, 11.0, 300.0));
        }
        let doc = RunDocument::new(5, 792.0, runs);
        let profile = DocumentProfile::build(&doc, &InferOptions::default());
        assert!(profile.is_repeated("acme corp quarterly"));
        assert!(!profile.is_repeated("body text on the page"));
    }

    #[test]
    fn test_repeated_requires_threshold_pages() {
        let runs = vec![
            run("Draft Header", 1, 9.0, 20.0),
            run("Draft Header", 2, 9.0, 20.0),
            run("Body", 3, 11.0, 300.0),
        ];
        let doc = RunDocument::new(3, 792.0, runs);
        let profile = DocumentProfile::build(&doc, &InferOptions::default());
        assert!(!profile.is_repeated("draft header"));
    }

    #[test]
    fn test_edge_band() {
        let top = run("Top", 1, 10.0, 30.0);
        let middle = run("Middle", 1, 10.0, 400.0);
        let bottom = run("Bottom", 1, 10.0, 750.0);
        assert_eq!(EdgeBand::of(&top, 792.0, 0.1), Some(EdgeBand::Top));
        assert_eq!(EdgeBand::of(&middle, 792.0, 0.1), None);
        assert_eq!(EdgeBand::of(&bottom, 792.0, 0.1), Some(EdgeBand::Bottom));
        assert_eq!(EdgeBand::of(&top, 0.0, 0.1), None);
    }
}
