//! Heading candidate detection.
//!
//! Three independent signals can qualify a run: its font size relative to
//! body text, a bold weight, and a structural pattern match. Each signal
//! implies a level; the shallowest implied level wins.

use crate::model::{HeadingCandidate, HeadingLevel, TextRun};

use super::options::InferOptions;
use super::patterns::{match_heading, HeadingPattern};
use super::profile::DocumentProfile;
use super::script::collapse_whitespace;

/// Per-signal levels for one run, kept for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Signals {
    /// Size ratio to body text (`None` when the body size is unknown)
    pub ratio: Option<f32>,
    /// Level implied by the font size ratio
    pub font: Option<HeadingLevel>,
    /// Level implied by a bold weight
    pub bold: Option<HeadingLevel>,
    /// Level implied by a structural pattern
    pub pattern: Option<HeadingLevel>,
}

impl Signals {
    /// Shallowest level among the signals present.
    pub fn level(&self) -> Option<HeadingLevel> {
        [self.font, self.bold, self.pattern]
            .into_iter()
            .flatten()
            .reduce(HeadingLevel::shallower)
    }
}

/// Map a size ratio onto a level band.
pub fn font_level(ratio: f32, options: &InferOptions) -> Option<HeadingLevel> {
    if ratio >= options.h1_min_ratio {
        Some(HeadingLevel::H1)
    } else if ratio >= options.h2_min_ratio {
        Some(HeadingLevel::H2)
    } else if ratio >= options.h3_min_ratio {
        Some(HeadingLevel::H3)
    } else if ratio > 1.0 + options.ratio_tolerance {
        Some(HeadingLevel::H4)
    } else {
        None
    }
}

/// Short and without trailing sentence punctuation.
fn is_heading_shaped(text: &str, options: &InferOptions) -> bool {
    let words = text.split_whitespace().count();
    let ends_sentence = text.ends_with(['.', ',', ';', '。', '、']);
    words <= options.bold_max_words && !ends_sentence
}

fn bold_level(
    run: &TextRun,
    ratio: Option<f32>,
    text: &str,
    pattern: Option<&HeadingPattern>,
    options: &InferOptions,
) -> Option<HeadingLevel> {
    if !options.detect_from_bold || !run.bold {
        return None;
    }
    if ratio.is_some_and(|r| r < options.bold_min_ratio) {
        return None;
    }
    if pattern.is_some() || is_heading_shaped(text, options) {
        Some(HeadingLevel::H4)
    } else {
        None
    }
}

/// Evaluate every signal for a run without deciding.
pub fn signals(run: &TextRun, profile: &DocumentProfile, options: &InferOptions) -> Signals {
    let text = collapse_whitespace(&run.text);
    let ratio = profile.size_ratio(run.font_size);
    let pattern = if options.detect_from_patterns {
        match_heading(&text)
    } else {
        None
    };

    Signals {
        ratio,
        font: ratio.and_then(|r| font_level(r, options)),
        bold: bold_level(run, ratio, &text, pattern, options),
        pattern: pattern.map(|p| p.level),
    }
}

/// Turn a non-noise run into a heading candidate, or reject it.
///
/// `source` is the index of the run in its document.
pub fn detect(
    run: &TextRun,
    source: usize,
    profile: &DocumentProfile,
    options: &InferOptions,
) -> Option<HeadingCandidate> {
    let text = collapse_whitespace(&run.text);
    if text.is_empty() || text.chars().count() > options.max_heading_chars {
        return None;
    }

    let level = signals(run, profile, options).level()?;
    log::trace!("Candidate {} on page {}: {:?}", level, run.page, text);

    Some(HeadingCandidate {
        text,
        level,
        page: run.page,
        y0: run.bbox.y0,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn profile(body: f32) -> DocumentProfile {
        DocumentProfile {
            body_font_size: body,
            page_height: 792.0,
            page_count: 1,
            ..Default::default()
        }
    }

    fn run(text: &str, size: f32, bold: bool) -> TextRun {
        TextRun::new(text, 2, size, bold, BBox::new(72.0, 300.0, 400.0, 300.0 + size))
    }

    fn level_of(text: &str, size: f32, bold: bool) -> Option<HeadingLevel> {
        detect(&run(text, size, bold), 0, &profile(10.0), &InferOptions::default()).map(|c| c.level)
    }

    #[test]
    fn test_font_bands() {
        let options = InferOptions::default();
        assert_eq!(font_level(2.0, &options), Some(HeadingLevel::H1));
        assert_eq!(font_level(1.5, &options), Some(HeadingLevel::H1));
        assert_eq!(font_level(1.4, &options), Some(HeadingLevel::H2));
        assert_eq!(font_level(1.2, &options), Some(HeadingLevel::H3));
        assert_eq!(font_level(1.1, &options), Some(HeadingLevel::H4));
        assert_eq!(font_level(1.01, &options), Some(HeadingLevel::H4));
        assert_eq!(font_level(1.0, &options), None);
        assert_eq!(font_level(0.8, &options), None);
    }

    #[test]
    fn test_slightly_larger_than_body_is_h4() {
        assert_eq!(level_of("overview of the results", 10.1, false), Some(HeadingLevel::H4));

        let options = InferOptions::default().with_ratio_tolerance(0.02);
        assert_eq!(font_level(1.01, &options), None);
        assert_eq!(font_level(1.03, &options), Some(HeadingLevel::H4));
    }

    #[test]
    fn test_font_signal() {
        assert_eq!(level_of("overview of results", 16.0, false), Some(HeadingLevel::H1));
        assert_eq!(level_of("overview of results", 12.0, false), Some(HeadingLevel::H3));
        assert_eq!(level_of("overview of results", 10.0, false), None);
    }

    #[test]
    fn test_pattern_alone_qualifies_at_body_size() {
        assert_eq!(level_of("2.1 Data sources", 10.0, false), Some(HeadingLevel::H2));
        assert_eq!(level_of("第3章 結果", 10.0, false), Some(HeadingLevel::H1));
    }

    #[test]
    fn test_shallower_level_wins() {
        // size says H3, numbering says H1
        assert_eq!(level_of("3. Results", 12.0, false), Some(HeadingLevel::H1));
        // size says H1, numbering says H3
        assert_eq!(level_of("3.1.2 Error bars", 16.0, false), Some(HeadingLevel::H1));
    }

    #[test]
    fn test_bold_signal() {
        assert_eq!(level_of("key findings", 10.0, true), Some(HeadingLevel::H4));
        assert_eq!(
            level_of("we measured the response of every sample twice.", 10.0, true),
            None
        );
        // bold fine print
        assert_eq!(level_of("key findings", 7.0, true), None);

        let options = InferOptions::default().with_bold_detection(false);
        assert!(detect(&run("key findings", 10.0, true), 0, &profile(10.0), &options).is_none());
    }

    #[test]
    fn test_length_bound() {
        let long = "Chapter 1 ".repeat(20);
        assert_eq!(level_of(&long, 20.0, true), None);
    }

    #[test]
    fn test_no_body_size() {
        let candidate = detect(&run("key findings", 10.0, true), 4, &profile(0.0), &InferOptions::default());
        let candidate = candidate.unwrap();
        assert_eq!(candidate.level, HeadingLevel::H4);
        assert_eq!(candidate.source, 4);
        assert_eq!(candidate.order_key(), (2, 300.0));
        assert!(detect(&run("plain words here", 10.0, false), 0, &profile(0.0), &InferOptions::default()).is_none());
    }
}
