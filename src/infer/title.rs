//! Document title selection.

use crate::model::{HeadingCandidate, RunDocument, TextRun};

use super::candidate;
use super::noise::NoiseKind;
use super::options::InferOptions;
use super::patterns::match_heading;
use super::profile::DocumentProfile;
use super::script::{collapse_whitespace, join_fragments, normalize_text};

/// Font sizes within this many points count as the same size when joining
/// title lines.
const SAME_SIZE_TOLERANCE: f32 = 0.5;

/// The chosen title and the runs it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleSelection {
    /// Title text (empty when page 1 has no usable text)
    pub text: String,
    /// Indices of the runs consumed by the title
    pub sources: Vec<usize>,
}

impl TitleSelection {
    /// Check if no title was found.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Drop candidates that were consumed by the title or repeat its text.
    pub fn remove_from(&self, candidates: &mut Vec<HeadingCandidate>) {
        let title = normalize_text(&self.text);
        candidates.retain(|c| {
            !self.sources.contains(&c.source) && (title.is_empty() || normalize_text(&c.text) != title)
        });
    }
}

/// Vertical position rounded to half a point.
fn position_key(y0: f32) -> i64 {
    (y0 * 2.0).round() as i64
}

fn by_position(a: &TextRun, b: &TextRun) -> std::cmp::Ordering {
    a.bbox.y0.total_cmp(&b.bbox.y0)
}

/// Pick the document title from page 1.
///
/// The largest font among the runs at the top few vertical positions wins
/// if it is distinctly above body size; otherwise the first non-noise run
/// on the page is used.
pub fn select_title(
    doc: &RunDocument,
    noise: &[Option<NoiseKind>],
    profile: &DocumentProfile,
    options: &InferOptions,
) -> TitleSelection {
    let runs = &doc.runs;
    let mut page_one: Vec<usize> = runs
        .iter()
        .enumerate()
        .filter(|(i, run)| {
            run.page == 1
                && noise.get(*i).map_or(true, Option::is_none)
                && !run.text.trim().is_empty()
        })
        .map(|(i, _)| i)
        .collect();
    page_one.sort_by(|&a, &b| by_position(&runs[a], &runs[b]).then(a.cmp(&b)));

    if page_one.is_empty() {
        return TitleSelection::default();
    }

    // Runs are sorted by y0, so the first distinct keys are the topmost.
    let mut positions: Vec<i64> = Vec::new();
    let top = page_one
        .iter()
        .take_while(|&&i| {
            let key = position_key(runs[i].bbox.y0);
            if positions.contains(&key) {
                return true;
            }
            if positions.len() == options.title_top_positions {
                return false;
            }
            positions.push(key);
            true
        })
        .count();

    let largest = (0..top)
        .max_by(|&a, &b| {
            runs[page_one[a]]
                .font_size
                .total_cmp(&runs[page_one[b]].font_size)
                .then(b.cmp(&a))
        })
        .unwrap_or(0);

    let qualifies = profile
        .size_ratio(runs[page_one[largest]].font_size)
        .map_or(true, |r| r >= options.title_min_ratio);
    let start = if qualifies { largest } else { 0 };

    let first = &runs[page_one[start]];
    let mut selection = TitleSelection {
        text: collapse_whitespace(&first.text),
        sources: vec![page_one[start]],
    };

    if qualifies && options.merge_title_lines {
        let title_level =
            candidate::detect(first, page_one[start], profile, options).map(|c| c.level);
        let mut previous = first;
        for &index in &page_one[start + 1..] {
            let next = &runs[index];
            let same_size = (next.font_size - previous.font_size).abs() <= SAME_SIZE_TOLERANCE;
            let close = next.bbox.y0 - previous.bbox.y1 < 2.0 * previous.font_size;
            if !same_size || !close {
                break;
            }
            // a numbered or otherwise structured line starts the outline
            let structured = match_heading(&collapse_whitespace(&next.text)).is_some();
            let level = candidate::detect(next, index, profile, options).map(|c| c.level);
            if structured || level != title_level {
                break;
            }
            selection.text = join_fragments(&selection.text, &collapse_whitespace(&next.text));
            selection.sources.push(index);
            previous = next;
        }
    }

    log::debug!(
        "Title {:?} from {} run(s), by size: {}",
        selection.text,
        selection.sources.len(),
        qualifies
    );

    selection
}
