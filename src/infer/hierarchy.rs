//! Folding a flat, leveled heading sequence into a tree.

use std::collections::HashSet;

use crate::model::{HeadingCandidate, HeadingLevel, Outline, OutlineNode};

use super::script::normalize_text;

/// Sort candidates by `(page, y0)`, keeping collector order on ties.
pub fn order_candidates(candidates: &mut [HeadingCandidate]) {
    candidates.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.y0.total_cmp(&b.y0))
            .then(a.source.cmp(&b.source))
    });
}

/// Drop candidates whose normalized text already appeared earlier.
pub fn dedupe(candidates: &mut Vec<HeadingCandidate>) {
    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert(normalize_text(&c.text)));
}

/// Children list at the end of a path of child indices.
fn children_at<'a>(
    mut children: &'a mut Vec<OutlineNode>,
    path: &[(HeadingLevel, usize)],
) -> &'a mut Vec<OutlineNode> {
    for &(_, index) in path {
        let current = children;
        children = &mut current[index].children;
    }
    children
}

/// Build the outline tree from ordered candidates.
///
/// Open ancestors are tracked as a stack of `(level, child index)` pairs
/// from the root down. Each candidate closes every open heading at its own
/// level or deeper and becomes a child of whatever remains on top, so a
/// skipped level becomes a direct edge. Never fails.
pub fn build_outline<I>(title: impl Into<String>, candidates: I) -> Outline
where
    I: IntoIterator<Item = HeadingCandidate>,
{
    let mut outline = Outline::new(title);
    let mut open: Vec<(HeadingLevel, usize)> = Vec::new();

    for candidate in candidates {
        let level = candidate.level;
        while open.last().is_some_and(|&(top, _)| top >= level) {
            open.pop();
        }

        let siblings = children_at(&mut outline.children, &open);
        siblings.push(OutlineNode::from(candidate));
        open.push((level, siblings.len() - 1));
    }

    outline
}
