//! Heading candidates and the outline tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Heading level, ordered from shallowest (`Title`) to deepest (`H4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HeadingLevel {
    /// Document title (outline root)
    Title,
    /// Top-level section
    H1,
    /// Subsection
    H2,
    /// Sub-subsection
    H3,
    /// Deepest supported level
    H4,
}

impl HeadingLevel {
    /// Heading levels that may appear below the title.
    pub const HEADINGS: [HeadingLevel; 4] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
    ];

    /// The shallower of two levels.
    pub fn shallower(self, other: HeadingLevel) -> HeadingLevel {
        self.min(other)
    }

    /// Label used in output ("H1".."H4", "TITLE").
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::Title => "TITLE",
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run that plausibly marks a section boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Trimmed heading text
    pub text: String,
    /// Inferred level
    pub level: HeadingLevel,
    /// Page number (1-indexed)
    pub page: u32,
    /// Top edge of the source run
    pub y0: f32,
    /// Index of the source run in the document
    pub source: usize,
}

impl HeadingCandidate {
    /// The `(page, y0)` pair used to order candidates before tree assembly.
    pub fn order_key(&self) -> (u32, f32) {
        (self.page, self.y0)
    }
}

/// A heading in the outline tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Nested headings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a leaf node.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            children: Vec::new(),
        }
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: OutlineNode) {
        self.children.push(child);
    }
}

impl From<HeadingCandidate> for OutlineNode {
    fn from(candidate: HeadingCandidate) -> Self {
        OutlineNode::new(candidate.level, candidate.text, candidate.page)
    }
}

/// The inferred outline of a document, rooted at its title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (may be empty)
    pub title: String,
    /// Top-level headings
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl Outline {
    /// Create an outline with a title and no headings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// The outline produced for unusable documents.
    pub fn degraded() -> Self {
        Self::default()
    }

    /// Check if the outline has neither title nor headings.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.children.is_empty()
    }

    /// Total number of headings (excluding the title).
    pub fn total_headings(&self) -> usize {
        self.iter().count()
    }

    /// Depth of the deepest heading (0 when there are none).
    pub fn max_depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    /// Pre-order walk over all headings, yielding `(depth, node)` with
    /// top-level headings at depth 1.
    pub fn iter(&self) -> OutlineIter<'_> {
        OutlineIter {
            stack: self.children.iter().rev().map(|n| (1, n)).collect(),
        }
    }
}

/// Iterator returned by [`Outline::iter`].
pub struct OutlineIter<'a> {
    stack: Vec<(usize, &'a OutlineNode)>,
}

impl<'a> Iterator for OutlineIter<'a> {
    type Item = (usize, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}
