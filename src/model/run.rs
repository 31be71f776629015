//! Text runs produced by the collector.

use serde::{Deserialize, Serialize};

/// US Letter page height in points, used when no geometry is known.
pub const LETTER_HEIGHT: f32 = 792.0;

/// Bounding box in page coordinates.
///
/// The origin is the top-left corner of the page and `y` grows downward,
/// so `y0` is the top edge and `y1` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).abs()
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A logically contiguous styled span of text on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Rendered font size in points
    pub font_size: f32,
    /// Whether the run is set in a bold weight
    pub bold: bool,
    /// Position on the page
    pub bbox: BBox,
}

impl TextRun {
    /// Create a new run.
    pub fn new(text: impl Into<String>, page: u32, font_size: f32, bold: bool, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            page,
            font_size,
            bold,
            bbox,
        }
    }

    /// The `(page, y0)` pair used to linearize runs top to bottom.
    pub fn order_key(&self) -> (u32, f32) {
        (self.page, self.bbox.y0)
    }
}

/// All runs of one document together with its page geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunDocument {
    /// Number of pages in the document (including pages without text)
    pub page_count: u32,
    /// Page height in points
    pub page_height: f32,
    /// Runs in collector order
    pub runs: Vec<TextRun>,
}

impl RunDocument {
    /// Create a document from its parts.
    pub fn new(page_count: u32, page_height: f32, runs: Vec<TextRun>) -> Self {
        Self {
            page_count,
            page_height,
            runs,
        }
    }

    /// Build a document from runs alone, deriving the page count from the
    /// largest page index and the page height from the lowest run edge.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        let page_count = runs.iter().map(|r| r.page).max().unwrap_or(0);
        let lowest = runs.iter().map(|r| r.bbox.y1).fold(0.0f32, f32::max);
        let page_height = if lowest > LETTER_HEIGHT {
            lowest
        } else {
            LETTER_HEIGHT
        };
        Self {
            page_count,
            page_height,
            runs,
        }
    }

    /// An empty document, used when nothing could be collected.
    pub fn empty() -> Self {
        Self {
            page_count: 0,
            page_height: LETTER_HEIGHT,
            runs: Vec::new(),
        }
    }

    /// Check if the document has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Runs on a given page, in collector order.
    pub fn page_runs(&self, page: u32) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(move |r| r.page == page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(10.0, 20.0, 50.0, 30.0);
        let b = BBox::new(40.0, 18.0, 90.0, 28.0);
        assert_eq!(a.union(&b), BBox::new(10.0, 18.0, 90.0, 30.0));
        assert!((a.height() - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_runs_geometry() {
        let runs = vec![
            TextRun::new("Header", 1, 10.0, false, BBox::new(0.0, 10.0, 50.0, 20.0)),
            TextRun::new("Footer", 4, 10.0, false, BBox::new(0.0, 800.0, 50.0, 830.0)),
        ];
        let doc = RunDocument::from_runs(runs);
        assert_eq!(doc.page_count, 4);
        assert!((doc.page_height - 830.0).abs() < f32::EPSILON);
        assert_eq!(doc.page_runs(4).count(), 1);
    }

    #[test]
    fn test_from_runs_empty() {
        let doc = RunDocument::from_runs(Vec::new());
        assert_eq!(doc.page_count, 0);
        assert!(doc.is_empty());
        assert!((doc.page_height - LETTER_HEIGHT).abs() < f32::EPSILON);
    }
}
