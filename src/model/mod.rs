//! Data model shared by the collector, the inference engine and the emitters.
//!
//! Runs flow one way: `TextRun` → `HeadingCandidate` → `OutlineNode`. Nothing
//! is mutated after construction except the children lists of the outline
//! while it is being assembled.

mod outline;
mod run;

pub use outline::{HeadingCandidate, HeadingLevel, Outline, OutlineIter, OutlineNode};
pub use run::{BBox, RunDocument, TextRun, LETTER_HEIGHT};
