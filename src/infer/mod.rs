//! Heading inference engine.
//!
//! Stages run in order over one document's runs, each consuming the
//! previous stage's output:
//!
//! 1. [`profile`] builds document statistics (body size, running texts).
//! 2. [`noise`] classifies headers, footers, page numbers and boilerplate.
//! 3. [`candidate`] levels the remaining runs as H1–H4 or rejects them.
//! 4. [`title`] picks the title from page 1.
//! 5. [`hierarchy`] folds the ordered candidates into a tree.
//!
//! Every stage is a total function: malformed input degrades the output but
//! never errors.

pub mod candidate;
pub mod hierarchy;
pub mod noise;
mod options;
pub mod patterns;
pub mod profile;
pub mod script;
pub mod title;

pub use candidate::Signals;
pub use noise::NoiseKind;
pub use options::InferOptions;
pub use profile::DocumentProfile;
pub use title::TitleSelection;

use crate::model::{HeadingCandidate, Outline, RunDocument};

/// Intermediate results of the engine for one document.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Document statistics
    pub profile: DocumentProfile,
    /// Noise verdict per run, aligned with `RunDocument::runs`
    pub noise: Vec<Option<NoiseKind>>,
    /// Heading candidates in collector order (title not yet removed)
    pub candidates: Vec<HeadingCandidate>,
    /// Selected title
    pub title: TitleSelection,
}

impl Analysis {
    /// Candidate derived from a given run, if any.
    pub fn candidate_for(&self, source: usize) -> Option<&HeadingCandidate> {
        self.candidates.iter().find(|c| c.source == source)
    }

    /// Remove the title, order the candidates and assemble the tree.
    pub fn into_outline(self, options: &InferOptions) -> Outline {
        let Analysis {
            mut candidates,
            title,
            ..
        } = self;

        title.remove_from(&mut candidates);
        hierarchy::order_candidates(&mut candidates);
        if options.dedupe_headings {
            hierarchy::dedupe(&mut candidates);
        }

        hierarchy::build_outline(title.text, candidates)
    }
}

/// Run the profiler, classifier, detector and title selector.
pub fn analyze(doc: &RunDocument, options: &InferOptions) -> Analysis {
    let profile = DocumentProfile::build(doc, options);

    let noise: Vec<Option<NoiseKind>> = doc
        .runs
        .iter()
        .map(|run| noise::classify(run, &profile, options))
        .collect();

    let candidates: Vec<HeadingCandidate> = doc
        .runs
        .iter()
        .enumerate()
        .filter(|(i, _)| noise[*i].is_none())
        .filter_map(|(i, run)| candidate::detect(run, i, &profile, options))
        .collect();

    let title = title::select_title(doc, &noise, &profile, options);

    log::debug!(
        "Analyzed {} runs: {} noise, {} candidates",
        doc.runs.len(),
        noise.iter().filter(|n| n.is_some()).count(),
        candidates.len()
    );

    Analysis {
        profile,
        noise,
        candidates,
        title,
    }
}

/// Infer the outline of a document.
///
/// An empty run list yields the degraded outline `{"title": "", "children": []}`.
pub fn infer_outline(doc: &RunDocument, options: &InferOptions) -> Outline {
    if doc.is_empty() {
        return Outline::degraded();
    }
    analyze(doc, options).into_outline(options)
}
