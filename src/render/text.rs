//! Plain text rendering for outlines.

use std::fmt::Write;

use crate::model::Outline;

const INDENT: &str = "  ";

/// Convert an outline to an indented, human-readable listing.
///
/// ```text
/// Annual Report
///   H1 Introduction (p. 1)
///     H2 Scope (p. 2)
/// ```
pub fn to_text(outline: &Outline) -> String {
    let mut output = String::new();
    if outline.title.is_empty() {
        output.push_str("(untitled)\n");
    } else {
        output.push_str(&outline.title);
        output.push('\n');
    }

    for (depth, node) in outline.iter() {
        // Writing to a String cannot fail
        let _ = writeln!(
            output,
            "{}{} {} (p. {})",
            INDENT.repeat(depth),
            node.level,
            node.text,
            node.page
        );
    }

    output
}
