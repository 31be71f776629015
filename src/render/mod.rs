//! Rendering module for writing outlines in various output formats.

mod json;
mod text;

pub use json::{to_json, write_json, JsonFormat};
pub use text::to_text;
