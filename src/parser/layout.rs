//! Content stream interpretation and line assembly.
//!
//! Text-showing operators are replayed through a minimal graphics state to
//! recover where each string lands on the page and at what rendered size.
//! Spans sharing a baseline are then merged into lines, and each line
//! becomes one [`TextRun`] in top-left page coordinates.

use crate::error::Result;
use crate::infer::script::is_spaceless_script_char;
use crate::model::{BBox, TextRun};

use super::backend::{get_number_from_value, BackendFontInfo, PageId, PdfBackend, PdfValue};

/// Average glyph advance as a fraction of the font size (Latin text).
const APPROX_CHAR_WIDTH: f32 = 0.5;

/// Glyph advance of full-width CJK characters as a fraction of the font size.
const WIDE_CHAR_WIDTH: f32 = 1.0;

/// TJ adjustment (thousandths of an em) treated as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Horizontal gap, in multiples of the font size, that splits a baseline
/// into separate runs (columns, left/right aligned furniture).
const LINE_SPLIT_GAP: f32 = 2.5;

/// A text span with position and style information.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge), PDF user space
    pub x: f32,
    /// Y position (baseline), PDF user space with y growing upward
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Rendered font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
}

impl TextSpan {
    /// Create a new text span, detecting bold from the font name.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let is_bold = is_bold_font_name(&font_name);
        Self {
            text,
            x,
            y,
            width: 0.0,
            font_size,
            font_name,
            is_bold,
        }
    }

    /// Set the estimated width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom Y coordinate (approximate, based on font size).
    pub fn bottom(&self) -> f32 {
        self.y - self.font_size * 0.2 // Approximate descender
    }

    /// Get the top Y coordinate (approximate, based on font size).
    pub fn top(&self) -> f32 {
        self.y + self.font_size * 0.8 // Approximate ascender
    }
}

/// Bold, black, heavy and semibold/demibold weights all count as bold.
pub fn is_bold_font_name(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    ["bold", "black", "heavy", "semibold", "demi"]
        .iter()
        .any(|w| lower.contains(w))
}

/// A text line composed of spans on the same baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Y position (baseline)
    pub y: f32,
    /// Leftmost X position
    pub x: f32,
}

impl TextLine {
    /// Create a new text line from spans.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.total_cmp(&b.x));
        let y = spans.first().map_or(0.0, |s| s.y);
        let x = spans.first().map_or(0.0, |s| s.x);
        Self { spans, y, x }
    }

    /// Largest font size on the line.
    pub fn font_size(&self) -> f32 {
        self.spans.iter().map(|s| s.font_size).fold(0.0, f32::max)
    }

    /// Get the combined text of all spans with appropriate spacing.
    ///
    /// Inserts spaces between spans based on their X coordinate gaps.
    /// For CJK characters, no space is inserted between adjacent characters.
    pub fn text(&self) -> String {
        let mut result = String::new();

        for (i, span) in self.spans.iter().enumerate() {
            if i == 0 {
                result.push_str(&span.text);
                continue;
            }

            let prev_span = &self.spans[i - 1];
            let gap = span.x - prev_span.right();

            let char_count = span.text.chars().count();
            let avg_char_width = if char_count > 0 && span.width > 0.0 {
                span.width / char_count as f32
            } else {
                span.font_size * APPROX_CHAR_WIDTH
            };

            let spaceless = matches!(
                (prev_span.text.chars().last(), span.text.chars().next()),
                (Some(a), Some(b)) if is_spaceless_script_char(a) && is_spaceless_script_char(b)
            );
            let has_space = prev_span.text.ends_with([' ', '\u{00A0}'])
                || span.text.starts_with([' ', '\u{00A0}']);

            if gap > avg_char_width * 0.2 && !spaceless && !has_space {
                result.push(' ');
            }

            result.push_str(&span.text);
        }

        result
    }

    /// Check if the line is predominantly bold.
    pub fn is_bold(&self) -> bool {
        let bold_chars: usize = self
            .spans
            .iter()
            .filter(|s| s.is_bold)
            .map(|s| s.text.chars().count())
            .sum();
        let total_chars: usize = self.spans.iter().map(|s| s.text.chars().count()).sum();
        total_chars > 0 && bold_chars as f32 / total_chars as f32 > 0.5
    }

    /// Convert the line to a run in top-left page coordinates.
    ///
    /// Returns `None` for blank lines and lines without a usable size.
    pub fn into_run(self, page: u32, page_height: f32) -> Option<TextRun> {
        let text = self.text();
        let font_size = self.font_size();
        if text.trim().is_empty() || font_size <= 0.0 {
            return None;
        }

        let top = self.spans.iter().map(|s| s.top()).fold(f32::MIN, f32::max);
        let bottom = self.spans.iter().map(|s| s.bottom()).fold(f32::MAX, f32::min);
        let right = self.spans.iter().map(|s| s.right()).fold(self.x, f32::max);
        let bbox = BBox::new(self.x, page_height - top, right, page_height - bottom);

        Some(TextRun::new(text.trim(), page, font_size, self.is_bold(), bbox))
    }
}

/// 2x3 affine matrix `[a, b, c, d, e, f]`.
type Matrix = [f32; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `m1 × m2` in PDF row-vector convention.
fn multiply(m1: &Matrix, m2: &Matrix) -> Matrix {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

fn matrix_operands(operands: &[PdfValue]) -> Option<Matrix> {
    let vals: Vec<f32> = operands.iter().take(6).filter_map(get_number_from_value).collect();
    if vals.len() == 6 {
        Some([vals[0], vals[1], vals[2], vals[3], vals[4], vals[5]])
    } else {
        None
    }
}

/// Graphics and text state tracked while replaying a content stream.
#[derive(Debug, Clone)]
struct TextState {
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    font: Option<BackendFontInfo>,
    font_name: String,
    font_size: f32,
    leading: f32,
    char_spacing: f32,
    word_spacing: f32,
    horiz_scale: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
            font: None,
            font_name: String::new(),
            font_size: 0.0,
            leading: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horiz_scale: 1.0,
        }
    }
}

impl TextState {
    fn rendering_matrix(&self) -> Matrix {
        multiply(&self.text_matrix, &self.ctm)
    }

    /// Rendered font size: the vertical scale of the rendering matrix.
    fn effective_font_size(&self) -> f32 {
        let m = self.rendering_matrix();
        (self.font_size * (m[2] * m[2] + m[3] * m[3]).sqrt()).abs()
    }

    fn horizontal_scale(&self) -> f32 {
        let m = self.rendering_matrix();
        (m[0] * m[0] + m[1] * m[1]).sqrt()
    }

    fn translate_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = multiply(&[1.0, 0.0, 0.0, 1.0, tx, ty], &self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    fn advance(&mut self, dx: f32) {
        self.text_matrix = multiply(&[1.0, 0.0, 0.0, 1.0, dx, 0.0], &self.text_matrix);
    }

    /// Unscaled text-space advance of a string.
    fn text_advance(&self, text: &str) -> f32 {
        text.chars()
            .map(|c| {
                let glyph = if is_spaceless_script_char(c) {
                    WIDE_CHAR_WIDTH
                } else {
                    APPROX_CHAR_WIDTH
                };
                let word = if c == ' ' { self.word_spacing } else { 0.0 };
                (glyph * self.font_size + self.char_spacing + word) * self.horiz_scale
            })
            .sum()
    }

    fn set_font(&mut self, key: &[u8], size: f32, fonts: &[BackendFontInfo]) {
        self.font = fonts.iter().find(|f| f.name == key).cloned();
        self.font_name = match &self.font {
            Some(info) => info.base_font.clone(),
            None => String::from_utf8_lossy(key).to_string(),
        };
        self.font_size = size;
    }
}

/// Collects spans while the content stream is replayed.
struct SpanSink<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    spans: Vec<TextSpan>,
}

impl<B: PdfBackend + ?Sized> SpanSink<'_, B> {
    fn decode(&self, state: &TextState, bytes: &[u8]) -> String {
        self.backend.decode_text(state.font.as_ref(), bytes)
    }

    /// Emit text at the current position and advance past it.
    fn show(&mut self, state: &mut TextState, text: String) {
        let advance = state.text_advance(&text);
        if !text.trim().is_empty() {
            let m = state.rendering_matrix();
            let width = advance * state.horizontal_scale();
            self.spans.push(
                TextSpan::new(text, m[4], m[5], state.effective_font_size(), state.font_name.clone())
                    .with_width(width),
            );
        }
        state.advance(advance);
    }

    fn show_string(&mut self, state: &mut TextState, operand: Option<&PdfValue>) {
        if let Some(PdfValue::Str(bytes)) = operand {
            let text = self.decode(state, bytes);
            self.show(state, text);
        }
    }

    /// TJ: strings interleaved with kerning adjustments in thousandths of
    /// an em. Large negative adjustments are word breaks.
    fn show_array(&mut self, state: &mut TextState, items: &[PdfValue]) {
        let mut combined = String::new();
        let mut adjustment_total = 0.0;

        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(state, bytes)),
                other => {
                    let Some(n) = get_number_from_value(other) else {
                        continue;
                    };
                    adjustment_total += n;
                    let ends_spaceless = combined
                        .chars()
                        .last()
                        .map_or(true, |c| c == ' ' || c == '\u{00A0}' || is_spaceless_script_char(c));
                    if -n > TJ_SPACE_THRESHOLD && !ends_spaceless {
                        combined.push(' ');
                    }
                }
            }
        }

        let kerning = -adjustment_total / 1000.0 * state.font_size * state.horiz_scale;
        self.show(state, combined);
        state.advance(kerning);
    }
}

/// Walk a page's content stream and produce text spans.
///
/// Handles `q`/`Q`/`cm` for the transformation matrix and the text operators
/// `BT`, `ET`, `Tf`, `TL`, `Tc`, `Tw`, `Tz`, `Td`, `TD`, `Tm`, `T*`, `Tj`,
/// `TJ`, `'` and `"`.
pub fn extract_page_spans<B: PdfBackend + ?Sized>(backend: &B, page: PageId) -> Result<Vec<TextSpan>> {
    let content = backend.page_content(page)?;
    let ops = backend.decode_content(&content)?;
    let fonts = backend.page_fonts(page).unwrap_or_default();

    let mut state = TextState::default();
    let mut sink = SpanSink {
        backend,
        spans: Vec::new(),
    };

    for op in &ops {
        let operands = op.operands.as_slice();
        let number = |i: usize| operands.get(i).and_then(get_number_from_value);

        match op.operator.as_str() {
            "q" => state.ctm_stack.push(state.ctm),
            "Q" => {
                if let Some(ctm) = state.ctm_stack.pop() {
                    state.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = matrix_operands(operands) {
                    state.ctm = multiply(&m, &state.ctm);
                }
            }
            "BT" => {
                state.text_matrix = IDENTITY;
                state.line_matrix = IDENTITY;
            }
            "ET" => {}
            "Tf" => {
                if let (Some(PdfValue::Name(key)), Some(size)) = (operands.first(), number(1)) {
                    state.set_font(key, size, &fonts);
                }
            }
            "TL" => state.leading = number(0).unwrap_or(state.leading),
            "Tc" => state.char_spacing = number(0).unwrap_or(state.char_spacing),
            "Tw" => state.word_spacing = number(0).unwrap_or(state.word_spacing),
            "Tz" => state.horiz_scale = number(0).map_or(state.horiz_scale, |v| v / 100.0),
            "Td" => {
                if let (Some(tx), Some(ty)) = (number(0), number(1)) {
                    state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (number(0), number(1)) {
                    state.leading = -ty;
                    state.translate_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = matrix_operands(operands) {
                    state.text_matrix = m;
                    state.line_matrix = m;
                }
            }
            "T*" => state.next_line(),
            "Tj" => sink.show_string(&mut state, operands.first()),
            "TJ" => {
                if let Some(PdfValue::Array(items)) = operands.first() {
                    sink.show_array(&mut state, items);
                }
            }
            "'" => {
                state.next_line();
                sink.show_string(&mut state, operands.first());
            }
            "\"" => {
                if let (Some(aw), Some(ac)) = (number(0), number(1)) {
                    state.word_spacing = aw;
                    state.char_spacing = ac;
                }
                state.next_line();
                sink.show_string(&mut state, operands.get(2));
            }
            _ => {}
        }
    }

    Ok(sink.spans)
}

/// Group spans into lines based on baseline, top to bottom.
///
/// Spans whose baselines differ by at most 30% of the font size share a
/// line. A line is split again wherever the horizontal gap between
/// neighbours exceeds a few ems.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    // Sort spans by Y (descending, since PDF Y is bottom-up) then X
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut baselines: Vec<Vec<TextSpan>> = Vec::new();
    for span in spans {
        let y_tolerance = span.font_size * 0.3;
        match baselines.last_mut() {
            Some(current) if (current[0].y - span.y).abs() <= y_tolerance => current.push(span),
            _ => baselines.push(vec![span]),
        }
    }

    let mut lines = Vec::new();
    for mut baseline in baselines {
        baseline.sort_by(|a, b| a.x.total_cmp(&b.x));
        let mut segment: Vec<TextSpan> = Vec::new();
        for span in baseline {
            let split = segment.last().is_some_and(|prev: &TextSpan| {
                span.x - prev.right() > LINE_SPLIT_GAP * prev.font_size.max(span.font_size)
            });
            if split {
                lines.push(TextLine::from_spans(std::mem::take(&mut segment)));
            }
            segment.push(span);
        }
        if !segment.is_empty() {
            lines.push(TextLine::from_spans(segment));
        }
    }
    lines
}

/// Convert a page's spans into runs in top-left coordinates.
pub fn spans_to_runs(spans: Vec<TextSpan>, page: u32, page_height: f32) -> Vec<TextRun> {
    group_spans_into_lines(spans)
        .into_iter()
        .filter_map(|line| line.into_run(page, page_height))
        .collect()
}
