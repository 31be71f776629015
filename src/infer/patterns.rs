//! Multilingual structural heading patterns.
//!
//! Patterns live in an ordered table of `(script, name, regex, level)` rows.
//! Rows are evaluated top to bottom and the first match wins, so deeper
//! numbering must precede shallower numbering. Adding a script means adding
//! rows, not branches.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::HeadingLevel;

/// Script a pattern row is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Latin-script and numeric conventions
    Latin,
    /// Chinese and Japanese (Han ideographs, kana)
    Cjk,
    /// Korean (Hangul)
    Hangul,
    /// Hindi, Marathi, Sanskrit (Devanagari)
    Devanagari,
    /// Tamil
    Tamil,
}

/// A compiled heading pattern.
#[derive(Debug)]
pub struct HeadingPattern {
    /// Script the pattern targets
    pub script: Script,
    /// Short identifier used in diagnostics
    pub name: &'static str,
    /// Compiled expression, matched against whitespace-collapsed text
    pub regex: Regex,
    /// Level implied by a match
    pub level: HeadingLevel,
}

use HeadingLevel::{H1, H2, H3, H4};

const CJK_NUMERAL: &str = r"[一二三四五六七八九十百千〇零\d]+";

#[rustfmt::skip]
static PATTERN_TABLE: Lazy<Vec<(Script, &'static str, String, HeadingLevel)>> = Lazy::new(|| {
    vec![
        // Latin numbering, deepest first
        (Script::Latin, "numbered-4", r"^\d{1,2}\.\d{1,2}\.\d{1,2}\.\d{1,2}\.?\s+\S".into(), H4),
        (Script::Latin, "numbered-3", r"^\d{1,2}\.\d{1,2}\.\d{1,2}\.?\s+\S".into(), H3),
        (Script::Latin, "numbered-2", r"^\d{1,2}\.\d{1,2}\.?\s+\S".into(), H2),
        (Script::Latin, "numbered-1", r"^\d{1,2}\.\s+\p{L}".into(), H1),
        (Script::Latin, "chapter", r"(?i)^(chapter|part|book)\s+(\d+|[ivxlcdm]+|[a-z]+)\b".into(), H1),
        (Script::Latin, "appendix", r"(?i)^(appendix|annex)\s+[a-z0-9]+\b".into(), H1),
        (Script::Latin, "section", r"(?i)^(section|article)\s+\d+(\.\d+)*\b".into(), H2),
        (Script::Latin, "roman", r"^[IVXLC]{1,6}\.\s+\p{Lu}".into(), H1),
        (Script::Latin, "letter-enum", r"^[A-Z][.)]\s+\p{Lu}\p{Ll}".into(), H2),
        (Script::Latin, "labelled", r"^\p{Lu}\p{Ll}+\s+[A-Z0-9IVX]+:\s+\p{L}{3,}".into(), H2),
        (Script::Latin, "colon-word", r"^\p{Lu}\p{Ll}{3,}:$".into(), H2),
        (Script::Latin, "colon-phrase", r"^\p{Lu}[\p{L}\s&',-]{10,}:$".into(), H3),
        (Script::Latin, "question", r"^\p{Lu}[\p{L}\s,'-]{8,}\?$".into(), H3),
        (Script::Latin, "all-caps", r"^\p{Lu}[\p{Lu}\d\s&',:-]{4,59}$".into(), H2),
        (Script::Latin, "title-case", r"^\p{Lu}\p{Ll}+(\s+\p{Lu}\p{Ll}+){2,7}$".into(), H3),
        // Chinese and Japanese
        (Script::Cjk, "cjk-chapter", format!(r"^第{}[章編编部]", CJK_NUMERAL), H1),
        (Script::Cjk, "cjk-section", format!(r"^第{}[節节]", CJK_NUMERAL), H2),
        (Script::Cjk, "cjk-article", format!(r"^第{}条", CJK_NUMERAL), H3),
        (Script::Cjk, "cjk-enum", r"^[一二三四五六七八九十]+[、．.]\s*\S".into(), H2),
        (Script::Cjk, "kanji", r"^[\x{4E00}-\x{9FAF}]{2,10}$".into(), H2),
        (Script::Cjk, "kana", r"^[\x{3040}-\x{309F}\x{30A0}-\x{30FF}]{3,20}$".into(), H2),
        (Script::Cjk, "japanese-mixed", r"^[\x{4E00}-\x{9FAF}\x{3040}-\x{30FF}][\x{4E00}-\x{9FAF}\x{3040}-\x{30FF}\s]{3,19}$".into(), H3),
        // Korean
        (Script::Hangul, "korean-chapter", r"^제\s*\d+\s*[장편부]".into(), H1),
        (Script::Hangul, "korean-section", r"^제\s*\d+\s*절".into(), H2),
        (Script::Hangul, "korean-roman", r"^[ⅠⅡⅢⅣⅤⅥⅦⅧⅨⅩ][.\s]".into(), H1),
        (Script::Hangul, "korean-enum", r"^[가나다라마바사아자차카타파하][.)]\s*\S".into(), H3),
        (Script::Hangul, "korean-marker", r"^[□■◆◇]\s*[\x{AC00}-\x{D7AF}]".into(), H3),
        (Script::Hangul, "hangul", r"^[\x{AC00}-\x{D7AF}][\x{AC00}-\x{D7AF}\s]{2,29}$".into(), H2),
        // Devanagari
        (Script::Devanagari, "devanagari-chapter", r"^(अध्याय|भाग|खंड)\s*[\d०-९]+".into(), H1),
        (Script::Devanagari, "devanagari-numbered-2", r"^[०-९]+\.[०-९]+\s+\S".into(), H2),
        (Script::Devanagari, "devanagari-numbered", r"^[०-९]+\.\s+\S".into(), H1),
        (Script::Devanagari, "devanagari", r"^[\x{0900}-\x{097F}][\x{0900}-\x{097F}\s]{3,39}$".into(), H2),
        // Tamil
        (Script::Tamil, "tamil-chapter", r"^(அத்தியாயம்|பகுதி)\s*[\d௦-௯]*".into(), H1),
        (Script::Tamil, "tamil", r"^[\x{0B80}-\x{0BFF}][\x{0B80}-\x{0BFF}\s]{3,39}$".into(), H2),
    ]
});

static HEADING_PATTERNS: Lazy<Vec<HeadingPattern>> = Lazy::new(|| {
    PATTERN_TABLE
        .iter()
        .map(|(script, name, source, level)| HeadingPattern {
            script: *script,
            name: *name,
            regex: Regex::new(source).expect("heading pattern table must compile"),
            level: *level,
        })
        .collect()
});

/// All heading patterns in priority order.
pub fn heading_patterns() -> &'static [HeadingPattern] {
    &HEADING_PATTERNS
}

/// First pattern matching the text, if any.
///
/// `text` should already be trimmed and whitespace-collapsed.
pub fn match_heading(text: &str) -> Option<&'static HeadingPattern> {
    HEADING_PATTERNS.iter().find(|p| p.regex.is_match(text))
}
