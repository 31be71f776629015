//! Script-aware character classes and text normalization.
//!
//! Length and alphabetic-content checks count Unicode code points and letters
//! of any script, so CJK, Devanagari and Tamil headings are not penalized for
//! being short.

use unicode_normalization::UnicodeNormalization;

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
pub fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs
    (0x4E00..=0x9FFF).contains(&code)
    // CJK Unified Ideographs Extension A
    || (0x3400..=0x4DBF).contains(&code)
    // CJK Unified Ideographs Extension B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // CJK Compatibility Ideographs
    || (0xF900..=0xFAFF).contains(&code)
    // Hiragana and Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Devanagari and Tamil vowel signs and viramas are combining marks, some of
/// which are not `Alphabetic`; they still belong to the word.
fn is_indic_sign(c: char) -> bool {
    let code = c as u32;
    (0x0900..=0x0963).contains(&code) || (0x0B80..=0x0BD7).contains(&code)
}

/// A letter of any supported script.
pub fn is_script_letter(c: char) -> bool {
    c.is_alphabetic() || is_indic_sign(c)
}

/// A letter of the Latin script (ASCII, Latin-1, Latin Extended).
pub fn is_latin_letter(c: char) -> bool {
    if !c.is_alphabetic() {
        return false;
    }
    let code = c as u32;
    c.is_ascii()
        || (0x00C0..=0x024F).contains(&code)
        || (0x1E00..=0x1EFF).contains(&code)
        || (0xFF21..=0xFF5A).contains(&code)
}

/// A letter of a non-Latin script (CJK, Hangul, Devanagari, Tamil, ...).
pub fn is_non_latin_letter(c: char) -> bool {
    is_script_letter(c) && !is_latin_letter(c)
}

/// Ratio of letters (any script) to non-whitespace characters.
///
/// Replacement characters, private-use glyphs and control codes count as
/// non-letters. Returns 0.0 for text without visible characters.
pub fn alphabetic_ratio(text: &str) -> f32 {
    let mut visible = 0usize;
    let mut letters = 0usize;
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        visible += 1;
        if is_script_letter(c) {
            letters += 1;
        }
    }
    if visible == 0 {
        0.0
    } else {
        letters as f32 / visible as f32
    }
}

/// Whether the text contains any CJK ideograph or kana.
pub fn contains_spaceless_script(text: &str) -> bool {
    text.chars().any(is_spaceless_script_char)
}

/// Trim and collapse internal whitespace runs to single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize text for frequency comparison.
///
/// Applies NFKC, drops control characters, collapses whitespace and
/// lowercases unless the text is written in a CJK script.
pub fn normalize_text(text: &str) -> String {
    let folded: String = text.nfkc().filter(|c| !c.is_control()).collect();
    let collapsed = collapse_whitespace(&folded);
    if contains_spaceless_script(&collapsed) {
        collapsed
    } else {
        collapsed.to_lowercase()
    }
}

/// Join two text fragments, inserting a space unless both sides of the
/// boundary are CJK characters.
pub fn join_fragments(left: &str, right: &str) -> String {
    let spaceless = matches!(
        (left.chars().last(), right.chars().next()),
        (Some(a), Some(b)) if is_spaceless_script_char(a) && is_spaceless_script_char(b)
    );
    if left.is_empty() {
        right.to_string()
    } else if right.is_empty() || spaceless {
        format!("{}{}", left, right)
    } else {
        format!("{} {}", left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaceless_script() {
        assert!(is_spaceless_script_char('概'));
        assert!(is_spaceless_script_char('あ'));
        assert!(is_spaceless_script_char('カ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }

    #[test]
    fn test_script_letters() {
        assert!(is_latin_letter('é'));
        assert!(!is_latin_letter('1'));
        assert!(is_non_latin_letter('概'));
        assert!(is_non_latin_letter('한'));
        assert!(is_non_latin_letter('न'));
        // Devanagari virama is a combining sign, not Alphabetic
        assert!(is_script_letter('\u{094D}'));
        assert!(is_non_latin_letter('த'));
        assert!(!is_non_latin_letter('a'));
    }

    #[test]
    fn test_alphabetic_ratio() {
        assert!((alphabetic_ratio("abcd") - 1.0).abs() < f32::EPSILON);
        assert!((alphabetic_ratio("ab 12") - 0.5).abs() < f32::EPSILON);
        assert_eq!(alphabetic_ratio("   "), 0.0);
        assert!(alphabetic_ratio("\u{FFFD}\u{FFFD}\u{E000}a") < 0.4);
        assert!((alphabetic_ratio("नमस्ते") - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Annual   Report \n"), "annual report");
        assert_eq!(normalize_text("Ｐａｇｅ"), "page");
        assert_eq!(normalize_text("概要\u{0007}"), "概要");
    }

    #[test]
    fn test_join_fragments() {
        assert_eq!(join_fragments("Annual", "Report"), "Annual Report");
        assert_eq!(join_fragments("年次", "報告"), "年次報告");
        assert_eq!(join_fragments("", "Report"), "Report");
    }
}
