//! Structural noise classification.
//!
//! Running headers, footers, page numbers, dates, URLs and boilerplate are
//! document furniture rather than content. Rules are applied in a fixed
//! order and the first match wins.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::TextRun;

use super::options::InferOptions;
use super::profile::DocumentProfile;
use super::script::{alphabetic_ratio, is_latin_letter, is_non_latin_letter, normalize_text};

/// Why a run was classified as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseKind {
    /// Too few characters to carry meaning
    TooShort,
    /// Page number or page counter
    PageNumber,
    /// Date or timestamp
    Date,
    /// URL, domain or e-mail address
    Url,
    /// Copyright, version or confidentiality notice
    Boilerplate,
    /// Running header or footer
    Repeated,
    /// Mostly digits, symbols or undecodable glyphs
    LowAlphabetic,
}

impl NoiseKind {
    /// Short label used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            NoiseKind::TooShort => "too-short",
            NoiseKind::PageNumber => "page-number",
            NoiseKind::Date => "date",
            NoiseKind::Url => "url",
            NoiseKind::Boilerplate => "boilerplate",
            NoiseKind::Repeated => "repeated",
            NoiseKind::LowAlphabetic => "low-alphabetic",
        }
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("noise pattern must compile"))
        .collect()
}

fn roman_numeral(upper: bool) -> String {
    let pattern = r"^M{0,3}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})\.?$";
    if upper {
        pattern.to_string()
    } else {
        pattern.to_lowercase()
    }
}

static PAGE_NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let upper = roman_numeral(true);
    let lower = roman_numeral(false);
    compile(&[
        r"^\d+$",
        r"(?i)^(page|pg\.?|p\.)\s*\d+(\s*(of|/)\s*\d+)?$",
        r"(?i)^\d+\s*(of|/)\s*\d+$",
        r"^[-–—]\s*\d+\s*[-–—]$",
        r"^第\s*\d+\s*[页頁]$",
        r"^\d+\s*쪽$",
        &upper,
        &lower,
    ])
});

const MONTHS: &str = r"(jan(uary)?|feb(ruary)?|mar(ch)?|apr(il)?|may|june?|july?|aug(ust)?|sep(t(ember)?)?|oct(ober)?|nov(ember)?|dec(ember)?)";
const WEEKDAY: &str = r"((mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+)?";

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let month_day_year = format!(
        r"(?i)^{}{}\.?\s+\d{{1,2}}(st|nd|rd|th)?,?\s+\d{{4}}$",
        WEEKDAY, MONTHS
    );
    let day_month_year = format!(
        r"(?i)^{}\d{{1,2}}(st|nd|rd|th)?\s+{}\.?,?\s+\d{{4}}$",
        WEEKDAY, MONTHS
    );
    let month_year = format!(r"(?i)^{}\.?,?\s+\d{{4}}$", MONTHS);
    compile(&[
        r"(?i)^\d{1,2}:\d{2}(:\d{2})?\s*(am|pm)?$",
        r"^\d{4}\s*年\s*\d{1,2}\s*月(\s*\d{1,2}\s*日)?$",
        &month_day_year,
        &day_month_year,
        &month_year,
    ])
});

/// Day, month and year in any order, e.g. "15/03/2024" or "2024.03.15".
static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,4})[/.\-](\d{1,2})[/.\-](\d{1,4})$")
        .expect("numeric date pattern must compile")
});

/// ISO 8601 date with an optional time part.
static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})([T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?\s*(Z|[+-]\d{2}:?\d{2})?)?$")
        .expect("ISO date pattern must compile")
});

const NUMERIC_DATE_ORDERS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m-%d-%Y", "%d-%m-%y", "%m-%d-%y"];

const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%A, %B %d, %Y",
    "%Y年%m月%d日",
];

static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)^(https?://|ftp://|www\.)\S+$",
        r"(?i)https?://\S+",
        r"[\w.+-]+@[\w-]+(\.[\w-]+)+",
        r"(?i)^[\w-]+(\.[\w-]+)*\.(com|org|net|edu|gov|io|co|uk|de|fr|jp|cn|kr|in|info|biz)(/\S*)?$",
    ])
});

static BOILERPLATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"©",
        r"(?i)\(c\)\s*\d{4}",
        r"(?i)^copyright\b",
        r"(?i)all rights reserved",
        r"(?i)^(v|ver\.?|version)\s*\d+(\.\d+){1,3}([-+.]?[0-9a-z]+)?$",
        r"(?i)^((strictly|company|highly)\s+)?(confidential|proprietary)([\s:,.\-]+(and\s+)?(confidential|proprietary|information|document|draft))*\.?$",
        r"(?i)for internal use only",
        r"(?i)do not (distribute|copy|reproduce)",
    ])
});

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|p| p.is_match(text))
}

/// Short text survives only when written purely in a non-Latin script
/// (digits allowed) with enough letters, e.g. "概要" or "第1章".
fn is_too_short(text: &str, options: &InferOptions) -> bool {
    if text.chars().count() >= options.min_text_chars {
        return false;
    }
    let mut non_latin = 0usize;
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        if is_non_latin_letter(c) {
            non_latin += 1;
        } else if is_latin_letter(c) || !c.is_numeric() {
            return true;
        }
    }
    non_latin < options.min_non_latin_chars
}

/// Numeric shapes only count when they name a real calendar day.
fn is_calendar_date(text: &str) -> bool {
    if let Some(caps) = ISO_DATE.captures(text) {
        return NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").is_ok();
    }
    let Some(caps) = NUMERIC_DATE.captures(text) else {
        return false;
    };
    let dashed = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
    NUMERIC_DATE_ORDERS
        .iter()
        .any(|format| NaiveDate::parse_from_str(&dashed, format).is_ok())
}

/// Whether the text is a date or timestamp.
pub fn is_date(text: &str) -> bool {
    if ISO_DATE.is_match(text) || NUMERIC_DATE.is_match(text) {
        return is_calendar_date(text);
    }
    if any_match(&DATE_PATTERNS, text) {
        return true;
    }
    if DateTime::parse_from_rfc3339(text).is_ok() || DateTime::parse_from_rfc2822(text).is_ok() {
        return true;
    }
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(text, format).is_ok())
}

/// Whether the text is a page number or page counter.
pub fn is_page_number(text: &str) -> bool {
    any_match(&PAGE_NUMBER_PATTERNS, text)
}

/// Whether the text is a URL, bare domain or e-mail address.
pub fn is_url(text: &str) -> bool {
    any_match(&URL_PATTERNS, text)
}

/// Whether the text is a copyright, version or confidentiality notice.
pub fn is_boilerplate(text: &str) -> bool {
    any_match(&BOILERPLATE_PATTERNS, text)
}

/// Classify a piece of text.
///
/// Returns the first matching noise rule, or `None` for content.
pub fn classify_text(
    text: &str,
    profile: &DocumentProfile,
    options: &InferOptions,
) -> Option<NoiseKind> {
    let text = text.trim();

    if is_too_short(text, options) {
        return Some(NoiseKind::TooShort);
    }
    if is_page_number(text) {
        return Some(NoiseKind::PageNumber);
    }
    if is_date(text) {
        return Some(NoiseKind::Date);
    }
    if is_url(text) {
        return Some(NoiseKind::Url);
    }
    if is_boilerplate(text) {
        return Some(NoiseKind::Boilerplate);
    }
    if profile.is_repeated(&normalize_text(text)) {
        return Some(NoiseKind::Repeated);
    }
    if alphabetic_ratio(text) < options.min_alphabetic_ratio {
        return Some(NoiseKind::LowAlphabetic);
    }
    None
}

/// Classify a run.
pub fn classify(
    run: &TextRun,
    profile: &DocumentProfile,
    options: &InferOptions,
) -> Option<NoiseKind> {
    classify_text(&run.text, profile, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(text: &str) -> Option<NoiseKind> {
        classify_text(text, &DocumentProfile::default(), &InferOptions::default())
    }

    #[test]
    fn test_short_text() {
        assert_eq!(kind("abc"), Some(NoiseKind::TooShort));
        assert_eq!(kind("  "), Some(NoiseKind::TooShort));
        assert_eq!(kind("12"), Some(NoiseKind::TooShort));
        assert_eq!(kind("概要"), None);
        assert_eq!(kind("第1章"), None);
        assert_eq!(kind("서론"), None);
        assert_eq!(kind("概"), Some(NoiseKind::TooShort));
        assert_eq!(kind("a概"), Some(NoiseKind::TooShort));
    }

    #[test]
    fn test_page_numbers() {
        for text in ["Page 3", "page 12 of 40", "3 of 10", "12/40", "- 7 -", "p. 14", "1234", "xviii", "XIV."] {
            assert_eq!(kind(text), Some(NoiseKind::PageNumber), "{}", text);
        }
        assert_eq!(kind("Pages of History"), None);
    }

    #[test]
    fn test_dates() {
        for text in [
            "2024-03-15",
            "15/03/2024",
            "2024-03-15T10:30:00Z",
            "March 15, 2024",
            "Friday, March 15, 2024",
            "15 March 2024",
            "Sept. 2023",
            "10:45 am",
            "2024年3月15日",
            "Fri, 15 Mar 2024 10:30:00 +0000",
        ] {
            assert_eq!(kind(text), Some(NoiseKind::Date), "{}", text);
        }
        assert_eq!(kind("March of Progress"), None);
    }

    #[test]
    fn test_numeric_dates_must_exist() {
        assert_eq!(kind("29.02.2024"), Some(NoiseKind::Date));
        assert_eq!(kind("2024/03/15"), Some(NoiseKind::Date));
        assert_eq!(kind("03/15/24"), Some(NoiseKind::Date));
        assert!(!is_date("99/99/9999"));
        assert!(!is_date("45.13.2024"));
        assert!(!is_date("2024-13-40"));
        assert_ne!(kind("99/99/9999"), Some(NoiseKind::Date));
    }

    #[test]
    fn test_urls() {
        for text in [
            "https://example.com/report",
            "www.example.org",
            "Contact: info@example.com",
            "example.com",
        ] {
            assert_eq!(kind(text), Some(NoiseKind::Url), "{}", text);
        }
    }

    #[test]
    fn test_boilerplate() {
        for text in [
            "© 2024 ACME Corp",
            "Copyright 2024 ACME",
            "All Rights Reserved.",
            "v1.2.3",
            "Version 2.0",
            "Confidential",
            "Strictly Confidential",
            "For internal use only",
        ] {
            assert_eq!(kind(text), Some(NoiseKind::Boilerplate), "{}", text);
        }
        assert_eq!(kind("Confidential Computing in Practice"), None);
    }

    #[test]
    fn test_repeated_text() {
        let mut profile = DocumentProfile::default();
        profile.repeated_texts.insert("acme quarterly".to_string());
        let options = InferOptions::default();
        assert_eq!(
            classify_text("ACME  Quarterly", &profile, &options),
            Some(NoiseKind::Repeated)
        );
        assert_eq!(classify_text("ACME Annual", &profile, &options), None);
    }

    #[test]
    fn test_low_alphabetic() {
        assert_eq!(kind("12.5% / 3.4%"), Some(NoiseKind::LowAlphabetic));
        assert_eq!(kind("\u{FFFD}\u{FFFD}\u{FFFD}\u{FFFD}"), Some(NoiseKind::LowAlphabetic));
        assert_eq!(kind("नमस्ते दुनिया"), None);
    }

    #[test]
    fn test_content_is_not_noise() {
        assert_eq!(kind("1. Introduction"), None);
        assert_eq!(kind("Annual Report"), None);
    }
}
