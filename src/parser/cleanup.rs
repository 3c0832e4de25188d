//! Inline text cleanup shared by both parsers.
//!
//! Summarizer output carries markdown decoration that means nothing on a
//! raster canvas. Every string that ends up on the sketch goes through
//! [`clean_inline`] once, at parse time.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),  // ﬀ
    ("\u{FB01}", "fi"),  // ﬁ
    ("\u{FB02}", "fl"),  // ﬂ
    ("\u{FB03}", "ffi"), // ﬃ
    ("\u{FB04}", "ffl"), // ﬄ
    ("\u{FB05}", "st"),  // ﬅ
    ("\u{FB06}", "st"),  // ﬆ
];

struct InlinePatterns {
    image: Regex,
    link: Regex,
    emphasis: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static InlinePatterns {
    static PATTERNS: OnceLock<InlinePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| InlinePatterns {
        image: Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap(),
        link: Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap(),
        emphasis: Regex::new(r"\*\*|__|`").unwrap(),
        whitespace: Regex::new(r"\s+").unwrap(),
    })
}

/// Normalize one line of summary text for display.
///
/// NFC-normalizes, expands ligatures, drops replacement characters, removes
/// inline images, keeps link text without the target, strips bold and code
/// markers, and collapses whitespace.
pub fn clean_inline(text: &str) -> String {
    let p = patterns();

    let mut result: String = text.nfc().collect();
    for (ligature, replacement) in LIGATURES {
        if result.contains(ligature) {
            result = result.replace(ligature, replacement);
        }
    }
    result = result.replace('\u{FFFD}', "");

    result = p.image.replace_all(&result, "").into_owned();
    result = p.link.replace_all(&result, "$1").into_owned();
    result = p.emphasis.replace_all(&result, "").into_owned();
    result = p.whitespace.replace_all(&result, " ").into_owned();

    result.trim().to_string()
}

/// Clean and drop the value if nothing is left.
pub fn clean_optional(text: Option<&str>) -> Option<String> {
    text.map(clean_inline).filter(|s| !s.is_empty())
}
