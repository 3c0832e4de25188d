//! Markdown summary parser.
//!
//! The summarizer emits loosely structured markdown:
//!
//! ```text
//! * Paper Title: <title>
//! * Author Information:
//!   - <name>
//! * Institutional Information:
//!   - <affiliation>
//! ## <Heading>
//! 1. <bullet>
//! ![label](https://...)
//! ```
//!
//! surrounded by arbitrary prose. Three independent passes run over the
//! same source text: header fields, `## ` sections, and images. Nothing in
//! here fails; unmatched lines are ignored.

use regex::Regex;
use std::sync::OnceLock;

use crate::model::{split_names, Document, ImageRef, Section};

use super::cleanup::{clean_inline, clean_optional};

/// Line prefix that opens a section.
const SECTION_MARKER: &str = "## ";

struct MarkdownPatterns {
    field: Regex,
    list_item: Regex,
    numbered: Regex,
    image: Regex,
}

fn patterns() -> &'static MarkdownPatterns {
    static PATTERNS: OnceLock<MarkdownPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| MarkdownPatterns {
        field: Regex::new(
            r"(?i)^\s*(?:[-*•+]\s+)?(?:\*\*|__)?\s*(paper\s+title|authors?(?:\s+information)?|institution(?:al|s)?(?:\s+information)?)\s*(?:\*\*|__)?\s*:\s*(?:\*\*|__)?(.*)$",
        )
        .unwrap(),
        list_item: Regex::new(r"^\s*(?:[-*•+]|\d+\s*[.)])\s+(.+)$").unwrap(),
        numbered: Regex::new(r"^\s*\d+[.)]\s+(.+)$").unwrap(),
        image: Regex::new(r#"!\[([^\]]*)\]\((https?://[^\s)]+)(?:\s+"[^"]*")?\)"#).unwrap(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Authors,
    Institutions,
}

impl Field {
    fn from_label(label: &str) -> Self {
        let label = label.to_ascii_lowercase();
        if label.starts_with("paper") {
            Field::Title
        } else if label.starts_with("author") {
            Field::Authors
        } else {
            Field::Institutions
        }
    }
}

/// Parse a markdown summary into a [`Document`].
pub fn parse_markdown(text: &str) -> Document {
    let mut doc = Document::new();

    parse_header(text, &mut doc);
    doc.sections = parse_sections(text);
    doc.images = parse_images(text);
    doc.summary_text = doc.preview();

    doc
}

/// Title, authors and institutions.
///
/// The first non-empty `Paper Title:` wins. After an `Author Information:`
/// or `Institutional Information:` line, list items are collected by
/// position until a heading or another field line.
fn parse_header(text: &str, doc: &mut Document) {
    let p = patterns();
    let mut mode: Option<Field> = None;

    for line in text.lines() {
        if let Some(caps) = p.field.captures(line) {
            let field = Field::from_label(&caps[1]);
            let value = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            mode = None;

            match field {
                Field::Title => {
                    if doc.title.is_none() {
                        doc.title = clean_optional(Some(value));
                    }
                }
                Field::Authors | Field::Institutions => {
                    let inline: Vec<String> = split_names(&clean_inline(value));
                    let target = if field == Field::Authors {
                        &mut doc.authors
                    } else {
                        &mut doc.institutions
                    };
                    if inline.is_empty() {
                        mode = Some(field);
                    } else {
                        target.extend(inline);
                    }
                }
            }
            continue;
        }

        let Some(field) = mode else {
            continue;
        };

        if line.trim_start().starts_with('#') {
            mode = None;
            continue;
        }

        if let Some(caps) = p.list_item.captures(line) {
            let item = clean_inline(&caps[1]);
            if item.is_empty() {
                continue;
            }
            match field {
                Field::Authors => doc.authors.push(item),
                Field::Institutions => doc.institutions.push(item),
                Field::Title => {}
            }
        }
    }
}

/// Split on `## ` lines; the preface before the first marker is dropped.
fn parse_sections(text: &str) -> Vec<Section> {
    let p = patterns();
    let mut sections: Vec<Section> = Vec::new();

    for line in text.lines() {
        if let Some(heading) = line.strip_prefix(SECTION_MARKER) {
            sections.push(Section::new(clean_inline(heading)));
            continue;
        }

        let Some(section) = sections.last_mut() else {
            continue;
        };

        if line.trim_start().starts_with("![") {
            continue;
        }

        if let Some(caps) = p.numbered.captures(line) {
            let bullet = clean_inline(&caps[1]);
            if !bullet.is_empty() {
                section.add_bullet(bullet);
            }
        }
    }

    sections
}

/// Every `![label](http(s)://...)` in the document, in order.
fn parse_images(text: &str) -> Vec<ImageRef> {
    patterns()
        .image
        .captures_iter(text)
        .map(|caps| ImageRef {
            url: caps[2].to_string(),
            kind: None,
            label: Some(caps[1].trim())
                .filter(|l| !l.is_empty())
                .map(String::from),
        })
        .collect()
}
