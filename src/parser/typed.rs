//! Typed-record parser.

use crate::model::{Document, ImageRef, PaperRecord};

use super::cleanup::{clean_inline, clean_optional};

/// Map a typed record onto a [`Document`].
///
/// Absent fields take the document defaults. Images without a URL are
/// dropped; tags are trimmed and lower-cased so the figure selector can
/// compare them directly.
pub fn parse_record(record: &PaperRecord) -> Document {
    let mut doc = Document::new();

    if let Some(paper) = &record.paper {
        doc.title = clean_optional(paper.title.as_deref());
        doc.authors = clean_all(&paper.authors);
        doc.institutions = clean_all(&paper.institutions);
        doc.venue = clean_optional(paper.venue.as_deref());
        doc.year = paper.year;
        doc.url = paper
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from);
    }

    doc.summary_text = record
        .summary_text
        .as_deref()
        .map(clean_inline)
        .unwrap_or_default();

    doc.images = record
        .images
        .iter()
        .filter_map(|entry| {
            let url = entry.url.trim();
            if url.is_empty() {
                return None;
            }
            Some(ImageRef {
                url: url.to_string(),
                kind: entry
                    .kind
                    .as_deref()
                    .map(|k| k.trim().to_ascii_lowercase())
                    .filter(|k| !k.is_empty()),
                label: clean_optional(entry.label.as_deref()),
            })
        })
        .collect();

    doc
}

fn clean_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| clean_inline(v))
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageEntry, PaperInfo};

    #[test]
    fn test_empty_record() {
        let doc = parse_record(&PaperRecord::default());
        assert_eq!(doc, Document::new());
    }

    #[test]
    fn test_field_mapping() {
        let record = PaperRecord {
            paper: Some(PaperInfo {
                title: Some("  Attention Is All You Need ".to_string()),
                authors: vec!["Vaswani".to_string(), " ".to_string(), "Shazeer".to_string()],
                year: Some(2017),
                venue: Some("NeurIPS".to_string()),
                url: Some(" https://arxiv.org/abs/1706.03762 ".to_string()),
                ..Default::default()
            }),
            summary_text: Some("Transformers **replace** recurrence.".to_string()),
            images: vec![],
        };

        let doc = parse_record(&record);
        assert_eq!(doc.title.as_deref(), Some("Attention Is All You Need"));
        assert_eq!(doc.authors, vec!["Vaswani", "Shazeer"]);
        assert_eq!(doc.year, Some(2017));
        assert_eq!(doc.url.as_deref(), Some("https://arxiv.org/abs/1706.03762"));
        assert_eq!(doc.summary_text, "Transformers replace recurrence.");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_images_are_filtered_and_classified() {
        let record = PaperRecord {
            images: vec![
                ImageEntry {
                    url: "https://x/1.png".to_string(),
                    kind: Some(" Figure ".to_string()),
                    label: Some("Fig. 1".to_string()),
                },
                ImageEntry {
                    url: "   ".to_string(),
                    kind: Some("figure".to_string()),
                    label: None,
                },
                ImageEntry {
                    url: "https://x/p1.png".to_string(),
                    kind: Some("".to_string()),
                    label: None,
                },
            ],
            ..Default::default()
        };

        let doc = parse_record(&record);
        assert_eq!(doc.images.len(), 2);
        assert_eq!(doc.images[0].kind.as_deref(), Some("figure"));
        assert_eq!(doc.images[0].label.as_deref(), Some("Fig. 1"));
        assert_eq!(doc.images[1].kind, None);
    }
}
