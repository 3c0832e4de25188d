//! JSON dump of a parsed document.
//!
//! The dump carries the document itself plus a `sketch` block previewing
//! what a render would show: the meta line, the body mode, the bullets in
//! draw order and the selected figures. Empty optional fields are omitted.

use serde::Serialize;

use super::rasterizer::{gather_bullets, BodyMode};
use super::DEFAULT_MAX_BULLETS;
use crate::error::{Error, Result};
use crate::figures::{pick_figures, FigureTier};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct DocumentDump<'a> {
    #[serde(flatten)]
    document: &'a Document,
    sketch: SketchPreview<'a>,
}

#[derive(Serialize)]
struct SketchPreview<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<String>,
    body: BodyMode,
    bullets: Vec<&'a str>,
    figure_tier: FigureTier,
    figures: Vec<String>,
}

impl<'a> SketchPreview<'a> {
    fn new(doc: &'a Document) -> Self {
        let body = BodyMode::for_document(doc);
        let bullets = match body {
            BodyMode::KeyPoints => gather_bullets(doc, DEFAULT_MAX_BULLETS),
            BodyMode::Summary => Vec::new(),
        };
        let selection = pick_figures(&doc.images);

        Self {
            meta: doc.meta_line(),
            body,
            bullets,
            figure_tier: selection.tier,
            figures: selection.urls,
        }
    }
}

/// Convert a document to JSON, with a preview of its sketch.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let dump = DocumentDump {
        document: doc,
        sketch: SketchPreview::new(doc),
    };

    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&dump),
        JsonFormat::Compact => serde_json::to_string(&dump),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageRef, Section};
    use serde_json::Value;

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new();
        doc.title = Some("Test".to_string());
        doc.sections.push(Section::new("Intro").with_bullet("Hello"));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Test\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_empty_optionals_are_omitted() {
        let json = to_json(&Document::new(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let value: Value = serde_json::from_str(&json).unwrap();
        for key in ["title", "venue", "year", "url"] {
            assert!(value.get(key).is_none(), "{} should be omitted", key);
        }
        assert!(value["sketch"].get("meta").is_none());
        assert_eq!(value["sketch"]["body"], "summary");
        assert_eq!(value["authors"], Value::Array(Vec::new()));
    }

    #[test]
    fn test_sketch_preview() {
        let mut doc = Document::new();
        doc.authors = vec!["A".to_string(), "B".to_string()];
        doc.year = Some(2024);
        doc.sections.push(Section::new("Conclusions").with_bullet("last"));
        doc.sections
            .push(Section::new("Main Contributions").with_bullet("first"));
        doc.images = vec![
            ImageRef::new("https://u/p.png").with_kind("page"),
            ImageRef::new("https://u/f.png").with_kind("figure"),
        ];

        let value: Value =
            serde_json::from_str(&to_json(&doc, JsonFormat::Compact).unwrap()).unwrap();
        let sketch = &value["sketch"];
        assert_eq!(sketch["meta"], "A, B · 2024");
        assert_eq!(sketch["body"], "key_points");
        assert_eq!(sketch["bullets"], serde_json::json!(["first", "last"]));
        assert_eq!(sketch["figure_tier"], "figure");
        assert_eq!(sketch["figures"], serde_json::json!(["https://u/f.png"]));
    }

    #[test]
    fn test_dump_reads_back_as_document() {
        let mut doc = Document::new();
        doc.title = Some("T".to_string());
        doc.images.push(ImageRef::new("https://u/i.png"));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
