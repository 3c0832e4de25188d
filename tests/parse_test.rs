//! Integration tests for input detection and parsing.

use std::fs;

use papersketch::{
    load_input, parse_bytes, parse_file, parse_markdown, pick_figures, render_file, to_json,
    FigureTier, FontOptions, InputFormat, JsonFormat, NoImages, SketchOptions, SummaryInput,
};

const MARKDOWN: &str = "* Paper Title: X\n* Author Information:\n  - A\n  - B\n## S\n1. one\n2. two\n![l](https://u/i.png)";

#[test]
fn test_reference_markdown() {
    let doc = parse_markdown(MARKDOWN);
    assert_eq!(doc.title.as_deref(), Some("X"));
    assert_eq!(doc.authors, vec!["A", "B"]);
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].heading, "S");
    assert_eq!(doc.sections[0].bullets, vec!["one", "two"]);
    assert_eq!(doc.images.len(), 1);
    assert_eq!(doc.images[0].url, "https://u/i.png");
    assert_eq!(doc.images[0].label.as_deref(), Some("l"));
}

#[test]
fn test_empty_markdown() {
    let doc = parse_markdown("");
    assert!(doc.title.is_none());
    assert!(doc.authors.is_empty());
    assert!(doc.sections.is_empty());
    assert!(doc.images.is_empty());
    assert_eq!(doc.preview(), "");
}

#[test]
fn test_markdown_with_prose_and_noise() {
    let text = "\
Here is the summary you asked for.

* **Paper Title:** Sparse Mixtures
* Paper Title: Ignored Second Title
* Author Information: Ada Lovelace; Alan Turing
* Institutional Information:
  - Analytical Engine Society

Some commentary that is not a section.

## 1. Main Contributions:
1. A **sparse** router.
Random sentence.
![diagram](https://example.org/d.png \"Diagram\")
2) A [benchmark](https://example.org/b).
## Empty
Nothing numbered here.
![local](./not-http.png)
";
    let doc = parse_markdown(text);
    assert_eq!(doc.title.as_deref(), Some("Sparse Mixtures"));
    assert_eq!(doc.authors, vec!["Ada Lovelace", "Alan Turing"]);
    assert_eq!(doc.institutions, vec!["Analytical Engine Society"]);
    assert_eq!(doc.sections.len(), 2);
    assert_eq!(
        doc.sections[0].bullets,
        vec!["A sparse router.", "A benchmark."]
    );
    assert!(doc.sections[1].bullets.is_empty());
    assert_eq!(doc.images.len(), 1);
    assert_eq!(doc.images[0].url, "https://example.org/d.png");

    // markdown images are untagged and fall through to the last tier
    let selection = pick_figures(&doc.images);
    assert_eq!(selection.tier, FigureTier::Any);
    assert_eq!(selection.urls, vec!["https://example.org/d.png"]);
}

#[test]
fn test_garbage_never_fails() {
    for text in ["##", "## \n1.", "* Author Information:\n", "![](", "1. 2. 3.", "\u{0}\u{FFFD}"] {
        let doc = parse_markdown(text);
        assert!(doc.title.is_none(), "{:?}", text);
    }
}

#[test]
fn test_detect_and_load_files() {
    let dir = tempfile::tempdir().unwrap();

    let md_path = dir.path().join("summary.md");
    fs::write(&md_path, MARKDOWN).unwrap();
    assert!(matches!(load_input(&md_path).unwrap(), SummaryInput::Markdown(_)));

    let json_path = dir.path().join("summary.json");
    fs::write(
        &json_path,
        serde_json::json!({ "paperSketch": MARKDOWN }).to_string(),
    )
    .unwrap();
    let doc = parse_file(&json_path).unwrap();
    assert_eq!(doc.title.as_deref(), Some("X"));

    let typed_path = dir.path().join("typed.json");
    fs::write(
        &typed_path,
        r#"{"paper": {"title": "Typed", "authors": null}, "images": null}"#,
    )
    .unwrap();
    let doc = parse_file(&typed_path).unwrap();
    assert_eq!(doc.title.as_deref(), Some("Typed"));
    assert!(doc.authors.is_empty());

    assert_eq!(
        papersketch::detect_format_from_bytes(&fs::read(&typed_path).unwrap()).unwrap(),
        InputFormat::TypedJson
    );
}

#[test]
fn test_to_json_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.md");
    fs::write(&path, MARKDOWN).unwrap();

    let json = to_json(&path, JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["title"], "X");
    assert_eq!(value["sections"][0]["bullets"][1], "two");
}

#[test]
fn test_render_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("summary.md");
    let output = dir.path().join("sketch.png");
    fs::write(&input, MARKDOWN).unwrap();

    let options = SketchOptions::new().with_fonts(FontOptions {
        system_fonts: false,
        ..Default::default()
    });
    let sketch = render_file(&input, &output, &NoImages, &options).unwrap();

    let written = fs::read(&output).unwrap();
    assert_eq!(written, sketch.bytes);
    let decoded = image::load_from_memory(&written).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1400, 836));
    assert_eq!(sketch.stats.images_failed, 1);
}

#[test]
fn test_parse_bytes_rejects_binary() {
    assert!(parse_bytes(&[0xC3, 0x28, 0xA0, 0xA1]).is_err());
}

#[test]
fn test_markdown_starting_with_bracket_or_brace() {
    let doc = parse_bytes(b"[arXiv](https://arxiv.org/abs/1) summary\n* Paper Title: X\n## S\n1. one")
        .unwrap();
    assert_eq!(doc.title.as_deref(), Some("X"));
    assert_eq!(doc.sections[0].bullets, vec!["one"]);

    let doc = parse_bytes(b"{draft} notes\n* Paper Title: Y").unwrap();
    assert_eq!(doc.title.as_deref(), Some("Y"));
}

#[test]
fn test_typed_record_with_off_type_fields() {
    let doc = papersketch::parse_json(
        r#"{"paper":{"title":"T","year":2020.5},"images":[{"url":"https://x/a.png","kind":3}]}"#,
    )
    .unwrap();
    assert_eq!(doc.title.as_deref(), Some("T"));
    assert_eq!(doc.year, None);
    assert_eq!(doc.images.len(), 1);
    assert_eq!(doc.images[0].kind, None);

    let selection = pick_figures(&doc.images);
    assert_eq!(selection.tier, FigureTier::Any);
}
