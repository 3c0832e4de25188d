//! Integration tests for the parse → select → acquire → layout → render pipeline.

use std::sync::Mutex;

use papersketch::error::{Error, Result};
use papersketch::render::{render_document_with, DrawCommand, RecordingSurface};
use papersketch::{
    parse_json, DecodedImage, Document, ImageRef, LayoutPlan, NoImages, SketchOptions,
};

fn recording(plan: &LayoutPlan, options: &SketchOptions) -> Result<RecordingSurface> {
    let (width, height) = plan.pixel_size(options.scale);
    Ok(RecordingSurface::new(width, height))
}

/// Image source that serves solid images and fails URLs containing "broken".
struct MockSource {
    requested: Mutex<Vec<String>>,
}

impl MockSource {
    fn new() -> Self {
        Self {
            requested: Mutex::new(Vec::new()),
        }
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl papersketch::ImageSource for MockSource {
    fn acquire(&self, url: &str) -> Result<DecodedImage> {
        self.requested.lock().unwrap().push(url.to_string());
        if url.contains("broken") {
            return Err(Error::acquire(url, "connection reset"));
        }
        Ok(DecodedImage::solid(320, 240, [120, 80, 40, 255]))
    }
}

const TYPED: &str = r#"{
    "paper": {
        "title": "Attention Is All You Need",
        "authors": ["Ashish Vaswani", "Noam Shazeer", "Niki Parmar", "Jakob Uszkoreit"],
        "year": 2017,
        "venue": "NeurIPS",
        "url": "https://arxiv.org/abs/1706.03762"
    },
    "summary_text": "The Transformer replaces recurrence with attention.",
    "images": [
        {"url": "https://x/page1.png", "kind": "page"},
        {"url": "https://x/fig1.png", "kind": "figure"},
        {"url": "https://x/fig2.png", "kind": "FIGURE"},
        {"url": "https://x/fig3.png", "kind": "figure"}
    ]
}"#;

#[test]
fn test_typed_record_end_to_end() {
    let doc = parse_json(TYPED).unwrap();
    let source = MockSource::new();
    let sketch =
        render_document_with(&doc, &source, &SketchOptions::default(), recording).unwrap();

    assert_eq!(
        source.requested(),
        vec!["https://x/fig1.png", "https://x/fig2.png"]
    );
    assert_eq!(sketch.width, 1400);
    assert_eq!(sketch.height, 1256);
    assert_eq!(sketch.stats.images_rendered, 2);
    assert_eq!(sketch.stats.images_failed, 0);
}

#[test]
fn test_height_differs_by_image_row() {
    let options = SketchOptions::default();
    let source = MockSource::new();

    let mut doc = Document::new();
    let without = render_document_with(&doc, &source, &options, recording).unwrap();

    doc.images = vec![ImageRef::new("https://x/a.png"), ImageRef::new("https://x/b.png")];
    let with = render_document_with(&doc, &source, &options, recording).unwrap();

    assert_eq!(
        with.height - without.height,
        options.metrics.image_row_height as u32
    );
}

#[test]
fn test_all_failures_match_text_only_height() {
    let doc = Document {
        images: vec![
            ImageRef::new("https://x/broken1.png"),
            ImageRef::new("https://x/broken2.png"),
        ],
        ..Default::default()
    };
    let source = MockSource::new();
    let sketch =
        render_document_with(&doc, &source, &SketchOptions::default(), recording).unwrap();

    let text_only =
        render_document_with(&Document::new(), &NoImages, &SketchOptions::default(), recording)
            .unwrap();
    assert_eq!(sketch.height, text_only.height);
    assert_eq!(sketch.stats.images_failed, 2);
    assert_eq!(source.requested().len(), 2);
}

#[test]
fn test_partial_failure_keeps_order() {
    let doc = Document {
        images: vec![
            ImageRef::new("https://x/broken.png"),
            ImageRef::new("https://x/ok.png"),
        ],
        ..Default::default()
    };
    let source = MockSource::new();
    let sketch =
        render_document_with(&doc, &source, &SketchOptions::default(), recording).unwrap();

    assert_eq!(sketch.plan.image_frames.len(), 1);
    assert_eq!(sketch.plan.image_frames[0].width, 1304.0);
    assert_eq!(sketch.stats.images_rendered, 1);
    assert_eq!(sketch.stats.images_failed, 1);
}

#[test]
fn test_parallel_acquisition_matches_sequential() {
    let doc = parse_json(TYPED).unwrap();
    let sequential =
        render_document_with(&doc, &MockSource::new(), &SketchOptions::default(), recording)
            .unwrap();
    let parallel = render_document_with(
        &doc,
        &MockSource::new(),
        &SketchOptions::new().with_parallel(true),
        recording,
    )
    .unwrap();

    assert_eq!(sequential.plan, parallel.plan);
    assert_eq!(sequential.stats, parallel.stats);
    assert_eq!(sequential.bytes, parallel.bytes);
}

#[test]
fn test_bullet_priority_and_cap() {
    let summary = "\
## Conclusions
1. c1
## Main Contributions
1. m1
2. m2
3. m3
## Research Background
1. b1
2. b2
3. b3
## Related Work
1. r1
";
    let json = serde_json::json!({ "summary": summary }).to_string();
    let doc = parse_json(&json).unwrap();

    let options = SketchOptions::default();
    let plan = LayoutPlan::compute(&options.metrics, 0);
    let mut surface = RecordingSurface::new(1400, 836);
    let stats = papersketch::render::draw_sketch(&mut surface, &doc, &plan, &[], &options);

    let bullets: Vec<&str> = surface
        .texts()
        .into_iter()
        .filter(|t| t.len() == 2 && !t.starts_with('•'))
        .collect();
    assert_eq!(bullets, vec!["m1", "m2", "m3", "b1", "b2", "b3"]);
    assert_eq!(stats.bullets_drawn, 6);
    assert_eq!(stats.bullets_available, 8);
}

#[test]
fn test_deterministic_output() {
    let doc = parse_json(TYPED).unwrap();
    let render = || {
        let mut surface = RecordingSurface::new(1400, 1256);
        let options = SketchOptions::default();
        let plan = LayoutPlan::compute(&options.metrics, 2);
        let image = DecodedImage::solid(10, 10, [0, 0, 0, 255]);
        papersketch::render::draw_sketch(&mut surface, &doc, &plan, &[&image, &image], &options);
        surface.commands().to_vec()
    };
    assert_eq!(render(), render());

    let commands = render();
    let images = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Image { .. }))
        .count();
    assert_eq!(images, 2);
}
