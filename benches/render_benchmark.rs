//! Benchmarks for papersketch parsing and rendering.
//!
//! Run with: cargo bench
//!
//! Rendering benches run without system fonts so results do not depend on
//! the host's font setup.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use papersketch::layout::{TextMeasure, WrapBox};
use papersketch::render::{render_document_with, RecordingSurface};
use papersketch::{FontOptions, ImageRef, LayoutPlan, NoImages, SketchOptions, TextStyle};

/// Creates a markdown summary with the given number of sections.
fn create_test_summary(section_count: usize) -> String {
    let mut text = String::from(
        "* Paper Title: Benchmarking Sketch Rendering\n\
         * Author Information:\n  - Ada Lovelace\n  - Alan Turing\n\
         * Institutional Information: Analytical Engine Society\n",
    );
    let headings = ["Main Contributions", "Research Background", "Methods", "Conclusions"];
    for i in 0..section_count {
        text.push_str(&format!("## {}. {}\n", i + 1, headings[i % headings.len()]));
        for j in 0..4 {
            text.push_str(&format!(
                "{}. A **bullet** with [a link](https://example.org/{}) and some words to wrap.\n",
                j + 1,
                j
            ));
        }
        text.push_str(&format!("![figure {}](https://example.org/fig{}.png)\n", i, i));
    }
    text
}

struct FixedWidth;

impl TextMeasure for FixedWidth {
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        text.chars().count() as f32 * style.size * 0.5
    }
}

fn offline_options() -> SketchOptions {
    SketchOptions::new().with_fonts(FontOptions {
        system_fonts: false,
        ..Default::default()
    })
}

/// Benchmark markdown parsing at various sizes.
fn bench_markdown_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_parsing");

    for section_count in [1, 5, 20].iter() {
        let text = create_test_summary(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| papersketch::parse_markdown(black_box(&text)));
        });
    }

    group.finish();
}

/// Benchmark greedy word wrapping.
fn bench_wrap(c: &mut Criterion) {
    let text = "word ".repeat(400);
    let style = TextStyle::regular(22.0);
    let area = WrapBox {
        x: 0.0,
        y: 0.0,
        max_width: 600.0,
        line_height: 32.0,
        max_lines: 100,
    };

    c.bench_function("wrap_text", |b| {
        b.iter(|| papersketch::wrap_text(&FixedWidth, black_box(&text), &style, area));
    });
}

/// Benchmark the draw pipeline against the recording surface.
fn bench_recording_render(c: &mut Criterion) {
    let doc = papersketch::parse_markdown(&create_test_summary(5));
    let options = offline_options();

    c.bench_function("render_recording", |b| {
        b.iter(|| {
            render_document_with(black_box(&doc), &NoImages, &options, |plan, options| {
                let (width, height) = plan.pixel_size(options.scale);
                Ok(RecordingSurface::new(width, height))
            })
            .unwrap()
        });
    });
}

/// Benchmark full rasterization and encoding.
fn bench_pixmap_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixmap_render");
    group.sample_size(20);

    let mut doc = papersketch::parse_markdown(&create_test_summary(3));
    doc.images = vec![ImageRef::new("https://example.org/a.png")];
    let png = offline_options();
    let jpeg = offline_options().with_format(papersketch::OutputFormat::Jpeg);

    group.bench_function("png", |b| {
        b.iter(|| papersketch::render(black_box(&doc), &NoImages, &png).unwrap());
    });
    group.bench_function("jpeg", |b| {
        b.iter(|| papersketch::render(black_box(&doc), &NoImages, &jpeg).unwrap());
    });

    group.finish();
}

/// Benchmark layout computation.
fn bench_layout(c: &mut Criterion) {
    let metrics = papersketch::LayoutMetrics::default();
    c.bench_function("layout_plan", |b| {
        b.iter(|| LayoutPlan::compute(black_box(&metrics), black_box(2)));
    });
}

criterion_group!(
    benches,
    bench_markdown_parsing,
    bench_wrap,
    bench_recording_render,
    bench_pixmap_render,
    bench_layout,
);
criterion_main!(benches);
