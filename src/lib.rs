//! # papersketch
//!
//! Render paper summaries into a single shareable sketch image.
//!
//! A summary arrives either as a typed record (`paper` / `summary_text` /
//! `images`) or as a markdown summary. Both are parsed into one
//! [`Document`], up to two figures are chosen and acquired best-effort, and
//! the result is drawn onto a fixed-width canvas and encoded as PNG or JPEG.
//!
//! ## Quick Start
//!
//! ```no_run
//! use papersketch::{parse_file, render, NoImages, SketchOptions};
//!
//! fn main() -> papersketch::Result<()> {
//!     let doc = parse_file("summary.json")?;
//!     let sketch = render(&doc, &NoImages, &SketchOptions::default())?;
//!     std::fs::write("sketch.png", &sketch.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two input shapes**: typed JSON records and markdown summaries
//! - **Lenient parsing**: malformed input degrades, it never fails
//! - **Best-effort images**: failed acquisitions are recorded and skipped
//! - **Pluggable surfaces**: draw onto tiny-skia or a recording test double
//! - **Parallel acquisition**: optional, order-preserving, via Rayon

pub mod acquire;
pub mod detect;
pub mod error;
pub mod figures;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use acquire::{Acquisition, DecodedImage, ImageSource, NoImages};
pub use detect::{detect_format_from_bytes, load_input, load_input_from_bytes, InputFormat};
pub use error::{Error, Result};
pub use figures::{pick_figures, FigureSelection, FigureTier, MAX_FIGURES};
pub use layout::{fit_contain, wrap_text, LayoutMetrics, LayoutPlan, Rect, TextStyle, Wrapped};
pub use model::{
    Document, ImageEntry, ImageRef, MarkdownSummary, PaperInfo, PaperRecord, Section,
    SummaryInput,
};
pub use parser::{parse_markdown, parse_record};
pub use render::{
    Color, FontOptions, JsonFormat, Labels, OutputFormat, PixmapSurface, RecordingSurface,
    RenderStats, Sketch, SketchOptions, Surface, Theme,
};

use std::path::Path;
use std::sync::Arc;

/// Parse a summary file (typed JSON, markdown JSON, or markdown text).
///
/// # Example
///
/// ```no_run
/// use papersketch::parse_file;
///
/// let doc = parse_file("summary.json").unwrap();
/// println!("Bullets: {}", doc.bullet_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    Ok(load_input(path)?.parse())
}

/// Parse a summary from bytes.
///
/// Only undecodable input is an error; every recognised shape parses.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    Ok(load_input_from_bytes(data)?.parse())
}

/// Parse a JSON string in either input shape.
pub fn parse_json(json: &str) -> Result<Document> {
    let input: SummaryInput = serde_json::from_str(json)?;
    Ok(input.parse())
}

/// Render a parsed document with the raster backend.
///
/// # Example
///
/// ```no_run
/// use papersketch::{render, Document, NoImages, OutputFormat, SketchOptions};
///
/// let doc = Document::new();
/// let options = SketchOptions::new().with_format(OutputFormat::Jpeg);
/// let sketch = render(&doc, &NoImages, &options).unwrap();
/// assert_eq!(sketch.width, 1400);
/// ```
pub fn render(doc: &Document, source: &dyn ImageSource, options: &SketchOptions) -> Result<Sketch> {
    render::render_document(doc, source, options)
}

/// Parse and render an input in one call.
pub fn render_input(
    input: &SummaryInput,
    source: &dyn ImageSource,
    options: &SketchOptions,
) -> Result<Sketch> {
    render(&input.parse(), source, options)
}

/// Render a summary file and write the encoded image to `output`.
///
/// # Example
///
/// ```no_run
/// use papersketch::{render_file, NoImages, SketchOptions};
///
/// let sketch = render_file("summary.md", "sketch.png", &NoImages, &SketchOptions::default())?;
/// println!("{} bytes", sketch.byte_len());
/// # Ok::<(), papersketch::Error>(())
/// ```
pub fn render_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    source: &dyn ImageSource,
    options: &SketchOptions,
) -> Result<Sketch> {
    let doc = parse_file(input)?;
    let sketch = render(&doc, source, options)?;
    std::fs::write(output, &sketch.bytes)?;
    Ok(sketch)
}

/// Convert a summary file to the JSON form of its parsed [`Document`].
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and rendering summaries.
///
/// # Example
///
/// ```no_run
/// use papersketch::PaperSketch;
///
/// let sketch = PaperSketch::new()
///     .with_scale(2.0)
///     .parallel()
///     .parse("summary.json")?
///     .render()?;
/// # Ok::<(), papersketch::Error>(())
/// ```
pub struct PaperSketch {
    options: SketchOptions,
    source: Arc<dyn ImageSource>,
}

impl PaperSketch {
    /// Create a new builder that renders without images.
    pub fn new() -> Self {
        Self {
            options: SketchOptions::default(),
            source: Arc::new(NoImages),
        }
    }

    /// Use `source` for image acquisition.
    pub fn with_source<S: ImageSource + 'static>(mut self, source: S) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Replace all sketch options.
    pub fn with_options(mut self, options: SketchOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.options = self.options.with_format(format);
        self
    }

    /// Set the JPEG quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.options = self.options.with_quality(quality);
        self
    }

    /// Set the device scale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.options = self.options.with_scale(scale);
        self
    }

    /// Acquire images concurrently.
    pub fn parallel(mut self) -> Self {
        self.options = self.options.with_parallel(true);
        self
    }

    /// Set the font sources.
    pub fn with_fonts(mut self, fonts: FontOptions) -> Self {
        self.options = self.options.with_fonts(fonts);
        self
    }

    /// Parse a summary file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<SketchJob> {
        let document = parse_file(path)?;
        Ok(self.job(document))
    }

    /// Parse a summary from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<SketchJob> {
        let document = parse_bytes(data)?;
        Ok(self.job(document))
    }

    /// Use an already decoded input.
    pub fn parse_input(self, input: &SummaryInput) -> SketchJob {
        self.job(input.parse())
    }

    fn job(self, document: Document) -> SketchJob {
        SketchJob {
            document,
            options: self.options,
            source: self.source,
        }
    }
}

impl Default for PaperSketch {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed document ready to render.
pub struct SketchJob {
    /// The parsed document
    pub document: Document,
    options: SketchOptions,
    source: Arc<dyn ImageSource>,
}

impl SketchJob {
    /// Render with the raster backend.
    pub fn render(&self) -> Result<Sketch> {
        render(&self.document, self.source.as_ref(), &self.options)
    }

    /// Render and write the image to `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<Sketch> {
        let sketch = self.render()?;
        std::fs::write(path, &sketch.bytes)?;
        Ok(sketch)
    }

    /// Convert the document to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the options the job renders with.
    pub fn options(&self) -> &SketchOptions {
        &self.options
    }
}
