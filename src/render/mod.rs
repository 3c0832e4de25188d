//! Rendering module: draws a document onto a surface and encodes it.

mod fonts;
mod json;
mod options;
mod pixmap;
mod rasterizer;
pub mod recording;
mod result;
mod sketch;
mod surface;

pub use fonts::{estimate_width, FontFace, FontSet, ESTIMATED_CHAR_WIDTH};
pub use json::{to_json, JsonFormat};
pub use options::{
    FontOptions, Labels, OutputFormat, SketchOptions, Theme, DEFAULT_MAX_BULLETS,
    DEFAULT_QUALITY,
};
pub use pixmap::{PixmapSurface, MAX_SURFACE_EDGE};
pub use rasterizer::{draw_sketch, gather_bullets, BodyMode, SECTION_PRIORITY};
pub use recording::{DrawCommand, RecordingSurface};
pub use result::{RenderStats, Sketch};
pub use sketch::{render_document, render_document_with};
pub use surface::{Color, Stroke, Surface};
