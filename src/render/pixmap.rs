//! tiny-skia raster backend.

use std::io::Cursor;

use tiny_skia::{
    FillRule, FilterQuality, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Transform,
};
use ttf_parser::{GlyphId, OutlineBuilder};

use super::fonts::FontSet;
use super::{Color, OutputFormat, Stroke, Surface};
use crate::acquire::DecodedImage;
use crate::error::{Error, Result};
use crate::layout::{Rect, TextMeasure, TextStyle};

/// Cubic approximation constant for quarter circles.
const KAPPA: f32 = 0.552_284_8;

/// Largest accepted surface edge in pixels.
pub const MAX_SURFACE_EDGE: u32 = 16_384;

/// A pixel surface drawn in logical units and scaled to device pixels.
pub struct PixmapSurface {
    pixmap: Pixmap,
    transform: Transform,
    fonts: FontSet,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("fonts", &self.fonts)
            .finish()
    }
}

impl PixmapSurface {
    /// Allocate a `width x height` pixel surface drawn at `scale`.
    pub fn new(width: u32, height: u32, scale: f32, fonts: FontSet) -> Result<Self> {
        if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
            return Err(Error::Surface(format!(
                "{}x{} exceeds the {} pixel limit",
                width, height, MAX_SURFACE_EDGE
            )));
        }
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::Surface(format!("cannot allocate a {}x{} surface", width, height))
        })?;
        Ok(Self {
            pixmap,
            transform: Transform::from_scale(scale, scale),
            fonts,
        })
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some([px.red(), px.green(), px.blue(), px.alpha()])
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let paint = fill_paint(color);
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, self.transform, None);
    }

    fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            rgb.extend_from_slice(&[c.red(), c.green(), c.blue()]);
        }
        let image = image::RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| Error::Encode("pixel buffer size mismatch".to_string()))?;

        let mut out = Cursor::new(Vec::new());
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
            .encode_image(&image)
            .map_err(|e| Error::Encode(format!("JPEG encoding failed: {}", e)))?;
        Ok(out.into_inner())
    }
}

impl TextMeasure for PixmapSurface {
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        self.fonts.measure(text, style)
    }
}

impl Surface for PixmapSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(sk_rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
        else {
            return;
        };
        let paint = fill_paint(color);
        self.pixmap.fill_rect(sk_rect, &paint, self.transform, None);
    }

    fn draw_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) {
        let Some(path) = rounded_rect_path(rect, radius) else {
            return;
        };
        if let Some(color) = fill {
            self.fill_path(&path, color);
        }
        if let Some(stroke) = stroke {
            let paint = fill_paint(stroke.color);
            let sk_stroke = tiny_skia::Stroke {
                width: stroke.width.max(0.0),
                ..Default::default()
            };
            self.pixmap
                .stroke_path(&path, &paint, &sk_stroke, self.transform, None);
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, color: Color) {
        if style.size <= 0.0 || text.is_empty() {
            return;
        }
        let Some(font) = self.fonts.face(style.weight).cloned() else {
            log::trace!("no font for text at ({}, {}); skipped", x, y);
            return;
        };
        let Some(face) = font.face() else {
            return;
        };

        let baseline = y + font.ascent(style.size);
        let paint = fill_paint(color);
        for placement in font.layout(text, style.size, x, baseline) {
            let mut builder =
                GlyphPathBuilder::new(placement.origin_x, placement.origin_y, placement.scale);
            if face
                .outline_glyph(GlyphId(placement.glyph_id), &mut builder)
                .is_none()
            {
                continue;
            }
            let Some(path) = builder.finish() else {
                continue;
            };
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
        }
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) {
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let Some(source) = image_to_pixmap(image) else {
            return;
        };
        let sx = dest.width / image.width() as f32;
        let sy = dest.height / image.height() as f32;
        let local = Transform::from_row(sx, 0.0, 0.0, sy, dest.x, dest.y);

        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..Default::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            local.post_concat(self.transform),
            None,
        );
    }

    fn encode(&self, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Png => self
                .pixmap
                .encode_png()
                .map_err(|e| Error::Encode(format!("PNG encoding failed: {}", e))),
            OutputFormat::Jpeg => self.encode_jpeg(quality),
        }
    }
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let r = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(left + r, top);
    pb.line_to(right - r, top);
    pb.cubic_to(right - r + k, top, right, top + r - k, right, top + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(left + r, bottom);
    pb.cubic_to(left + r - k, bottom, left, bottom - r + k, left, bottom - r);
    pb.line_to(left, top + r);
    pb.cubic_to(left, top + r - k, left + r - k, top, left + r, top);
    pb.close();
    pb.finish()
}

fn image_to_pixmap(image: &DecodedImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    let dst = pixmap.data_mut();
    for (src_px, dst_px) in image.pixels().chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let a = src_px[3];
        dst_px[0] = premul_u8(src_px[0], a);
        dst_px[1] = premul_u8(src_px[1], a);
        dst_px[2] = premul_u8(src_px[2], a);
        dst_px[3] = a;
    }
    Some(pixmap)
}

fn premul_u8(channel: u8, alpha: u8) -> u8 {
    let prod = (channel as u16) * (alpha as u16) + 127;
    ((prod + (prod >> 8)) >> 8) as u8
}

fn fill_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Converts font outlines (y up) into a path in surface space (y down).
struct GlyphPathBuilder {
    builder: PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(origin_x: f32, origin_y: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            origin_x,
            origin_y,
            scale,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }

    fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
