//! The render pipeline from a parsed document to encoded bytes.

use super::fonts::FontSet;
use super::rasterizer::draw_sketch;
use super::result::{RenderStats, Sketch};
use super::{PixmapSurface, SketchOptions, Surface};
use crate::acquire::{acquire_all, loaded_images, ImageSource};
use crate::error::Result;
use crate::figures::pick_figures;
use crate::layout::LayoutPlan;
use crate::model::Document;

/// Render `doc` with the tiny-skia backend.
///
/// Image failures are tolerated; only surface creation and encoding errors
/// are returned.
pub fn render_document(
    doc: &Document,
    source: &dyn ImageSource,
    options: &SketchOptions,
) -> Result<Sketch> {
    render_document_with(doc, source, options, |plan, options| {
        let fonts = FontSet::load(&options.fonts)?;
        let (width, height) = plan.pixel_size(options.scale);
        PixmapSurface::new(width, height, options.scale, fonts)
    })
}

/// Render `doc` onto a surface built by `make_surface`.
///
/// The factory receives the final plan, so the surface is allocated only
/// after images have been acquired and the canvas height is known.
pub fn render_document_with<S, F>(
    doc: &Document,
    source: &dyn ImageSource,
    options: &SketchOptions,
    make_surface: F,
) -> Result<Sketch>
where
    S: Surface,
    F: FnOnce(&LayoutPlan, &SketchOptions) -> Result<S>,
{
    options.validate()?;

    let selection = pick_figures(&doc.images);
    let acquisitions = acquire_all(&selection.urls, source, options.parallel);
    let images = loaded_images(&acquisitions);

    let plan = LayoutPlan::compute(&options.metrics, images.len());
    let mut surface = make_surface(&plan, options)?;

    let drawn = draw_sketch(&mut surface, doc, &plan, &images, options);
    let bytes = surface.encode(options.format, options.quality)?;

    let stats = RenderStats {
        images_selected: selection.len() as u32,
        images_failed: (acquisitions.len() - images.len()) as u32,
        ..drawn
    };
    let (width, height) = plan.pixel_size(options.scale);

    log::info!(
        "rendered {}x{} {} sketch ({} bytes, {}/{} images, {} bullets)",
        width,
        height,
        options.format,
        bytes.len(),
        stats.images_rendered,
        stats.images_selected,
        stats.bullets_drawn
    );

    Ok(Sketch {
        bytes,
        width,
        height,
        format: options.format,
        plan,
        stats,
    })
}
