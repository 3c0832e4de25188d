//! Canvas geometry.
//!
//! Region heights are constants; content that does not fit is cut by the
//! wrap engine, never by growing a region.

use serde::{Deserialize, Serialize};

use crate::figures::MAX_FIGURES;

/// Axis-aligned rectangle in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink on all sides. Never produces negative sizes.
    pub fn inset(&self, amount: f32) -> Rect {
        let width = (self.width - 2.0 * amount).max(0.0);
        let height = (self.height - 2.0 * amount).max(0.0);
        Rect::new(
            self.x + (self.width - width) / 2.0,
            self.y + (self.height - height) / 2.0,
            width,
            height,
        )
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// Region sizes in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub canvas_width: f32,
    pub outer_padding: f32,
    pub header_height: f32,
    pub body_height: f32,
    pub image_row_height: f32,
    pub footer_height: f32,
    pub corner_radius: f32,
    /// Horizontal gap between two image frames
    pub frame_gap: f32,
    /// Padding between a frame edge and its image
    pub frame_padding: f32,
    /// Spacing left at the bottom of the header, body and image regions
    pub region_gap: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            canvas_width: 1400.0,
            outer_padding: 48.0,
            header_height: 232.0,
            body_height: 420.0,
            image_row_height: 420.0,
            footer_height: 88.0,
            corner_radius: 24.0,
            frame_gap: 24.0,
            frame_padding: 16.0,
            region_gap: 20.0,
        }
    }
}

impl LayoutMetrics {
    /// Width available inside the outer padding.
    pub fn content_width(&self) -> f32 {
        (self.canvas_width - 2.0 * self.outer_padding).max(0.0)
    }

    /// Canvas height for the given number of decoded images.
    pub fn canvas_height(&self, image_count: usize) -> f32 {
        let image_row = if image_count > 0 {
            self.image_row_height
        } else {
            0.0
        };
        self.outer_padding
            + self.header_height
            + self.body_height
            + image_row
            + self.footer_height
            + self.outer_padding
    }
}

/// Name of a planned region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Card,
    Header,
    Body,
    ImageFrame(usize),
    Footer,
}

/// A named region of the plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub kind: RegionKind,
    pub rect: Rect,
}

/// Positions of every region on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    /// Canvas width in logical units
    pub width: f32,
    /// Canvas height in logical units
    pub height: f32,
    /// Outer rounded card
    pub card: Rect,
    /// Header text area
    pub header: Rect,
    /// Body box
    pub body: Rect,
    /// Zero, one or two image frames, left to right
    pub image_frames: Vec<Rect>,
    /// Footer text area
    pub footer: Rect,
    /// Corner radius for rounded regions
    pub corner_radius: f32,
    /// Padding inside each image frame
    pub frame_padding: f32,
}

impl LayoutPlan {
    /// Plan a canvas for `image_count` decoded images (clamped to two).
    pub fn compute(metrics: &LayoutMetrics, image_count: usize) -> Self {
        let image_count = image_count.min(MAX_FIGURES);
        let m = metrics;
        let width = m.canvas_width;
        let height = m.canvas_height(image_count);
        let content_width = m.content_width();
        let left = m.outer_padding;

        let half = m.outer_padding / 2.0;
        let card = Rect::new(half, half, width - m.outer_padding, height - m.outer_padding);

        let mut y = m.outer_padding;
        let header = Rect::new(left, y, content_width, m.header_height - m.region_gap);
        y += m.header_height;

        let body = Rect::new(left, y, content_width, m.body_height - m.region_gap);
        y += m.body_height;

        let mut image_frames = Vec::with_capacity(image_count);
        if image_count > 0 {
            let gaps = m.frame_gap * (image_count - 1) as f32;
            let frame_width = ((content_width - gaps) / image_count as f32).max(0.0);
            let frame_height = m.image_row_height - m.region_gap;
            for i in 0..image_count {
                let x = left + i as f32 * (frame_width + m.frame_gap);
                image_frames.push(Rect::new(x, y, frame_width, frame_height));
            }
            y += m.image_row_height;
        }

        let footer = Rect::new(left, y, content_width, m.footer_height);

        log::debug!(
            "layout plan {}x{} with {} image frame(s)",
            width,
            height,
            image_frames.len()
        );

        Self {
            width,
            height,
            card,
            header,
            body,
            image_frames,
            footer,
            corner_radius: m.corner_radius,
            frame_padding: m.frame_padding,
        }
    }

    /// Whether the plan has an image row.
    pub fn has_image_row(&self) -> bool {
        !self.image_frames.is_empty()
    }

    /// All regions in draw order.
    pub fn regions(&self) -> Vec<Region> {
        let mut regions = vec![
            Region {
                kind: RegionKind::Card,
                rect: self.card,
            },
            Region {
                kind: RegionKind::Header,
                rect: self.header,
            },
            Region {
                kind: RegionKind::Body,
                rect: self.body,
            },
        ];
        regions.extend(self.image_frames.iter().enumerate().map(|(i, rect)| Region {
            kind: RegionKind::ImageFrame(i),
            rect: *rect,
        }));
        regions.push(Region {
            kind: RegionKind::Footer,
            rect: self.footer,
        });
        regions
    }

    /// Pixel size of the surface at `scale`.
    pub fn pixel_size(&self, scale: f32) -> (u32, u32) {
        (
            (self.width * scale).ceil().max(1.0) as u32,
            (self.height * scale).ceil().max(1.0) as u32,
        )
    }
}

/// Fit an image of natural size `natural_width x natural_height` inside
/// `frame` minus `padding`, preserving aspect ratio and centering it.
pub fn fit_contain(natural_width: f32, natural_height: f32, frame: Rect, padding: f32) -> Rect {
    let inner = frame.inset(padding);
    if natural_width <= 0.0 || natural_height <= 0.0 {
        return Rect::new(inner.x + inner.width / 2.0, inner.y + inner.height / 2.0, 0.0, 0.0);
    }

    let scale = (inner.width / natural_width).min(inner.height / natural_height);
    let width = natural_width * scale;
    let height = natural_height * scale;
    Rect::new(
        inner.x + (inner.width - width) / 2.0,
        inner.y + (inner.height - height) / 2.0,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_heights() {
        let m = LayoutMetrics::default();
        assert_eq!(m.canvas_height(0), 836.0);
        assert_eq!(m.canvas_height(1), 1256.0);
        assert_eq!(m.canvas_height(2), 1256.0);
        assert_eq!(m.content_width(), 1304.0);
    }

    #[test]
    fn test_height_difference_is_image_row() {
        let m = LayoutMetrics {
            image_row_height: 333.0,
            ..Default::default()
        };
        let without = LayoutPlan::compute(&m, 0);
        let with = LayoutPlan::compute(&m, 2);
        assert_eq!(with.height - without.height, 333.0);
    }

    #[test]
    fn test_frames() {
        let m = LayoutMetrics::default();

        let none = LayoutPlan::compute(&m, 0);
        assert!(!none.has_image_row());
        assert_eq!(none.footer.y, 48.0 + 232.0 + 420.0);

        let one = LayoutPlan::compute(&m, 1);
        assert_eq!(one.image_frames.len(), 1);
        assert_eq!(one.image_frames[0].width, 1304.0);

        let two = LayoutPlan::compute(&m, 2);
        assert_eq!(two.image_frames.len(), 2);
        assert_eq!(two.image_frames[0].width, 640.0);
        assert_eq!(two.image_frames[1].x, 48.0 + 640.0 + 24.0);
        assert_eq!(two.image_frames[1].right(), 1352.0);
        assert_eq!(two.footer.y, 48.0 + 232.0 + 420.0 + 420.0);

        let many = LayoutPlan::compute(&m, 5);
        assert_eq!(many.image_frames.len(), 2);
    }

    #[test]
    fn test_regions_order() {
        let plan = LayoutPlan::compute(&LayoutMetrics::default(), 2);
        let kinds: Vec<RegionKind> = plan.regions().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RegionKind::Card,
                RegionKind::Header,
                RegionKind::Body,
                RegionKind::ImageFrame(0),
                RegionKind::ImageFrame(1),
                RegionKind::Footer,
            ]
        );
        for region in plan.regions().iter().skip(1) {
            assert!(plan.card.contains(&region.rect), "{:?}", region.kind);
        }
    }

    #[test]
    fn test_pixel_size() {
        let plan = LayoutPlan::compute(&LayoutMetrics::default(), 0);
        assert_eq!(plan.pixel_size(1.0), (1400, 836));
        assert_eq!(plan.pixel_size(2.0), (2800, 1672));
        assert_eq!(plan.pixel_size(0.333), (467, 279));
    }

    #[test]
    fn test_fit_contain_preserves_aspect() {
        let frame = Rect::new(0.0, 0.0, 640.0, 400.0);
        for (w, h) in [(1000.0, 500.0), (300.0, 900.0), (10.0, 10.0), (4000.0, 3000.0)] {
            let fitted = fit_contain(w, h, frame, 16.0);
            let inner = frame.inset(16.0);
            assert!((fitted.width / fitted.height - w / h).abs() < 1e-3);
            assert!(fitted.width <= inner.width + 1e-3);
            assert!(fitted.height <= inner.height + 1e-3);
            assert!(inner.contains(&fitted));
        }
    }

    #[test]
    fn test_fit_contain_centers() {
        let frame = Rect::new(100.0, 100.0, 200.0, 100.0);
        let fitted = fit_contain(50.0, 50.0, frame, 0.0);
        assert_eq!(fitted, Rect::new(150.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_fit_contain_degenerate() {
        let fitted = fit_contain(0.0, 10.0, Rect::new(0.0, 0.0, 10.0, 10.0), 0.0);
        assert_eq!(fitted.width, 0.0);

        let tiny = fit_contain(10.0, 10.0, Rect::new(0.0, 0.0, 10.0, 10.0), 20.0);
        assert_eq!(tiny.width, 0.0);
    }
}
