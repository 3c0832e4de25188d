//! Draws a [`Document`] onto a [`Surface`] following a [`LayoutPlan`].
//!
//! Draw order is fixed: background, card, header label, title, meta line,
//! institutions, body box, body heading, body content, image frames, footer.

use serde::Serialize;

use super::result::RenderStats;
use super::{SketchOptions, Stroke, Surface};
use crate::acquire::DecodedImage;
use crate::layout::{
    fit_contain, lines_that_fit, wrap_text, LayoutPlan, Rect, TextStyle, WrapBox,
};
use crate::model::Document;

/// Sections whose bullets are gathered first, in this order.
pub const SECTION_PRIORITY: [&str; 5] = [
    "Main Contributions",
    "Research Background",
    "Research Methods",
    "Experimental Results",
    "Conclusions",
];

const HEADER_LABEL: TextStyle = TextStyle::bold(20.0);
const TITLE: TextStyle = TextStyle::bold(44.0);
const TITLE_LINE_HEIGHT: f32 = 54.0;
const TITLE_MAX_LINES: usize = 2;
const META: TextStyle = TextStyle::regular(22.0);
const INSTITUTIONS: TextStyle = TextStyle::regular(18.0);
const BODY_HEADING: TextStyle = TextStyle::bold(26.0);
const BODY_TEXT: TextStyle = TextStyle::regular(22.0);
const BODY_LINE_HEIGHT: f32 = 32.0;
const BULLET_MAX_LINES: usize = 3;
const BULLET_GAP: f32 = 8.0;
const SUMMARY_MAX_LINES: usize = 9;
const FOOTER: TextStyle = TextStyle::regular(18.0);
const FOOTER_BRAND: TextStyle = TextStyle::bold(18.0);

// offsets from the top of the header region
const LABEL_OFFSET: f32 = 4.0;
const TITLE_OFFSET: f32 = 40.0;
const META_OFFSET: f32 = 152.0;
const INSTITUTIONS_OFFSET: f32 = 186.0;

const BOX_PADDING: f32 = 28.0;
const BOX_HEADING_OFFSET: f32 = 24.0;
const BOX_CONTENT_OFFSET: f32 = 70.0;
const BULLET_INDENT: f32 = 28.0;
const BULLET_MARKER: &str = "•";
const STROKE_WIDTH: f32 = 1.5;
const FOOTER_RULE_OFFSET: f32 = 12.0;
const FOOTER_TEXT_OFFSET: f32 = 36.0;
const FOOTER_BRAND_GAP: f32 = 24.0;

/// Body box content mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMode {
    /// Bullet list gathered from sections
    KeyPoints,
    /// One wrapped paragraph of summary text
    Summary,
}

impl BodyMode {
    /// Mode for `doc`: bullets win when any exist.
    pub fn for_document(doc: &Document) -> Self {
        if doc.has_bullets() {
            BodyMode::KeyPoints
        } else {
            BodyMode::Summary
        }
    }
}

fn normalize_heading(heading: &str) -> String {
    heading
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
        .trim()
        .trim_end_matches(':')
        .trim()
        .to_lowercase()
}

/// Up to `max` bullets, priority sections first, then the rest in document order.
pub fn gather_bullets(doc: &Document, max: usize) -> Vec<&str> {
    let normalized: Vec<String> = doc
        .sections
        .iter()
        .map(|s| normalize_heading(&s.heading))
        .collect();
    let priority_of = |name: &str| {
        SECTION_PRIORITY
            .iter()
            .position(|p| p.eq_ignore_ascii_case(name))
    };

    let mut order: Vec<usize> = (0..doc.sections.len()).collect();
    // stable: equal keys keep document order
    order.sort_by_key(|&i| priority_of(&normalized[i]).unwrap_or(SECTION_PRIORITY.len()));

    order
        .into_iter()
        .flat_map(|i| doc.sections[i].bullets.iter().map(String::as_str))
        .filter(|b| !b.trim().is_empty())
        .take(max)
        .collect()
}

/// Draw everything and report what was drawn.
///
/// `images` must already be limited to the plan's frames; extra images are
/// ignored.
pub fn draw_sketch<S>(
    surface: &mut S,
    doc: &Document,
    plan: &LayoutPlan,
    images: &[&DecodedImage],
    options: &SketchOptions,
) -> RenderStats
where
    S: Surface + ?Sized,
{
    let theme = &options.theme;
    let mut stats = RenderStats {
        bullets_available: doc.bullet_count() as u32,
        ..Default::default()
    };

    surface.fill_rect(Rect::new(0.0, 0.0, plan.width, plan.height), theme.background);
    surface.draw_rounded_rect(
        plan.card,
        plan.corner_radius,
        Some(theme.card_fill),
        Some(Stroke::new(theme.card_stroke, STROKE_WIDTH)),
    );

    stats.title_truncated = draw_header(surface, doc, plan.header, options);
    draw_body(surface, doc, plan, options, &mut stats);

    for (frame, image) in plan.image_frames.iter().zip(images) {
        surface.draw_rounded_rect(
            *frame,
            plan.corner_radius,
            Some(theme.frame_fill),
            Some(Stroke::new(theme.box_stroke, STROKE_WIDTH)),
        );
        let dest = fit_contain(
            image.width() as f32,
            image.height() as f32,
            *frame,
            plan.frame_padding,
        );
        surface.draw_image(image, dest);
        stats.images_rendered += 1;
    }

    draw_footer(surface, doc, plan.footer, options);
    stats
}

fn single_line(y: f32, x: f32, width: f32, line_height: f32) -> WrapBox {
    WrapBox {
        x,
        y,
        max_width: width,
        line_height,
        max_lines: 1,
    }
}

fn draw_header<S: Surface + ?Sized>(
    surface: &mut S,
    doc: &Document,
    region: Rect,
    options: &SketchOptions,
) -> bool {
    let theme = &options.theme;
    surface.draw_text(
        &options.labels.header,
        region.x,
        region.y + LABEL_OFFSET,
        &HEADER_LABEL,
        theme.accent,
    );

    let title = wrap_text(
        surface,
        doc.display_title(&options.labels.untitled),
        &TITLE,
        WrapBox {
            x: region.x,
            y: region.y + TITLE_OFFSET,
            max_width: region.width,
            line_height: TITLE_LINE_HEIGHT,
            max_lines: TITLE_MAX_LINES,
        },
    );
    for line in &title.lines {
        surface.draw_text(&line.text, line.x, line.y, &TITLE, theme.text);
    }

    if let Some(meta) = doc.meta_line() {
        let wrapped = wrap_text(
            surface,
            &meta,
            &META,
            single_line(region.y + META_OFFSET, region.x, region.width, META.size),
        );
        for line in &wrapped.lines {
            surface.draw_text(&line.text, line.x, line.y, &META, theme.muted);
        }
    }

    if !doc.institutions.is_empty() {
        let text = doc.institutions.join(" · ");
        let wrapped = wrap_text(
            surface,
            &text,
            &INSTITUTIONS,
            single_line(
                region.y + INSTITUTIONS_OFFSET,
                region.x,
                region.width,
                INSTITUTIONS.size,
            ),
        );
        for line in &wrapped.lines {
            surface.draw_text(&line.text, line.x, line.y, &INSTITUTIONS, theme.muted);
        }
    }

    title.truncated
}

fn draw_body<S: Surface + ?Sized>(
    surface: &mut S,
    doc: &Document,
    plan: &LayoutPlan,
    options: &SketchOptions,
    stats: &mut RenderStats,
) {
    let theme = &options.theme;
    let body = plan.body;
    surface.draw_rounded_rect(
        body,
        plan.corner_radius,
        Some(theme.box_fill),
        Some(Stroke::new(theme.box_stroke, STROKE_WIDTH)),
    );

    let mode = BodyMode::for_document(doc);
    let heading = match mode {
        BodyMode::KeyPoints => &options.labels.key_points,
        BodyMode::Summary => &options.labels.tldr,
    };
    let x = body.x + BOX_PADDING;
    surface.draw_text(
        heading,
        x,
        body.y + BOX_HEADING_OFFSET,
        &BODY_HEADING,
        theme.accent,
    );

    let width = (body.width - 2.0 * BOX_PADDING).max(0.0);
    let bottom = body.bottom() - BOX_HEADING_OFFSET;
    let mut cursor = body.y + BOX_CONTENT_OFFSET;

    match mode {
        BodyMode::KeyPoints => {
            let bullets = gather_bullets(doc, options.max_bullets);
            stats.body_truncated = bullets.len() < doc.bullet_count();

            let text_x = x + BULLET_INDENT;
            let text_width = (width - BULLET_INDENT).max(0.0);
            for bullet in bullets {
                let area = WrapBox {
                    x: text_x,
                    y: cursor,
                    max_width: text_width,
                    line_height: BODY_LINE_HEIGHT,
                    max_lines: BULLET_MAX_LINES,
                };
                let wrapped = wrap_text(surface, bullet, &BODY_TEXT, area);
                if wrapped.lines.is_empty() || wrapped.cursor_y > bottom {
                    stats.body_truncated = true;
                    break;
                }

                surface.draw_text(BULLET_MARKER, x, cursor, &BODY_TEXT, theme.accent);
                for line in &wrapped.lines {
                    surface.draw_text(&line.text, line.x, line.y, &BODY_TEXT, theme.text);
                }
                stats.bullets_drawn += 1;
                stats.body_truncated |= wrapped.truncated;
                cursor = wrapped.cursor_y + BULLET_GAP;
            }
        }
        BodyMode::Summary => {
            let max_lines =
                lines_that_fit(bottom - cursor, BODY_LINE_HEIGHT).min(SUMMARY_MAX_LINES);
            let wrapped = wrap_text(
                surface,
                &doc.summary_text,
                &BODY_TEXT,
                WrapBox {
                    x,
                    y: cursor,
                    max_width: width,
                    line_height: BODY_LINE_HEIGHT,
                    max_lines,
                },
            );
            for line in &wrapped.lines {
                surface.draw_text(&line.text, line.x, line.y, &BODY_TEXT, theme.text);
            }
            stats.body_truncated = wrapped.truncated;
        }
    }
}

fn draw_footer<S: Surface + ?Sized>(
    surface: &mut S,
    doc: &Document,
    region: Rect,
    options: &SketchOptions,
) {
    let theme = &options.theme;
    surface.fill_rect(
        Rect::new(region.x, region.y + FOOTER_RULE_OFFSET, region.width, 1.0),
        theme.box_stroke,
    );

    let y = region.y + FOOTER_TEXT_OFFSET;
    let brand = &options.labels.brand;
    let brand_width = surface.measure_text(brand, &FOOTER_BRAND);
    surface.draw_text(
        brand,
        region.right() - brand_width,
        y,
        &FOOTER_BRAND,
        theme.accent,
    );

    let source = doc
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(&options.labels.no_source);
    let width = (region.width - brand_width - FOOTER_BRAND_GAP).max(0.0);
    let wrapped = wrap_text(
        surface,
        source,
        &FOOTER,
        single_line(y, region.x, width, FOOTER.size),
    );
    for line in &wrapped.lines {
        surface.draw_text(&line.text, line.x, line.y, &FOOTER, theme.muted);
    }
}
