//! A surface that records draw calls instead of rasterizing.
//!
//! Text is measured as `chars × size × 0.5`, so layout decisions are
//! reproducible without any font installed.

use super::{Color, OutputFormat, Stroke, Surface};
use crate::acquire::DecodedImage;
use crate::error::{Error, Result};
use crate::layout::{Rect, TextMeasure, TextStyle};

/// Width of one character relative to the font size.
pub const RECORDING_CHAR_WIDTH: f32 = 0.5;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
        color: Color,
    },
    Image {
        width: u32,
        height: u32,
        dest: Rect,
    },
}

/// Deterministic test double for [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    fail_encode: bool,
}

impl RecordingSurface {
    /// Create a surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Make [`Surface::encode`] fail.
    pub fn failing_encode(mut self) -> Self {
        self.fail_encode = true;
        self
    }

    /// Pixel size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Recorded calls in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of every text call in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Destination rectangles of every image call in order.
    pub fn image_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { dest, .. } => Some(*dest),
                _ => None,
            })
            .collect()
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        text.chars().count() as f32 * style.size * RECORDING_CHAR_WIDTH
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            radius,
            fill,
            stroke,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
            color,
        });
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            width: image.width(),
            height: image.height(),
            dest,
        });
    }

    fn encode(&self, format: OutputFormat, _quality: u8) -> Result<Vec<u8>> {
        if self.fail_encode {
            return Err(Error::Encode("recording surface refused to encode".to_string()));
        }
        Ok(format!(
            "{} {}x{} {} commands",
            format,
            self.width,
            self.height,
            self.commands.len()
        )
        .into_bytes())
    }
}
