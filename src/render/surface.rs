//! Drawing surface capability.

use serde::{Deserialize, Serialize};

use super::OutputFormat;
use crate::acquire::DecodedImage;
use crate::error::Result;
use crate::layout::{Rect, TextMeasure, TextStyle};

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Channels as an array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Outline stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Minimal drawing capability used by the rasterizer.
///
/// Coordinates are logical units; a backend applies its own device scale.
/// Text is positioned by the top of its line box. Drawing calls cannot
/// fail; only [`Surface::encode`] can.
pub trait Surface: TextMeasure {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a rounded rectangle with an optional fill and an optional stroke.
    fn draw_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    );

    /// Draw a single line of text with its line box top at `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, color: Color);

    /// Draw an image scaled into `dest`.
    fn draw_image(&mut self, image: &DecodedImage, dest: Rect);

    /// Encode the surface.
    fn encode(&self, format: OutputFormat, quality: u8) -> Result<Vec<u8>>;
}
