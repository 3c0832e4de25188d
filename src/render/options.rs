//! Sketch options and configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Color;
use crate::error::{Error, Result};
use crate::layout::LayoutMetrics;

/// Default JPEG quality (0.95 equivalent).
pub const DEFAULT_QUALITY: u8 = 95;

/// Default cap on rendered bullets.
pub const DEFAULT_MAX_BULLETS: usize = 6;

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG
    #[default]
    Png,
    /// JPEG at the configured quality
    Jpeg,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// Fixed strings drawn on the sketch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// Small caps label above the title
    pub header: String,
    /// Brand label at the bottom right
    pub brand: String,
    /// Title shown when the document has none
    pub untitled: String,
    /// Footer text when the document has no URL
    pub no_source: String,
    /// Body heading in bullet mode
    pub key_points: String,
    /// Body heading in summary mode
    pub tldr: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            header: "PAPER SKETCH".to_string(),
            brand: "PaperSketch".to_string(),
            untitled: "Untitled paper".to_string(),
            no_source: "Source: not provided".to_string(),
            key_points: "Key points".to_string(),
            tldr: "TL;DR".to_string(),
        }
    }
}

/// Colors used by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub card_fill: Color,
    pub card_stroke: Color,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub box_fill: Color,
    pub box_stroke: Color,
    pub frame_fill: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xf3, 0xf4, 0xf6),
            card_fill: Color::rgb(0xff, 0xff, 0xff),
            card_stroke: Color::rgb(0xd1, 0xd5, 0xdb),
            accent: Color::rgb(0x25, 0x63, 0xeb),
            text: Color::rgb(0x11, 0x18, 0x27),
            muted: Color::rgb(0x6b, 0x72, 0x80),
            box_fill: Color::rgb(0xf8, 0xfa, 0xfc),
            box_stroke: Color::rgb(0xe5, 0xe7, 0xeb),
            frame_fill: Color::rgb(0xf9, 0xfa, 0xfb),
        }
    }
}

/// Where fonts come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontOptions {
    /// Font file for regular text
    pub regular: Option<PathBuf>,
    /// Font file for bold text
    pub bold: Option<PathBuf>,
    /// Preferred family name for system lookup
    pub family: Option<String>,
    /// Query installed system fonts
    pub system_fonts: bool,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            regular: None,
            bold: None,
            family: None,
            system_fonts: true,
        }
    }
}

/// Options for rendering a sketch.
#[derive(Debug, Clone)]
pub struct SketchOptions {
    /// Encoded output format
    pub format: OutputFormat,

    /// JPEG quality (1-100)
    pub quality: u8,

    /// Device scale factor
    pub scale: f32,

    /// Acquire images concurrently
    pub parallel: bool,

    /// Maximum bullets drawn in the body box
    pub max_bullets: usize,

    /// Fixed strings
    pub labels: Labels,

    /// Colors
    pub theme: Theme,

    /// Font sources
    pub fonts: FontOptions,

    /// Region sizes
    pub metrics: LayoutMetrics,
}

impl SketchOptions {
    /// Create new sketch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the JPEG quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Set the device scale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable concurrent acquisition.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the bullet cap.
    pub fn with_max_bullets(mut self, max: usize) -> Self {
        self.max_bullets = max;
        self
    }

    /// Set the labels.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the font sources.
    pub fn with_fonts(mut self, fonts: FontOptions) -> Self {
        self.fonts = fonts;
        self
    }

    /// Use a font file for regular text.
    pub fn with_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.fonts.regular = Some(path.into());
        self
    }

    /// Use a font file for bold text.
    pub fn with_bold_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.fonts.bold = Some(path.into());
        self
    }

    /// Set the region sizes.
    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Reject values that cannot produce a sketch.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.quality) {
            return Err(Error::InvalidOption(format!(
                "quality must be between 1 and 100, got {}",
                self.quality
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidOption(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if self.metrics.canvas_width <= 0.0 {
            return Err(Error::InvalidOption(
                "canvas width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SketchOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: DEFAULT_QUALITY,
            scale: 1.0,
            parallel: false,
            max_bullets: DEFAULT_MAX_BULLETS,
            labels: Labels::default(),
            theme: Theme::default(),
            fonts: FontOptions::default(),
            metrics: LayoutMetrics::default(),
        }
    }
}
