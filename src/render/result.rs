//! Render result with layout and statistics.

use serde::{Deserialize, Serialize};

use super::OutputFormat;
use crate::layout::LayoutPlan;

/// An encoded sketch image.
#[derive(Debug, Clone)]
pub struct Sketch {
    /// Encoded image bytes
    pub bytes: Vec<u8>,

    /// Pixel width
    pub width: u32,

    /// Pixel height
    pub height: u32,

    /// Encoding used for `bytes`
    pub format: OutputFormat,

    /// Layout the image was drawn with
    pub plan: LayoutPlan,

    /// What made it onto the canvas
    pub stats: RenderStats,
}

impl Sketch {
    /// Encoded size in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Consume the sketch, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Statistics collected while rendering a sketch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Image URLs chosen by figure selection
    pub images_selected: u32,

    /// Images drawn in the image row
    pub images_rendered: u32,

    /// Selected images whose acquisition failed
    pub images_failed: u32,

    /// Bullets drawn in the body box
    pub bullets_drawn: u32,

    /// Bullets available in the document
    pub bullets_available: u32,

    /// Whether the title did not fit its line budget
    pub title_truncated: bool,

    /// Whether body content was cut
    pub body_truncated: bool,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any content was dropped.
    pub fn is_lossy(&self) -> bool {
        self.title_truncated || self.body_truncated || self.images_failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_lossy() {
        let mut stats = RenderStats::new();
        assert!(!stats.is_lossy());
        stats.images_failed = 1;
        assert!(stats.is_lossy());
    }

    #[test]
    fn test_stats_serialize() {
        let stats = RenderStats {
            bullets_drawn: 3,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"bullets_drawn\":3"));
    }
}
