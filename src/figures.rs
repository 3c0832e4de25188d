//! Figure selection.
//!
//! At most two images make it onto a sketch. Tagged figures win over page
//! renders, which win over anything untagged.

use serde::Serialize;

use crate::model::ImageRef;

/// Maximum number of images rendered on a sketch.
pub const MAX_FIGURES: usize = 2;

/// Tier that produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureTier {
    /// Images tagged `figure`
    Figure,
    /// Images tagged `page`
    Page,
    /// All images regardless of tag
    Any,
}

/// Ordered URLs chosen for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureSelection {
    /// Tier the URLs came from
    pub tier: FigureTier,
    /// At most [`MAX_FIGURES`] URLs in document order
    pub urls: Vec<String>,
}

impl FigureSelection {
    /// Number of selected URLs.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Pick up to two image URLs by tier.
pub fn pick_figures(images: &[ImageRef]) -> FigureSelection {
    let tiered = |kind: &str| -> Vec<&ImageRef> {
        images.iter().filter(|img| img.is_kind(kind)).collect()
    };

    let figures = tiered("figure");
    let (tier, chosen) = if !figures.is_empty() {
        (FigureTier::Figure, figures)
    } else {
        let pages = tiered("page");
        if !pages.is_empty() {
            (FigureTier::Page, pages)
        } else {
            (FigureTier::Any, images.iter().collect())
        }
    };

    let urls = chosen
        .into_iter()
        .take(MAX_FIGURES)
        .map(|img| img.url.clone())
        .collect();

    let selection = FigureSelection { tier, urls };
    log::debug!(
        "selected {} of {} images from tier {:?}",
        selection.len(),
        images.len(),
        selection.tier
    );
    selection
}
