//! Document model types.
//!
//! This module defines the normalized [`Document`] that both parsers
//! produce and the raw [`SummaryInput`] shapes they consume. Everything
//! here is created fresh per render and owned by that render.

mod document;
mod input;

pub use document::{Document, ImageRef, Section, DISPLAY_AUTHORS, PREVIEW_BULLETS};
pub use input::{ImageEntry, MarkdownSummary, PaperInfo, PaperRecord, SummaryInput};

pub(crate) use input::split_names;
