//! Summary parsing module.
//!
//! Both input shapes land in the same [`Document`]; everything downstream
//! (figure selection, layout, rasterization) is shared.

mod cleanup;
mod markdown;
mod typed;

pub use cleanup::clean_inline;
pub use markdown::parse_markdown;
pub use typed::parse_record;

use crate::model::{Document, SummaryInput};

/// Parse either input shape. Never fails.
pub fn parse(input: &SummaryInput) -> Document {
    let doc = match input {
        SummaryInput::Typed(record) => parse_record(record),
        SummaryInput::Markdown(md) => parse_markdown(&md.summary),
    };

    log::debug!(
        "parsed {} input: title={} authors={} sections={} bullets={} images={}",
        input.kind(),
        doc.title.is_some(),
        doc.authors.len(),
        doc.sections.len(),
        doc.bullet_count(),
        doc.images.len()
    );

    doc
}

impl SummaryInput {
    /// Parse this input into a [`Document`].
    pub fn parse(&self) -> Document {
        parse(self)
    }
}
