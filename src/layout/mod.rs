//! Layout: region planning and text wrapping.

mod plan;
mod wrap;

pub use plan::{fit_contain, LayoutMetrics, LayoutPlan, Rect, Region, RegionKind};
pub use wrap::{
    lines_that_fit, wrap_text, FontWeight, TextMeasure, TextStyle, WrapBox, Wrapped, WrappedLine,
};
