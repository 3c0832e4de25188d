//! Greedy word wrapping against a measured width budget.

/// Font weight used for measurement and drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Regular,
    /// Bold weight
    Bold,
}

/// Typographic parameters that affect text width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in logical units
    pub size: f32,
    /// Font weight
    pub weight: FontWeight,
}

impl TextStyle {
    /// Regular text of the given size.
    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
        }
    }

    /// Bold text of the given size.
    pub const fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }
}

/// Text width measurement capability.
pub trait TextMeasure {
    /// Advance width of `text` in logical units.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32;
}

/// Where and how much text may be placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapBox {
    /// Left edge of every line
    pub x: f32,
    /// Top of the first line
    pub y: f32,
    /// Width budget per line
    pub max_width: f32,
    /// Vertical advance per line
    pub line_height: f32,
    /// Maximum number of lines
    pub max_lines: usize,
}

/// A line of wrapped text with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    /// Line content
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
}

/// Result of wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapped {
    /// Emitted lines, top to bottom
    pub lines: Vec<WrappedLine>,
    /// Top of the line after the last emitted one
    pub cursor_y: f32,
    /// Whether words were left over
    pub truncated: bool,
}

impl Wrapped {
    /// Number of emitted lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Wrap `text` into at most `area.max_lines` lines.
///
/// Words are split on whitespace and added to the current line while
/// `current + " " + word` fits the budget. A word wider than the budget on
/// its own is emitted as a single overflowing line; there is no hyphenation.
pub fn wrap_text<M>(measure: &M, text: &str, style: &TextStyle, area: WrapBox) -> Wrapped
where
    M: TextMeasure + ?Sized,
{
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    let flush = |line: String, lines: &mut Vec<WrappedLine>| {
        let y = area.y + lines.len() as f32 * area.line_height;
        lines.push(WrappedLine {
            text: line,
            x: area.x,
            y,
        });
    };

    for word in text.split_whitespace() {
        if lines.len() >= area.max_lines {
            truncated = true;
            break;
        }

        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if measure.measure_text(&candidate, style) <= area.max_width {
            current = candidate;
        } else {
            flush(std::mem::take(&mut current), &mut lines);
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        if lines.len() < area.max_lines {
            flush(current, &mut lines);
        } else {
            truncated = true;
        }
    }

    let cursor_y = area.y + lines.len() as f32 * area.line_height;
    Wrapped {
        lines,
        cursor_y,
        truncated,
    }
}

/// Lines of `line_height` that fit in `available` height.
pub fn lines_that_fit(available: f32, line_height: f32) -> usize {
    if line_height <= 0.0 || available < line_height {
        return 0;
    }
    (available / line_height).floor() as usize
}
