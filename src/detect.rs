//! Input format detection.

use crate::error::{Error, Result};
use crate::model::{MarkdownSummary, PaperRecord, SummaryInput};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Shape of a raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON object with `paper` / `summary_text` / `images`
    TypedJson,
    /// JSON object with a `summary` (or `paperSketch`) markdown string
    MarkdownJson,
    /// Bare markdown text
    Markdown,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::TypedJson => write!(f, "typed record"),
            InputFormat::MarkdownJson => write!(f, "markdown record"),
            InputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const MARKDOWN_KEYS: [&str; 2] = ["summary", "paperSketch"];

/// Detect the input shape from bytes.
///
/// # Returns
/// * `Ok(InputFormat)` for JSON objects and UTF-8 text; text that opens
///   with `{` or `[` but is not JSON is markdown
/// * `Err(Error::UnknownInput)` for non-object JSON or non-UTF-8 data
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let text = std::str::from_utf8(data).map_err(|_| Error::UnknownInput)?;

    if !looks_like_json(text) {
        return Ok(InputFormat::Markdown);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value) => classify(&value),
        Err(e) => {
            log::debug!("not JSON ({}), treating input as markdown", e);
            Ok(InputFormat::Markdown)
        }
    }
}

fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

fn classify(value: &Value) -> Result<InputFormat> {
    let Value::Object(map) = value else {
        return Err(Error::UnknownInput);
    };

    let is_markdown = MARKDOWN_KEYS
        .iter()
        .any(|key| map.get(*key).map(Value::is_string).unwrap_or(false));

    Ok(if is_markdown {
        InputFormat::MarkdownJson
    } else {
        InputFormat::TypedJson
    })
}

/// Decode raw bytes into a [`SummaryInput`].
pub fn load_input_from_bytes(data: &[u8]) -> Result<SummaryInput> {
    let format = detect_format_from_bytes(data)?;
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let input = match format {
        InputFormat::TypedJson => {
            SummaryInput::Typed(serde_json::from_slice::<PaperRecord>(data)?)
        }
        InputFormat::MarkdownJson => {
            SummaryInput::Markdown(serde_json::from_slice::<MarkdownSummary>(data)?)
        }
        InputFormat::Markdown => {
            SummaryInput::markdown(String::from_utf8_lossy(data).into_owned())
        }
    };

    log::debug!("detected input format: {}", format);
    Ok(input)
}

/// Read and decode an input file.
///
/// # Example
/// ```no_run
/// use papersketch::detect::load_input;
///
/// let input = load_input("summary.json").unwrap();
/// println!("{}", input.kind());
/// ```
pub fn load_input<P: AsRef<Path>>(path: P) -> Result<SummaryInput> {
    let data = fs::read(path)?;
    load_input_from_bytes(&data)
}
