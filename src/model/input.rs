//! Input shapes accepted by the parsers.
//!
//! Two shapes arrive from upstream summarizers: a typed record carrying
//! paper metadata and a plain summary, or a single markdown block. Every
//! field is optional on the wire; the deserializers here accept the loose
//! variants seen in practice (years as strings, authors as one string).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw input for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryInput {
    /// A markdown summary block
    Markdown(MarkdownSummary),
    /// A typed paper record
    Typed(PaperRecord),
}

impl SummaryInput {
    /// Wrap a markdown string.
    pub fn markdown(text: impl Into<String>) -> Self {
        SummaryInput::Markdown(MarkdownSummary {
            summary: text.into(),
        })
    }

    /// Wrap a typed record.
    pub fn typed(record: PaperRecord) -> Self {
        SummaryInput::Typed(record)
    }

    /// Short name of the input shape, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SummaryInput::Markdown(_) => "markdown",
            SummaryInput::Typed(_) => "typed",
        }
    }
}

/// `{ "summary": "<markdown>" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownSummary {
    /// Markdown text
    #[serde(alias = "paperSketch")]
    pub summary: String,
}

/// `{ paper?, summary_text?, images? }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Bibliographic information
    #[serde(default, deserialize_with = "lenient_paper")]
    pub paper: Option<PaperInfo>,

    /// Freeform summary
    #[serde(default, alias = "summaryText", deserialize_with = "lenient_string")]
    pub summary_text: Option<String>,

    /// Candidate images
    #[serde(default, deserialize_with = "lenient_images")]
    pub images: Vec<ImageEntry>,
}

/// Bibliographic block of a typed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperInfo {
    /// Title
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,

    /// Authors; a single comma-separated string is also accepted
    #[serde(default, deserialize_with = "lenient_names")]
    pub authors: Vec<String>,

    /// Affiliations
    #[serde(default, deserialize_with = "lenient_names")]
    pub institutions: Vec<String>,

    /// Publication year; numeric strings are accepted
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,

    /// Venue
    #[serde(default, deserialize_with = "lenient_string")]
    pub venue: Option<String>,

    /// Source URL
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

/// One image entry of a typed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Image URL
    #[serde(default, deserialize_with = "lenient_url")]
    pub url: String,

    /// Classification tag
    #[serde(default, alias = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,

    /// Caption
    #[serde(default, alias = "caption", deserialize_with = "lenient_string")]
    pub label: Option<String>,
}

// Every typed field degrades to empty on a type mismatch; a record can
// under-populate but never fail.

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_paper<'de, D>(deserializer: D) -> Result<Option<PaperInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => PaperInfo::deserialize(value).ok(),
        _ => None,
    })
}

fn lenient_images<'de, D>(deserializer: D) -> Result<Vec<ImageEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(url) => Some(ImageEntry {
                url,
                ..Default::default()
            }),
            value @ Value::Object(_) => ImageEntry::deserialize(value).ok(),
            _ => None,
        })
        .collect())
}

fn lenient_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => split_names(&s),
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                // `{ "name": "..." }` objects show up in some exports
                Value::Object(map) => map.get("name").and_then(Value::as_str).map(String::from),
                _ => None,
            })
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|y| y.fract() == 0.0).map(|y| y as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Split "A, B; C" into names.
pub(crate) fn split_names(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}
