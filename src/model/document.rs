//! Document-level types.

use serde::{Deserialize, Serialize};

/// Number of authors shown before the list is cut with "et al.".
pub const DISPLAY_AUTHORS: usize = 3;

/// Number of bullets joined into the preview text.
pub const PREVIEW_BULLETS: usize = 3;

/// A normalized paper summary.
///
/// Both input shapes parse into this type. Sequences are never absent;
/// an empty vector stands for "nothing found".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Paper title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Authors in input order
    pub authors: Vec<String>,

    /// Affiliations in input order
    pub institutions: Vec<String>,

    /// Publication venue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    /// Publication year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Source URL of the paper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Sections in input order
    pub sections: Vec<Section>,

    /// Images in input order
    pub images: Vec<ImageRef>,

    /// Freeform body used when there are no bullets
    pub summary_text: String,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Title to display, falling back to `placeholder`.
    pub fn display_title<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(placeholder)
    }

    /// Authors for display: the first three, with "et al." when there are more.
    pub fn display_authors(&self) -> String {
        let shown = self
            .authors
            .iter()
            .take(DISPLAY_AUTHORS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        if self.authors.len() > DISPLAY_AUTHORS {
            format!("{} et al.", shown)
        } else {
            shown
        }
    }

    /// The "authors · venue · year" line. `None` when all parts are empty.
    pub fn meta_line(&self) -> Option<String> {
        let mut parts = Vec::new();

        let authors = self.display_authors();
        if !authors.is_empty() {
            parts.push(authors);
        }
        if let Some(venue) = self.venue.as_deref().filter(|v| !v.trim().is_empty()) {
            parts.push(venue.trim().to_string());
        }
        if let Some(year) = self.year {
            parts.push(year.to_string());
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" · "))
        }
    }

    /// All bullets across sections, in section order then bullet order.
    pub fn bullets(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.bullets.iter().map(String::as_str))
    }

    /// Total number of bullets.
    pub fn bullet_count(&self) -> usize {
        self.sections.iter().map(|s| s.bullets.len()).sum()
    }

    /// Whether the document has at least one bullet.
    pub fn has_bullets(&self) -> bool {
        self.sections.iter().any(|s| !s.bullets.is_empty())
    }

    /// The first three bullets joined by a space. Empty if there are none.
    pub fn preview(&self) -> String {
        self.bullets()
            .take(PREVIEW_BULLETS)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.authors.is_empty()
            && self.sections.is_empty()
            && self.images.is_empty()
            && self.summary_text.is_empty()
    }
}

/// A headed group of bullets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text
    pub heading: String,

    /// Bullets in input order
    pub bullets: Vec<String>,
}

impl Section {
    /// Create a section with no bullets.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            bullets: Vec::new(),
        }
    }

    /// Add a bullet.
    pub fn add_bullet(&mut self, bullet: impl Into<String>) {
        self.bullets.push(bullet.into());
    }

    /// Builder-style bullet addition.
    pub fn with_bullet(mut self, bullet: impl Into<String>) -> Self {
        self.add_bullet(bullet);
        self
    }
}

/// A reference to a remote image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image URL
    pub url: String,

    /// Classification tag such as "figure" or "page"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Caption or alt text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ImageRef {
    /// Create an untagged image reference.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: None,
            label: None,
        }
    }

    /// Set the classification tag.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Case-insensitive tag comparison.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind
            .as_deref()
            .map(|k| k.trim().eq_ignore_ascii_case(kind))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authors(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert!(doc.authors.is_empty());
        assert!(doc.sections.is_empty());
        assert!(doc.images.is_empty());
        assert_eq!(doc.display_title("Untitled"), "Untitled");
    }

    #[test]
    fn test_display_authors_truncates() {
        let mut doc = Document::new();
        doc.authors = authors(&["A", "B", "C"]);
        assert_eq!(doc.display_authors(), "A, B, C");

        doc.authors = authors(&["A", "B", "C", "D"]);
        assert_eq!(doc.display_authors(), "A, B, C et al.");
    }

    #[test]
    fn test_meta_line() {
        let mut doc = Document::new();
        assert_eq!(doc.meta_line(), None);

        doc.venue = Some("NeurIPS".to_string());
        doc.year = Some(2023);
        assert_eq!(doc.meta_line().as_deref(), Some("NeurIPS · 2023"));

        doc.authors = authors(&["Ada"]);
        assert_eq!(doc.meta_line().as_deref(), Some("Ada · NeurIPS · 2023"));
    }

    #[test]
    fn test_preview_takes_first_three_bullets() {
        let mut doc = Document::new();
        doc.sections.push(Section::new("Empty"));
        doc.sections
            .push(Section::new("A").with_bullet("one").with_bullet("two"));
        doc.sections
            .push(Section::new("B").with_bullet("three").with_bullet("four"));

        assert_eq!(doc.preview(), "one two three");
        assert_eq!(doc.bullet_count(), 4);
        assert!(doc.has_bullets());
    }

    #[test]
    fn test_image_kind_is_case_insensitive() {
        let img = ImageRef::new("https://x/y.png").with_kind("Figure");
        assert!(img.is_kind("figure"));
        assert!(!img.is_kind("page"));
        assert!(!ImageRef::new("https://x/z.png").is_kind("figure"));
    }
}
