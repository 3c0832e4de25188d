//! Font resolution and unshaped glyph layout.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};

use super::options::FontOptions;
use crate::error::{Error, Result};
use crate::layout::{FontWeight, TextStyle};

/// Per-character advance used when no font is available.
pub const ESTIMATED_CHAR_WIDTH: f32 = 0.55;

const FALLBACK_ASCENT: f32 = 0.8;

/// Advance, in em, of a character the face has no glyph for.
const MISSING_GLYPH_ADVANCE: f32 = 0.5;

/// Glyph id and advance (in em) for one character.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GlyphMetric {
    glyph_id: u16,
    advance: f32,
}

impl GlyphMetric {
    const MISSING: Self = Self {
        glyph_id: 0,
        advance: MISSING_GLYPH_ADVANCE,
    };
}

/// Face-wide metrics read once at load, plus advances resolved so far.
#[derive(Debug)]
struct FaceMetrics {
    units_per_em: f32,
    ascender: f32,
    descender: f32,
    glyphs: RwLock<HashMap<char, GlyphMetric>>,
}

/// Raw font bytes plus the face index within a collection.
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    index: u32,
    metrics: Arc<FaceMetrics>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .field("units_per_em", &self.metrics.units_per_em)
            .finish()
    }
}

/// A glyph positioned on a baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GlyphPlacement {
    pub glyph_id: u16,
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale: f32,
}

impl FontFace {
    /// Wrap font bytes, checking that they parse.
    pub fn from_data(data: Vec<u8>, index: u32) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|e| Error::InvalidOption(format!("unusable font data: {}", e)))?;
        let metrics = FaceMetrics {
            units_per_em: face.units_per_em().max(1) as f32,
            ascender: face.ascender() as f32,
            descender: face.descender() as f32,
            glyphs: RwLock::new(HashMap::new()),
        };
        Ok(Self {
            data: Arc::new(data),
            index,
            metrics: Arc::new(metrics),
        })
    }

    /// Load a font file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Self::from_data(data, 0).map_err(|_| {
            Error::InvalidOption(format!("{} is not a usable font file", path.display()))
        })
    }

    pub(crate) fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }

    /// Metrics for every character of `text`. The face is parsed only
    /// when some character has not been seen yet.
    fn glyph_metrics(&self, text: &str) -> Vec<GlyphMetric> {
        if let Ok(cache) = self.metrics.glyphs.read() {
            let hits: Option<Vec<GlyphMetric>> =
                text.chars().map(|ch| cache.get(&ch).copied()).collect();
            if let Some(hits) = hits {
                return hits;
            }
        }

        let Some(face) = self.face() else {
            return text.chars().map(|_| GlyphMetric::MISSING).collect();
        };
        let resolved: Vec<GlyphMetric> = text
            .chars()
            .map(|ch| resolve_glyph(&face, ch, self.metrics.units_per_em))
            .collect();

        if let Ok(mut cache) = self.metrics.glyphs.write() {
            cache.extend(text.chars().zip(resolved.iter().copied()));
        }
        resolved
    }

    #[cfg(test)]
    fn cached_glyphs(&self) -> usize {
        self.metrics.glyphs.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Advance width of `text` at `size`.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        self.glyph_metrics(text)
            .iter()
            .map(|m| m.advance * size)
            .sum()
    }

    /// Distance from the top of a `size` line box to the baseline.
    pub fn ascent(&self, size: f32) -> f32 {
        let extent = self.metrics.ascender - self.metrics.descender;
        if extent <= 0.0 {
            return size * FALLBACK_ASCENT;
        }
        size * self.metrics.ascender / extent
    }

    pub(crate) fn layout(
        &self,
        text: &str,
        size: f32,
        baseline_x: f32,
        baseline_y: f32,
    ) -> Vec<GlyphPlacement> {
        let scale = size / self.metrics.units_per_em;

        let mut out = Vec::new();
        let mut pen_x = 0.0f32;
        for metric in self.glyph_metrics(text) {
            if metric.glyph_id != 0 {
                out.push(GlyphPlacement {
                    glyph_id: metric.glyph_id,
                    origin_x: baseline_x + pen_x,
                    origin_y: baseline_y,
                    scale,
                });
            }
            pen_x += metric.advance * size;
        }
        out
    }
}

fn resolve_glyph(face: &ttf_parser::Face<'_>, ch: char, units_per_em: f32) -> GlyphMetric {
    let Some(gid) = face.glyph_index(ch).filter(|id| id.0 != 0) else {
        return GlyphMetric::MISSING;
    };
    let units = face.glyph_hor_advance(gid).unwrap_or(0) as f32;
    let advance = units / units_per_em;
    GlyphMetric {
        glyph_id: gid.0,
        advance: if advance <= 0.0 {
            MISSING_GLYPH_ADVANCE
        } else {
            advance
        },
    }
}

/// Width estimate used without a font.
pub fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * ESTIMATED_CHAR_WIDTH
}

// The index of installed fonts is read-only after the first scan. Faces
// themselves are loaded fresh into each `FontSet`.
static SYSTEM_FONT_DB: OnceLock<fontdb::Database> = OnceLock::new();

fn system_db() -> &'static fontdb::Database {
    SYSTEM_FONT_DB.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("loaded {} system font faces", db.len());
        db
    })
}

fn query_system_font(family: Option<&str>, weight: FontWeight) -> Option<FontFace> {
    let db = system_db();
    let fontdb_weight = match weight {
        FontWeight::Regular => fontdb::Weight::NORMAL,
        FontWeight::Bold => fontdb::Weight::BOLD,
    };
    let mut families = Vec::with_capacity(2);
    if let Some(name) = family {
        families.push(fontdb::Family::Name(name));
    }
    families.push(fontdb::Family::SansSerif);

    let id = db.query(&fontdb::Query {
        families: &families,
        weight: fontdb_weight,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    });
    id.and_then(|id| {
        db.with_face_data(id, |data, index| FontFace::from_data(data.to_vec(), index).ok())
            .flatten()
    })
}

/// Regular and bold faces for one render.
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    regular: Option<FontFace>,
    bold: Option<FontFace>,
}

impl FontSet {
    /// A set with no fonts. Text is measured by estimate and not drawn.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from explicit faces.
    pub fn from_faces(regular: Option<FontFace>, bold: Option<FontFace>) -> Self {
        Self { regular, bold }
    }

    /// Resolve fonts from files first, then from the system.
    ///
    /// Unreadable font files are an error. A missing system font is not:
    /// the set is returned partially empty and a warning is logged.
    pub fn load(options: &FontOptions) -> Result<Self> {
        let mut regular = options.regular.as_ref().map(FontFace::load).transpose()?;
        let mut bold = options.bold.as_ref().map(FontFace::load).transpose()?;

        if options.system_fonts {
            let family = options.family.as_deref();
            if regular.is_none() {
                regular = query_system_font(family, FontWeight::Regular);
            }
            if bold.is_none() {
                bold = query_system_font(family, FontWeight::Bold);
            }
        }

        let set = Self { regular, bold };
        if set.is_empty() {
            log::warn!("no usable font found; text will be measured by estimate and not drawn");
        }
        Ok(set)
    }

    /// Whether no face is available.
    pub fn is_empty(&self) -> bool {
        self.regular.is_none() && self.bold.is_none()
    }

    /// Face for `weight`, falling back to the other weight.
    pub fn face(&self, weight: FontWeight) -> Option<&FontFace> {
        match weight {
            FontWeight::Regular => self.regular.as_ref().or(self.bold.as_ref()),
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
        }
    }

    /// Width of `text` in `style`.
    pub fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        match self.face(style.weight) {
            Some(face) => face.measure(text, style.size),
            None => estimate_width(text, style.size),
        }
    }
}
