//! Ordered font resolution with a built-in fallback.
//!
//! Candidates are plain file paths tried in priority order. A missing path, an unreadable file
//! or bytes that do not parse as a font are not errors: the resolver moves to the next candidate
//! and, once the list is exhausted, reports [`ResolvedFont::Fallback`]. [`FontResolver`] turns
//! that into a usable face drawn from the system font database, or into a metrics-only face when
//! the host has no fonts at all.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::text::TextLayoutEngine;
use crate::foundation::error::{OgError, OgResult};

/// Default candidate paths, highest priority first.
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    r"C:\Windows\Fonts\Inter-Regular.ttf",
    r"C:\Windows\Fonts\inter.ttf",
    r"C:\Windows\Fonts\segoeui.ttf",
    "/usr/share/fonts/truetype/inter/Inter-Regular.ttf",
    "/usr/share/fonts/opentype/inter/Inter-Regular.otf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Inter-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// Where a [`FontFace`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// Loaded from one of the configured candidate paths.
    Candidate(PathBuf),
    /// Built-in fallback taken from the system font database.
    System {
        /// Family name reported by the font database.
        family: String,
    },
    /// Built-in fallback with approximate metrics and no glyphs.
    MetricsOnly,
}

/// A loaded font at one point size.
#[derive(Clone)]
pub struct FontFace {
    origin: FontOrigin,
    size_px: f32,
    family_name: Option<String>,
    font_data: Option<vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("origin", &self.origin)
            .field("size_px", &self.size_px)
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl FontFace {
    /// Register `bytes` with the layout engine and wrap them as a face at `size_px`.
    pub(crate) fn from_bytes(
        origin: FontOrigin,
        bytes: Vec<u8>,
        index: u32,
        size_px: f32,
        engine: &mut TextLayoutEngine,
    ) -> OgResult<Self> {
        validate_size(size_px)?;
        let family_name = engine.register_font(&bytes)?;
        let font_data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index);
        Ok(Self {
            origin,
            size_px,
            family_name: Some(family_name),
            font_data: Some(font_data),
        })
    }

    /// A face with approximate fixed-advance metrics that renders no glyphs.
    pub fn metrics_only(size_px: f32) -> Self {
        Self {
            origin: FontOrigin::MetricsOnly,
            size_px,
            family_name: None,
            font_data: None,
        }
    }

    /// The same font at a different point size.
    pub fn with_size(&self, size_px: f32) -> Self {
        Self {
            size_px,
            ..self.clone()
        }
    }

    /// Where this face came from.
    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    /// Point size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Parley family name, `None` for metrics-only faces.
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Whether this face can only measure, not draw.
    pub fn is_metrics_only(&self) -> bool {
        self.font_data.is_none()
    }

    pub(crate) fn font_data(&self) -> Option<&vello_cpu::peniko::FontData> {
        self.font_data.as_ref()
    }
}

/// Outcome of resolving one point size against the candidate list.
#[derive(Clone, Debug)]
pub enum ResolvedFont {
    /// First candidate that existed and loaded.
    Loaded(FontFace),
    /// No candidate was usable; the caller should use the built-in fallback.
    Fallback {
        /// Requested point size.
        size_px: f32,
    },
}

impl ResolvedFont {
    /// Return `true` when resolution degraded to the fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Try `candidates` in order and load the first one that exists and parses.
///
/// Never fails: every per-candidate problem is logged at `debug` and skipped.
pub fn resolve_font(
    candidates: &[PathBuf],
    size_px: f32,
    engine: &mut TextLayoutEngine,
) -> ResolvedFont {
    for path in candidates {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "font candidate not found");
            continue;
        }
        match load_font_file(path, size_px, engine) {
            Ok(face) => {
                tracing::debug!(path = %path.display(), size_px, "loaded font candidate");
                return ResolvedFont::Loaded(face);
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping font candidate");
            }
        }
    }
    ResolvedFont::Fallback { size_px }
}

fn load_font_file(path: &Path, size_px: f32, engine: &mut TextLayoutEngine) -> OgResult<FontFace> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read font file '{}'", path.display()))?;
    FontFace::from_bytes(
        FontOrigin::Candidate(path.to_path_buf()),
        bytes,
        0,
        size_px,
        engine,
    )
}

fn validate_size(size_px: f32) -> OgResult<()> {
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(OgError::validation(format!(
            "font size must be finite and > 0 (got {size_px})"
        )));
    }
    Ok(())
}

/// Candidate resolver that also owns the lazily materialized fallback face.
#[derive(Debug)]
pub struct FontResolver {
    candidates: Vec<PathBuf>,
    system_fallback: bool,
    fallback: Option<FontFace>,
}

impl FontResolver {
    /// Resolve against `candidates`; `system_fallback` enables the system font database as the
    /// built-in fallback (otherwise the fallback is metrics-only).
    pub fn new(candidates: Vec<PathBuf>, system_fallback: bool) -> Self {
        Self {
            candidates,
            system_fallback,
            fallback: None,
        }
    }

    /// See [`resolve_font`].
    pub fn resolve(&self, size_px: f32, engine: &mut TextLayoutEngine) -> ResolvedFont {
        resolve_font(&self.candidates, size_px, engine)
    }

    /// Resolve and degrade to the built-in fallback when no candidate loads.
    pub fn load(&mut self, size_px: f32, engine: &mut TextLayoutEngine) -> FontFace {
        match self.resolve(size_px, engine) {
            ResolvedFont::Loaded(face) => face,
            ResolvedFont::Fallback { size_px } => {
                let face = self.fallback_face(engine).with_size(size_px);
                tracing::warn!(
                    size_px,
                    origin = ?face.origin(),
                    "no font candidate loaded; using built-in fallback"
                );
                face
            }
        }
    }

    fn fallback_face(&mut self, engine: &mut TextLayoutEngine) -> &FontFace {
        let system_fallback = self.system_fallback;
        self.fallback.get_or_insert_with(|| {
            let system = if system_fallback {
                load_system_face(engine)
            } else {
                None
            };
            system.unwrap_or_else(|| FontFace::metrics_only(1.0))
        })
    }
}

fn load_system_face(engine: &mut TextLayoutEngine) -> Option<FontFace> {
    use usvg::fontdb::{Database, Family, Query};

    let mut db = Database::new();
    db.load_system_fonts();

    let generic = [Family::SansSerif, Family::Serif, Family::Monospace];
    let id = generic
        .iter()
        .find_map(|family| {
            db.query(&Query {
                families: std::slice::from_ref(family),
                ..Query::default()
            })
        })
        .or_else(|| db.faces().next().map(|face| face.id));
    let Some(id) = id else {
        tracing::debug!("system font database is empty");
        return None;
    };

    let family = db
        .face(id)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

    match FontFace::from_bytes(FontOrigin::System { family }, bytes, index, 1.0, engine) {
        Ok(face) => Some(face),
        Err(e) => {
            tracing::debug!(error = %e, "system fallback face did not load");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
