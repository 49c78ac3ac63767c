use std::sync::Arc;

use crate::assets::fonts::FontFace;
use crate::foundation::error::{OgError, OgResult};
use crate::layout::wrap::TextMeasure;

/// Advance used by metrics-only faces, as a fraction of the font size.
pub(crate) const METRICS_ONLY_ADVANCE_EM: f32 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
///
/// Draw ops carry their own color, so layouts are built with the default brush and shared
/// between the shadow passes and the main pass of a text block.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

/// Stateful helper for registering font bytes and building single-line Parley layouts.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine").finish_non_exhaustive()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register raw font bytes and return the family name Parley resolved for them.
    ///
    /// Bytes that do not contain a parseable face register no families and are rejected.
    pub(crate) fn register_font(&mut self, font_bytes: &[u8]) -> OgResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| OgError::font("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| OgError::font("registered font family has no name"))?
            .to_string();
        Ok(family_name)
    }

    /// Shape one unbroken line of `text` with `face`.
    ///
    /// Returns `Ok(None)` for metrics-only faces, which have nothing to shape.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        face: &FontFace,
    ) -> OgResult<Option<parley::Layout<TextBrushRgba8>>> {
        let Some(family_name) = face.family_name() else {
            return Ok(None);
        };
        let size_px = face.size_px();
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(OgError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(
            TextBrushRgba8::default(),
        ));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(Some(layout))
    }

    /// Rendered advance width of `text` in pixels.
    pub fn measure(&mut self, text: &str, face: &FontFace) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        match self.layout_line(text, face) {
            Ok(Some(layout)) => layout.width(),
            Ok(None) => metrics_only_width(text, face.size_px()),
            Err(e) => {
                tracing::debug!(error = %e, "text measurement failed; using approximate metrics");
                metrics_only_width(text, face.size_px())
            }
        }
    }

    /// Shape `text` into a reusable draw-ready layout.
    pub(crate) fn prepare(
        &mut self,
        text: &str,
        face: &FontFace,
    ) -> OgResult<Option<Arc<parley::Layout<TextBrushRgba8>>>> {
        Ok(self.layout_line(text, face)?.map(Arc::new))
    }
}

pub(crate) fn metrics_only_width(text: &str, size_px: f32) -> f32 {
    text.chars().count() as f32 * size_px * METRICS_ONLY_ADVANCE_EM
}

/// [`TextMeasure`] adapter that measures with one face through a shared engine.
pub struct FaceMeasure<'a> {
    engine: &'a mut TextLayoutEngine,
    face: &'a FontFace,
}

impl<'a> FaceMeasure<'a> {
    /// Measure with `face`, shaping through `engine`.
    pub fn new(engine: &'a mut TextLayoutEngine, face: &'a FontFace) -> Self {
        Self { engine, face }
    }
}

impl TextMeasure for FaceMeasure<'_> {
    fn text_width(&mut self, text: &str) -> f32 {
        self.engine.measure(text, self.face)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
