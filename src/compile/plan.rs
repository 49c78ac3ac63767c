use std::sync::Arc;

use crate::assets::text::TextBrushRgba8;
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};

#[derive(Clone, Debug)]
/// Backend-agnostic render plan for the card.
///
/// Layers are drawn in order. Each layer is rasterized into its own transparent surface and
/// composited source-over onto the frame, so a layer made only of opaque rows replaces what is
/// beneath it while translucent ops inside a layer blend with each other first.
pub struct RenderPlan {
    /// Target canvas.
    pub canvas: Canvas,
    /// Ordered layers.
    pub layers: Vec<Layer>,
    /// Shaped text referenced by [`DrawOp::Text`].
    pub texts: Vec<PreparedText>,
}

#[derive(Clone, Debug)]
/// Draw operations rasterized together into one surface.
pub struct Layer {
    /// Short label used in logs.
    pub name: &'static str,
    /// Draw operations, painted in order.
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Index into [`RenderPlan::texts`].
pub struct TextId(
    /// Raw index.
    pub u32,
);

#[derive(Clone)]
/// Text shaped once and drawn by one or more [`DrawOp::Text`] ops.
pub struct PreparedText {
    /// Source string.
    pub content: String,
    /// Point size in pixels.
    pub size_px: f32,
    pub(crate) layout: Option<Arc<parley::Layout<TextBrushRgba8>>>,
    pub(crate) font: Option<vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for PreparedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedText")
            .field("content", &self.content)
            .field("size_px", &self.size_px)
            .field("drawable", &self.is_drawable())
            .finish()
    }
}

impl PreparedText {
    /// Whether glyphs are available; metrics-only text is placed but not painted.
    pub fn is_drawable(&self) -> bool {
        self.layout.is_some() && self.font.is_some()
    }
}

#[derive(Clone, Debug)]
/// A single draw operation in canvas pixel space.
pub enum DrawOp {
    /// Axis-aligned rectangle fill.
    FillRect {
        /// Rectangle bounds.
        rect: Rect,
        /// Straight-alpha fill color.
        color: Rgba8,
    },
    /// Non-zero path fill.
    FillPath {
        /// Path geometry.
        path: BezPath,
        /// Straight-alpha fill color.
        color: Rgba8,
    },
    /// Shaped text with its top-left at `origin`.
    Text {
        /// Prepared text to draw.
        text: TextId,
        /// Top-left anchor.
        origin: Point,
        /// Straight-alpha glyph color.
        color: Rgba8,
    },
}

impl RenderPlan {
    /// Look up prepared text by id.
    pub fn text(&self, id: TextId) -> Option<&PreparedText> {
        self.texts.get(id.0 as usize)
    }

    /// All text ops across layers as `(content, origin, color)`, in paint order.
    pub fn text_ops(&self) -> impl Iterator<Item = (&str, Point, Rgba8)> + '_ {
        self.layers.iter().flat_map(|l| l.ops.iter()).filter_map(|op| match op {
            DrawOp::Text {
                text,
                origin,
                color,
            } => self.text(*text).map(|t| (t.content.as_str(), *origin, *color)),
            _ => None,
        })
    }

    /// Total number of draw ops.
    pub fn op_count(&self) -> usize {
        self.layers.iter().map(|l| l.ops.len()).sum()
    }
}
