use kurbo::Shape;

use crate::assets::fonts::{FontFace, FontResolver};
use crate::assets::text::{FaceMeasure, TextLayoutEngine};
use crate::compile::plan::{DrawOp, Layer, PreparedText, RenderPlan, TextId};
use crate::foundation::core::{BezPath, Rect, RoundedRect, Vec2};
use crate::foundation::error::{OgError, OgResult};
use crate::layout::geometry::CardGeometry;
use crate::layout::wrap::{WrappedText, wrap_capped};
use crate::render::gradient::VerticalGradient;
use crate::scene::config::{CardConfig, FontSettings};

const PATH_TOLERANCE: f64 = 0.1;

/// The three faces a card draws with.
#[derive(Clone, Debug)]
pub struct CardFonts {
    /// Title face.
    pub title: FontFace,
    /// Subtitle face.
    pub subtitle: FontFace,
    /// Caption face, also used to measure wrapping.
    pub caption: FontFace,
}

impl CardFonts {
    /// Resolve each size independently against the configured candidates.
    pub fn load(settings: &FontSettings, engine: &mut TextLayoutEngine) -> Self {
        let mut resolver = FontResolver::new(settings.candidates.clone(), settings.system_fallback);
        Self {
            title: resolver.load(settings.title_size, engine),
            subtitle: resolver.load(settings.subtitle_size, engine),
            caption: resolver.load(settings.caption_size, engine),
        }
    }

    /// Metrics-only faces at the configured sizes; never touches the filesystem.
    pub fn metrics_only(settings: &FontSettings) -> Self {
        Self {
            title: FontFace::metrics_only(settings.title_size),
            subtitle: FontFace::metrics_only(settings.subtitle_size),
            caption: FontFace::metrics_only(settings.caption_size),
        }
    }
}

/// Output of [`compile_card`].
#[derive(Clone, Debug)]
pub struct CompiledCard {
    /// Executable plan.
    pub plan: RenderPlan,
    /// Positions the plan was built from.
    pub geometry: CardGeometry,
    /// Caption lines after wrapping and capping.
    pub caption: WrappedText,
}

struct TextTable<'a> {
    engine: &'a mut TextLayoutEngine,
    texts: Vec<PreparedText>,
}

impl TextTable<'_> {
    fn prepare(&mut self, content: &str, face: &FontFace) -> OgResult<TextId> {
        let layout = self.engine.prepare(content, face)?;
        let font = layout.as_ref().and(face.font_data().cloned());
        let id = u32::try_from(self.texts.len())
            .map_err(|_| OgError::render("too many text entries in plan"))?;
        self.texts.push(PreparedText {
            content: content.to_string(),
            size_px: face.size_px(),
            layout,
            font,
        });
        Ok(TextId(id))
    }
}

/// Build the render plan for `cfg`.
///
/// Layers, bottom to top: opaque base, gradient overlay, panel, text.
#[tracing::instrument(skip_all, fields(width = cfg.canvas.width, height = cfg.canvas.height))]
pub fn compile_card(
    cfg: &CardConfig,
    fonts: &CardFonts,
    engine: &mut TextLayoutEngine,
) -> OgResult<CompiledCard> {
    cfg.validate()?;
    let geometry = CardGeometry::from_config(cfg);

    let caption = {
        let mut measure = FaceMeasure::new(engine, &fonts.caption);
        wrap_capped(
            &cfg.text.caption,
            geometry.caption_max_width() as f32,
            cfg.caption.max_lines,
            &mut measure,
        )
    };
    if caption.dropped > 0 {
        tracing::debug!(
            rendered = caption.lines.len(),
            dropped = caption.dropped,
            "caption exceeds line cap"
        );
    }

    let mut texts = TextTable {
        engine,
        texts: Vec::new(),
    };

    let layers = vec![
        base_layer(cfg),
        gradient_layer(cfg),
        panel_layer(cfg, &geometry),
        text_layer(cfg, fonts, &geometry, &caption, &mut texts)?,
    ];

    let plan = RenderPlan {
        canvas: cfg.canvas,
        layers,
        texts: texts.texts,
    };
    tracing::debug!(ops = plan.op_count(), texts = plan.texts.len(), "compiled card plan");

    Ok(CompiledCard {
        plan,
        geometry,
        caption,
    })
}

fn base_layer(cfg: &CardConfig) -> Layer {
    Layer {
        name: "base",
        ops: vec![DrawOp::FillRect {
            rect: cfg.canvas.rect(),
            color: cfg.background.base.with_alpha(255),
        }],
    }
}

fn gradient_layer(cfg: &CardConfig) -> Layer {
    let bg = &cfg.background;
    let gradient = VerticalGradient {
        top: bg.gradient_top,
        bottom: bg.gradient_bottom,
        strength: bg.gradient_strength,
    };
    let w = f64::from(cfg.canvas.width);
    let ops = gradient
        .rows(cfg.canvas.height)
        .enumerate()
        .map(|(y, color)| {
            let y = y as f64;
            DrawOp::FillRect {
                rect: Rect::new(0.0, y, w, y + 1.0),
                color: color.with_alpha(255),
            }
        })
        .collect();
    Layer {
        name: "gradient",
        ops,
    }
}

fn panel_layer(cfg: &CardConfig, geometry: &CardGeometry) -> Layer {
    let p = &cfg.panel;
    let (fill, border) = panel_paths(geometry.panel, p.radius, p.border_width);

    let mut ops = vec![DrawOp::FillPath {
        path: fill,
        color: p.fill,
    }];
    if let Some(path) = border {
        ops.push(DrawOp::FillPath {
            path,
            color: p.border,
        });
    }
    Layer { name: "panel", ops }
}

/// Fill and border geometry for a rounded panel.
///
/// The border occupies the outer `border_width` pixels of `bounds`; the fill covers the rest, so
/// the two never overlap.
pub(crate) fn panel_paths(
    bounds: Rect,
    radius: f64,
    border_width: f64,
) -> (BezPath, Option<BezPath>) {
    let bw = border_width
        .min(bounds.width() / 2.0)
        .min(bounds.height() / 2.0)
        .max(0.0);

    let inner = bounds.inset(-bw);
    let fill = RoundedRect::from_rect(inner, (radius - bw).max(0.0)).to_path(PATH_TOLERANCE);
    if bw <= 0.0 {
        return (fill, None);
    }

    let centerline = RoundedRect::from_rect(bounds.inset(-bw / 2.0), (radius - bw / 2.0).max(0.0));
    let border = kurbo::stroke(
        centerline.path_elements(PATH_TOLERANCE),
        &kurbo::Stroke::new(bw),
        &kurbo::StrokeOpts::default(),
        PATH_TOLERANCE,
    );
    (fill, Some(border))
}

fn text_layer(
    cfg: &CardConfig,
    fonts: &CardFonts,
    geometry: &CardGeometry,
    caption: &WrappedText,
    texts: &mut TextTable<'_>,
) -> OgResult<Layer> {
    let mut ops = Vec::new();

    if !cfg.text.title.is_empty() {
        let title = texts.prepare(&cfg.text.title, &fonts.title)?;
        for [dx, dy] in &cfg.title.shadow_offsets {
            ops.push(DrawOp::Text {
                text: title,
                origin: geometry.title + Vec2::new(*dx, *dy),
                color: cfg.title.shadow_color,
            });
        }
        ops.push(DrawOp::Text {
            text: title,
            origin: geometry.title,
            color: cfg.title.color,
        });
    }

    if !cfg.text.subtitle.is_empty() {
        let subtitle = texts.prepare(&cfg.text.subtitle, &fonts.subtitle)?;
        ops.push(DrawOp::Text {
            text: subtitle,
            origin: geometry.subtitle,
            color: cfg.subtitle.color,
        });
    }

    let half = cfg.divider.width / 2.0;
    if half > 0.0 {
        let y = geometry.divider_start.y;
        ops.push(DrawOp::FillRect {
            rect: Rect::new(
                geometry.divider_start.x,
                y - half,
                geometry.divider_end_x,
                y + half,
            ),
            color: cfg.divider.color,
        });
    }

    for (i, line) in caption.lines.iter().enumerate() {
        // Empty lines keep their slot but draw nothing.
        if line.is_empty() {
            continue;
        }
        let id = texts.prepare(line, &fonts.caption)?;
        ops.push(DrawOp::Text {
            text: id,
            origin: geometry.caption_line(i),
            color: cfg.caption.color,
        });
    }

    Ok(Layer { name: "text", ops })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
