use crate::compile::plan::{DrawOp, Layer, RenderPlan};
use crate::foundation::core::{BezPath, Point, Rect, Rgba8};
use crate::foundation::error::{OgError, OgResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::composite::over_in_place;

/// CPU backend: each layer is rasterized by `vello_cpu` into a transparent pixmap and
/// composited onto the frame.
#[derive(Debug, Default)]
pub struct CpuBackend {
    layers_rendered: u64,
}

impl CpuBackend {
    /// Construct a backend with no cached state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of layers rasterized over this backend's lifetime.
    pub fn layers_rendered(&self) -> u64 {
        self.layers_rendered
    }

    fn rasterize_layer(
        &mut self,
        plan: &RenderPlan,
        layer: &Layer,
        width: u16,
        height: u16,
    ) -> OgResult<vello_cpu::Pixmap> {
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for op in &layer.ops {
            draw_op(&mut ctx, op, plan)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.layers_rendered += 1;
        Ok(pixmap)
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &RenderPlan) -> OgResult<FrameRGBA> {
        plan.canvas.validate()?;
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| OgError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| OgError::render("canvas height exceeds u16"))?;

        let mut frame = vec![0u8; plan.canvas.rgba8_len()];
        for layer in &plan.layers {
            if layer.ops.is_empty() {
                continue;
            }
            let pixmap = self.rasterize_layer(plan, layer, width, height)?;
            over_in_place(&mut frame, pixmap.data_as_u8_slice())?;
            tracing::debug!(layer = layer.name, ops = layer.ops.len(), "rasterized layer");
        }

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: frame,
            premultiplied: true,
        })
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp, plan: &RenderPlan) -> OgResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::FillRect { rect, color } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(&rect_to_cpu(*rect));
            Ok(())
        }
        DrawOp::FillPath { path, color } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_path(&bezpath_to_cpu(path));
            Ok(())
        }
        DrawOp::Text {
            text,
            origin,
            color,
        } => {
            let t = plan.text(*text).ok_or_else(|| {
                OgError::render(format!("text op references missing entry {}", text.0))
            })?;
            let (Some(layout), Some(font)) = (t.layout.as_ref(), t.font.as_ref()) else {
                tracing::trace!(content = %t.content, "skipping metrics-only text");
                return Ok(());
            };

            ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
            ctx.set_paint(color_to_cpu(*color));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    // Glyph offsets are relative to the run's baseline.
                    let baseline = run.baseline();
                    let glyphs = run.glyphs().map(move |g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y + baseline,
                    });
                    ctx.glyph_run(font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            Ok(())
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
