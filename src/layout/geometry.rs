use crate::foundation::core::{Point, Rect};
use crate::scene::config::CardConfig;

/// Resolved positions of every card element, in canvas pixels.
///
/// Text origins are top-left anchors of the first line.
#[derive(Clone, Debug, PartialEq)]
pub struct CardGeometry {
    /// Outer panel bounds.
    pub panel: Rect,
    /// Title anchor.
    pub title: Point,
    /// Subtitle anchor.
    pub subtitle: Point,
    /// Divider left end; the divider is horizontal.
    pub divider_start: Point,
    /// Divider right end x.
    pub divider_end_x: f64,
    /// First caption line anchor.
    pub caption: Point,
    /// Vertical distance between caption lines.
    pub caption_line_step: f64,
}

impl CardGeometry {
    /// Lay out a card. Positions chain downward from the title anchor.
    pub fn from_config(cfg: &CardConfig) -> Self {
        let w = f64::from(cfg.canvas.width);
        let h = f64::from(cfg.canvas.height);
        let margin = cfg.panel.margin;

        let panel = Rect::new(margin, margin, w - margin, h - margin);
        let title = Point::new(margin + cfg.anchor.inset_x, margin + cfg.anchor.inset_y);
        let subtitle = Point::new(title.x, title.y + cfg.subtitle.offset_y);
        let divider_start = Point::new(title.x, subtitle.y + cfg.divider.offset_y);
        let divider_end_x = w - margin - cfg.divider.right_inset;
        let caption = Point::new(title.x, divider_start.y + cfg.caption.offset_y);

        Self {
            panel,
            title,
            subtitle,
            divider_start,
            divider_end_x,
            caption,
            caption_line_step: cfg.caption.line_step,
        }
    }

    /// Width available to each caption line.
    pub fn caption_max_width(&self) -> f64 {
        self.divider_end_x - self.caption.x
    }

    /// Anchor of caption line `i` (0-based).
    pub fn caption_line(&self, i: usize) -> Point {
        Point::new(
            self.caption.x,
            self.caption.y + self.caption_line_step * i as f64,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
