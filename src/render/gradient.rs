use crate::foundation::core::Rgb8;
use crate::foundation::math::lerp_channel;

/// Two-stop vertical gradient scaled by a constant strength.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalGradient {
    /// Color at row 0.
    pub top: Rgb8,
    /// Color at the last row.
    pub bottom: Rgb8,
    /// Factor applied to each interpolated channel before truncation.
    pub strength: f64,
}

impl VerticalGradient {
    /// Interpolation parameter for row `y` of a `height`-row surface.
    ///
    /// Surfaces with fewer than two rows have a single row; it takes the top color.
    pub fn t_for_row(y: u32, height: u32) -> f64 {
        if height <= 1 {
            return 0.0;
        }
        (f64::from(y) / f64::from(height - 1)).clamp(0.0, 1.0)
    }

    /// Color of row `y`. Channels are truncated toward zero.
    pub fn row_color(&self, y: u32, height: u32) -> Rgb8 {
        let t = Self::t_for_row(y, height);
        let ch = |a: u8, b: u8| -> u8 { (lerp_channel(a, b, t) * self.strength) as u8 };
        Rgb8::new(
            ch(self.top.r, self.bottom.r),
            ch(self.top.g, self.bottom.g),
            ch(self.top.b, self.bottom.b),
        )
    }

    /// Row colors from top to bottom.
    pub fn rows(&self, height: u32) -> impl Iterator<Item = Rgb8> + '_ {
        (0..height).map(move |y| self.row_color(y, height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
