pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Linear interpolation `a * (1 - t) + b * t` on one 8-bit channel, in `f64`.
pub(crate) fn lerp_channel(a: u8, b: u8, t: f64) -> f64 {
    f64::from(a) * (1.0 - t) + f64::from(b) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
