use std::io::Write;
use std::path::Path;

use anyhow::Context as _;
use image::ImageEncoder as _;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::foundation::error::{OgError, OgResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// Flatten a frame to tightly packed opaque RGB8 over `bg`.
///
/// Premultiplied frames are composited as-is; straight-alpha frames are premultiplied first.
/// Fully opaque pixels keep their color exactly.
pub fn flatten_to_rgb8(frame: &FrameRGBA, bg: [u8; 3]) -> OgResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(OgError::encode(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut out = Vec::with_capacity(expected / 4 * 3);
    for px in frame.data.chunks_exact(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            out.extend_from_slice(&px[..3]);
            continue;
        }

        let inv = 255u16 - a;
        for i in 0..3 {
            let src = if frame.premultiplied {
                u16::from(px[i])
            } else {
                mul_div255_u16(u16::from(px[i]), a)
            };
            let c = src + mul_div255_u16(u16::from(bg[i]), inv);
            out.push(c.min(255) as u8);
        }
    }
    Ok(out)
}

/// Encode `frame` as an opaque RGB PNG with maximum compression.
///
/// No metadata chunks are written, so identical frames encode to identical bytes.
pub fn encode_png<W: Write>(frame: &FrameRGBA, writer: W) -> OgResult<()> {
    let rgb = flatten_to_rgb8(frame, [0, 0, 0])?;
    PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive)
        .write_image(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| OgError::encode(format!("png encode: {e}")))
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> OgResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `frame` to `path` as PNG, creating parent directories and replacing any existing file.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> OgResult<()> {
    ensure_parent_dir(path)?;
    let mut buf = Vec::new();
    encode_png(frame, &mut buf)?;
    std::fs::write(path, &buf).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = buf.len(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
