use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::fonts::DEFAULT_FONT_CANDIDATES;
use crate::foundation::core::{Canvas, Rgb8, Rgba8};
use crate::foundation::error::{OgError, OgResult};

/// Default output path, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "assets/og/protective-computing.png";

/// Complete description of the card.
///
/// [`CardConfig::default`] is the Protective Computing card. JSON input may omit any field; the
/// omitted ones keep their default values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Base color and vertical gradient overlay.
    pub background: BackgroundStyle,
    /// Rounded translucent panel.
    pub panel: PanelStyle,
    /// Font candidates and point sizes.
    pub fonts: FontSettings,
    /// Strings drawn on the card.
    pub text: CardText,
    /// Text anchor, relative to the panel's top-left corner.
    pub anchor: TextAnchor,
    /// Title colors and shadow.
    pub title: TitleStyle,
    /// Subtitle placement and color.
    pub subtitle: SubtitleStyle,
    /// Divider line placement and color.
    pub divider: DividerStyle,
    /// Caption placement, wrapping and color.
    pub caption: CaptionStyle,
    /// Destination PNG path.
    pub output: PathBuf,
}

/// Opaque base color under a vertical two-stop gradient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundStyle {
    pub base: Rgb8,
    pub gradient_top: Rgb8,
    pub gradient_bottom: Rgb8,
    /// Factor applied to every gradient channel before truncation, in `[0, 1]`.
    pub gradient_strength: f64,
}

/// Rounded translucent panel inset from the canvas edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelStyle {
    /// Inset from each canvas edge.
    pub margin: f64,
    pub radius: f64,
    pub fill: Rgba8,
    pub border: Rgba8,
    /// Border thickness, drawn inside the panel bounds.
    pub border_width: f64,
}

/// Ordered font candidates and the three point sizes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontSettings {
    /// Font files tried in order for every size.
    pub candidates: Vec<PathBuf>,
    /// Use the system font database as the built-in fallback.
    pub system_fallback: bool,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub caption_size: f32,
}

/// Strings drawn on the card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardText {
    pub title: String,
    pub subtitle: String,
    pub caption: String,
}

/// Offset of the title anchor from the panel corner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextAnchor {
    pub inset_x: f64,
    pub inset_y: f64,
}

/// Title colors; the shadow is the title redrawn at small offsets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleStyle {
    pub color: Rgba8,
    pub shadow_color: Rgba8,
    /// Shadow passes, drawn in order before the title itself.
    pub shadow_offsets: Vec<[f64; 2]>,
}

/// Subtitle placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubtitleStyle {
    /// Distance below the title anchor.
    pub offset_y: f64,
    pub color: Rgba8,
}

/// Horizontal divider between the subtitle and the caption.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DividerStyle {
    /// Distance below the subtitle.
    pub offset_y: f64,
    /// Distance between the divider's right end and the panel's right edge.
    pub right_inset: f64,
    pub color: Rgba8,
    pub width: f64,
}

/// Caption placement and line cap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionStyle {
    /// Distance below the divider.
    pub offset_y: f64,
    pub line_step: f64,
    pub max_lines: usize,
    pub color: Rgba8,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1200,
                height: 630,
            },
            background: BackgroundStyle::default(),
            panel: PanelStyle::default(),
            fonts: FontSettings::default(),
            text: CardText::default(),
            anchor: TextAnchor::default(),
            title: TitleStyle::default(),
            subtitle: SubtitleStyle::default(),
            divider: DividerStyle::default(),
            caption: CaptionStyle::default(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            base: Rgb8::new(7, 10, 16),
            gradient_top: Rgb8::new(124, 92, 255),
            gradient_bottom: Rgb8::new(52, 211, 255),
            gradient_strength: 0.35,
        }
    }
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            margin: 72.0,
            radius: 34.0,
            fill: Rgba8::new(255, 255, 255, 18),
            border: Rgba8::new(255, 255, 255, 35),
            border_width: 2.0,
        }
    }
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            system_fallback: true,
            title_size: 72.0,
            subtitle_size: 30.0,
            caption_size: 22.0,
        }
    }
}

impl Default for CardText {
    fn default() -> Self {
        Self {
            title: "Protective Computing".to_string(),
            subtitle: "Systems design under human vulnerability".to_string(),
            caption: "Reversibility • Exposure Minimization • Local Authority • \
                      Degraded Functionality • Coercion Resistance • Essential Utility"
                .to_string(),
        }
    }
}

impl Default for TextAnchor {
    fn default() -> Self {
        Self {
            inset_x: 54.0,
            inset_y: 70.0,
        }
    }
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::new(255, 255, 255, 240),
            shadow_color: Rgba8::new(0, 0, 0, 110),
            shadow_offsets: vec![[0.0, 2.0], [2.0, 0.0], [2.0, 2.0]],
        }
    }
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            offset_y: 98.0,
            color: Rgba8::new(255, 255, 255, 205),
        }
    }
}

impl Default for DividerStyle {
    fn default() -> Self {
        Self {
            offset_y: 56.0,
            right_inset: 54.0,
            color: Rgba8::new(255, 255, 255, 55),
            width: 2.0,
        }
    }
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            offset_y: 28.0,
            line_step: 32.0,
            max_lines: 3,
            color: Rgba8::new(255, 255, 255, 170),
        }
    }
}

impl CardConfig {
    /// Parse a card description from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> OgResult<Self> {
        let cfg: CardConfig = serde_json::from_reader(r)
            .map_err(|e| OgError::validation(format!("parse card config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a card description from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> OgResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            OgError::validation(format!("open card config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON with every field spelled out.
    pub fn to_json_pretty(&self) -> OgResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| OgError::validation(format!("serialize card config: {e}")))
    }

    /// Reject configurations the renderer cannot draw.
    pub fn validate(&self) -> OgResult<()> {
        self.canvas.validate()?;

        let bg = &self.background;
        if !bg.gradient_strength.is_finite() || !(0.0..=1.0).contains(&bg.gradient_strength) {
            return Err(OgError::validation(
                "background.gradient_strength must be within [0, 1]",
            ));
        }

        let p = &self.panel;
        for (name, v) in [
            ("panel.margin", p.margin),
            ("panel.radius", p.radius),
            ("panel.border_width", p.border_width),
            ("anchor.inset_x", self.anchor.inset_x),
            ("anchor.inset_y", self.anchor.inset_y),
            ("subtitle.offset_y", self.subtitle.offset_y),
            ("divider.offset_y", self.divider.offset_y),
            ("divider.right_inset", self.divider.right_inset),
            ("divider.width", self.divider.width),
            ("caption.offset_y", self.caption.offset_y),
            ("caption.line_step", self.caption.line_step),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(OgError::validation(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        let short_side = f64::from(self.canvas.width.min(self.canvas.height));
        if p.margin * 2.0 >= short_side {
            return Err(OgError::validation(format!(
                "panel.margin {} leaves no room on a {}x{} canvas",
                p.margin, self.canvas.width, self.canvas.height
            )));
        }

        for (name, v) in [
            ("fonts.title_size", self.fonts.title_size),
            ("fonts.subtitle_size", self.fonts.subtitle_size),
            ("fonts.caption_size", self.fonts.caption_size),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(OgError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
        }

        if self
            .title
            .shadow_offsets
            .iter()
            .flatten()
            .any(|v| !v.is_finite())
        {
            return Err(OgError::validation("title.shadow_offsets must be finite"));
        }

        if self.caption.max_lines == 0 {
            return Err(OgError::validation("caption.max_lines must be >= 1"));
        }

        let text_left = p.margin + self.anchor.inset_x;
        let text_right = f64::from(self.canvas.width) - p.margin - self.divider.right_inset;
        if text_right <= text_left {
            return Err(OgError::validation(format!(
                "text column is empty: left edge {text_left} is not left of right edge {text_right}"
            )));
        }

        if self.output.as_os_str().is_empty() {
            return Err(OgError::validation("output path must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
