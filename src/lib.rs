//! og-card renders the Protective Computing Open Graph card: a 1200×630 PNG with a gradient
//! background, a rounded translucent panel, a shadowed title, a subtitle, a divider and a
//! word-wrapped caption.
//!
//! - Describe the card with a [`CardConfig`] (the default is the Protective Computing card)
//! - Create a [`CardSession`], which resolves fonts once
//! - Render a [`FrameRGBA`] or write the PNG directly
#![forbid(unsafe_code)]

mod foundation;

/// Color parsing, font resolution and text shaping.
pub mod assets;
/// Card description to render plan.
pub mod compile;
/// Frame encoders.
pub mod encode;
/// Element positions and caption wrapping.
pub mod layout;
/// Render backends.
pub mod render;
/// Card description.
pub mod scene;
/// Session-oriented rendering API.
pub mod session;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgb8, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{OgError, OgResult};

pub use crate::assets::fonts::{FontFace, FontOrigin, FontResolver, ResolvedFont, resolve_font};
pub use crate::assets::text::TextLayoutEngine;
pub use crate::compile::compiler::{CardFonts, CompiledCard, compile_card};
pub use crate::compile::plan::{DrawOp, Layer, RenderPlan};
pub use crate::encode::png::{encode_png, write_png};
pub use crate::layout::geometry::CardGeometry;
pub use crate::layout::wrap::{TextMeasure, WrappedText, wrap_capped, wrap_greedy};
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use crate::render::cpu::CpuBackend;
pub use crate::scene::config::{CardConfig, DEFAULT_OUTPUT_PATH};
pub use crate::session::card_session::{CardSession, render_card, write_card};
