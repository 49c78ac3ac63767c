use std::path::{Path, PathBuf};

use crate::assets::text::TextLayoutEngine;
use crate::compile::compiler::{CardFonts, CompiledCard, compile_card};
use crate::encode::png::write_png;
use crate::foundation::error::OgResult;
use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
use crate::scene::config::CardConfig;

/// One card render: validated config, resolved fonts, layout engine and backend.
pub struct CardSession {
    config: CardConfig,
    engine: TextLayoutEngine,
    fonts: CardFonts,
    backend: Box<dyn RenderBackend>,
}

impl std::fmt::Debug for CardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardSession")
            .field("config", &self.config)
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

impl CardSession {
    /// Validate `config` and resolve its fonts.
    pub fn new(config: CardConfig) -> OgResult<Self> {
        config.validate()?;
        let mut engine = TextLayoutEngine::new();
        let fonts = CardFonts::load(&config.fonts, &mut engine);
        Ok(Self::from_parts(config, engine, fonts))
    }

    /// Validate `config` and use metrics-only fonts; text is laid out but not painted.
    pub fn without_fonts(config: CardConfig) -> OgResult<Self> {
        config.validate()?;
        let fonts = CardFonts::metrics_only(&config.fonts);
        Ok(Self::from_parts(config, TextLayoutEngine::new(), fonts))
    }

    fn from_parts(config: CardConfig, engine: TextLayoutEngine, fonts: CardFonts) -> Self {
        Self {
            config,
            engine,
            fonts,
            backend: create_backend(BackendKind::Cpu),
        }
    }

    /// The validated configuration.
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// The resolved faces.
    pub fn fonts(&self) -> &CardFonts {
        &self.fonts
    }

    /// Build the render plan without rasterizing it.
    pub fn compile(&mut self) -> OgResult<CompiledCard> {
        compile_card(&self.config, &self.fonts, &mut self.engine)
    }

    /// Compile and rasterize the card.
    #[tracing::instrument(skip_all)]
    pub fn render(&mut self) -> OgResult<FrameRGBA> {
        let card = self.compile()?;
        self.backend.render_plan(&card.plan)
    }

    /// Render and write the card to `out`.
    pub fn write_to(&mut self, out: &Path) -> OgResult<()> {
        let frame = self.render()?;
        write_png(&frame, out)
    }
}

/// Render the card described by `config`.
pub fn render_card(config: &CardConfig) -> OgResult<FrameRGBA> {
    CardSession::new(config.clone())?.render()
}

/// Render the card and write it to `config.output`; returns the written path.
pub fn write_card(config: &CardConfig) -> OgResult<PathBuf> {
    let out = config.output.clone();
    CardSession::new(config.clone())?.write_to(&out)?;
    Ok(out)
}
