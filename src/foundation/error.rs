/// Convenience result type used across og-card.
pub type OgResult<T> = Result<T, OgError>;

/// Top-level error taxonomy used by the card pipeline.
#[derive(thiserror::Error, Debug)]
pub enum OgError {
    /// Invalid card configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A font could not be loaded or shaped.
    ///
    /// The resolver never returns this for missing or unreadable candidates; those fall through
    /// to the next candidate and finally to the built-in face.
    #[error("font error: {0}")]
    Font(String),

    /// Errors while compiling or executing a render plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding the final frame.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OgError {
    /// Build an [`OgError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`OgError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build an [`OgError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`OgError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
