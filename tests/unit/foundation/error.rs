use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OgError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(OgError::font("x").to_string().contains("font error:"));
    assert!(OgError::render("x").to_string().contains("render error:"));
    assert!(OgError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = OgError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn anyhow_context_converts_with_question_mark() {
    fn fails() -> OgResult<()> {
        use anyhow::Context as _;
        std::fs::read("/definitely/not/here/og-card.bin").context("read probe file")?;
        Ok(())
    }

    let err = fails().unwrap_err();
    assert!(matches!(err, OgError::Other(_)));
    assert!(err.to_string().contains("read probe file"));
}
