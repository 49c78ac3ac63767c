use super::*;
use crate::assets::fonts::{DEFAULT_FONT_CANDIDATES, FontOrigin};

fn local_face(size_px: f32, engine: &mut TextLayoutEngine) -> Option<FontFace> {
    let path = DEFAULT_FONT_CANDIDATES
        .iter()
        .map(std::path::PathBuf::from)
        .find(|p| p.exists())?;
    let bytes = std::fs::read(&path).ok()?;
    FontFace::from_bytes(FontOrigin::Candidate(path), bytes, 0, size_px, engine).ok()
}

#[test]
fn metrics_only_measure_is_fixed_advance() {
    let mut engine = TextLayoutEngine::new();
    let face = FontFace::metrics_only(20.0);
    assert_eq!(engine.measure("abcd", &face), 40.0);
    assert_eq!(engine.measure("", &face), 0.0);
    assert_eq!(engine.measure("•", &face), 10.0);
}

#[test]
fn metrics_only_faces_have_no_layout() {
    let mut engine = TextLayoutEngine::new();
    let face = FontFace::metrics_only(20.0);
    assert!(engine.layout_line("hello", &face).unwrap().is_none());
    assert!(engine.prepare("hello", &face).unwrap().is_none());
}

#[test]
fn face_measure_delegates_to_engine() {
    let mut engine = TextLayoutEngine::new();
    let face = FontFace::metrics_only(10.0);
    let mut m = FaceMeasure::new(&mut engine, &face);
    assert_eq!(m.text_width("A B"), 15.0);
}

#[test]
fn text_layout_smoke_with_local_font_if_present() {
    let mut engine = TextLayoutEngine::new();
    let Some(face) = local_face(48.0, &mut engine) else {
        return;
    };

    let layout = engine.layout_line("hello", &face).unwrap().unwrap();
    assert!(layout.lines().next().is_some());

    let short = engine.measure("A", &face);
    let long = engine.measure("A B C D", &face);
    assert!(short > 0.0);
    assert!(long > short);
}

#[test]
fn register_rejects_garbage_bytes() {
    let mut engine = TextLayoutEngine::new();
    assert!(engine.register_font(b"not a font").is_err());
}
