use super::*;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "og_card_fonts_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn local_font_path() -> Option<PathBuf> {
    DEFAULT_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

#[test]
fn missing_candidates_resolve_to_fallback() {
    let mut engine = TextLayoutEngine::new();
    let candidates = vec![
        PathBuf::from("/definitely/not/here/Inter-Regular.ttf"),
        PathBuf::from("also-missing.ttf"),
    ];
    let resolved = resolve_font(&candidates, 72.0, &mut engine);
    assert!(resolved.is_fallback());
    let ResolvedFont::Fallback { size_px } = resolved else {
        panic!("expected fallback");
    };
    assert_eq!(size_px, 72.0);
}

#[test]
fn empty_candidate_list_resolves_to_fallback() {
    let mut engine = TextLayoutEngine::new();
    assert!(resolve_font(&[], 22.0, &mut engine).is_fallback());
}

#[test]
fn corrupt_candidate_is_skipped() {
    let dir = scratch_dir("corrupt");
    let bogus = dir.join("bogus.ttf");
    std::fs::write(&bogus, b"this is not a font file").unwrap();

    let mut engine = TextLayoutEngine::new();
    let resolved = resolve_font(std::slice::from_ref(&bogus), 30.0, &mut engine);
    assert!(resolved.is_fallback());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn corrupt_candidate_falls_through_to_next_valid_one() {
    let Some(good) = local_font_path() else {
        return;
    };
    let dir = scratch_dir("fallthrough");
    let bogus = dir.join("bogus.ttf");
    std::fs::write(&bogus, [0u8; 64]).unwrap();

    let mut engine = TextLayoutEngine::new();
    let resolved = resolve_font(&[bogus, good.clone()], 30.0, &mut engine);
    let ResolvedFont::Loaded(face) = resolved else {
        panic!("expected the second candidate to load");
    };
    assert_eq!(face.origin(), &FontOrigin::Candidate(good));
    assert_eq!(face.size_px(), 30.0);
    assert!(!face.is_metrics_only());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn resolver_without_system_fallback_degrades_to_metrics_only() {
    let mut engine = TextLayoutEngine::new();
    let mut resolver = FontResolver::new(vec![PathBuf::from("/nope/font.ttf")], false);

    let title = resolver.load(72.0, &mut engine);
    let caption = resolver.load(22.0, &mut engine);

    assert!(title.is_metrics_only());
    assert_eq!(title.origin(), &FontOrigin::MetricsOnly);
    assert_eq!(title.size_px(), 72.0);
    assert_eq!(caption.size_px(), 22.0);
    assert!(title.family_name().is_none());
}

#[test]
fn system_fallback_never_panics() {
    let mut engine = TextLayoutEngine::new();
    let mut resolver = FontResolver::new(Vec::new(), true);
    let face = resolver.load(30.0, &mut engine);
    assert_eq!(face.size_px(), 30.0);
    match face.origin() {
        FontOrigin::System { .. } => assert!(!face.is_metrics_only()),
        FontOrigin::MetricsOnly => assert!(face.is_metrics_only()),
        FontOrigin::Candidate(_) => panic!("no candidates were configured"),
    }
}

#[test]
fn invalid_size_is_rejected_when_loading_bytes() {
    let mut engine = TextLayoutEngine::new();
    let err = FontFace::from_bytes(FontOrigin::MetricsOnly, vec![0; 8], 0, 0.0, &mut engine)
        .unwrap_err();
    assert!(err.to_string().contains("font size"));
}
