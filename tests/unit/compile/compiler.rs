use super::*;
use crate::foundation::core::{Point, Rgba8};

fn compile_metrics_only(cfg: &CardConfig) -> CompiledCard {
    let mut engine = TextLayoutEngine::new();
    let fonts = CardFonts::metrics_only(&cfg.fonts);
    compile_card(cfg, &fonts, &mut engine).unwrap()
}

#[test]
fn layers_are_base_gradient_panel_text() {
    let card = compile_metrics_only(&CardConfig::default());
    let names: Vec<&str> = card.plan.layers.iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["base", "gradient", "panel", "text"]);
}

#[test]
fn gradient_layer_paints_one_opaque_row_per_pixel_row() {
    let card = compile_metrics_only(&CardConfig::default());
    let gradient = &card.plan.layers[1];
    assert_eq!(gradient.ops.len(), 630);
    for (y, op) in gradient.ops.iter().enumerate() {
        let DrawOp::FillRect { rect, color } = op else {
            panic!("gradient rows must be rect fills");
        };
        assert_eq!(color.a, 255);
        assert_eq!(rect.y0, y as f64);
        assert_eq!(rect.height(), 1.0);
        assert_eq!(rect.width(), 1200.0);
    }
    let DrawOp::FillRect { color, .. } = &gradient.ops[0] else {
        unreachable!()
    };
    assert_eq!(*color, Rgba8::new(43, 32, 89, 255));
}

#[test]
fn title_shadows_precede_title_then_subtitle_then_caption() {
    let cfg = CardConfig::default();
    let card = compile_metrics_only(&cfg);
    let ops: Vec<(&str, Point, Rgba8)> = card.plan.text_ops().collect();

    let shadow = Rgba8::new(0, 0, 0, 110);
    assert_eq!(ops[0], ("Protective Computing", Point::new(126.0, 144.0), shadow));
    assert_eq!(ops[1], ("Protective Computing", Point::new(128.0, 142.0), shadow));
    assert_eq!(ops[2], ("Protective Computing", Point::new(128.0, 144.0), shadow));
    assert_eq!(
        ops[3],
        (
            "Protective Computing",
            Point::new(126.0, 142.0),
            Rgba8::new(255, 255, 255, 240)
        )
    );
    assert_eq!(ops[4].0, "Systems design under human vulnerability");
    assert_eq!(ops[4].1, Point::new(126.0, 240.0));

    let captions = &ops[5..];
    assert!(!captions.is_empty() && captions.len() <= 3);
    for (i, (_, origin, color)) in captions.iter().enumerate() {
        assert_eq!(*origin, Point::new(126.0, 324.0 + 32.0 * i as f64));
        assert_eq!(*color, Rgba8::new(255, 255, 255, 170));
    }

    // The title is shaped once and shared by all four passes.
    assert_eq!(card.plan.texts[0].content, "Protective Computing");
    assert_eq!(
        card.plan
            .texts
            .iter()
            .filter(|t| t.content == "Protective Computing")
            .count(),
        1
    );
}

#[test]
fn long_caption_renders_only_three_lines() {
    let mut cfg = CardConfig::default();
    cfg.text.caption = "lorem ipsum dolor sit amet ".repeat(40);
    let card = compile_metrics_only(&cfg);

    assert_eq!(card.caption.lines.len(), 3);
    assert!(card.caption.dropped >= 2);

    let caption_ops = card
        .plan
        .text_ops()
        .filter(|(_, _, c)| *c == cfg.caption.color)
        .count();
    assert_eq!(caption_ops, 3);
}

#[test]
fn caption_wraps_four_words_per_line() {
    let mut cfg = CardConfig::default();
    cfg.text.caption = "A B C D E F G H".to_string();
    // Metrics-only advance is half the size: 10px per char, 80px column.
    cfg.fonts.caption_size = 20.0;
    cfg.divider.right_inset = 922.0;
    let card = compile_metrics_only(&cfg);

    assert_eq!(card.geometry.caption_max_width(), 80.0);
    assert_eq!(card.caption.lines, vec!["A B C D", "E F G H"]);
    assert_eq!(card.caption.dropped, 0);
}

#[test]
fn empty_caption_line_keeps_its_slot_without_a_text_op() {
    let mut cfg = CardConfig::default();
    // 10px per char in an 80px column; the first word cannot fit.
    cfg.text.caption = "Supercalifragilistic ab cd ef".to_string();
    cfg.fonts.caption_size = 20.0;
    cfg.divider.right_inset = 922.0;
    let card = compile_metrics_only(&cfg);

    assert_eq!(
        card.caption.lines,
        vec!["", "Supercalifragilistic", "ab cd ef"]
    );
    let caption_ops: Vec<Point> = card
        .plan
        .text_ops()
        .filter(|(_, _, c)| *c == cfg.caption.color)
        .map(|(_, origin, _)| origin)
        .collect();
    assert_eq!(
        caption_ops,
        vec![Point::new(126.0, 356.0), Point::new(126.0, 388.0)]
    );
}

#[test]
fn divider_spans_text_column() {
    let card = compile_metrics_only(&CardConfig::default());
    let divider = card.plan.layers[3]
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::FillRect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
        .unwrap();
    assert_eq!(divider.0, Rect::new(126.0, 295.0, 1074.0, 297.0));
    assert_eq!(divider.1, Rgba8::new(255, 255, 255, 55));
}

#[test]
fn metrics_only_text_is_placed_but_not_drawable() {
    let card = compile_metrics_only(&CardConfig::default());
    assert!(card.plan.texts.iter().all(|t| !t.is_drawable()));
}

#[test]
fn panel_border_and_fill_do_not_overlap() {
    let bounds = Rect::new(72.0, 72.0, 1128.0, 558.0);
    let (fill, border) = panel_paths(bounds, 34.0, 2.0);

    let fb = fill.bounding_box();
    assert!((fb.x0 - 74.0).abs() < 1e-6 && (fb.x1 - 1126.0).abs() < 1e-6);
    assert!((fb.y0 - 74.0).abs() < 1e-6 && (fb.y1 - 556.0).abs() < 1e-6);

    let bb = border.unwrap().bounding_box();
    assert!((bb.x0 - 72.0).abs() < 0.2 && (bb.x1 - 1128.0).abs() < 0.2);
    assert!((bb.y0 - 72.0).abs() < 0.2 && (bb.y1 - 558.0).abs() < 0.2);
}

#[test]
fn zero_border_width_has_no_border_path() {
    let (_, border) = panel_paths(Rect::new(0.0, 0.0, 100.0, 50.0), 10.0, 0.0);
    assert!(border.is_none());
}

#[test]
fn invalid_config_is_rejected_before_planning() {
    let mut cfg = CardConfig::default();
    cfg.caption.max_lines = 0;
    let mut engine = TextLayoutEngine::new();
    let fonts = CardFonts::metrics_only(&CardConfig::default().fonts);
    assert!(compile_card(&cfg, &fonts, &mut engine).is_err());
}
