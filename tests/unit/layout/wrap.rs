use super::*;

fn fixed(advance: f32) -> impl FnMut(&str) -> f32 {
    move |s: &str| s.chars().count() as f32 * advance
}

#[test]
fn four_words_per_line_boundary() {
    // "A B C D" is 7 chars; at 10px per char it fits in exactly 70px, "A B C D E" does not.
    let mut m = fixed(10.0);
    let lines = wrap_greedy("A B C D E F G H", 70.0, &mut m);
    assert_eq!(lines, vec!["A B C D".to_string(), "E F G H".to_string()]);
}

#[test]
fn lines_fit_unless_a_single_word_overflows() {
    let caption = "Reversibility • Exposure Minimization • Local Authority • Degraded Functionality • \
                   Coercion Resistance • Essential Utility";
    for max_width in [40.0_f32, 90.0, 150.0, 333.0, 948.0] {
        let mut m = fixed(9.0);
        for line in wrap_greedy(caption, max_width, &mut m) {
            let w = m.text_width(&line);
            assert!(
                w <= max_width || !line.contains(' '),
                "line {line:?} ({w}px) exceeds {max_width}px"
            );
        }
    }
}

#[test]
fn over_wide_first_word_commits_empty_buffer_before_it() {
    let mut m = fixed(10.0);
    let lines = wrap_greedy("Incomprehensibilities ok", 50.0, &mut m);
    assert_eq!(
        lines,
        vec![
            String::new(),
            "Incomprehensibilities".to_string(),
            "ok".to_string()
        ]
    );
}

#[test]
fn over_wide_later_word_is_not_split() {
    let mut m = fixed(10.0);
    let lines = wrap_greedy("ok Incomprehensibilities no", 50.0, &mut m);
    assert_eq!(
        lines,
        vec![
            "ok".to_string(),
            "Incomprehensibilities".to_string(),
            "no".to_string()
        ]
    );
}

#[test]
fn empty_leading_line_takes_a_render_slot() {
    let mut m = fixed(10.0);
    let capped = wrap_capped("Incomprehensibilities aa bb cc", 20.0, 3, &mut m);
    assert_eq!(capped.lines, vec!["", "Incomprehensibilities", "aa"]);
    assert_eq!(capped.dropped, 2);
}

#[test]
fn whitespace_runs_collapse_and_nbsp_binds() {
    let mut m = fixed(10.0);
    let lines = wrap_greedy("  A \t B\n\nC  ", 1000.0, &mut m);
    assert_eq!(lines, vec!["A B C".to_string()]);

    let mut m = fixed(10.0);
    let lines = wrap_greedy("Local\u{00A0}Authority x", 150.0, &mut m);
    assert_eq!(
        lines,
        vec!["Local\u{00A0}Authority".to_string(), "x".to_string()]
    );
}

#[test]
fn empty_input_yields_no_lines() {
    let mut m = fixed(10.0);
    assert!(wrap_greedy("", 100.0, &mut m).is_empty());
    assert!(wrap_greedy("   ", 100.0, &mut m).is_empty());
}

#[test]
fn cap_keeps_first_lines_and_counts_dropped() {
    let mut m = fixed(10.0);
    let text = "aa bb cc dd ee ff gg";
    let all = wrap_greedy(text, 20.0, &mut m);
    assert_eq!(all.len(), 7);

    let capped = wrap_capped(text, 20.0, 3, &mut m);
    assert_eq!(capped.lines, vec!["aa", "bb", "cc"]);
    assert_eq!(capped.dropped, 4);

    let roomy = wrap_capped("aa bb", 1000.0, 3, &mut m);
    assert_eq!(roomy.lines, vec!["aa bb"]);
    assert_eq!(roomy.dropped, 0);
}

#[test]
fn measure_is_called_with_trimmed_candidates() {
    let mut seen = Vec::new();
    let mut m = |s: &str| {
        seen.push(s.to_string());
        0.0_f32
    };
    let _ = wrap_greedy("one two", 10.0, &mut m);
    assert_eq!(seen, vec!["one".to_string(), "one two".to_string()]);
}
