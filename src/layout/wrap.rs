//! Greedy caption word wrap.

/// Pixel-width measurement for a single run of text.
pub trait TextMeasure {
    /// Rendered advance width of `text` in pixels.
    fn text_width(&mut self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f32,
{
    fn text_width(&mut self, text: &str) -> f32 {
        self(text)
    }
}

/// Wrapped caption, truncated to the renderable line count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WrappedText {
    /// Lines to render, in order.
    pub lines: Vec<String>,
    /// Number of wrapped lines dropped by the line cap.
    pub dropped: usize,
}

/// Split on breaking whitespace. Runs of whitespace collapse; no-break spaces stay inside words.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_break_space).filter(|w| !w.is_empty())
}

fn is_break_space(c: char) -> bool {
    c.is_whitespace() && !matches!(c, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Greedy, non-backtracking word wrap against `max_width`.
///
/// A word wider than `max_width` on its own is placed on its own line and overflows; words are
/// never split. When the very first word is too wide, the still-empty buffer is committed ahead
/// of it as an empty line. Only the trailing buffer is dropped when empty.
pub fn wrap_greedy<M>(text: &str, max_width: f32, measure: &mut M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut cur = String::new();

    for word in split_words(text) {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };

        if measure.text_width(&candidate) <= max_width {
            cur = candidate;
        } else {
            lines.push(std::mem::take(&mut cur));
            cur = word.to_string();
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

/// [`wrap_greedy`] followed by a cap of `max_lines`; extra lines are dropped silently.
pub fn wrap_capped<M>(text: &str, max_width: f32, max_lines: usize, measure: &mut M) -> WrappedText
where
    M: TextMeasure + ?Sized,
{
    let mut lines = wrap_greedy(text, max_width, measure);
    let dropped = lines.len().saturating_sub(max_lines);
    lines.truncate(max_lines);
    WrappedText { lines, dropped }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
