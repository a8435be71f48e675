use crate::fonts::{char_width, text_width};
use crate::model::Alignment;

/// Horizontal padding inside a table cell, in points.
pub(crate) const CELL_PADDING: f32 = 4.0;

const ELLIPSIS: &str = "..";

/// Shorten `text` so it fits inside a cell of `width` points, replacing the
/// tail with `..`. At least one character of the original is always kept.
pub fn truncate(text: &str, width: f32, font_size: f32) -> String {
    let max_chars = ((width - 2.0 * CELL_PADDING) / char_width(font_size))
        .floor()
        .max(0.0) as usize;
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len()).max(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// X coordinate at which to start drawing `text` inside the cell.
pub fn align_x(text: &str, cell_x: f32, cell_width: f32, align: Alignment, font_size: f32) -> f32 {
    let w = text_width(text, font_size);
    match align {
        Alignment::Left => cell_x + CELL_PADDING,
        Alignment::Right => cell_x + cell_width - w - CELL_PADDING,
        Alignment::Center => cell_x + (cell_width - w) / 2.0,
    }
}

/// Greedy word wrap by character count. Words longer than a line are kept whole.
/// Always yields at least one line.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let max_chars = (max_width / char_width(font_size)).floor().max(0.0) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + word_len + 1 <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += word_len + 1;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    lines.push(current);
    lines
}
