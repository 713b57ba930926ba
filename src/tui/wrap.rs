use textwrap::{wrap, Options as WrapOptions};
use unicode_width::UnicodeWidthStr;

use crate::parser::normalize_whitespace;

/// Cells reserved on the left of every title row for the `(NN) ` marker.
pub const MARKER_WIDTH: usize = 5;

/// Prefix of the second and later rows of a wrapped title.
pub const CONTINUATION_INDENT: &str = "  ";

pub const MIN_WRAP_WIDTH: usize = 8;

/// Columns available to title text on a display `display_width` cells wide.
pub fn title_wrap_width(display_width: usize) -> usize {
    display_width
        .saturating_sub(MARKER_WIDTH + 1)
        .max(MIN_WRAP_WIDTH)
}

/// Wrap a title to `width` columns. Continuation rows carry
/// [`CONTINUATION_INDENT`], counted within `width`. Always returns at least
/// one row, blank for an empty title.
pub fn wrap_title(title: &str, width: usize) -> Vec<String> {
    wrap_words(title, width, CONTINUATION_INDENT)
}

/// Greedy word wrap on whitespace. Words wider than a row are split.
pub fn wrap_words(text: &str, width: usize, indent: &str) -> Vec<String> {
    let width = width.max(1);
    // An indent that leaves no room would never make progress.
    let indent = if indent.width() < width { indent } else { "" };

    let text = normalize_whitespace(text);
    if text.is_empty() {
        return vec![String::new()];
    }

    let options = WrapOptions::new(width)
        .subsequent_indent(indent)
        .break_words(true);
    wrap(&text, options)
        .into_iter()
        .map(|row| row.into_owned())
        .collect()
}
