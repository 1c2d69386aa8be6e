//! Shared text utilities for listing items and nodes
//!
//! Widths are measured in display columns, so wide glyphs line up in
//! terminal tables.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shorten `label` to at most `max_width` display columns, ending with `…`
/// when anything was cut.
///
/// # Example
/// ```
/// use codeflow::core::truncate_label;
///
/// assert_eq!(truncate_label("Hello", 10), "Hello");
/// assert_eq!(truncate_label("Hello World", 8), "Hello W…");
/// ```
pub fn truncate_label(label: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(label) <= max_width {
        return label.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for c in label.chars() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        // Leave one column for the ellipsis
        if width + char_width > max_width - 1 {
            break;
        }
        result.push(c);
        width += char_width;
    }
    result.push('…');
    result
}

/// Right-pad `label` with spaces to `width` display columns
pub fn pad_label(label: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(label);
    if current >= width {
        return label.to_string();
    }
    format!("{}{}", label, " ".repeat(width - current))
}

/// First non-blank line of a payload, trimmed, for one-line summaries
pub fn summary_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}
