//! # Text Processing Utilities
//!
//! Label derivation for machine keys and width-aware helpers for aligning
//! columns in terminal output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Turn a camelCase key into a spaced, title-cased label.
///
/// The first character is uppercased and a space is inserted before every
/// later ASCII uppercase letter. Everything else passes through unchanged, so
/// acronyms split per letter and digits stay attached to their neighbours.
///
/// # Example
/// ```rust
/// use tapwire_util::title_case_camel;
///
/// assert_eq!(title_case_camel("unknownField"), "Unknown Field");
/// assert_eq!(title_case_camel("a"), "A");
/// assert_eq!(title_case_camel("pageURL"), "Page U R L");
/// ```
pub fn title_case_camel(key: &str) -> String {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut label = String::with_capacity(key.len() + 4);
    label.extend(first.to_uppercase());
    for ch in chars {
        if ch.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(ch);
    }
    label
}

/// Number of terminal columns `text` occupies.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate `text` so it occupies at most `max_width` terminal columns,
/// appending an ellipsis when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut truncated = String::new();
    for ch in text.chars() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Right-pad `text` with spaces to `width` terminal columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    let mut padded = text.to_string();
    if current < width {
        padded.push_str(&" ".repeat(width - current));
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_keys_split_before_capitals() {
        assert_eq!(title_case_camel("unknownField"), "Unknown Field");
        assert_eq!(title_case_camel("clientSessionStartTime"), "Client Session Start Time");
        assert_eq!(title_case_camel("already Spaced"), "Already  Spaced");
    }

    #[test]
    fn edge_inputs_pass_through() {
        assert_eq!(title_case_camel(""), "");
        assert_eq!(title_case_camel("a"), "A");
        assert_eq!(title_case_camel("X"), "X");
        assert_eq!(title_case_camel("item2Count"), "Item2 Count");
        assert_eq!(title_case_camel("snake_case"), "Snake_case");
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn padding_fills_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
        assert_eq!(display_width("日本"), 4);
    }
}
