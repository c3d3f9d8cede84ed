//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Wrap text to fit within a given width, breaking anywhere.
///
/// Returns a vector of lines, each fitting within the specified width.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for ch in line.chars() {
            let w = char_width(ch);
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += w;
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Columns a tab expands to.
const TAB_WIDTH: usize = 4;

/// Split a line into alternating runs of whitespace and non-whitespace.
fn tokens(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_space = false;

    for ch in line.chars() {
        let is_space = ch.is_whitespace();
        if is_space != in_space && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        in_space = is_space;
        if ch == '\t' {
            current.extend(std::iter::repeat(' ').take(TAB_WIDTH));
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Wrap text at word boundaries, prefixing every line with `indent`.
///
/// Spacing inside a line is kept as written, including leading indentation,
/// so aligned columns and nested lists survive. Whitespace that falls on a
/// wrap point is dropped. Words longer than the available width are split.
pub fn wrap_text_indented(text: &str, width: usize, indent: &str) -> Vec<String> {
    let available = width.saturating_sub(UnicodeWidthStr::width(indent));

    if available == 0 {
        return vec![format!("{}{}", indent, text)];
    }

    let mut lines = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for token in tokens(line) {
            let token_width = UnicodeWidthStr::width(token.as_str());

            if current_width + token_width <= available {
                current.push_str(&token);
                current_width += token_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(format!("{}{}", indent, current.trim_end()));
                current.clear();
                current_width = 0;
            }

            if token.starts_with(char::is_whitespace) {
                continue;
            }

            if token_width <= available {
                current_width = token_width;
                current = token;
            } else {
                let mut pieces = wrap_text(&token, available);
                let tail = pieces.pop().unwrap_or_default();
                lines.extend(pieces.into_iter().map(|p| format!("{}{}", indent, p)));
                current_width = UnicodeWidthStr::width(tail.as_str());
                current = tail;
            }
        }

        lines.push(format!("{}{}", indent, current));
    }

    if lines.is_empty() {
        lines.push(indent.to_string());
    }

    lines
}

/// Truncate a string to fit within a given width, adding ellipsis if needed.
pub fn truncate(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width < 3 {
        return text.chars().take(max_width).collect();
    }

    let mut width = 0;
    let mut result = String::new();

    for ch in text.chars() {
        let w = char_width(ch);
        if width + w > max_width - 3 {
            break;
        }
        result.push(ch);
        width += w;
    }

    result.push_str("...");
    result
}
