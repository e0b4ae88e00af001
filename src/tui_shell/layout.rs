use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::template::BLOCK_MARKER;

/// Wrap width used when the caller has none (unknown terminal size, `0`).
pub(in crate::tui_shell) const DEFAULT_WRAP_WIDTH: usize = 50;

/// Word-wrap every logical line to `width` display columns.
///
/// Leading indentation is repeated on continuation lines; words longer than the
/// available width are split on character boundaries.
pub(in crate::tui_shell) fn wrap_text(lines: &[String], width: usize) -> Vec<String> {
    let width = if width == 0 { DEFAULT_WRAP_WIDTH } else { width };
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        wrap_line(line, width, &mut out);
    }
    out
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let line = line.trim_end();
    if line.width() <= width {
        out.push(line.to_string());
        return;
    }

    let mut indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
    if indent.width() * 2 > width {
        indent.clear();
    }
    let base = indent.width();

    let mut current = indent.clone();
    let mut current_width = base;
    for word in line.split_whitespace() {
        let w = word.width();
        if current_width > base && current_width + 1 + w > width {
            out.push(std::mem::replace(&mut current, indent.clone()));
            current_width = base;
        }
        if current_width > base {
            current.push(' ');
            current_width += 1;
        }
        if base + w <= width {
            current.push_str(word);
            current_width += w;
            continue;
        }
        for ch in word.chars() {
            let cw = ch.width().unwrap_or(0);
            if current_width + cw > width && current_width > base {
                out.push(std::mem::replace(&mut current, indent.clone()));
                current_width = base;
            }
            current.push(ch);
            current_width += cw;
        }
    }
    if current_width > base {
        out.push(current);
    }
}

pub(in crate::tui_shell) fn is_block_marker(line: &str) -> bool {
    line.starts_with(BLOCK_MARKER)
}

/// Split display lines into blocks on marker lines. Markers are dropped; a
/// trailing run after the last marker forms the final block, but an empty
/// trailing run does not.
pub(in crate::tui_shell) fn split_blocks(lines: &[String]) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in lines {
        if is_block_marker(line) {
            blocks.push(std::mem::take(&mut current));
        } else {
            current.push(line.clone());
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

#[cfg(test)]
#[path = "../tests/tui_shell/layout_tests.rs"]
mod tests;
