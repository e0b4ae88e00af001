use super::*;
use crate::tui_shell::test_support::lines;

#[test]
fn short_lines_pass_through() {
    assert_eq!(wrap_text(&lines(&["abc", ""]), 10), lines(&["abc", ""]));
}

#[test]
fn long_lines_wrap_on_words() {
    let out = wrap_text(&lines(&["the quick brown fox jumps"]), 10);
    assert_eq!(out, lines(&["the quick", "brown fox", "jumps"]));
}

#[test]
fn indentation_is_repeated() {
    let out = wrap_text(&lines(&["  alpha beta gamma"]), 12);
    assert_eq!(out, lines(&["  alpha beta", "  gamma"]));
}

#[test]
fn overlong_words_are_split() {
    let out = wrap_text(&lines(&["abcdefghij"]), 4);
    assert_eq!(out, lines(&["abcd", "efgh", "ij"]));
}

#[test]
fn zero_width_uses_the_default() {
    let line = "word ".repeat(20);
    let out = wrap_text(&[line], 0);
    assert!(out.len() > 1);
    assert!(out.iter().all(|l| l.chars().count() <= DEFAULT_WRAP_WIDTH));
}

#[test]
fn split_blocks_drops_markers() {
    let blocks = split_blocks(&lines(&["a", "b", "(break)", "c", "(break) trailing text", "d"]));
    assert_eq!(blocks, vec![lines(&["a", "b"]), lines(&["c"]), lines(&["d"])]);
}

#[test]
fn split_blocks_without_markers_is_one_block() {
    assert_eq!(split_blocks(&lines(&["a", "b"])), vec![lines(&["a", "b"])]);
    assert!(split_blocks(&[]).is_empty());
}

#[test]
fn trailing_marker_adds_no_empty_block() {
    assert_eq!(split_blocks(&lines(&["a", "(break)"])), vec![lines(&["a"])]);
}

#[test]
fn split_blocks_inverts_joining_with_markers() {
    let blocks = vec![
        lines(&["one", "two"]),
        lines(&["three"]),
        lines(&["", "four", "five"]),
    ];
    let mut joined = Vec::new();
    for (i, b) in blocks.iter().enumerate() {
        if i > 0 {
            joined.push(BLOCK_MARKER.to_string());
        }
        joined.extend(b.iter().cloned());
    }
    assert_eq!(split_blocks(&joined), blocks);
}
