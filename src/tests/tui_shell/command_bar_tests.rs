use super::*;

fn typed(prefix: char, rest: &str) -> CommandBar {
    let mut bar = CommandBar::default();
    bar.start(prefix);
    for c in rest.chars() {
        bar.insert_char(c);
    }
    bar
}

#[test]
fn start_enters_command_mode_with_prefix() {
    let bar = typed(':', "quit");
    assert!(bar.command_mode());
    assert_eq!(bar.text(), ":quit");
    assert_eq!(bar.cursor(), 5);
}

#[test]
fn backspace_to_empty_leaves_command_mode() {
    let mut bar = typed('/', "a");
    bar.backspace();
    assert!(bar.command_mode());
    bar.backspace();
    assert!(!bar.command_mode());
    assert_eq!(bar.text(), "");
}

#[test]
fn editing_in_the_middle() {
    let mut bar = typed(':', "lbel");
    bar.move_left();
    bar.move_left();
    bar.move_left();
    bar.insert_char('a');
    assert_eq!(bar.text(), ":label");
    bar.move_right();
    bar.move_right();
    bar.move_right();
    bar.move_right();
    assert_eq!(bar.cursor(), bar.text().len());
}

#[test]
fn multibyte_input_keeps_char_boundaries() {
    let mut bar = typed('/', "né");
    bar.move_left();
    bar.insert_char('x');
    assert_eq!(bar.text(), "/nxé");
    bar.move_right();
    bar.backspace();
    assert_eq!(bar.text(), "/nx");
}

#[test]
fn take_clears_and_records_history() {
    let mut bar = typed(':', "q");
    assert_eq!(bar.take(), ":q");
    assert!(!bar.command_mode());
    assert_eq!(bar.text(), "");

    let mut bar2 = typed('/', "one");
    bar2.take();
    bar2.start('/');
    for c in "two".chars() {
        bar2.insert_char(c);
    }
    bar2.take();

    bar2.start(':');
    bar2.history_up();
    assert_eq!(bar2.text(), "/two");
    bar2.history_up();
    assert_eq!(bar2.text(), "/one");
    bar2.history_up();
    assert_eq!(bar2.text(), "/one");
    bar2.history_down();
    assert_eq!(bar2.text(), "/two");
    bar2.history_down();
    assert_eq!(bar2.text(), "/");
}

#[test]
fn cancel_discards_the_buffer() {
    let mut bar = typed(':', "label x");
    bar.cancel();
    assert!(!bar.command_mode());
    assert_eq!(bar.text(), "");
}

#[test]
fn cursor_never_moves_before_the_mode_char() {
    let mut bar = typed('/', "foo");
    for _ in 0..10 {
        bar.move_left();
    }
    assert_eq!(bar.cursor(), 1);
    bar.insert_char('x');
    assert_eq!(bar.text(), "/xfoo");
}

#[test]
fn backspace_at_the_mode_char_keeps_the_command() {
    let mut bar = typed('/', "foo");
    bar.move_left();
    bar.move_left();
    bar.move_left();
    bar.backspace();
    assert_eq!(bar.text(), "/foo");
    assert!(bar.command_mode());
}
