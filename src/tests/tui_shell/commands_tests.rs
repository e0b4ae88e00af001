use super::*;
use crate::tui_shell::pages::QueryPage;
use crate::tui_shell::test_support::{FakeTracker, LinesPage, lines, lines_page};

fn args(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

fn nav_on(page: LinesPage) -> Navigator {
    Navigator::new(Box::new(page))
}

#[test]
fn parse_picks_the_sub_protocol_from_the_first_char() {
    assert_eq!(parse("/foo"), Command::SearchDown("/foo".to_string()));
    assert_eq!(parse("?foo"), Command::SearchUp("?foo".to_string()));
    assert_eq!(parse(":q"), Command::Quit);
    assert_eq!(parse(":quit"), Command::Quit);
    assert_eq!(parse(":labels a b"), Command::Label(lines(&["a", "b"])));
    assert_eq!(parse(":frobnicate now"), Command::Ignored);
    assert_eq!(parse(":"), Command::Ignored);
    assert_eq!(parse(":   "), Command::Ignored);
    assert_eq!(parse("quit"), Command::Ignored);
    assert_eq!(parse(""), Command::Ignored);
}

#[test]
fn label_arguments_resolve_action_and_labels() {
    assert_eq!(
        parse_label_args(&args("add foo bar")),
        Some((LabelAction::Add, lines(&["foo", "bar"])))
    );
    assert_eq!(
        parse_label_args(&args("remove foo")),
        Some((LabelAction::Remove, lines(&["foo"])))
    );
    assert_eq!(
        parse_label_args(&args("foo bar")),
        Some((LabelAction::Add, lines(&["foo", "bar"])))
    );
    assert_eq!(parse_label_args(&args("add")), Some((LabelAction::Add, vec![])));
    assert_eq!(parse_label_args(&[]), None);
}

#[test]
fn quit_changes_nothing_else() {
    let tracker = FakeTracker::new();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = nav_on(LinesPage::new("ABC-1", &["a", "b"]));

    assert_eq!(execute(":quit", &mut nav, &ctx), Outcome::Quit);
    let page = lines_page(&nav);
    assert_eq!(page.pager.selected_line(), 0);
    assert_eq!(page.resets, 0);
    assert_eq!(page.creates, 0);
    assert!(nav.previous().is_none());
    assert!(tracker.label_calls.borrow().is_empty());
}

#[test]
fn slash_search_moves_to_the_matching_line() {
    let tracker = FakeTracker::new();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = nav_on(LinesPage::new("", &["a", "b", "c", "TODO here", "e"]));

    assert_eq!(execute("/TODO", &mut nav, &ctx), Outcome::Done);
    assert_eq!(lines_page(&nav).pager.selected_line(), 3);

    assert_eq!(execute("?a", &mut nav, &ctx), Outcome::Done);
    assert_eq!(lines_page(&nav).pager.selected_line(), 0);
}

#[test]
fn label_add_mutates_and_refreshes() {
    let tracker = FakeTracker::new();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = nav_on(LinesPage::new("ABC-1", &["a"]));

    assert_eq!(execute(":label add foo bar", &mut nav, &ctx), Outcome::Done);
    assert_eq!(
        *tracker.label_calls.borrow(),
        vec![("ABC-1".to_string(), LabelAction::Add, lines(&["foo", "bar"]))]
    );
    let page = lines_page(&nav);
    assert_eq!(page.resets, 1);
    assert_eq!(page.creates, 1);
}

#[test]
fn implicit_add_takes_every_argument() {
    let tracker = FakeTracker::new();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = nav_on(LinesPage::new("ABC-1", &["a"]));

    execute(":labels urgent backend", &mut nav, &ctx);
    execute(":label remove urgent", &mut nav, &ctx);
    let calls = tracker.label_calls.borrow();
    assert_eq!(calls[0].1, LabelAction::Add);
    assert_eq!(calls[0].2, lines(&["urgent", "backend"]));
    assert_eq!(calls[1].1, LabelAction::Remove);
    assert_eq!(calls[1].2, lines(&["urgent"]));
}

#[test]
fn label_without_arguments_or_ticket_is_a_no_op() {
    let tracker = FakeTracker::new();
    let ctx = PageCtx::new(&tracker, 80, 24);

    let mut nav = nav_on(LinesPage::new("ABC-1", &["a"]));
    assert_eq!(execute(":label", &mut nav, &ctx), Outcome::Done);
    assert_eq!(lines_page(&nav).resets, 0);

    let mut nav = nav_on(LinesPage::new("", &["a"]));
    assert_eq!(execute(":label foo", &mut nav, &ctx), Outcome::Done);
    assert_eq!(lines_page(&nav).resets, 0);

    let mut nav = Navigator::new(Box::new(QueryPage::default()));
    assert_eq!(execute(":label foo", &mut nav, &ctx), Outcome::Done);

    assert!(tracker.label_calls.borrow().is_empty());
}

#[test]
fn failed_mutation_still_refreshes() {
    let tracker = FakeTracker {
        fail_mutations: true,
        ..FakeTracker::default()
    };
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = nav_on(LinesPage::new("ABC-1", &["a"]));

    let outcome = execute(":label oops", &mut nav, &ctx);
    assert!(matches!(outcome, Outcome::Failed(ref msg) if msg.contains("forbidden")));
    assert_eq!(lines_page(&nav).resets, 1);
}

#[test]
fn unknown_commands_are_swallowed() {
    let tracker = FakeTracker::new();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = nav_on(LinesPage::new("ABC-1", &["a", "b"]));

    for buffer in [":frob", ":", "xyz", ""] {
        assert_eq!(execute(buffer, &mut nav, &ctx), Outcome::Done, "{:?}", buffer);
    }
    assert_eq!(lines_page(&nav).resets, 0);
    assert!(tracker.label_calls.borrow().is_empty());
}
