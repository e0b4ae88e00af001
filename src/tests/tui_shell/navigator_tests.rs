use super::*;
use crate::tui_shell::page::PageKind;
use crate::tui_shell::pages::{HelpPage, TicketShowBoxPage, TicketShowPage};
use crate::tui_shell::test_support::{FakeTracker, ticket};

fn tracker() -> FakeTracker {
    FakeTracker::new()
        .with_ticket(ticket("ABC-1", "root", &["ABC-2"]))
        .with_ticket(ticket("ABC-2", "child", &["ABC-3", "ABC-1"]))
        .with_ticket(ticket("ABC-3", "leaf", &["ABC-3"]))
        .with_results(vec![
            ticket("ABC-1", "root", &[]),
            ticket("ABC-2", "child", &[]),
        ])
}

/// Put the cursor on the line matching `pattern` and select it.
fn select_matching(nav: &mut Navigator, pattern: &str, ctx: &PageCtx<'_>) -> bool {
    if let Some(s) = nav.current_mut().searcher() {
        s.set_search(&format!("/{}", pattern));
        s.search();
    }
    nav.select_item(ctx)
}

fn trail_label(nav: &Navigator) -> String {
    let page = nav.current().as_any();
    if let Some(p) = page.downcast_ref::<TicketShowPage>() {
        return p.trail_label();
    }
    page.downcast_ref::<TicketShowBoxPage>()
        .map(|p| p.trail_label())
        .unwrap_or_default()
}

#[test]
fn query_to_list_to_ticket_and_back_out() {
    let tracker = tracker();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(QueryPage::default()));
    nav.enter(&ctx);
    assert_eq!(nav.current().kind(), PageKind::Query);

    assert!(!nav.select_item(&ctx));
    assert_eq!(nav.current().kind(), PageKind::TicketList);
    assert_eq!(nav.current().id(), "My open tickets");
    assert_eq!(tracker.searches.borrow().len(), 1);

    assert!(!nav.select_item(&ctx));
    assert_eq!(nav.current().kind(), PageKind::TicketShow);
    assert_eq!(nav.current().id(), "ABC-1");

    assert!(!nav.go_back(&ctx));
    assert_eq!(nav.current().kind(), PageKind::TicketList);
    // The remembered list keeps its results.
    assert_eq!(tracker.searches.borrow().len(), 1);

    assert!(!nav.go_back(&ctx));
    assert_eq!(nav.current().kind(), PageKind::Query);
    assert!(nav.go_back(&ctx));
}

#[test]
fn go_back_unwinds_drill_downs_one_step_at_a_time() {
    let tracker = tracker();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(TicketShowPage::new("ABC-1")));
    nav.enter(&ctx);

    assert!(!select_matching(&mut nav, "see ABC-2", &ctx));
    assert_eq!(nav.current().id(), "ABC-2");
    assert_eq!(trail_label(&nav), " <- ABC-1");

    assert!(!select_matching(&mut nav, "see ABC-3", &ctx));
    assert_eq!(nav.current().id(), "ABC-3");
    assert_eq!(trail_label(&nav), " <- ABC-2 <- ABC-1");
    let fetched = tracker.fetch_count();

    nav.go_back(&ctx);
    assert_eq!(nav.current().id(), "ABC-2");
    assert_eq!(trail_label(&nav), " <- ABC-1");

    nav.go_back(&ctx);
    assert_eq!(nav.current().id(), "ABC-1");
    assert_eq!(trail_label(&nav), "");
    assert_eq!(tracker.fetch_count(), fetched);

    // Empty trail and no list shown yet: the query page.
    nav.go_back(&ctx);
    assert_eq!(nav.current().kind(), PageKind::Query);
}

#[test]
fn self_links_are_ignored() {
    let tracker = tracker();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(TicketShowPage::new("ABC-3")));
    nav.enter(&ctx);

    assert!(!select_matching(&mut nav, "see ABC-3", &ctx));
    assert_eq!(nav.current().id(), "ABC-3");
    assert!(nav.previous().is_none());
}

#[test]
fn revisiting_a_trail_ticket_unwinds_to_it() {
    let tracker = tracker();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(TicketShowBoxPage::new("ABC-1")));
    nav.enter(&ctx);

    select_matching(&mut nav, "see ABC-2", &ctx);
    assert_eq!(trail_label(&nav), " <- ABC-1");
    select_matching(&mut nav, "see ABC-1", &ctx);
    assert_eq!(nav.current().id(), "ABC-1");
    assert_eq!(nav.current().kind(), PageKind::TicketShowBox);
    assert_eq!(trail_label(&nav), "");
}

#[test]
fn help_goes_back_to_the_previous_page() {
    let tracker = tracker();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(TicketShowPage::new("ABC-2")));
    nav.enter(&ctx);

    nav.follow(Nav::To(Box::new(HelpPage::default())), &ctx);
    assert_eq!(nav.current().kind(), PageKind::Help);
    assert_eq!(nav.previous().map(|p| p.id()), Some("ABC-2".to_string()));

    nav.go_back(&ctx);
    assert_eq!(nav.current().id(), "ABC-2");
}

#[test]
fn previous_without_history_falls_back_to_the_query_page() {
    let tracker = tracker();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(HelpPage::default()));
    nav.enter(&ctx);

    assert!(!nav.go_back(&ctx));
    assert_eq!(nav.current().kind(), PageKind::Query);
}

#[test]
fn refresh_refetches_the_current_ticket() {
    let tracker = tracker();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(TicketShowPage::new("ABC-1")));
    nav.enter(&ctx);
    nav.enter(&ctx);
    assert_eq!(tracker.fetch_count(), 1);

    nav.refresh(&ctx);
    assert_eq!(tracker.fetch_count(), 2);
    assert_eq!(nav.current().id(), "ABC-1");
}

#[test]
fn refresh_on_pages_without_refresher_does_nothing() {
    let tracker = tracker();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(HelpPage::default()));
    nav.refresh(&ctx);
    assert_eq!(nav.current().kind(), PageKind::Help);
}

#[test]
fn failed_fetch_renders_empty_and_is_not_retried_on_reentry() {
    let tracker = FakeTracker {
        fail_fetch: true,
        ..FakeTracker::default()
    };
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(TicketShowPage::new("ABC-9")));
    nav.enter(&ctx);
    nav.enter(&ctx);
    assert_eq!(tracker.fetch_count(), 1);
    assert!(!nav.select_item(&ctx));
    assert_eq!(nav.current().id(), "ABC-9");
}

#[test]
fn quit_request_is_reported() {
    let tracker = tracker();
    let ctx = PageCtx::new(&tracker, 80, 24);
    let mut nav = Navigator::new(Box::new(QueryPage::default()));
    assert!(nav.follow(Nav::Quit, &ctx));
    assert_eq!(nav.current().kind(), PageKind::Query);
}
