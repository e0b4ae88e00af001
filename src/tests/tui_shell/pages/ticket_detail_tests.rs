use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use serde_json::json;

use super::*;
use crate::tui_shell::test_support::{FakeTracker, lines, ticket};

fn epic() -> Value {
    json!({
        "key": "EP-1",
        "fields": {
            "summary": "Big thing",
            "issuetype": { "name": "Epic" },
            "description": "word ".repeat(40),
        }
    })
}

fn entered<S: DetailStyle>(id: &str, tracker: &FakeTracker, width: u16) -> TicketDetailPage<S> {
    let ctx = PageCtx::new(tracker, width, 30);
    let mut page = TicketDetailPage::<S>::new(id);
    page.create(&ctx);
    page
}

fn select_line_with(page: &mut TicketShowPage, needle: &str) {
    let i = page
        .pager
        .lines()
        .iter()
        .position(|l| l.contains(needle))
        .expect("line present");
    page.pager.set_selected_line(i);
}

#[test]
fn default_wrap_limits_depend_on_the_style() {
    let tracker = FakeTracker::new().with_ticket(epic());
    let plain: TicketShowPage = entered("EP-1", &tracker, 200);
    let boxed: TicketShowBoxPage = entered("EP-1", &tracker, 200);
    assert_eq!(plain.wrap_width, 100);
    assert_eq!(boxed.wrap_width, 50);
    assert!(boxed.pager.lines().iter().all(|l| l.chars().count() <= 50));
}

#[test]
fn narrow_terminals_cap_the_wrap_width() {
    let tracker = FakeTracker::new().with_ticket(epic());
    let page: TicketShowBoxPage = entered("EP-1", &tracker, 40);
    assert_eq!(page.wrap_width, 37);
}

#[test]
fn max_wrap_option_overrides_and_zero_means_terminal_width() {
    let tracker = FakeTracker::new()
        .with_ticket(epic())
        .with_opt("max_wrap", json!(30));
    let page: TicketShowPage = entered("EP-1", &tracker, 200);
    assert_eq!(page.wrap_width, 30);

    let tracker = FakeTracker::new()
        .with_ticket(epic())
        .with_opt("max_wrap", json!(0));
    let page: TicketShowBoxPage = entered("EP-1", &tracker, 120);
    assert_eq!(page.wrap_width, 117);
}

#[test]
fn epic_links_line_opens_the_epic_query() {
    let tracker = FakeTracker::new().with_ticket(epic());
    let mut page: TicketShowPage = entered("EP-1", &tracker, 100);
    select_line_with(&mut page, "epic_links:");

    let Some(Nav::To(next)) = page.select_item() else {
        panic!("expected a page");
    };
    let list = next
        .as_any()
        .downcast_ref::<TicketListPage>()
        .expect("ticket list");
    assert_eq!(list.query().name, "Open Tasks in Epic EP-1");
    assert_eq!(
        list.query().jql,
        "\"Epic Link\" = EP-1 AND resolution = Unresolved"
    );
}

#[test]
fn drilling_down_copies_the_trail() {
    let tracker = FakeTracker::new()
        .with_ticket(ticket("A-1", "a", &["B-2"]))
        .with_ticket(ticket("B-2", "b", &["C-3"]));
    let mut a: TicketShowPage = entered("A-1", &tracker, 100);
    select_line_with(&mut a, "see B-2");
    let Some(Nav::To(b)) = a.select_item() else {
        panic!("expected a page");
    };
    let b = b
        .as_any()
        .downcast_ref::<TicketShowPage>()
        .expect("detail page")
        .clone();
    assert_eq!(b.ticket_id, "B-2");
    assert_eq!(b.trail.len(), 1);
    assert_eq!(a.trail.len(), 0);
    assert_eq!(b.trail.last().map(|p| p.ticket_id.as_str()), Some("A-1"));
    // The snapshot keeps the cursor it was left at.
    assert_eq!(
        b.trail.last().map(|p| p.pager.selected_line()),
        Some(a.pager.selected_line())
    );
}

#[test]
fn lines_without_ticket_ids_select_nothing() {
    let tracker = FakeTracker::new().with_ticket(ticket("A-1", "a", &[]));
    let mut page: TicketShowPage = entered("A-1", &tracker, 100);
    select_line_with(&mut page, "description:");
    assert!(page.select_item().is_none());
}

#[test]
fn empty_trail_goes_back_to_list_or_query() {
    let mut page = TicketShowPage::new("A-1");
    assert!(matches!(page.go_back(), Nav::ListOrQuery));
}

#[test]
fn reset_cache_drops_body_and_lines() {
    let tracker = FakeTracker::new().with_ticket(ticket("A-1", "a", &[]));
    let mut page: TicketShowPage = entered("A-1", &tracker, 100);
    assert!(page.pager.is_populated());
    page.reset_cache();
    assert!(page.api_body.is_none());
    assert!(!page.pager.is_populated());
    assert_eq!(page.active_ticket_id(), "A-1");
    assert_eq!(page.edit_ticket_id().as_deref(), Some("A-1"));
    assert_eq!(page.comment_ticket_id().as_deref(), Some("A-1"));
}

#[test]
fn block_position_skips_markers() {
    let shown = lines(&["a", "b", "(break)", "c", "(break)", "(break)", "d"]);
    assert_eq!(block_position(&shown, Some(0)), Some((0, 0)));
    assert_eq!(block_position(&shown, Some(1)), Some((0, 1)));
    assert_eq!(block_position(&shown, Some(2)), None);
    assert_eq!(block_position(&shown, Some(3)), Some((1, 0)));
    assert_eq!(block_position(&shown, Some(6)), Some((3, 0)));
    assert_eq!(block_position(&shown, None), None);
    assert_eq!(block_position(&shown, Some(9)), None);
    assert_eq!(split_blocks(&shown)[3], lines(&["d"]));
}

fn commented(key: &str, comments: usize) -> Value {
    let comments: Vec<Value> = (0..comments)
        .map(|i| json!({"author": "ann", "body": format!("body{}", i)}))
        .collect();
    json!({
        "key": key,
        "fields": {
            "summary": "Many comments",
            "description": "desc",
            "comment": { "comments": comments },
        }
    })
}

/// Enter on a 80x28 screen: 24 body rows inside the page chrome.
fn boxed_on_screen(tracker: &FakeTracker) -> TicketShowBoxPage {
    let ctx = PageCtx::new(tracker, 80, 28);
    let mut page = TicketShowBoxPage::new("A-1");
    page.create(&ctx);
    page
}

fn draw<P: Page>(page: &P) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(80, 26)).expect("test terminal");
    terminal
        .draw(|f| page.render(f, f.area()))
        .expect("draw");
    terminal.backend().buffer().clone()
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
}

fn row_with(buf: &Buffer, needle: &str) -> Option<u16> {
    (0..buf.area.height).find(|&y| row_text(buf, y).contains(needle))
}

/// `(top, bottom)` rows of the panels drawn inside the page chrome.
fn panels(buf: &Buffer) -> Vec<(u16, u16)> {
    let mut out = Vec::new();
    let mut top = None;
    for y in 0..buf.area.height {
        match buf[(1, y)].symbol() {
            "┌" => top = Some(y),
            "└" => {
                if let Some(t) = top.take() {
                    out.push((t, y));
                }
            }
            _ => {}
        }
    }
    out
}

#[test]
fn boxed_view_draws_one_panel_per_block() {
    let tracker = FakeTracker::new().with_ticket(commented("A-1", 6));
    let page = boxed_on_screen(&tracker);
    let buf = draw(&page);

    // Header (10 lines), description and two comments fill the 24 rows.
    let heights: Vec<u16> = panels(&buf).iter().map(|(t, b)| b - t + 1).collect();
    assert_eq!(heights, vec![12, 4, 4, 4]);
    assert!(row_with(&buf, "body1").is_some());
    assert!(row_with(&buf, "body2").is_none());
    assert!(row_with(&buf, "(break)").is_none());

    let issue_row = row_with(&buf, "issue: A-1").expect("first line drawn");
    assert_eq!(issue_row, 2);
    assert_eq!(buf[(2, issue_row)].bg, Color::DarkGray);
}

#[test]
fn boxed_view_scrolls_the_selection_into_a_drawn_panel() {
    let tracker = FakeTracker::new().with_ticket(commented("A-1", 6));
    let mut page = boxed_on_screen(&tracker);
    let target = page
        .pager
        .lines()
        .iter()
        .position(|l| l == "body3")
        .expect("body3 line");
    page.pager.set_selected_line(target);
    assert!(page.pager.first_display_line() > 0);

    let buf = draw(&page);
    let y = row_with(&buf, "body3").expect("selected line on screen");
    assert_eq!(buf[(2, y)].bg, Color::DarkGray);
    let (_, last_bottom) = *panels(&buf).last().expect("panels");
    assert!(last_bottom <= 24);

    page.pager.top_of_page();
    let buf = draw(&page);
    assert_eq!(row_with(&buf, "issue: A-1"), Some(2));
}

#[test]
fn boxed_view_keeps_the_cursor_off_markers() {
    let tracker = FakeTracker::new().with_ticket(commented("A-1", 2));
    let mut page = boxed_on_screen(&tracker);
    let marker = page
        .pager
        .lines()
        .iter()
        .position(|l| is_block_marker(l))
        .expect("marker line");

    page.pager.set_selected_line(marker);
    assert_eq!(page.pager.selected_line(), marker + 1);
    page.pager.previous_line(1);
    assert_eq!(page.pager.selected_line(), marker - 1);

    page.pager.top_of_page();
    page.pager.set_search("/break");
    page.pager.search();
    assert_eq!(page.pager.selected_line(), 0);
}

#[test]
fn plain_view_draws_markers_as_separators() {
    let tracker = FakeTracker::new().with_ticket(commented("A-1", 1));
    let page: TicketShowPage = entered("A-1", &tracker, 80);
    let buf = draw(&page);
    assert!(row_with(&buf, "(break)").is_none());
    assert!(row_with(&buf, "description:").is_some());
    let marker = page
        .pager
        .lines()
        .iter()
        .position(|l| is_block_marker(l))
        .expect("marker line");
    // Chrome border, then one row per line.
    let y = marker as u16 + 1;
    assert!(row_text(&buf, y).contains("────"));
}
