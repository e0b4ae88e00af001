use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::pager::ListPager;

mod help;
mod label_list;
mod password;
mod query;
mod sort_order;
mod ticket_detail;
mod ticket_list;
mod trail;

pub(in crate::tui_shell) use self::help::HelpPage;
pub(in crate::tui_shell) use self::label_list::LabelListPage;
pub(in crate::tui_shell) use self::password::PasswordInputBox;
pub(in crate::tui_shell) use self::query::QueryPage;
pub(in crate::tui_shell) use self::sort_order::SortOrderPage;
pub(in crate::tui_shell) use self::ticket_detail::{TicketShowBoxPage, TicketShowPage};
pub(in crate::tui_shell) use self::ticket_list::TicketListPage;

pub(in crate::tui_shell) fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Draw the pager's visible window with the selected line highlighted.
pub(in crate::tui_shell) fn render_pager(
    frame: &mut ratatui::Frame,
    area: Rect,
    pager: &ListPager,
    empty_text: &str,
) {
    render_pager_with(frame, area, pager, empty_text, str::to_string);
}

/// Like `render_pager`, with `show` deciding how each cached line is drawn.
pub(in crate::tui_shell) fn render_pager_with(
    frame: &mut ratatui::Frame,
    area: Rect,
    pager: &ListPager,
    empty_text: &str,
    show: impl Fn(&str) -> String,
) {
    if pager.lines().is_empty() {
        frame.render_widget(
            Paragraph::new(empty_text.to_string()).style(Style::default().fg(Color::Gray)),
            area,
        );
        return;
    }

    let items = pager
        .visible()
        .iter()
        .map(|l| ListItem::new(show(l)))
        .collect::<Vec<_>>();
    let mut state = ListState::default();
    state.select(
        pager
            .selected_line()
            .checked_sub(pager.first_display_line()),
    );
    let list = List::new(items)
        .style(Style::default().fg(Color::Yellow))
        .highlight_style(highlight_style());
    frame.render_stateful_widget(list, area, &mut state);
}
