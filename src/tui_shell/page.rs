use std::any::Any;
use std::collections::BTreeMap;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};
use serde_json::Value;

use crate::model::ActiveQuery;
use crate::tracker::Tracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum PageKind {
    Query,
    TicketList,
    TicketShow,
    TicketShowBox,
    LabelList,
    SortOrder,
    Help,
    Password,
}

/// What a page's `create` may consult: the tracker, its options and the
/// screen size.
pub(in crate::tui_shell) struct PageCtx<'a> {
    pub(in crate::tui_shell) tracker: &'a dyn Tracker,
    pub(in crate::tui_shell) opts: BTreeMap<String, Value>,
    pub(in crate::tui_shell) width: u16,
    pub(in crate::tui_shell) height: u16,
}

impl<'a> PageCtx<'a> {
    pub(in crate::tui_shell) fn new(tracker: &'a dyn Tracker, width: u16, height: u16) -> Self {
        Self {
            tracker,
            opts: tracker.options(),
            width,
            height,
        }
    }

    pub(in crate::tui_shell) fn opt_str(&self, key: &str) -> Option<&str> {
        self.opts.get(key).and_then(Value::as_str)
    }

    pub(in crate::tui_shell) fn opt_u64(&self, key: &str) -> Option<u64> {
        self.opts.get(key).and_then(Value::as_u64)
    }

    pub(in crate::tui_shell) fn opt_bool(&self, key: &str) -> bool {
        self.opts.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub(in crate::tui_shell) fn opt_list(&self, key: &str) -> Vec<String> {
        self.opts
            .get(key)
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Rows available to a page body: the screen minus status and command bars.
    pub(in crate::tui_shell) fn body_height(&self) -> usize {
        self.height.saturating_sub(4) as usize
    }
}

/// Where a navigation action wants to go.
pub(in crate::tui_shell) enum Nav {
    To(Box<dyn Page>),
    /// The page that was current before this one.
    Previous,
    /// The last ticket list shown, or the query page when there is none.
    ListOrQuery,
    Query,
    Quit,
}

pub(in crate::tui_shell) trait Page: Any {
    fn as_any(&self) -> &dyn Any;

    fn kind(&self) -> PageKind;
    fn id(&self) -> String;

    /// Entry protocol. Runs on every (re-)entry, so it must only fetch when
    /// nothing is cached and must tolerate tracker failures.
    fn create(&mut self, ctx: &PageCtx<'_>);

    fn render(&self, frame: &mut ratatui::Frame, area: Rect);

    fn searcher(&mut self) -> Option<&mut dyn Searcher> {
        None
    }
    fn pager(&mut self) -> Option<&mut dyn PagePager> {
        None
    }
    fn item_selecter(&mut self) -> Option<&mut dyn ItemSelecter> {
        None
    }
    fn go_backer(&mut self) -> Option<&mut dyn GoBacker> {
        None
    }
    fn refresher(&mut self) -> Option<&mut dyn Refresher> {
        None
    }
    fn ticket_commander(&self) -> Option<&dyn TicketCommander> {
        None
    }
    fn ticket_editer(&self) -> Option<&dyn TicketEditer> {
        None
    }
    fn ticket_commenter(&self) -> Option<&dyn TicketCommenter> {
        None
    }
    fn secret_input(&mut self) -> Option<&mut dyn SecretInput> {
        None
    }

    /// The query behind a ticket list, for pages derived from it.
    fn active_query(&self) -> Option<&ActiveQuery> {
        None
    }
}

pub(in crate::tui_shell) trait Searcher {
    fn set_search(&mut self, command: &str);
    fn search(&mut self);
    /// Run the last search again, optionally in the opposite direction.
    fn repeat_search(&mut self, reverse: bool);
}

pub(in crate::tui_shell) trait PagePager {
    fn next_line(&mut self, n: usize);
    fn previous_line(&mut self, n: usize);
    fn next_para(&mut self);
    fn previous_para(&mut self);
    fn next_page(&mut self);
    fn previous_page(&mut self);
    fn top_of_page(&mut self);
    fn bottom_of_page(&mut self);
    fn is_populated(&self) -> bool;
}

pub(in crate::tui_shell) trait ItemSelecter {
    fn select_item(&mut self) -> Option<Nav>;
}

pub(in crate::tui_shell) trait GoBacker {
    fn go_back(&mut self) -> Nav;
}

pub(in crate::tui_shell) trait Refresher {
    /// Drop cached lines and fetched data so the next `create` re-fetches.
    fn reset_cache(&mut self);
}

pub(in crate::tui_shell) trait TicketCommander {
    fn active_ticket_id(&self) -> String;
}

pub(in crate::tui_shell) trait TicketEditer {
    fn edit_ticket_id(&self) -> Option<String>;
}

pub(in crate::tui_shell) trait TicketCommenter {
    fn comment_ticket_id(&self) -> Option<String>;
}

pub(in crate::tui_shell) trait SecretInput {
    fn insert_char(&mut self, c: char);
    fn backspace(&mut self);
    /// Take the typed secret, leaving the input empty.
    fn take_secret(&mut self) -> String;
}

pub(in crate::tui_shell) fn render_page_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    trail: &str,
    area: Rect,
) -> Rect {
    let mut spans = vec![Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow),
    )];
    if !trail.is_empty() {
        spans.push(Span::styled(
            trail.to_string(),
            Style::default().fg(Color::Gray),
        ));
    }
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(spans));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
