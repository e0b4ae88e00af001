use std::any::Any;

use ratatui::layout::Rect;
use serde_json::Value;

use super::super::page::{
    GoBacker, ItemSelecter, Nav, Page, PageCtx, PageKind, PagePager, Refresher, Searcher,
    TicketCommander, TicketCommenter, TicketEditer, render_page_chrome,
};
use super::super::pager::ListPager;
use super::{TicketShowBoxPage, TicketShowPage, render_pager};
use crate::config::DEFAULT_QUERY_FIELDS;
use crate::model::{ActiveQuery, ticket_key};
use crate::template::render_list_row;

const MAX_RESULTS: usize = 500;

/// Results of one query, one row per ticket.
#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct TicketListPage {
    query: ActiveQuery,
    tickets: Option<Vec<Value>>,
    fields: Vec<String>,
    open_boxed: bool,
    error: Option<String>,
    pager: ListPager,
}

impl TicketListPage {
    pub(in crate::tui_shell) fn new(query: ActiveQuery) -> Self {
        Self {
            query,
            tickets: None,
            fields: Vec::new(),
            open_boxed: false,
            error: None,
            pager: ListPager::default(),
        }
    }

    pub(in crate::tui_shell) fn query(&self) -> &ActiveQuery {
        &self.query
    }

    /// Tickets from the last search; empty until the page has been entered.
    pub(in crate::tui_shell) fn tickets(&self) -> &[Value] {
        self.tickets.as_deref().unwrap_or(&[])
    }

    pub(in crate::tui_shell) fn selected_ticket_id(&self) -> Option<&str> {
        self.tickets
            .as_ref()?
            .get(self.pager.selected_line())
            .map(ticket_key)
            .filter(|k| !k.is_empty())
    }

    fn fetch(&mut self, ctx: &PageCtx<'_>) {
        let jql = self.query.effective_jql();
        match ctx.tracker.search(&jql, &self.fields, MAX_RESULTS) {
            Ok(tickets) => {
                self.error = None;
                self.tickets = Some(tickets);
            }
            Err(err) => {
                tracing::warn!("query {:?}: {:#}", jql, err);
                self.error = Some(format!("{:#}", err));
                self.tickets = Some(Vec::new());
            }
        }
    }
}

impl Page for TicketListPage {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> PageKind {
        PageKind::TicketList
    }

    fn id(&self) -> String {
        self.query.name.clone()
    }

    fn create(&mut self, ctx: &PageCtx<'_>) {
        if self.fields.is_empty() {
            self.fields = ctx.opt_list("queryfields");
            if self.fields.is_empty() {
                self.fields = DEFAULT_QUERY_FIELDS.split(',').map(str::to_string).collect();
            }
        }
        self.open_boxed = ctx.opt_bool("boxed");
        if self.tickets.is_none() {
            self.fetch(ctx);
        }
        let rows = self
            .tickets
            .iter()
            .flatten()
            .map(|t| render_list_row(t, &self.fields))
            .collect();
        self.pager.set_lines(rows);
        self.pager.set_display_height(ctx.body_height());
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let title = format!("{} ({} tickets)", self.query.name, self.pager.lines().len());
        let inner = render_page_chrome(frame, &title, "", area);
        let empty = match &self.error {
            Some(err) => format!("(query failed: {})", err),
            None => "(no tickets)".to_string(),
        };
        render_pager(frame, inner, &self.pager, &empty);
    }

    fn searcher(&mut self) -> Option<&mut dyn Searcher> {
        Some(&mut self.pager)
    }

    fn pager(&mut self) -> Option<&mut dyn PagePager> {
        Some(&mut self.pager)
    }

    fn item_selecter(&mut self) -> Option<&mut dyn ItemSelecter> {
        Some(self)
    }

    fn go_backer(&mut self) -> Option<&mut dyn GoBacker> {
        Some(self)
    }

    fn refresher(&mut self) -> Option<&mut dyn Refresher> {
        Some(self)
    }

    fn ticket_commander(&self) -> Option<&dyn TicketCommander> {
        Some(self)
    }

    fn ticket_editer(&self) -> Option<&dyn TicketEditer> {
        Some(self)
    }

    fn ticket_commenter(&self) -> Option<&dyn TicketCommenter> {
        Some(self)
    }

    fn active_query(&self) -> Option<&ActiveQuery> {
        Some(&self.query)
    }
}

impl ItemSelecter for TicketListPage {
    fn select_item(&mut self) -> Option<Nav> {
        let id = self.selected_ticket_id()?.to_string();
        let page: Box<dyn Page> = if self.open_boxed {
            Box::new(TicketShowBoxPage::new(id))
        } else {
            Box::new(TicketShowPage::new(id))
        };
        Some(Nav::To(page))
    }
}

impl GoBacker for TicketListPage {
    fn go_back(&mut self) -> Nav {
        Nav::Query
    }
}

impl Refresher for TicketListPage {
    fn reset_cache(&mut self) {
        self.tickets = None;
        self.error = None;
        self.pager.clear();
    }
}

impl TicketCommander for TicketListPage {
    fn active_ticket_id(&self) -> String {
        self.selected_ticket_id().unwrap_or_default().to_string()
    }
}

impl TicketEditer for TicketListPage {
    fn edit_ticket_id(&self) -> Option<String> {
        self.selected_ticket_id().map(str::to_string)
    }
}

impl TicketCommenter for TicketListPage {
    fn comment_ticket_id(&self) -> Option<String> {
        self.selected_ticket_id().map(str::to_string)
    }
}
