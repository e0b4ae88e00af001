use std::io;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ActiveQuery;
use crate::tracker::Tracker;
use crate::tui::StartPage;

use super::command_bar::CommandBar;
use super::commands::{self, Outcome};
use super::navigator::Navigator;
use super::page::{Nav, Page, PageCtx, PagePager};
use super::pages::{
    HelpPage, LabelListPage, PasswordInputBox, QueryPage, SortOrderPage, TicketListPage,
    TicketShowBoxPage, TicketShowPage,
};

mod event_loop;
mod render;
mod runtime;

pub(in crate::tui_shell) use self::runtime::run;

/// Work that needs the real terminal, run between two passes of the outer loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum External {
    Edit(String),
    Comment(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) struct StatusMessage {
    pub(in crate::tui_shell) text: String,
    pub(in crate::tui_shell) error: bool,
}

pub(in crate::tui_shell) struct App {
    tracker: Box<dyn Tracker>,
    nav: Navigator,
    command_bar: CommandBar,
    status: Option<StatusMessage>,

    width: u16,
    height: u16,

    /// Checked at the top of the outer loop only.
    quit: bool,
    /// Leave the inner loop so the current page is entered again.
    restart: bool,
    pending: Option<External>,
}

impl App {
    pub(in crate::tui_shell) fn new(
        tracker: Box<dyn Tracker>,
        start: Box<dyn Page>,
        width: u16,
        height: u16,
    ) -> Self {
        Self {
            tracker,
            nav: Navigator::new(start),
            command_bar: CommandBar::default(),
            status: None,
            width,
            height,
            quit: false,
            restart: false,
            pending: None,
        }
    }

    pub(in crate::tui_shell) fn take_pending(&mut self) -> Option<External> {
        self.pending.take()
    }

    /// Entry protocol of the current page; runs at the top of every outer pass.
    pub(in crate::tui_shell) fn enter(&mut self) {
        self.restart = false;
        let ctx = PageCtx::new(self.tracker.as_ref(), self.width, self.height);
        self.nav.enter(&ctx);
    }

    pub(in crate::tui_shell) fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.restart = true;
    }

    fn follow(&mut self, nav: Nav) {
        let ctx = PageCtx::new(self.tracker.as_ref(), self.width, self.height);
        if self.nav.follow(nav, &ctx) {
            self.quit = true;
        }
    }

    fn select_item(&mut self) {
        let ctx = PageCtx::new(self.tracker.as_ref(), self.width, self.height);
        if self.nav.select_item(&ctx) {
            self.quit = true;
        }
    }

    fn go_back(&mut self) {
        let ctx = PageCtx::new(self.tracker.as_ref(), self.width, self.height);
        if self.nav.go_back(&ctx) {
            self.quit = true;
        }
    }

    fn refresh(&mut self) {
        let ctx = PageCtx::new(self.tracker.as_ref(), self.width, self.height);
        self.nav.refresh(&ctx);
    }

    fn execute_command(&mut self) {
        let text = self.command_bar.take();
        let ctx = PageCtx::new(self.tracker.as_ref(), self.width, self.height);
        match commands::execute(&text, &mut self.nav, &ctx) {
            Outcome::Done => {}
            Outcome::Quit => self.quit = true,
            Outcome::Failed(msg) => self.set_error(msg),
        }
    }

    fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            error: false,
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            error: true,
        });
    }

    fn request_external(&mut self, action: External) {
        tracing::debug!("external {:?}", action);
        self.pending = Some(action);
        self.restart = true;
    }

    /// Run an editor action. The terminal must already be handed back to the
    /// user; the current page is refreshed afterwards.
    pub(in crate::tui_shell) fn run_external(&mut self, action: External) {
        let res = match &action {
            External::Edit(id) => self.tracker.edit_ticket(id),
            External::Comment(id) => self.tracker.comment_ticket(id),
        };
        match res {
            Ok(()) => self.status = None,
            Err(err) => {
                tracing::warn!("{:?}: {:#}", action, err);
                self.set_error(format!("{:#}", err));
            }
        }
        self.refresh();
    }

    fn open_labels(&mut self) {
        let page = self
            .nav
            .current()
            .as_any()
            .downcast_ref::<TicketListPage>()
            .map(LabelListPage::from_list);
        match page {
            Some(page) => self.follow(Nav::To(Box::new(page))),
            None => self.set_info("labels are listed from a ticket list"),
        }
    }

    fn open_sort_orders(&mut self) {
        let query = self.nav.current().active_query().cloned();
        match query {
            Some(query) => self.follow(Nav::To(Box::new(SortOrderPage::new(query)))),
            None => self.set_info("sort orders apply to a ticket list"),
        }
    }

    fn store_secret(&mut self, secret: String) {
        if secret.is_empty() {
            return;
        }
        match self.tracker.store_password(&secret) {
            Ok(()) => {
                self.set_info("password saved");
                self.follow(Nav::Query);
            }
            Err(err) => {
                tracing::warn!("store password: {:#}", err);
                self.set_error(format!("{:#}", err));
            }
        }
    }
}

/// First page shown for a startup choice.
pub(in crate::tui_shell) fn start_page(start: &StartPage, boxed: bool) -> Box<dyn Page> {
    match start {
        StartPage::Query => Box::new(QueryPage::default()),
        StartPage::List { query } => {
            Box::new(TicketListPage::new(ActiveQuery::new("Query", query.clone())))
        }
        StartPage::View { id } if boxed => Box::new(TicketShowBoxPage::new(id.clone())),
        StartPage::View { id } => Box::new(TicketShowPage::new(id.clone())),
        StartPage::Password => Box::new(PasswordInputBox::default()),
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
