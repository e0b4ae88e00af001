use std::any::Any;
use std::marker::PhantomData;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use serde_json::Value;

use super::super::layout::{is_block_marker, split_blocks, wrap_text};
use super::super::page::{
    GoBacker, ItemSelecter, Nav, Page, PageCtx, PageKind, PagePager, Refresher, Searcher,
    TicketCommander, TicketCommenter, TicketEditer, render_page_chrome,
};
use super::super::pager::ListPager;
use super::trail::TicketTrail;
use super::{TicketListPage, highlight_style, render_pager, render_pager_with};
use crate::config::DEFAULT_TEMPLATE;
use crate::model::{ActiveQuery, find_ticket_id};
use crate::template::render_ticket;

const EPIC_LINKS_PREFIX: &str = "epic_links:";

/// How a detail page lays out its body.
pub(in crate::tui_shell) trait DetailStyle: Clone + std::fmt::Debug + Default + 'static {
    const KIND: PageKind;
    /// Wrap limit when `max_wrap` is not configured.
    const DEFAULT_MAX_WRAP: usize;
    /// Body drawn as bordered panels, one per block.
    const FRAMED: bool;

    fn render_body(frame: &mut ratatui::Frame, area: Rect, pager: &ListPager);
}

/// One scrolling panel holding every line.
#[derive(Clone, Copy, Debug, Default)]
pub(in crate::tui_shell) struct Plain;

/// One bordered panel per `(break)`-delimited block.
#[derive(Clone, Copy, Debug, Default)]
pub(in crate::tui_shell) struct Boxed;

impl DetailStyle for Plain {
    const KIND: PageKind = PageKind::TicketShow;
    const DEFAULT_MAX_WRAP: usize = 100;
    const FRAMED: bool = false;

    fn render_body(frame: &mut ratatui::Frame, area: Rect, pager: &ListPager) {
        let separator = "─".repeat(area.width as usize);
        render_pager_with(frame, area, pager, "(no ticket data)", |line| {
            if is_block_marker(line) {
                separator.clone()
            } else {
                line.to_string()
            }
        });
    }
}

impl DetailStyle for Boxed {
    const KIND: PageKind = PageKind::TicketShowBox;
    const DEFAULT_MAX_WRAP: usize = 50;
    const FRAMED: bool = true;

    fn render_body(frame: &mut ratatui::Frame, area: Rect, pager: &ListPager) {
        if pager.lines().is_empty() {
            render_pager(frame, area, pager, "(no ticket data)");
            return;
        }
        let first = pager.first_display_line().min(pager.lines().len());
        let shown = &pager.lines()[first..];
        let selected = block_position(shown, pager.selected_line().checked_sub(first));

        let mut y = area.y;
        let bottom = area.y + area.height;
        for (i, block) in split_blocks(shown).into_iter().enumerate() {
            if y >= bottom {
                break;
            }
            let height = (block.len() as u16 + 2).min(bottom - y);
            let rect = Rect::new(area.x, y, area.width, height);
            let items = block.into_iter().map(ListItem::new).collect::<Vec<_>>();
            let mut state = ListState::default();
            if let Some((b, row)) = selected
                && b == i
            {
                state.select(Some(row));
            }
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().fg(Color::Yellow))
                .highlight_style(highlight_style());
            frame.render_stateful_widget(list, rect, &mut state);
            y += height;
        }
    }
}

/// Map a line offset to `(block, row)` in the output of `split_blocks`.
/// Marker lines belong to no block.
pub(in crate::tui_shell) fn block_position(
    lines: &[String],
    offset: Option<usize>,
) -> Option<(usize, usize)> {
    let offset = offset?;
    if is_block_marker(lines.get(offset)?) {
        return None;
    }
    let mut block = 0;
    let mut row = 0;
    for line in &lines[..offset] {
        if is_block_marker(line) {
            block += 1;
            row = 0;
        } else {
            row += 1;
        }
    }
    Some((block, row))
}

/// Detail view of one ticket, with the trail of detail pages drilled through
/// to reach it.
#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct TicketDetailPage<S: DetailStyle> {
    ticket_id: String,
    template: String,
    max_wrap_width: Option<usize>,
    wrap_width: usize,
    api_body: Option<Value>,
    pager: ListPager,
    trail: TicketTrail<TicketDetailPage<S>>,
    style: PhantomData<S>,
}

pub(in crate::tui_shell) type TicketShowPage = TicketDetailPage<Plain>;
pub(in crate::tui_shell) type TicketShowBoxPage = TicketDetailPage<Boxed>;

impl<S: DetailStyle> TicketDetailPage<S> {
    pub(in crate::tui_shell) fn new(ticket_id: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            template: String::new(),
            max_wrap_width: None,
            wrap_width: 0,
            api_body: None,
            pager: ListPager::default(),
            trail: TicketTrail::default(),
            style: PhantomData,
        }
    }

    /// Ids of the trail, newest first, as shown after the page title.
    pub(in crate::tui_shell) fn trail_label(&self) -> String {
        let entries = (0..self.trail.len())
            .rev()
            .filter_map(|i| self.trail.get(i))
            .map(|p| format!(" <- {}", p.ticket_id));
        entries.collect()
    }

    fn drill_down(&self, id: &str) -> Nav {
        // Revisiting a ticket already on the trail unwinds to it.
        if let Some(earlier) = self.trail.iter().find(|p| p.ticket_id == id) {
            tracing::debug!("{} already on trail, unwinding", id);
            return Nav::To(Box::new(earlier.clone()));
        }
        let mut next = Self::new(id);
        next.trail = self.trail.extended(self.clone());
        Nav::To(Box::new(next))
    }
}

impl<S: DetailStyle> Page for TicketDetailPage<S> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> PageKind {
        S::KIND
    }

    fn id(&self) -> String {
        self.ticket_id.clone()
    }

    fn create(&mut self, ctx: &PageCtx<'_>) {
        if self.template.is_empty() {
            self.template = ctx.opt_str("template").unwrap_or(DEFAULT_TEMPLATE).to_string();
        }
        if self.max_wrap_width.is_none() {
            self.max_wrap_width = Some(match ctx.opt_u64("max_wrap") {
                Some(0) => usize::MAX,
                Some(m) => m as usize,
                None => S::DEFAULT_MAX_WRAP,
            });
        }
        let inner = (ctx.width as usize).saturating_sub(3);
        self.wrap_width = inner.min(self.max_wrap_width.unwrap_or(S::DEFAULT_MAX_WRAP));

        if self.api_body.is_none() {
            let body = match ctx.tracker.fetch_ticket(&self.ticket_id) {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!("fetch {}: {:#}", self.ticket_id, err);
                    Value::Null
                }
            };
            self.api_body = Some(body);
        }
        let text = self
            .api_body
            .as_ref()
            .map(|b| render_ticket(b, &self.template))
            .unwrap_or_default();
        self.pager.set_framed(S::FRAMED);
        self.pager.set_lines(wrap_text(&text, self.wrap_width));
        self.pager.set_display_height(ctx.body_height());
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let inner = render_page_chrome(frame, &self.ticket_id, &self.trail_label(), area);
        S::render_body(frame, inner, &self.pager);
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
}

impl<S: DetailStyle> ItemSelecter for TicketDetailPage<S> {
    fn select_item(&mut self) -> Option<Nav> {
        let selected = self.pager.selected_text()?;
        if selected.starts_with(EPIC_LINKS_PREFIX) {
            let query = ActiveQuery::new(
                format!("Open Tasks in Epic {}", self.ticket_id),
                format!(
                    "\"Epic Link\" = {} AND resolution = Unresolved",
                    self.ticket_id
                ),
            );
            return Some(Nav::To(Box::new(TicketListPage::new(query))));
        }
        let id = find_ticket_id(selected)?;
        if id == self.ticket_id {
            return None;
        }
        let id = id.to_string();
        Some(self.drill_down(&id))
    }
}

impl<S: DetailStyle> GoBacker for TicketDetailPage<S> {
    fn go_back(&mut self) -> Nav {
        match self.trail.last() {
            Some(page) => Nav::To(Box::new(page.clone())),
            None => Nav::ListOrQuery,
        }
    }
}

impl<S: DetailStyle> Refresher for TicketDetailPage<S> {
    fn reset_cache(&mut self) {
        self.api_body = None;
        self.pager.clear();
    }
}

impl<S: DetailStyle> TicketCommander for TicketDetailPage<S> {
    fn active_ticket_id(&self) -> String {
        self.ticket_id.clone()
    }
}

impl<S: DetailStyle> TicketEditer for TicketDetailPage<S> {
    fn edit_ticket_id(&self) -> Option<String> {
        Some(self.ticket_id.clone()).filter(|id| !id.is_empty())
    }
}

impl<S: DetailStyle> TicketCommenter for TicketDetailPage<S> {
    fn comment_ticket_id(&self) -> Option<String> {
        Some(self.ticket_id.clone()).filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/pages/ticket_detail_tests.rs"]
mod tests;
