use std::any::Any;
use std::collections::BTreeMap;

use ratatui::layout::Rect;
use serde_json::Value;

use super::super::page::{
    GoBacker, ItemSelecter, Nav, Page, PageCtx, PageKind, PagePager, Searcher, render_page_chrome,
};
use super::super::pager::ListPager;
use super::{TicketListPage, render_pager};
use crate::model::{ActiveQuery, ticket_labels};

/// Labels used across a ticket list, most frequent first.
#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct LabelListPage {
    query: ActiveQuery,
    counts: Vec<(String, usize)>,
    pager: ListPager,
}

impl LabelListPage {
    pub(in crate::tui_shell) fn new(query: ActiveQuery, tickets: &[Value]) -> Self {
        Self {
            query,
            counts: count_labels(tickets),
            pager: ListPager::default(),
        }
    }

    pub(in crate::tui_shell) fn from_list(list: &TicketListPage) -> Self {
        Self::new(list.query().clone(), list.tickets())
    }
}

pub(in crate::tui_shell) fn count_labels(tickets: &[Value]) -> Vec<(String, usize)> {
    let mut by_name: BTreeMap<String, usize> = BTreeMap::new();
    for ticket in tickets {
        for label in ticket_labels(ticket) {
            *by_name.entry(label).or_default() += 1;
        }
    }
    let mut counts: Vec<_> = by_name.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

impl Page for LabelListPage {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> PageKind {
        PageKind::LabelList
    }

    fn id(&self) -> String {
        format!("labels: {}", self.query.name)
    }

    fn create(&mut self, ctx: &PageCtx<'_>) {
        self.pager.set_lines(
            self.counts
                .iter()
                .map(|(name, n)| format!("{:>5}  {}", n, name))
                .collect(),
        );
        self.pager.set_display_height(ctx.body_height());
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let title = format!("Labels in {}", self.query.name);
        let inner = render_page_chrome(frame, &title, "", area);
        render_pager(frame, inner, &self.pager, "(no labels)");
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

    fn active_query(&self) -> Option<&ActiveQuery> {
        Some(&self.query)
    }
}

impl ItemSelecter for LabelListPage {
    fn select_item(&mut self) -> Option<Nav> {
        let (label, _) = self.counts.get(self.pager.selected_line())?;
        Some(Nav::To(Box::new(TicketListPage::new(
            self.query.with_label(label),
        ))))
    }
}

impl GoBacker for LabelListPage {
    fn go_back(&mut self) -> Nav {
        Nav::ListOrQuery
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/pages/label_list_tests.rs"]
mod tests;
