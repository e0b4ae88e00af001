use std::any::Any;

use ratatui::layout::Rect;

use super::super::page::{
    GoBacker, ItemSelecter, Nav, Page, PageCtx, PageKind, PagePager, Searcher, render_page_chrome,
};
use super::super::pager::ListPager;
use super::{TicketListPage, render_pager};
use crate::model::{ActiveQuery, SavedQuery};

/// Start page: the saved queries to pick from.
#[derive(Clone, Debug, Default)]
pub(in crate::tui_shell) struct QueryPage {
    queries: Vec<SavedQuery>,
    pager: ListPager,
}

impl Page for QueryPage {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> PageKind {
        PageKind::Query
    }

    fn id(&self) -> String {
        "queries".to_string()
    }

    fn create(&mut self, ctx: &PageCtx<'_>) {
        if self.queries.is_empty() {
            self.queries = ctx
                .opts
                .get("queries")
                .cloned()
                .and_then(|v| serde_json::from_value::<Vec<SavedQuery>>(v).ok())
                .filter(|q| !q.is_empty())
                .unwrap_or_else(SavedQuery::defaults);
        }
        let width = self
            .queries
            .iter()
            .map(|q| q.name.chars().count())
            .max()
            .unwrap_or(0);
        self.pager.set_lines(
            self.queries
                .iter()
                .map(|q| format!("{:<width$}  {}", q.name, q.jql, width = width))
                .collect(),
        );
        self.pager.set_display_height(ctx.body_height());
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let inner = render_page_chrome(frame, "Queries", "", area);
        render_pager(frame, inner, &self.pager, "(no saved queries)");
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
}

impl ItemSelecter for QueryPage {
    fn select_item(&mut self) -> Option<Nav> {
        let q = self.queries.get(self.pager.selected_line())?;
        Some(Nav::To(Box::new(TicketListPage::new(ActiveQuery::new(
            q.name.clone(),
            q.jql.clone(),
        )))))
    }
}

impl GoBacker for QueryPage {
    fn go_back(&mut self) -> Nav {
        Nav::Quit
    }
}
