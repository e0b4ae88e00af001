use std::any::Any;

use ratatui::layout::Rect;

use super::super::page::{
    GoBacker, ItemSelecter, Nav, Page, PageCtx, PageKind, PagePager, Searcher, render_page_chrome,
};
use super::super::pager::ListPager;
use super::{TicketListPage, render_pager};
use crate::model::{ActiveQuery, SortOrder};

/// Sort orders that can be applied to the current query.
#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct SortOrderPage {
    query: ActiveQuery,
    orders: Vec<SortOrder>,
    pager: ListPager,
}

impl SortOrderPage {
    pub(in crate::tui_shell) fn new(query: ActiveQuery) -> Self {
        Self {
            query,
            orders: Vec::new(),
            pager: ListPager::default(),
        }
    }
}

impl Page for SortOrderPage {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> PageKind {
        PageKind::SortOrder
    }

    fn id(&self) -> String {
        format!("sort: {}", self.query.name)
    }

    fn create(&mut self, ctx: &PageCtx<'_>) {
        if self.orders.is_empty() {
            self.orders = ctx
                .opts
                .get("sort_orders")
                .cloned()
                .and_then(|v| serde_json::from_value::<Vec<SortOrder>>(v).ok())
                .filter(|o| !o.is_empty())
                .unwrap_or_else(SortOrder::defaults);
        }
        let active = self.query.order.as_ref().map(|o| o.name.as_str());
        self.pager.set_lines(
            self.orders
                .iter()
                .map(|o| {
                    let mark = if Some(o.name.as_str()) == active { '*' } else { ' ' };
                    format!("{} {}", mark, o.name)
                })
                .collect(),
        );
        self.pager.set_display_height(ctx.body_height());
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let title = format!("Sort {}", self.query.name);
        let inner = render_page_chrome(frame, &title, "", area);
        render_pager(frame, inner, &self.pager, "(no sort orders)");
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

impl ItemSelecter for SortOrderPage {
    fn select_item(&mut self) -> Option<Nav> {
        let order = self.orders.get(self.pager.selected_line())?.clone();
        Some(Nav::To(Box::new(TicketListPage::new(
            self.query.with_order(order),
        ))))
    }
}

impl GoBacker for SortOrderPage {
    fn go_back(&mut self) -> Nav {
        Nav::ListOrQuery
    }
}
