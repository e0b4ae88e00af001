use super::page::{Nav, Page, PageCtx};
use super::pages::{QueryPage, TicketListPage};

/// Owns the current page and the one before it, and runs every transition.
pub(in crate::tui_shell) struct Navigator {
    current: Box<dyn Page>,
    previous: Option<Box<dyn Page>>,
    last_list: Option<TicketListPage>,
    last_query: Option<QueryPage>,
}

impl Navigator {
    pub(in crate::tui_shell) fn new(initial: Box<dyn Page>) -> Self {
        Self {
            current: initial,
            previous: None,
            last_list: None,
            last_query: None,
        }
    }

    pub(in crate::tui_shell) fn current(&self) -> &dyn Page {
        self.current.as_ref()
    }

    pub(in crate::tui_shell) fn current_mut(&mut self) -> &mut dyn Page {
        self.current.as_mut()
    }

    #[cfg(test)]
    pub(in crate::tui_shell) fn previous(&self) -> Option<&dyn Page> {
        self.previous.as_deref()
    }

    /// Run the entry protocol of the current page again.
    pub(in crate::tui_shell) fn enter(&mut self, ctx: &PageCtx<'_>) {
        tracing::debug!(
            "enter {:?} {}",
            self.current.kind(),
            self.current.id()
        );
        self.current.create(ctx);
    }

    /// Make `page` current and enter it.
    pub(in crate::tui_shell) fn transition(&mut self, page: Box<dyn Page>, ctx: &PageCtx<'_>) {
        tracing::debug!(
            "transition {:?} {} -> {:?} {}",
            self.current.kind(),
            self.current.id(),
            page.kind(),
            page.id()
        );
        let old = std::mem::replace(&mut self.current, page);
        self.remember(old.as_ref());
        self.previous = Some(old);
        self.enter(ctx);
    }

    fn remember(&mut self, page: &dyn Page) {
        if let Some(list) = page.as_any().downcast_ref::<TicketListPage>() {
            self.last_list = Some(list.clone());
        } else if let Some(query) = page.as_any().downcast_ref::<QueryPage>() {
            self.last_query = Some(query.clone());
        }
    }

    fn query_page(&self) -> QueryPage {
        self.last_query.clone().unwrap_or_default()
    }

    /// Carry out a navigation request. Returns `true` when it asks to quit.
    pub(in crate::tui_shell) fn follow(&mut self, nav: Nav, ctx: &PageCtx<'_>) -> bool {
        match nav {
            Nav::To(page) => self.transition(page, ctx),
            Nav::Previous => match self.previous.take() {
                Some(page) => self.transition(page, ctx),
                None => return self.follow(Nav::ListOrQuery, ctx),
            },
            Nav::ListOrQuery => {
                let page: Box<dyn Page> = match self.last_list.clone() {
                    Some(list) => Box::new(list),
                    None => Box::new(self.query_page()),
                };
                self.transition(page, ctx);
            }
            Nav::Query => {
                let page = Box::new(self.query_page());
                self.transition(page, ctx);
            }
            Nav::Quit => return true,
        }
        false
    }

    pub(in crate::tui_shell) fn select_item(&mut self, ctx: &PageCtx<'_>) -> bool {
        let nav = self
            .current
            .item_selecter()
            .and_then(|s| s.select_item());
        match nav {
            Some(nav) => self.follow(nav, ctx),
            None => false,
        }
    }

    pub(in crate::tui_shell) fn go_back(&mut self, ctx: &PageCtx<'_>) -> bool {
        let nav = self.current.go_backer().map(|g| g.go_back());
        match nav {
            Some(nav) => self.follow(nav, ctx),
            None => false,
        }
    }

    /// Drop the current page's caches and enter it again so it re-fetches.
    pub(in crate::tui_shell) fn refresh(&mut self, ctx: &PageCtx<'_>) {
        match self.current.refresher() {
            Some(r) => r.reset_cache(),
            None => return,
        }
        self.enter(ctx);
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/navigator_tests.rs"]
mod tests;
