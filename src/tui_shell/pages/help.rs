use std::any::Any;

use ratatui::layout::Rect;

use super::super::page::{
    GoBacker, Nav, Page, PageCtx, PageKind, PagePager, Searcher, render_page_chrome,
};
use super::super::pager::ListPager;
use super::render_pager;

const HELP_TEXT: &[&str] = &[
    "Movement",
    "  j, Down            next line",
    "  k, Up              previous line",
    "  Ctrl-f, PgDn, Spc  next page",
    "  Ctrl-b, PgUp       previous page",
    "  g, Home            top",
    "  G, End             bottom",
    "  }, {               next / previous paragraph",
    "",
    "Pages",
    "  Enter, l, Right    open the selected item",
    "  q, Esc, h, Left    go back (quits from the query page)",
    "  L                  labels in the current list",
    "  S                  sort orders for the current list",
    "  H, F1              this help",
    "  r                  refresh",
    "  E                  edit the current ticket",
    "  C                  comment on the current ticket",
    "  Ctrl-c             quit",
    "",
    "Commands",
    "  /pattern           search forward",
    "  ?pattern           search backward",
    "  n, N               repeat the search / in the other direction",
    "  :q, :quit          quit",
    "  :label add L...    add labels to the current ticket",
    "  :label remove L... remove labels from the current ticket",
    "  :label L...        add labels",
];

#[derive(Clone, Debug, Default)]
pub(in crate::tui_shell) struct HelpPage {
    pager: ListPager,
}

impl Page for HelpPage {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> PageKind {
        PageKind::Help
    }

    fn id(&self) -> String {
        "help".to_string()
    }

    fn create(&mut self, ctx: &PageCtx<'_>) {
        if !self.pager.is_populated() {
            self.pager
                .set_lines(HELP_TEXT.iter().map(|l| l.to_string()).collect());
        }
        self.pager.set_display_height(ctx.body_height());
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let inner = render_page_chrome(frame, "Help", "", area);
        render_pager(frame, inner, &self.pager, "");
    }

    fn searcher(&mut self) -> Option<&mut dyn Searcher> {
        Some(&mut self.pager)
    }

    fn pager(&mut self) -> Option<&mut dyn PagePager> {
        Some(&mut self.pager)
    }

    fn go_backer(&mut self) -> Option<&mut dyn GoBacker> {
        Some(self)
    }
}

impl GoBacker for HelpPage {
    fn go_back(&mut self) -> Nav {
        Nav::Previous
    }
}
