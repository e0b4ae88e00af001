use super::layout::{is_block_marker, split_blocks};
use super::page::{PagePager, Searcher};
use super::search::{SearchState, circular_search};

/// Cached display lines plus cursor and scroll state, shared by every
/// list-shaped page.
#[derive(Clone, Debug, Default)]
pub(in crate::tui_shell) struct ListPager {
    lines: Vec<String>,
    selected_line: usize,
    first_display_line: usize,
    display_height: usize,
    search: SearchState,
    /// Lines are drawn as bordered panels split on block markers. Each panel
    /// costs two extra rows and marker lines never hold the cursor.
    framed: bool,
}

/// Rows taken by `lines` drawn as one bordered panel per block.
pub(in crate::tui_shell) fn framed_rows(lines: &[String]) -> usize {
    split_blocks(lines).iter().map(|b| b.len() + 2).sum()
}

impl ListPager {
    pub(in crate::tui_shell) fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the cached lines, keeping the cursor where it was if it still fits.
    pub(in crate::tui_shell) fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.move_to(self.selected_line, true);
    }

    pub(in crate::tui_shell) fn set_framed(&mut self, framed: bool) {
        self.framed = framed;
        self.move_to(self.selected_line, true);
    }

    pub(in crate::tui_shell) fn clear(&mut self) {
        self.lines.clear();
    }

    pub(in crate::tui_shell) fn selected_line(&self) -> usize {
        self.selected_line
    }

    pub(in crate::tui_shell) fn selected_text(&self) -> Option<&str> {
        self.lines.get(self.selected_line).map(String::as_str)
    }

    pub(in crate::tui_shell) fn set_selected_line(&mut self, line: usize) {
        self.move_to(line, true);
    }

    /// Select `line`, clamped to the buffer. In framed mode a marker line
    /// hands the cursor to the nearest real line, looking `forward` first.
    fn move_to(&mut self, line: usize, forward: bool) {
        let line = line.min(self.lines.len().saturating_sub(1));
        self.selected_line = if self.framed {
            self.holdable(line, forward)
        } else {
            line
        };
        self.scroll_into_view();
    }

    fn holdable(&self, line: usize, forward: bool) -> usize {
        if self.lines.is_empty() {
            return 0;
        }
        let ahead = (line..self.lines.len()).find(|&i| !self.is_marker(i));
        let behind = (0..=line).rev().find(|&i| !self.is_marker(i));
        let pick = if forward {
            ahead.or(behind)
        } else {
            behind.or(ahead)
        };
        pick.unwrap_or(line)
    }

    pub(in crate::tui_shell) fn first_display_line(&self) -> usize {
        self.first_display_line
    }

    pub(in crate::tui_shell) fn set_display_height(&mut self, height: usize) {
        self.display_height = height.max(1);
        self.scroll_into_view();
    }

    pub(in crate::tui_shell) fn display_height(&self) -> usize {
        self.display_height.max(1)
    }

    /// The scrolled window of lines starting at the first display line.
    pub(in crate::tui_shell) fn visible(&self) -> &[String] {
        let start = self.first_display_line.min(self.lines.len());
        let end = (start + self.display_height()).min(self.lines.len());
        &self.lines[start..end]
    }

    fn scroll_into_view(&mut self) {
        let height = self.display_height();
        if self.framed {
            self.scroll_framed(height);
            return;
        }
        if self.selected_line < self.first_display_line {
            self.first_display_line = self.selected_line;
        } else if self.selected_line >= self.first_display_line + height {
            self.first_display_line = self.selected_line + 1 - height;
        }
        let max_first = self.lines.len().saturating_sub(height);
        self.first_display_line = self.first_display_line.min(max_first);
    }

    /// Advance the window until the panels through the selected line fit in
    /// `height` rows. The window never opens on a marker line.
    fn scroll_framed(&mut self, height: usize) {
        let sel = self.selected_line;
        if self.lines.is_empty() || sel < self.first_display_line {
            self.first_display_line = sel;
            return;
        }
        while self.first_display_line < sel
            && (self.is_marker(self.first_display_line)
                || framed_rows(&self.lines[self.first_display_line..=sel]) > height)
        {
            self.first_display_line += 1;
        }
    }

    fn is_marker(&self, i: usize) -> bool {
        self.framed && self.lines.get(i).is_some_and(|l| is_block_marker(l))
    }

    /// Next search hit that can hold the cursor.
    fn find(&self, state: &SearchState) -> Option<usize> {
        let mut from = self.selected_line;
        for _ in 0..self.lines.len() {
            let i = circular_search(&self.lines, from, state)?;
            if i == self.selected_line {
                return None;
            }
            if !self.is_marker(i) {
                return Some(i);
            }
            from = i;
        }
        None
    }

    fn is_blank(&self, i: usize) -> bool {
        self.lines[i].trim().is_empty()
    }
}

impl PagePager for ListPager {
    fn next_line(&mut self, n: usize) {
        self.set_selected_line(self.selected_line.saturating_add(n));
    }

    fn previous_line(&mut self, n: usize) {
        self.move_to(self.selected_line.saturating_sub(n), false);
    }

    fn next_para(&mut self) {
        let last = self.lines.len().saturating_sub(1);
        if self.lines.is_empty() || self.selected_line == last {
            return;
        }
        let target = (self.selected_line + 1..self.lines.len())
            .find(|&i| self.is_blank(i))
            .unwrap_or(last);
        self.set_selected_line(target);
    }

    fn previous_para(&mut self) {
        if self.selected_line == 0 {
            return;
        }
        let target = (1..self.selected_line)
            .rev()
            .find(|&i| self.is_blank(i))
            .unwrap_or(0);
        self.move_to(target, false);
    }

    fn next_page(&mut self) {
        let height = self.display_height();
        self.set_selected_line(self.selected_line.saturating_add(height));
    }

    fn previous_page(&mut self) {
        let height = self.display_height();
        self.move_to(self.selected_line.saturating_sub(height), false);
    }

    fn top_of_page(&mut self) {
        self.set_selected_line(0);
    }

    fn bottom_of_page(&mut self) {
        self.move_to(self.lines.len().saturating_sub(1), false);
    }

    fn is_populated(&self) -> bool {
        !self.lines.is_empty()
    }
}

impl Searcher for ListPager {
    fn set_search(&mut self, command: &str) {
        self.search = SearchState::from_command(command);
    }

    fn search(&mut self) {
        if let Some(i) = self.find(&self.search) {
            tracing::debug!("search {:?}: line {}", self.search.pattern, i);
            self.set_selected_line(i);
        }
    }

    fn repeat_search(&mut self, reverse: bool) {
        let state = if reverse {
            self.search.reversed()
        } else {
            self.search.clone()
        };
        if let Some(i) = self.find(&state) {
            self.set_selected_line(i);
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/pager_tests.rs"]
mod tests;
