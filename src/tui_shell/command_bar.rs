/// Byte length of the mode char (`:`, `/` or `?`) that opens every buffer.
const PREFIX_LEN: usize = 1;

/// The single-line input at the bottom of the screen used for `:`, `/` and
/// `?` commands. Outside command mode it stays empty.
#[derive(Debug, Default)]
pub(in crate::tui_shell) struct CommandBar {
    text: String,
    cursor: usize,
    command_mode: bool,
    history: Vec<String>,
    history_pos: Option<usize>,
}

impl CommandBar {
    pub(in crate::tui_shell) fn text(&self) -> &str {
        &self.text
    }

    pub(in crate::tui_shell) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(in crate::tui_shell) fn command_mode(&self) -> bool {
        self.command_mode
    }

    /// Enter command mode with `prefix` (`:`, `/` or `?`) as the first char.
    pub(in crate::tui_shell) fn start(&mut self, prefix: char) {
        self.text.clear();
        self.text.push(prefix);
        self.cursor = self.text.len();
        self.command_mode = true;
        self.history_pos = None;
    }

    pub(in crate::tui_shell) fn cancel(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.command_mode = false;
        self.history_pos = None;
    }

    pub(in crate::tui_shell) fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete before the cursor; an emptied buffer leaves command mode.
    /// The mode char only goes once it is all that is left.
    pub(in crate::tui_shell) fn backspace(&mut self) {
        if self.cursor <= PREFIX_LEN && self.text.len() > PREFIX_LEN {
            return;
        }
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.text.remove(self.cursor);
        }
        if self.text.is_empty() {
            self.cancel();
        }
    }

    pub(in crate::tui_shell) fn move_left(&mut self) {
        if self.cursor <= PREFIX_LEN {
            return;
        }
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub(in crate::tui_shell) fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Hand the buffer over for execution, remembering it in history.
    pub(in crate::tui_shell) fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.push_history(&text);
        self.cancel();
        text
    }

    fn set(&mut self, s: String) {
        self.text = s;
        self.cursor = self.text.len();
    }

    fn push_history(&mut self, line: &str) {
        if line.chars().count() < 2 {
            return;
        }
        if self.history.last().map(|s| s.as_str()) == Some(line) {
            return;
        }
        self.history.push(line.to_string());
        self.history_pos = None;
    }

    pub(in crate::tui_shell) fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_pos {
            None => self.history.len().saturating_sub(1),
            Some(i) => i.saturating_sub(1),
        };
        self.history_pos = Some(next);
        self.set(self.history[next].clone());
    }

    pub(in crate::tui_shell) fn history_down(&mut self) {
        let Some(i) = self.history_pos else {
            return;
        };
        if i + 1 >= self.history.len() {
            self.history_pos = None;
            let prefix = self.text.chars().next().unwrap_or(':');
            self.start(prefix);
            return;
        }
        let next = i + 1;
        self.history_pos = Some(next);
        self.set(self.history[next].clone());
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/command_bar_tests.rs"]
mod tests;
