use std::any::Any;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::page::{GoBacker, Nav, Page, PageCtx, PageKind, SecretInput};

/// Masked single-line prompt for the tracker password or API token. Only
/// ever shown as the start page, so going back leaves the program.
#[derive(Clone, Debug, Default)]
pub(in crate::tui_shell) struct PasswordInputBox {
    secret: String,
}

impl Page for PasswordInputBox {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> PageKind {
        PageKind::Password
    }

    fn id(&self) -> String {
        "password".to_string()
    }

    fn create(&mut self, _ctx: &PageCtx<'_>) {}

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(area);
        let masked = "*".repeat(self.secret.chars().count());
        let input = Paragraph::new(masked)
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Password or API token (Enter to save, Esc to cancel)"),
            );
        frame.render_widget(input, rows[1]);
    }

    fn go_backer(&mut self) -> Option<&mut dyn GoBacker> {
        Some(self)
    }

    fn secret_input(&mut self) -> Option<&mut dyn SecretInput> {
        Some(self)
    }
}

impl GoBacker for PasswordInputBox {
    fn go_back(&mut self) -> Nav {
        self.secret.clear();
        Nav::Quit
    }
}

impl SecretInput for PasswordInputBox {
    fn insert_char(&mut self, c: char) {
        self.secret.push(c);
    }

    fn backspace(&mut self) {
        self.secret.pop();
    }

    fn take_secret(&mut self) -> String {
        std::mem::take(&mut self.secret)
    }
}
