use unicode_width::UnicodeWidthStr;

use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let page = app.nav.current();
    page.render(frame, chunks[0]);

    // Status
    let mut spans = vec![
        Span::styled(
            "jira-ui",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{:?}", page.kind()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::raw(page.id()),
    ];
    match &app.status {
        Some(msg) => {
            let color = if msg.error { Color::Red } else { Color::Green };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(msg.text.clone(), Style::default().fg(color)));
        }
        None => {
            spans.push(Span::styled(
                "  H: help  q: back",
                Style::default().fg(Color::Gray),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

    // Command bar
    let bar = &app.command_bar;
    frame.render_widget(Paragraph::new(bar.text().to_string()), chunks[2]);
    if bar.command_mode() {
        let col = bar.text()[..bar.cursor()].width() as u16;
        let x = chunks[2].x + col.min(chunks[2].width.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, chunks[2].y));
    }
}
