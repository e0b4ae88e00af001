use super::super::*;

pub(in crate::tui_shell) fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return;
    }

    if app.command_bar.command_mode() {
        handle_command_key(app, key);
        return;
    }
    if app.nav.current_mut().secret_input().is_some() {
        handle_secret_key(app, key);
        return;
    }
    handle_normal_key(app, key);
}

fn handle_command_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.command_bar.cancel(),
        KeyCode::Enter => app.execute_command(),
        KeyCode::Backspace => app.command_bar.backspace(),
        KeyCode::Left => app.command_bar.move_left(),
        KeyCode::Right => app.command_bar.move_right(),
        KeyCode::Up => app.command_bar.history_up(),
        KeyCode::Down => app.command_bar.history_down(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_bar.insert_char(c)
        }
        _ => {}
    }
}

fn handle_secret_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Enter => {
            let secret = app
                .nav
                .current_mut()
                .secret_input()
                .map(|s| s.take_secret())
                .unwrap_or_default();
            app.store_secret(secret);
        }
        KeyCode::Backspace => {
            if let Some(input) = app.nav.current_mut().secret_input() {
                input.backspace();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(input) = app.nav.current_mut().secret_input() {
                input.insert_char(c);
            }
        }
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('f') if ctrl => page_move(app, |p| p.next_page()),
        KeyCode::Char('b') if ctrl => page_move(app, |p| p.previous_page()),
        _ if ctrl => {}

        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => app.go_back(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.select_item(),

        KeyCode::Char('j') | KeyCode::Down => page_move(app, |p| p.next_line(1)),
        KeyCode::Char('k') | KeyCode::Up => page_move(app, |p| p.previous_line(1)),
        KeyCode::PageDown | KeyCode::Char(' ') => page_move(app, |p| p.next_page()),
        KeyCode::PageUp => page_move(app, |p| p.previous_page()),
        KeyCode::Char('g') | KeyCode::Home => page_move(app, |p| p.top_of_page()),
        KeyCode::Char('G') | KeyCode::End => page_move(app, |p| p.bottom_of_page()),
        KeyCode::Char('}') => page_move(app, |p| p.next_para()),
        KeyCode::Char('{') => page_move(app, |p| p.previous_para()),

        KeyCode::Char('n') => repeat_search(app, false),
        KeyCode::Char('N') => repeat_search(app, true),
        KeyCode::Char(c @ ('/' | '?' | ':')) => app.command_bar.start(c),

        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('E') => {
            let id = app.nav.current().ticket_editer().and_then(|e| e.edit_ticket_id());
            match id {
                Some(id) => app.request_external(External::Edit(id)),
                None => app.set_info("nothing to edit here"),
            }
        }
        KeyCode::Char('C') => {
            let id = app
                .nav
                .current()
                .ticket_commenter()
                .and_then(|c| c.comment_ticket_id());
            match id {
                Some(id) => app.request_external(External::Comment(id)),
                None => app.set_info("nothing to comment on here"),
            }
        }
        KeyCode::Char('L') => app.open_labels(),
        KeyCode::Char('S') => app.open_sort_orders(),
        KeyCode::Char('H') | KeyCode::F(1) => app.follow(Nav::To(Box::new(HelpPage::default()))),
        _ => {}
    }
}

fn page_move(app: &mut App, f: impl FnOnce(&mut dyn PagePager)) {
    if let Some(pager) = app.nav.current_mut().pager() {
        f(pager);
    }
}

fn repeat_search(app: &mut App, reverse: bool) {
    if let Some(searcher) = app.nav.current_mut().searcher() {
        searcher.repeat_search(reverse);
    }
}
