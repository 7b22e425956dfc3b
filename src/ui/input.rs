use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::{App, Focus, Screen};
use crate::ui::form::FormIntent;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    match app.focus() {
        Focus::Form => handle_form_key(app, key),
        Focus::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        },
        Focus::Search => match key.code {
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Backspace => app.search_backspace(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.search_insert(ch)
            }
            _ => {}
        },
        Focus::Main => handle_main_key(app, key),
    }
}

fn handle_main_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Tab => app.next_screen(),
        KeyCode::Char('1') => app.set_screen(Screen::Dashboard),
        KeyCode::Char('2') => app.set_screen(Screen::Tasks),
        KeyCode::Char('3') => app.set_screen(Screen::Users),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('v') => app.toggle_view_mode(),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('f') => app.cycle_status_filter(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Left => app.change_page(-1),
        KeyCode::Right => app.change_page(1),
        KeyCode::Char('+') | KeyCode::Char('=') => app.cycle_page_size(1),
        KeyCode::Char('-') => app.cycle_page_size(-1),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('t') => app.toggle_selected_task(),
        KeyCode::Char('x') => app.export_current(),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.dispatch_form(FormIntent::FocusNext),
        KeyCode::BackTab | KeyCode::Up => app.dispatch_form(FormIntent::FocusPrev),
        KeyCode::Backspace => app.dispatch_form(FormIntent::Backspace),
        KeyCode::Left | KeyCode::Right => {
            let direction = if key.code == KeyCode::Left { -1 } else { 1 };
            let options = app.user_options();
            app.dispatch_form(FormIntent::Cycle { options, direction });
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch_form(FormIntent::Insert(ch))
        }
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char(ch))
        }
    }

    #[test]
    fn ctrl_q_quits_from_any_focus() {
        let mut app = App::new(&Config::default());
        app.set_screen(Screen::Users);
        handle_key(&mut app, press(KeyCode::Char('a')));
        assert_eq!(app.focus(), Focus::Form);
        handle_key(&mut app, ctrl('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn plain_q_is_text_inside_search() {
        let mut app = App::new(&Config::default());
        app.set_screen(Screen::Tasks);
        handle_key(&mut app, press(KeyCode::Char('/')));
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.search_term(), "q");
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.focus(), Focus::Main);
        assert_eq!(app.search_term(), "q");
    }

    #[test]
    fn number_keys_switch_screens() {
        let mut app = App::new(&Config::default());
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.screen(), Screen::Users);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.screen(), Screen::Dashboard);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = App::new(&Config::default());
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(!app.should_quit());
    }
}
