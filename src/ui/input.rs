use crate::ui::app::App;
use crate::ui::screen::Screen;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.shutdown();
        return;
    }

    match app.active_screen() {
        Screen::Initial => match key.code {
            KeyCode::Char('l') => app.open_login(),
            KeyCode::Char('r') => app.open_register(),
            KeyCode::Char('q') | KeyCode::Esc => app.shutdown(),
            _ => {}
        },
        Screen::Login | Screen::Register => match key.code {
            KeyCode::Enter => app.submit_form(),
            KeyCode::Esc => app.back_to_initial(),
            KeyCode::Backspace => app.pop_char(),
            KeyCode::Char(ch) if is_plain(key) => app.push_char(ch),
            _ => {}
        },
        Screen::Main => match key.code {
            KeyCode::Char('s') => app.open_scan_menu(),
            KeyCode::Char('b') => app.open_leaderboard(),
            KeyCode::Char('u') => app.refresh_user(),
            KeyCode::Char('o') => app.logout(),
            KeyCode::Char('q') => app.shutdown(),
            _ => {}
        },
        Screen::ScanMethodChoice => match key.code {
            KeyCode::Up => app.move_method_selection(-1),
            KeyCode::Down => app.move_method_selection(1),
            KeyCode::Enter => app.choose_method(),
            KeyCode::Char('c') => app.start_camera_scan(),
            KeyCode::Char('i') => app.open_image_upload(),
            KeyCode::Esc => app.back_to_main(),
            _ => {}
        },
        Screen::CameraScanner => {
            if matches!(key.code, KeyCode::Esc) {
                app.cancel_scan();
            }
        }
        Screen::ImageUpload => match key.code {
            KeyCode::Enter => app.submit_image_path(),
            KeyCode::Esc => app.cancel_scan(),
            KeyCode::Backspace => app.pop_char(),
            KeyCode::Char(ch) if is_plain(key) => app.push_char(ch),
            _ => {}
        },
        Screen::Leaderboard => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.back_to_main(),
            KeyCode::Char('u') => app.refresh_leaderboard(),
            _ => {}
        },
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn is_plain(key: KeyEvent) -> bool {
    !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
