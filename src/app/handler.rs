//! Keyboard input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::state::AppState;

/// Markup for the key-help hint shown on `?`.
const HELP_HINT: &str =
    "keys: //j/k// move  //space// mark  //v// invert  //z// size  //.// hidden  //q// quit";

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // A visible hint swallows the next keypress and disappears.
    if state.hint_shown {
        state.hint_shown = false;
        state.status.clear_hint();
        if key.code == KeyCode::Esc {
            return;
        }
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => state.column.move_pointer(1),
        KeyCode::Char('k') | KeyCode::Up => state.column.move_pointer(-1),
        KeyCode::Char('g') => state.column.pointed = 0,
        KeyCode::Char('G') => state.column.point_to_end(),

        KeyCode::Char(' ') => {
            state.column.toggle_mark();
            state.column.move_pointer(1);
        }
        KeyCode::Char('v') => invert_marks(state),

        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => enter_pointed(state),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => go_parent(state),

        KeyCode::Char('.') => {
            state.show_hidden = !state.show_hidden;
            state.reload();
        }
        KeyCode::Char('z') => {
            let flipped = !state.settings.display_size_in_status_bar();
            state.settings.set_display_size_in_status_bar(flipped);
        }
        KeyCode::Char('?') => {
            state.status.set_hint_markup(HELP_HINT);
            state.hint_shown = true;
        }
        _ => {}
    }
}

fn invert_marks(state: &mut AppState) {
    let Some(files) = state.column.files.as_ref() else {
        return;
    };
    let all: Vec<u64> = files.iter().map(|e| e.id).collect();
    for id in all {
        if !state.column.marked.insert(id) {
            state.column.marked.remove(&id);
        }
    }
}

fn enter_pointed(state: &mut AppState) {
    let Some(entry) = state.column.pointed_entry() else {
        return;
    };
    if entry.is_dir() {
        let path = entry.path.clone();
        state.enter(path);
    } else {
        let name = entry.name.clone();
        state.status.notify(format!("{name} is not a directory"), 4, true);
    }
}

fn go_parent(state: &mut AppState) {
    let Some(parent) = state.column.path.parent().map(|p| p.to_path_buf()) else {
        state.status.notify("already at the filesystem root", 4, false);
        return;
    };
    state.enter(parent);
}
