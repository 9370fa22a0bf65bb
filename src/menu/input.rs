// Menu input handling

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;
use std::time::Duration;

use super::state::{adjust_win_score, MenuItem, MenuState};

/// Menu action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Continue in menu
    None,
    /// Start a match with the current settings
    Start,
    /// Exit application
    Exit,
}

/// Handle menu input and return the next action. `win_score` is edited in
/// place when the corresponding item is selected.
pub fn handle_menu_input(
    menu_state: &mut MenuState,
    win_score: &mut u32,
) -> Result<MenuAction, io::Error> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                let action = handle_key_press(menu_state, win_score, key.code);
                if action != MenuAction::None {
                    return Ok(action);
                }
            }
        }
    }

    Ok(MenuAction::None)
}

fn handle_key_press(
    menu_state: &mut MenuState,
    win_score: &mut u32,
    key_code: KeyCode,
) -> MenuAction {
    match key_code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            menu_state.select_previous();
            MenuAction::None
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            menu_state.select_next();
            MenuAction::None
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            if menu_state.selected_item() == MenuItem::WinScore {
                *win_score = adjust_win_score(*win_score, -1);
            }
            MenuAction::None
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            if menu_state.selected_item() == MenuItem::WinScore {
                *win_score = adjust_win_score(*win_score, 1);
            }
            MenuAction::None
        }
        KeyCode::Enter | KeyCode::Char(' ') => match menu_state.selected_item() {
            MenuItem::Start => MenuAction::Start,
            MenuItem::WinScore => MenuAction::None,
            MenuItem::Exit => MenuAction::Exit,
        },
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => MenuAction::Exit,
        _ => MenuAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_on_start_begins_a_match() {
        let mut menu = MenuState::new();
        let mut win_score = 5;
        let action = handle_key_press(&mut menu, &mut win_score, KeyCode::Enter);
        assert_eq!(action, MenuAction::Start);
    }

    #[test]
    fn arrows_edit_the_win_score_only_when_selected() {
        let mut menu = MenuState::new();
        let mut win_score = 5;

        // Start is selected; arrows must not edit
        handle_key_press(&mut menu, &mut win_score, KeyCode::Right);
        assert_eq!(win_score, 5);

        menu.select_next(); // WinScore
        handle_key_press(&mut menu, &mut win_score, KeyCode::Right);
        assert_eq!(win_score, 6);
        handle_key_press(&mut menu, &mut win_score, KeyCode::Left);
        assert_eq!(win_score, 5);
    }

    #[test]
    fn escape_exits_from_anywhere() {
        let mut menu = MenuState::new();
        let mut win_score = 5;
        menu.select_next();
        let action = handle_key_press(&mut menu, &mut win_score, KeyCode::Esc);
        assert_eq!(action, MenuAction::Exit);
    }
}
