// Keyboard input for running games: held-direction tracking per paddle
// plus the discrete pause/quit actions.
//
// Held state needs key release events, which terminals only report under
// the kitty keyboard protocol; main pushes REPORT_EVENT_TYPES when the
// terminal supports it. Without it a pressed direction latches until the
// opposite key is pressed.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use super::state::{HeldDir, Role, Session, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    TogglePause,
    Quit,
}

/// Drain all pending terminal events and fold them into the session's
/// held-direction state. Returns the discrete actions seen this frame.
pub fn poll_game_input(session: &mut Session) -> Result<Vec<GameAction>, io::Error> {
    let mut actions = Vec::new();

    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            if key.kind == KeyEventKind::Press {
                                actions.push(GameAction::Quit);
                            }
                        }
                        KeyCode::Char(' ') => {
                            if key.kind == KeyEventKind::Press {
                                actions.push(GameAction::TogglePause);
                            }
                        }
                        KeyCode::Char('w') | KeyCode::Char('W') => {
                            set_held(session, Side::Left, HeldDir::Up);
                        }
                        KeyCode::Char('s') | KeyCode::Char('S') => {
                            set_held(session, Side::Left, HeldDir::Down);
                        }
                        KeyCode::Up => set_held(session, Side::Right, HeldDir::Up),
                        KeyCode::Down => set_held(session, Side::Right, HeldDir::Down),
                        _ => {}
                    }
                }
                KeyEventKind::Release => match key.code {
                    KeyCode::Char('w')
                    | KeyCode::Char('W')
                    | KeyCode::Char('s')
                    | KeyCode::Char('S') => set_held(session, Side::Left, HeldDir::None),
                    KeyCode::Up | KeyCode::Down => {
                        set_held(session, Side::Right, HeldDir::None)
                    }
                    _ => {}
                },
            }
        }
    }

    Ok(actions)
}

/// Apply a held-direction change if this process controls that paddle:
/// local plays both sides, the host plays the left, the client the right.
fn set_held(session: &mut Session, side: Side, dir: HeldDir) {
    let controls_side = match (session.role, side) {
        (Role::Local, _) => true,
        (Role::Host, Side::Left) => true,
        (Role::Client, Side::Right) => true,
        _ => false,
    };
    if controls_side {
        session.held[side.index()] = dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn role_gates_which_paddle_accepts_input() {
        let config = Config::default();

        let mut host = Session::new(Role::Host, None, None, &config);
        set_held(&mut host, Side::Left, HeldDir::Up);
        set_held(&mut host, Side::Right, HeldDir::Down);
        assert_eq!(host.held, [HeldDir::Up, HeldDir::None]);

        let mut client = Session::new(Role::Client, None, None, &config);
        set_held(&mut client, Side::Left, HeldDir::Up);
        set_held(&mut client, Side::Right, HeldDir::Down);
        assert_eq!(client.held, [HeldDir::None, HeldDir::Down]);

        let mut local = Session::new(Role::Local, None, None, &config);
        set_held(&mut local, Side::Left, HeldDir::Down);
        set_held(&mut local, Side::Right, HeldDir::Up);
        assert_eq!(local.held, [HeldDir::Down, HeldDir::Up]);
    }
}
