use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    /// Start a new game, or pause/resume the current one
    StartPause,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('q') | KeyCode::Esc) => Some(Command::Quit),
            (_, KeyCode::Up) => Some(Command::Up),
            (_, KeyCode::Down) => Some(Command::Down),
            (_, KeyCode::Left) => Some(Command::Left),
            (_, KeyCode::Right) => Some(Command::Right),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::StartPause),
            _ => None,
        }
    }
}
