use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Restart,
    /// Any other key press
    Other,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Command {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => Command::Quit,
            (m, code) if normal_modifiers.contains(m) => match code {
                KeyCode::Char('w' | 'k') | KeyCode::Up => Command::Up,
                KeyCode::Char('s' | 'j') | KeyCode::Down => Command::Down,
                KeyCode::Char('a' | 'h') | KeyCode::Left => Command::Left,
                KeyCode::Char('d' | 'l') | KeyCode::Right => Command::Right,
                KeyCode::Char('r' | 'R') => Command::Restart,
                _ => Command::Other,
            },
            _ => Command::Other,
        }
    }
}
