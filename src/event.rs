//! Translation of terminal input into viewer actions.
use crossterm::event::{self, KeyCode, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Select the previous sprite.
    Previous,
    /// Select the next sprite.
    Next,
    Quit,
}

impl Event {
    /// Returns `None` for events the viewer doesn't react to, including key releases.
    pub fn from_crossterm_event(event: event::Event) -> Option<Self> {
        match event {
            event::Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Event::Quit)
                }
                KeyCode::Left | KeyCode::Char('h' | 'a') => Some(Event::Previous),
                KeyCode::Right | KeyCode::Char('l' | 'd') => Some(Event::Next),
                KeyCode::Esc | KeyCode::Char('q') => Some(Event::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
