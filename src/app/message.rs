//! Application messages

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::layout::Position;

use crate::carousel::SlideChange;

/// Application messages
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Next,
    Previous,
    /// Jump to a slide (0-based)
    GoTo(usize),
    /// Reload the deck file
    ReloadDeck,
    Quit,
    /// Pointer moved over the terminal
    PointerMoved(Position),
    /// Left click
    Clicked(Position),
    /// Terminal lost focus, so nothing is hovered any more
    PointerLeft,
    /// Terminal resized
    Redraw,
    /// Emitted by the carousel after every transition
    SlideChanged(SlideChange),
}

impl Message {
    /// Map a terminal event to a message. Unbound events give `None`.
    pub fn from_event(event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::from_key(key),
            Event::Mouse(mouse) => {
                let position = Position::new(mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Moved => Some(Message::PointerMoved(position)),
                    MouseEventKind::Down(MouseButton::Left) => Some(Message::Clicked(position)),
                    MouseEventKind::ScrollDown => Some(Message::Next),
                    MouseEventKind::ScrollUp => Some(Message::Previous),
                    _ => None,
                }
            }
            Event::FocusLost => Some(Message::PointerLeft),
            Event::Resize(..) => Some(Message::Redraw),
            _ => None,
        }
    }

    fn from_key(key: &KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => Some(Message::Next),
            KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => Some(Message::Previous),
            // Slide numbers on the keyboard are 1-based
            KeyCode::Char(c @ '1'..='9') => {
                c.to_digit(10).map(|n| Message::GoTo(n as usize - 1))
            }
            KeyCode::Char('r') => Some(Message::ReloadDeck),
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
            _ => None,
        }
    }
}
