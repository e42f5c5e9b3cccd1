use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::action::{Action, Direction, TextEdit};

/// Terminal input the loop cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Key(KeyEvent),
    Paste(String), // Bracketed paste
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let event = match event::read()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?} ({:?})",
                key_event.code,
                key_event.modifiers,
                key_event.kind
            );
            Some(TuiEvent::Key(key_event))
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    };
    Ok(event)
}

/// Translate a terminal event into a core action.
///
/// The same key means different things depending on whether a free-text
/// line is open: Backspace deletes a row while browsing but a character
/// while typing, and `q` quits only while browsing. Ctrl+C always quits.
pub fn to_action(event: &TuiEvent, editing_text: bool) -> Option<Action> {
    let key = match event {
        TuiEvent::Key(key) => key,
        TuiEvent::Paste(text) if editing_text => {
            return Some(Action::TextInput(TextEdit::Paste(text.clone())));
        }
        TuiEvent::Paste(_) => return Some(Action::Cancel),
        TuiEvent::Resize => return None,
    };

    if key.kind == KeyEventKind::Release {
        return None;
    }
    let repeat = key.kind == KeyEventKind::Repeat;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return (!repeat).then_some(Action::Quit);
    }

    let action = if editing_text {
        text_mode_action(key.code, ctrl)
    } else {
        browse_mode_action(key.code, ctrl)
    }?;

    // Held keys may scroll or type, never confirm or delete twice.
    let repeatable = matches!(action, Action::Navigate(_) | Action::TextInput(_));
    (!repeat || repeatable).then_some(action)
}

fn text_mode_action(code: KeyCode, ctrl: bool) -> Option<Action> {
    match (code, ctrl) {
        (KeyCode::Enter, _) => Some(Action::Confirm),
        (KeyCode::Esc, _) => Some(Action::Cancel),
        (KeyCode::Backspace, _) => Some(Action::TextInput(TextEdit::Backspace)),
        (KeyCode::Char('u'), true) => Some(Action::TextInput(TextEdit::Clear)),
        (KeyCode::Char(_), true) => None,
        (KeyCode::Char(c), false) => Some(Action::TextInput(TextEdit::Insert(c))),
        _ => None,
    }
}

fn browse_mode_action(code: KeyCode, ctrl: bool) -> Option<Action> {
    let action = match code {
        KeyCode::Char('q') if !ctrl => Action::Quit,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Backspace | KeyCode::Delete => Action::Delete,
        KeyCode::Up | KeyCode::Char('k') => Action::Navigate(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Action::Navigate(Direction::Down),
        KeyCode::PageUp => Action::Navigate(Direction::PageUp),
        KeyCode::PageDown => Action::Navigate(Direction::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Action::Navigate(Direction::Top),
        KeyCode::End | KeyCode::Char('G') => Action::Navigate(Direction::Bottom),
        KeyCode::Char('r') if !ctrl => Action::Reload,
        // Any other key only clears a pending delete confirmation.
        _ => Action::Cancel,
    };
    Some(action)
}
