use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Back,
    Open,
    OpenAuthor,
    ShowTop,
    ShowNew,
    Up,
    Down,
    PageUp,
    PageDown,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => map_key(key_event),
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Translate a key press into a `TuiEvent`. Releases and repeats are ignored.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
        (_, KeyCode::Esc | KeyCode::Backspace | KeyCode::Left) => Some(TuiEvent::Back),
        (_, KeyCode::Char('h')) => Some(TuiEvent::Back),
        (_, KeyCode::Enter | KeyCode::Right) => Some(TuiEvent::Open),
        (_, KeyCode::Char('l')) => Some(TuiEvent::Open),
        (_, KeyCode::Char('u')) => Some(TuiEvent::OpenAuthor),
        (_, KeyCode::Char('t')) => Some(TuiEvent::ShowTop),
        (_, KeyCode::Char('n')) => Some(TuiEvent::ShowNew),
        (_, KeyCode::Up | KeyCode::Char('k')) => Some(TuiEvent::Up),
        (_, KeyCode::Down | KeyCode::Char('j')) => Some(TuiEvent::Down),
        (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
        (_, KeyCode::PageDown | KeyCode::Char(' ')) => Some(TuiEvent::PageDown),
        _ => None,
    }
}
