//! Translate terminal input into document events.
//!
//! Terminals report button presses and releases but no clicks, so the bridge
//! synthesizes a click after a left-button release that follows a press,
//! mirroring the browser's down → up → click sequence. Keys are reported with
//! DOM key names so the overlay's Escape check sees `"Escape"`.

use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind,
};

use crate::dom::{Document, Event};
use crate::layout::LayoutMap;

#[derive(Debug, Default)]
pub struct EventBridge {
    pressed: bool,
}

impl EventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document events for one terminal event, in dispatch order.
    pub fn translate(
        &mut self,
        document: &Document,
        layout: &LayoutMap,
        event: &TermEvent,
    ) -> Vec<Event> {
        match event {
            TermEvent::Mouse(mouse) => {
                let path = || layout.hit_path(document, mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.pressed = true;
                        vec![Event::pointer_down(path())]
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        let path = path();
                        let mut events = vec![Event::pointer_up(path.clone())];
                        if std::mem::take(&mut self.pressed) {
                            events.push(Event::click(path));
                        }
                        events
                    }
                    _ => Vec::new(),
                }
            }
            TermEvent::Key(key) if key.kind != KeyEventKind::Release => key_name(key)
                .map(|name| vec![Event::key_down(name, vec![document.body()])])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

/// DOM `key` value for a terminal key, when one exists.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let name = match key.code {
        KeyCode::Esc => "Escape",
        KeyCode::Enter => "Enter",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::F(n) => return Some(format!("F{n}")),
        KeyCode::Char(' ') => " ",
        KeyCode::Char(c) => return Some(c.to_string()),
        _ => return None,
    };
    Some(name.to_string())
}
