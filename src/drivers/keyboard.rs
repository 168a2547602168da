use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Cleans up raw terminal key events before they reach the event bridge.
///
/// - Shift+Tab becomes BackTab.
/// - Release events are dropped.
/// - Escape is reported once per physical press. Windows consoles repeat the
///   press while the key is held and some terminals tag those as `Repeat`;
///   either way only the first one gets through, so a held Escape produces a
///   single `escape-press`.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(mut key) = evt else {
            return Some(evt);
        };
        if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
            key.code = KeyCode::BackTab;
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Esc {
                    self.esc_down = false;
                }
                return None;
            }
            KeyEventKind::Repeat if key.code == KeyCode::Esc => return None,
            _ => {}
        }
        if key.code == KeyCode::Esc {
            // Without release reporting (most unix terminals) every press is
            // a fresh one.
            if cfg!(windows) && self.esc_down {
                return None;
            }
            self.esc_down = true;
        } else {
            self.esc_down = false;
        }
        Some(Event::Key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn tab_with_shift_becomes_backtab() {
        let mut norm = KeyboardNormalizer::new();
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        let out = norm.normalize(Event::Key(key)).expect("should return event");
        if let Event::Key(k) = out {
            assert!(matches!(k.code, KeyCode::BackTab));
            assert!(!k.modifiers.contains(KeyModifiers::SHIFT));
        } else {
            panic!("expected key event");
        }
    }

    #[test]
    fn release_key_is_ignored() {
        let mut norm = KeyboardNormalizer::new();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(norm.normalize(Event::Key(key)).is_none());
    }

    #[test]
    fn escape_repeat_is_dropped() {
        let mut norm = KeyboardNormalizer::new();
        let press = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(norm.normalize(Event::Key(press)).is_some());
        let mut repeat = press;
        repeat.kind = KeyEventKind::Repeat;
        assert!(norm.normalize(Event::Key(repeat)).is_none());
        let mut release = press;
        release.kind = KeyEventKind::Release;
        assert!(norm.normalize(Event::Key(release)).is_none());
        assert!(norm.normalize(Event::Key(press)).is_some());
    }

    #[test]
    fn non_key_events_pass_through() {
        let mut norm = KeyboardNormalizer::new();
        assert!(norm.normalize(Event::Resize(10, 20)).is_some());
    }
}
