//! Inside/outside classification of document-level input.

use crate::constants::{ESCAPE_KEY, LEGACY_ESCAPE_KEY};
use crate::dom::{Event, EventKind, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    OutsideClick,
    EscapePress,
}

impl Dismissal {
    pub fn event_kind(self) -> EventKind {
        match self {
            Dismissal::OutsideClick => EventKind::OutsideClick,
            Dismissal::EscapePress => EventKind::EscapePress,
        }
    }
}

pub fn is_escape_key(key: &str) -> bool {
    key == ESCAPE_KEY || key == LEGACY_ESCAPE_KEY
}

/// Tracks whether the last press and release touched the overlay surface.
///
/// The two flags are independent: a drag that starts inside and ends outside
/// (or the reverse) still suppresses the click that follows it.
#[derive(Debug)]
pub struct InteractionClassifier {
    surface: NodeId,
    mouse_down_inside: bool,
    mouse_up_inside: bool,
}

impl InteractionClassifier {
    pub fn new(surface: NodeId) -> Self {
        Self {
            surface,
            mouse_down_inside: false,
            mouse_up_inside: false,
        }
    }

    pub fn surface(&self) -> NodeId {
        self.surface
    }

    pub fn mouse_down_inside(&self) -> bool {
        self.mouse_down_inside
    }

    pub fn mouse_up_inside(&self) -> bool {
        self.mouse_up_inside
    }

    fn touches_surface(&self, event: &Event) -> bool {
        event.composed_path().contains(&self.surface)
    }

    pub fn pointer_down(&mut self, event: &Event) {
        self.mouse_down_inside = self.touches_surface(event);
    }

    pub fn pointer_up(&mut self, event: &Event) {
        self.mouse_up_inside = self.touches_surface(event);
    }

    /// Runs in the capture phase, ahead of page handlers that may reshape the
    /// tree. Flags are only reset on the "inside" branch; reaching the
    /// outside branch implies both are already clear.
    pub fn click(&mut self, event: &Event) -> Option<Dismissal> {
        if self.touches_surface(event) || self.mouse_down_inside || self.mouse_up_inside {
            self.mouse_down_inside = false;
            self.mouse_up_inside = false;
            return None;
        }
        Some(Dismissal::OutsideClick)
    }

    pub fn key_down(&mut self, event: &Event) -> Option<Dismissal> {
        event
            .key()
            .filter(|key| is_escape_key(key))
            .map(|_| Dismissal::EscapePress)
    }
}
