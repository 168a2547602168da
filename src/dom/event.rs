use std::cell::Cell;

use super::NodeId;
use crate::constants::{ESCAPE_PRESS_EVENT, OUTSIDE_CLICK_EVENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    PointerDown,
    PointerUp,
    Click,
    KeyDown,
    /// Dismissal intent: a click landed outside the overlay surface.
    OutsideClick,
    /// Dismissal intent: Escape was pressed while the overlay was open.
    EscapePress,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::PointerDown => "pointerdown",
            EventKind::PointerUp => "pointerup",
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::OutsideClick => OUTSIDE_CLICK_EVENT,
            EventKind::EscapePress => ESCAPE_PRESS_EVENT,
        }
    }

    pub fn is_dismissal(self) -> bool {
        matches!(self, EventKind::OutsideClick | EventKind::EscapePress)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload carried by dismissal events.
#[derive(Debug, Clone)]
pub struct DismissDetail {
    pub source_event: Event,
}

#[derive(Debug, Clone)]
pub struct Event {
    kind: EventKind,
    path: Vec<NodeId>,
    key: Option<String>,
    detail: Option<Box<DismissDetail>>,
    propagation_stopped: Cell<bool>,
}

impl Event {
    fn input(kind: EventKind, path: Vec<NodeId>) -> Self {
        Self {
            kind,
            path,
            key: None,
            detail: None,
            propagation_stopped: Cell::new(false),
        }
    }

    /// `path` is the composed path, deepest target first.
    pub fn pointer_down(path: Vec<NodeId>) -> Self {
        Self::input(EventKind::PointerDown, path)
    }

    pub fn pointer_up(path: Vec<NodeId>) -> Self {
        Self::input(EventKind::PointerUp, path)
    }

    pub fn click(path: Vec<NodeId>) -> Self {
        Self::input(EventKind::Click, path)
    }

    pub fn key_down(key: impl Into<String>, path: Vec<NodeId>) -> Self {
        let mut event = Self::input(EventKind::KeyDown, path);
        event.key = Some(key.into());
        event
    }

    /// A bubbling dismissal event wrapping the input event that caused it.
    /// The path is filled in by [`super::Document::dispatch_at`].
    pub fn dismissal(kind: EventKind, source_event: &Event) -> Self {
        debug_assert!(kind.is_dismissal());
        let mut event = Self::input(kind, Vec::new());
        event.detail = Some(Box::new(DismissDetail {
            source_event: source_event.detached(),
        }));
        event
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn composed_path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn target(&self) -> Option<NodeId> {
        self.path.first().copied()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn detail(&self) -> Option<&DismissDetail> {
        self.detail.as_deref()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub(crate) fn set_composed_path(&mut self, path: Vec<NodeId>) {
        self.path = path;
    }

    // Copy for embedding as `source_event`; propagation state belongs to the
    // original dispatch and is not carried over.
    fn detached(&self) -> Self {
        let copy = self.clone();
        copy.propagation_stopped.set(false);
        copy
    }
}
