//! The four document-level listeners an open overlay keeps registered.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::classifier::{Dismissal, InteractionClassifier};
use crate::dom::{Document, Event, EventKind, Listener, NodeId, Phase};

type Handler = fn(&mut InteractionClassifier, &Event) -> Option<Dismissal>;

/// Callbacks bound once per host. Their identities never change, so every
/// `deactivate` removes exactly what `activate` added.
#[derive(Debug, Clone)]
pub struct ListenerSet {
    pub pointer_down: Listener,
    pub pointer_up: Listener,
    pub click: Listener,
    pub key_down: Listener,
}

impl ListenerSet {
    pub fn new(
        classifier: &Rc<RefCell<InteractionClassifier>>,
        document: Weak<Document>,
        host: NodeId,
    ) -> Self {
        let make = |handler: Handler| bind(classifier.clone(), document.clone(), host, handler);
        Self {
            pointer_down: make(|c, e| {
                c.pointer_down(e);
                None
            }),
            pointer_up: make(|c, e| {
                c.pointer_up(e);
                None
            }),
            click: make(InteractionClassifier::click),
            key_down: make(InteractionClassifier::key_down),
        }
    }

    fn registrations(&self) -> [(EventKind, Phase, &Listener); 4] {
        [
            (EventKind::PointerDown, Phase::Bubble, &self.pointer_down),
            (EventKind::PointerUp, Phase::Bubble, &self.pointer_up),
            (EventKind::Click, Phase::Capture, &self.click),
            (EventKind::KeyDown, Phase::Bubble, &self.key_down),
        ]
    }
}

fn bind(
    classifier: Rc<RefCell<InteractionClassifier>>,
    document: Weak<Document>,
    host: NodeId,
    handler: Handler,
) -> Listener {
    Listener::new(move |event| {
        let outcome = handler(&mut classifier.borrow_mut(), event);
        if let Some(dismissal) = outcome
            && let Some(document) = document.upgrade()
        {
            let kind = dismissal.event_kind();
            tracing::debug!(host = ?host, event = %kind, "dismissal intent");
            document.dispatch_at(host, Event::dismissal(kind, event));
        }
    })
}

/// All-or-nothing registration of a [`ListenerSet`] on the document.
#[derive(Debug)]
pub struct GlobalListeners {
    set: ListenerSet,
    active: bool,
}

impl GlobalListeners {
    pub fn new(set: ListenerSet) -> Self {
        Self { set, active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set(&self) -> &ListenerSet {
        &self.set
    }

    /// Returns `false` when already active.
    pub fn activate(&mut self, document: &Document) -> bool {
        if self.active {
            return false;
        }
        for (kind, phase, listener) in self.set.registrations() {
            document.add_document_listener(kind, phase, listener);
        }
        self.active = true;
        tracing::debug!("document listeners active");
        true
    }

    /// Returns `false` when already inactive.
    pub fn deactivate(&mut self, document: &Document) -> bool {
        if !self.active {
            return false;
        }
        for (kind, phase, listener) in self.set.registrations() {
            document.remove_document_listener(kind, phase, listener);
        }
        self.active = false;
        tracing::debug!("document listeners inactive");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Rc<Document>, GlobalListeners) {
        let doc = Document::new();
        let host = doc.create_element("overlay-host");
        let surface = doc.create_part("div", "overlay");
        doc.append_child(host, surface).unwrap();
        let classifier = Rc::new(RefCell::new(InteractionClassifier::new(surface)));
        let set = ListenerSet::new(&classifier, Rc::downgrade(&doc), host);
        (doc, GlobalListeners::new(set))
    }

    #[test]
    fn activation_is_idempotent() {
        let (doc, mut listeners) = fixture();
        assert!(listeners.activate(&doc));
        assert!(!listeners.activate(&doc));
        assert_eq!(doc.document_listener_count(), 4);
        assert!(listeners.deactivate(&doc));
        assert!(!listeners.deactivate(&doc));
        assert_eq!(doc.document_listener_count(), 0);
    }

    #[test]
    fn deactivate_when_never_active_is_harmless() {
        let (doc, mut listeners) = fixture();
        assert!(!listeners.deactivate(&doc));
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn callbacks_keep_identity_across_cycles() {
        let (doc, mut listeners) = fixture();
        let click = listeners.set().click.clone();
        for _ in 0..3 {
            listeners.activate(&doc);
            listeners.deactivate(&doc);
        }
        assert!(click.same(&listeners.set().click));
        assert_eq!(doc.listener_count(), 0);
    }
}
