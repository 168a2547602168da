//! Listener identity and registration bookkeeping.
//!
//! A [`Listener`] is compared by pointer identity, the same way a DOM
//! `removeEventListener` call must be handed the exact function object that
//! was registered. Cloning a `Listener` keeps its identity.

use std::fmt;
use std::rc::Rc;

use super::{Event, EventKind, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Capture,
    Bubble,
}

#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&Event)>);

impl Listener {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn same(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

#[derive(Debug)]
struct Registration {
    target: NodeId,
    kind: EventKind,
    phase: Phase,
    listener: Listener,
}

impl Registration {
    fn matches(&self, target: NodeId, kind: EventKind, phase: Phase, listener: &Listener) -> bool {
        self.target == target
            && self.kind == kind
            && self.phase == phase
            && self.listener.same(listener)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListenerRegistry {
    registrations: Vec<Registration>,
}

impl ListenerRegistry {
    pub(crate) fn add(
        &mut self,
        target: NodeId,
        kind: EventKind,
        phase: Phase,
        listener: Listener,
    ) -> bool {
        if self.contains(target, kind, phase, &listener) {
            return false;
        }
        self.registrations.push(Registration {
            target,
            kind,
            phase,
            listener,
        });
        true
    }

    pub(crate) fn remove(
        &mut self,
        target: NodeId,
        kind: EventKind,
        phase: Phase,
        listener: &Listener,
    ) -> bool {
        let before = self.registrations.len();
        self.registrations
            .retain(|r| !r.matches(target, kind, phase, listener));
        self.registrations.len() != before
    }

    pub(crate) fn contains(
        &self,
        target: NodeId,
        kind: EventKind,
        phase: Phase,
        listener: &Listener,
    ) -> bool {
        self.registrations
            .iter()
            .any(|r| r.matches(target, kind, phase, listener))
    }

    /// Listeners for one dispatch stop, in registration order.
    pub(crate) fn matching(&self, target: NodeId, kind: EventKind, phase: Phase) -> Vec<Listener> {
        self.registrations
            .iter()
            .filter(|r| r.target == target && r.kind == kind && r.phase == phase)
            .map(|r| r.listener.clone())
            .collect()
    }

    pub(crate) fn count_for(&self, target: NodeId) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.target == target)
            .count()
    }

    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let a = Listener::new(|_event: &Event| {});
        let b = a.clone();
        let c = Listener::new(|_event: &Event| {});
        assert!(a.same(&b));
        assert!(!a.same(&c));
    }

    #[test]
    fn remove_targets_exact_registration() {
        let mut registry = ListenerRegistry::default();
        let a = Listener::new(|_event: &Event| {});
        let b = Listener::new(|_event: &Event| {});
        let target = NodeId(0);
        registry.add(target, EventKind::Click, Phase::Capture, a.clone());
        registry.add(target, EventKind::Click, Phase::Capture, b.clone());
        assert!(!registry.remove(target, EventKind::Click, Phase::Bubble, &a));
        assert!(registry.remove(target, EventKind::Click, Phase::Capture, &a));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(target, EventKind::Click, Phase::Capture, &b));
    }
}
