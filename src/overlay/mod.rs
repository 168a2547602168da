//! Overlay host: a floating surface that escapes its natural tree position
//! while open and reports dismissal intent to its owner.
//!
//! The host does not observe its own properties. Whoever drives it reports
//! each change of `opened` through [`OverlayHost::opened_changed`] (or the
//! [`OverlayHost::set_opened`] shorthand), and the host runs the matching
//! transition synchronously:
//!
//! - closed → open: attach to the body, activate document listeners, render.
//! - open → closed: restore to the original slot, deactivate listeners.
//!
//! Dismissal intent (`outside-click`, `escape-press`) is dispatched as a
//! bubbling event from the host node. The host never closes itself; the owner
//! listens for those events and decides.

pub mod attachment;
pub mod classifier;
pub mod lifecycle;
pub mod listeners;
pub mod renderer;

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

pub use attachment::AttachmentController;
pub use classifier::{Dismissal, InteractionClassifier, is_escape_key};
pub use lifecycle::{LifecycleState, Transition};
pub use listeners::{GlobalListeners, ListenerSet};
pub use renderer::{ContentContainer, Renderer, RendererBinding};

use crate::constants::{BACKDROP_PART, CONTENT_PART, HOST_TAG, OVERLAY_PART};
use crate::dom::{Document, NodeId};
use crate::error::OverlayError;

/// Attribute reflected on the host element while `opened` is true.
pub const OPENED_ATTR: &str = "opened";
/// Attribute reflected on the host element while `with_backdrop` is true.
pub const WITH_BACKDROP_ATTR: &str = "with-backdrop";

/// Counters describing what the host has done so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HostStats {
    pub attaches: usize,
    pub detaches: usize,
    pub renders: usize,
    pub listeners_active: bool,
}

#[derive(Debug)]
pub struct OverlayHost {
    document: Rc<Document>,
    host: NodeId,
    backdrop: NodeId,
    surface: NodeId,
    opened: bool,
    with_backdrop: bool,
    state: LifecycleState,
    attachment: AttachmentController,
    listeners: GlobalListeners,
    classifier: Rc<RefCell<InteractionClassifier>>,
    renderer: RendererBinding,
    content: Option<ContentContainer>,
}

impl OverlayHost {
    /// Build an unmounted host with its backdrop, overlay and content zones.
    /// Mount it by appending [`OverlayHost::node`] wherever it naturally
    /// belongs, then call [`OverlayHost::first_updated`].
    pub fn new(document: &Rc<Document>) -> Self {
        let host = document.create_element(HOST_TAG);
        let backdrop = document.create_part("div", BACKDROP_PART);
        let surface = document.create_part("div", OVERLAY_PART);
        let content = document.create_part("div", CONTENT_PART);
        // Freshly created nodes cannot fail these inserts.
        let _ = document.append_child(host, backdrop);
        let _ = document.append_child(host, surface);
        let _ = document.append_child(surface, content);

        let classifier = Rc::new(RefCell::new(InteractionClassifier::new(surface)));
        let set = ListenerSet::new(&classifier, Rc::downgrade(document), host);
        Self {
            document: document.clone(),
            host,
            backdrop,
            surface,
            opened: false,
            with_backdrop: false,
            state: LifecycleState::Closed,
            attachment: AttachmentController::new(document, host),
            listeners: GlobalListeners::new(set),
            classifier,
            renderer: RendererBinding::default(),
            content: None,
        }
    }

    pub fn document(&self) -> &Rc<Document> {
        &self.document
    }

    pub fn node(&self) -> NodeId {
        self.host
    }

    pub fn backdrop(&self) -> NodeId {
        self.backdrop
    }

    /// The presentational surface; interactions whose path contains it are
    /// "inside".
    pub fn surface(&self) -> NodeId {
        self.surface
    }

    pub fn marker(&self) -> NodeId {
        self.attachment.marker()
    }

    pub fn opened(&self) -> bool {
        self.opened
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn with_backdrop(&self) -> bool {
        self.with_backdrop
    }

    pub fn set_with_backdrop(&mut self, with_backdrop: bool) -> Result<(), OverlayError> {
        self.with_backdrop = with_backdrop;
        self.document
            .toggle_attribute(self.host, WITH_BACKDROP_ATTR, with_backdrop)?;
        Ok(())
    }

    pub fn set_renderer(&mut self, renderer: Option<Renderer>) {
        self.renderer.set_renderer(renderer);
    }

    pub fn set_owner<O: Any>(&mut self, owner: Rc<O>) {
        self.renderer.set_owner(Some(owner as Rc<dyn Any>));
    }

    pub fn clear_owner(&mut self) {
        self.renderer.set_owner(None);
    }

    /// First-render notification: resolve and cache the content container.
    /// Later calls keep the cached node.
    pub fn first_updated(&mut self) {
        if self.content.is_some() {
            return;
        }
        self.content = self
            .document
            .find_part(self.surface, CONTENT_PART)
            .map(ContentContainer::new);
        tracing::debug!(host = ?self.host, content = ?self.content, "first update");
    }

    pub fn content_container(&self) -> Option<ContentContainer> {
        self.content
    }

    pub fn mouse_down_inside(&self) -> bool {
        self.classifier.borrow().mouse_down_inside()
    }

    pub fn mouse_up_inside(&self) -> bool {
        self.classifier.borrow().mouse_up_inside()
    }

    pub fn listeners_active(&self) -> bool {
        self.listeners.is_active()
    }

    pub fn stats(&self) -> HostStats {
        HostStats {
            attaches: self.attachment.attach_count(),
            detaches: self.attachment.detach_count(),
            renders: self.renderer.invocations(),
            listeners_active: self.listeners.is_active(),
        }
    }

    /// Set `opened` and run whatever transition the change implies.
    pub fn set_opened(&mut self, opened: bool) -> Result<Option<Transition>, OverlayError> {
        let previous = self.opened;
        self.opened_changed(previous, opened)
    }

    /// Property-change notification for `opened`. Only an edge triggers work:
    /// `false → true` opens, `true → false` closes, anything else is a no-op.
    pub fn opened_changed(
        &mut self,
        previous: bool,
        current: bool,
    ) -> Result<Option<Transition>, OverlayError> {
        self.opened = current;
        self.document
            .toggle_attribute(self.host, OPENED_ATTR, current)?;
        let Some(transition) = Transition::from_change(previous, current) else {
            return Ok(None);
        };
        tracing::debug!(host = ?self.host, ?transition, "opened changed");
        self.state = transition.target();
        match transition {
            Transition::Open => self.open()?,
            Transition::Close => self.close()?,
        }
        Ok(Some(transition))
    }

    fn open(&mut self) -> Result<(), OverlayError> {
        self.attachment.attach(&self.document)?;
        self.listeners.activate(&self.document);
        self.renderer.invoke(&self.document, self.content);
        Ok(())
    }

    /// Listeners are removed even when the restore fails.
    fn close(&mut self) -> Result<(), OverlayError> {
        let restored = self.attachment.detach(&self.document);
        self.listeners.deactivate(&self.document);
        restored
    }

    /// The host is leaving the document for good. An open host is put back in
    /// its original slot and its listeners are removed; `opened` ends false.
    pub fn disconnect(&mut self) -> Result<(), OverlayError> {
        if self.attachment.is_attached(&self.document) {
            self.attachment.detach(&self.document)?;
        }
        self.listeners.deactivate(&self.document);
        self.opened = false;
        self.state = LifecycleState::Closed;
        self.document
            .toggle_attribute(self.host, OPENED_ATTR, false)?;
        tracing::debug!(host = ?self.host, "disconnected");
        Ok(())
    }
}
