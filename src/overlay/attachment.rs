//! Moves the host into the top-level presentation layer and back.
//!
//! A marker node is parked in the host's original slot while it is away. The
//! marker's parent link doubles as the "currently attached" flag: it is set
//! by `attach` and cleared by `detach`, and nothing else touches it.

use crate::dom::{Document, NodeId};
use crate::error::OverlayError;

#[derive(Debug)]
pub struct AttachmentController {
    host: NodeId,
    marker: NodeId,
    attaches: usize,
    detaches: usize,
}

impl AttachmentController {
    pub fn new(document: &Document, host: NodeId) -> Self {
        Self {
            host,
            marker: document.create_marker(),
            attaches: 0,
            detaches: 0,
        }
    }

    pub fn marker(&self) -> NodeId {
        self.marker
    }

    pub fn is_attached(&self, document: &Document) -> bool {
        document.parent(self.marker).is_some()
    }

    /// Park the marker in front of the host and move the host to the end of
    /// the body. Returns `Ok(false)` without touching the tree when the host
    /// is already attached or has not been mounted yet.
    pub fn attach(&mut self, document: &Document) -> Result<bool, OverlayError> {
        if self.is_attached(document) {
            tracing::debug!(host = ?self.host, "attach skipped: already attached");
            return Ok(false);
        }
        let Some(parent) = document.parent(self.host) else {
            tracing::debug!(host = ?self.host, "attach skipped: host not mounted");
            return Ok(false);
        };
        document.insert_before(parent, self.marker, Some(self.host))?;
        document.append_child(document.body(), self.host)?;
        self.attaches += 1;
        tracing::debug!(host = ?self.host, origin = ?parent, "attached to body");
        Ok(true)
    }

    /// Put the host back where the marker sits and drop the marker.
    pub fn detach(&mut self, document: &Document) -> Result<(), OverlayError> {
        let Some(parent) = document.parent(self.marker) else {
            tracing::error!(host = ?self.host, "detach without a prior attach");
            return Err(OverlayError::NotAttached { host: self.host });
        };
        document.insert_before(parent, self.host, Some(self.marker))?;
        document.remove_child(parent, self.marker)?;
        self.detaches += 1;
        tracing::debug!(host = ?self.host, origin = ?parent, "restored to origin");
        Ok(())
    }

    pub fn attach_count(&self) -> usize {
        self.attaches
    }

    pub fn detach_count(&self) -> usize {
        self.detaches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_then_detach_restores_position() {
        let doc = Document::new();
        let section = doc.create_element("section");
        doc.append_child(doc.body(), section).unwrap();
        let before = doc.create_element("p");
        let host = doc.create_element("overlay-host");
        let after = doc.create_element("p");
        for node in [before, host, after] {
            doc.append_child(section, node).unwrap();
        }
        let trailing = doc.create_element("footer");
        doc.append_child(doc.body(), trailing).unwrap();

        let mut ctl = AttachmentController::new(&doc, host);
        assert!(ctl.attach(&doc).unwrap());
        assert_eq!(doc.parent(host), Some(doc.body()));
        assert_eq!(doc.children(doc.body()).last(), Some(&host));
        assert_eq!(doc.children(section), vec![before, ctl.marker(), after]);

        ctl.detach(&doc).unwrap();
        assert_eq!(doc.children(section), vec![before, host, after]);
        assert_eq!(doc.children(doc.body()), vec![section, trailing]);
        assert_eq!(doc.parent(ctl.marker()), None);
    }

    #[test]
    fn second_attach_is_a_no_op() {
        let doc = Document::new();
        let host = doc.create_element("overlay-host");
        doc.append_child(doc.body(), host).unwrap();
        let spacer = doc.create_element("div");
        doc.append_child(doc.body(), spacer).unwrap();

        let mut ctl = AttachmentController::new(&doc, host);
        assert!(ctl.attach(&doc).unwrap());
        assert!(!ctl.attach(&doc).unwrap());
        assert_eq!(ctl.attach_count(), 1);
        assert_eq!(doc.children(doc.body()), vec![ctl.marker(), spacer, host]);

        ctl.detach(&doc).unwrap();
        assert_eq!(doc.children(doc.body()), vec![host, spacer]);
    }

    #[test]
    fn unmounted_host_is_left_alone() {
        let doc = Document::new();
        let host = doc.create_element("overlay-host");
        let mut ctl = AttachmentController::new(&doc, host);
        assert!(!ctl.attach(&doc).unwrap());
        assert_eq!(doc.parent(host), None);
        assert!(!ctl.is_attached(&doc));
    }

    #[test]
    fn detach_without_attach_is_an_error() {
        let doc = Document::new();
        let host = doc.create_element("overlay-host");
        doc.append_child(doc.body(), host).unwrap();
        let mut ctl = AttachmentController::new(&doc, host);
        assert_eq!(
            ctl.detach(&doc),
            Err(OverlayError::NotAttached { host })
        );
        assert_eq!(ctl.detach_count(), 0);
    }
}
