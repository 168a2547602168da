//! Arena document model.
//!
//! `Document` owns every node in a flat arena addressed by [`NodeId`]. Nodes
//! are never freed; detaching a node only clears its parent link, so ids stay
//! valid for the lifetime of the document. This is what lets the overlay host
//! keep a stable placeholder marker and content container across open/close
//! cycles. Content that is rewritten on every open should go through
//! [`Document::set_text`], which updates an existing text child in place
//! instead of allocating a new node.
//!
//! All mutation goes through `&self` with short-lived interior borrows. Event
//! dispatch snapshots listeners before calling them, so callbacks are free to
//! mutate the tree or dispatch further events.

pub mod event;
pub mod listeners;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub use event::{DismissDetail, Event, EventKind};
pub use listeners::{Listener, Phase};

use crate::error::DomError;
use listeners::ListenerRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element {
        tag: String,
        part: Option<String>,
        attributes: BTreeMap<String, String>,
    },
    Text(String),
    /// Inert position marker. Never painted and never hit-tested.
    Marker,
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
struct Tree {
    nodes: Vec<NodeData>,
    revision: u64,
}

impl Tree {
    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn node(&self, id: NodeId) -> Result<&NodeData, DomError> {
        self.nodes.get(id.index()).ok_or(DomError::MissingNode(id))
    }

    /// Every mutation goes through here, which is what keeps `revision`
    /// honest.
    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.revision = self.revision.wrapping_add(1);
        self.nodes
            .get_mut(id.index())
            .ok_or(DomError::MissingNode(id))
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(id.index()).and_then(|n| n.parent);
        }
        false
    }

    fn unlink(&mut self, child: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|c| *c != child);
        self.node_mut(child)?.parent = None;
        Ok(())
    }
}

pub struct Document {
    tree: RefCell<Tree>,
    listeners: RefCell<ListenerRegistry>,
    root: NodeId,
    body: NodeId,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tree.borrow().nodes.len())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl Document {
    /// Create a document with a root node and a `body` element, the top-level
    /// presentation layer overlays are moved into while open.
    pub fn new() -> Rc<Self> {
        let mut tree = Tree::default();
        let root = tree.push(NodeKind::Document);
        let body = tree.push(element_kind("body", None));
        tree.nodes[body.index()].parent = Some(root);
        tree.nodes[root.index()].children.push(body);
        Rc::new(Self {
            tree: RefCell::new(tree),
            listeners: RefCell::new(ListenerRegistry::default()),
            root,
            body,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&self, tag: &str) -> NodeId {
        self.tree.borrow_mut().push(element_kind(tag, None))
    }

    /// Create an element carrying a `part` name so it can be found again with
    /// [`Document::find_part`].
    pub fn create_part(&self, tag: &str, part: &str) -> NodeId {
        self.tree.borrow_mut().push(element_kind(tag, Some(part)))
    }

    pub fn create_text(&self, text: impl Into<String>) -> NodeId {
        self.tree.borrow_mut().push(NodeKind::Text(text.into()))
    }

    pub fn create_marker(&self) -> NodeId {
        self.tree.borrow_mut().push(NodeKind::Marker)
    }

    /// Number of nodes ever created, attached or not.
    pub fn node_count(&self) -> usize {
        self.tree.borrow().nodes.len()
    }

    /// Counter bumped by every structural, text or attribute change. Painters
    /// compare it against the value they laid out with.
    pub fn revision(&self) -> u64 {
        self.tree.borrow().revision
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.tree.borrow().node(node).ok().map(|n| n.kind.clone())
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        match self.tree.borrow().node(node).ok()?.kind {
            NodeKind::Element { ref tag, .. } => Some(tag.clone()),
            _ => None,
        }
    }

    pub fn part(&self, node: NodeId) -> Option<String> {
        match self.tree.borrow().node(node).ok()?.kind {
            NodeKind::Element { ref part, .. } => part.clone(),
            _ => None,
        }
    }

    pub fn is_marker(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Some(NodeKind::Marker))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().node(node).ok()?.parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .borrow()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// `node` followed by each of its ancestors, ending at the topmost one.
    pub fn path_to_root(&self, node: NodeId) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let mut path = Vec::new();
        let mut cursor = tree.node(node).ok().map(|_| node);
        while let Some(id) = cursor {
            path.push(id);
            cursor = tree.nodes.get(id.index()).and_then(|n| n.parent);
        }
        path
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.borrow().is_inclusive_ancestor(ancestor, node)
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference`, or last when
    /// `reference` is `None`. A child already in the tree is moved.
    pub fn insert_before(
        &self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        let mut tree = self.tree.borrow_mut();
        tree.node(parent)?;
        tree.node(child)?;
        if tree.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyCycle { parent, child });
        }
        if let Some(reference) = reference {
            if tree.node(reference)?.parent != Some(parent) {
                return Err(DomError::NotAChild {
                    parent,
                    child: reference,
                });
            }
            if reference == child {
                return Ok(());
            }
        }
        tree.unlink(child)?;
        let siblings = &mut tree.node_mut(parent)?.children;
        let index = reference
            .and_then(|r| siblings.iter().position(|c| *c == r))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        tree.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut tree = self.tree.borrow_mut();
        if tree.node(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        tree.unlink(child)
    }

    pub fn clear_children(&self, node: NodeId) -> Result<(), DomError> {
        let mut tree = self.tree.borrow_mut();
        let children = std::mem::take(&mut tree.node_mut(node)?.children);
        for child in children {
            tree.node_mut(child)?.parent = None;
        }
        Ok(())
    }

    /// Replace the children of `node` with a single text node. When that is
    /// already the shape of `node`, the existing text node is rewritten and
    /// its id returned.
    pub fn set_text(&self, node: NodeId, text: impl Into<String>) -> Result<NodeId, DomError> {
        let text = text.into();
        {
            let mut tree = self.tree.borrow_mut();
            let only = match tree.node(node)?.children.as_slice() {
                &[only] => Some(only),
                _ => None,
            };
            if let Some(only) = only
                && let NodeKind::Text(existing) = &mut tree.node_mut(only)?.kind
            {
                *existing = text;
                return Ok(only);
            }
        }
        self.clear_children(node)?;
        let text = self.create_text(text);
        self.append_child(node, text)?;
        Ok(text)
    }

    /// Concatenated text of every descendant text node, in tree order.
    pub fn text_content(&self, node: NodeId) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Ok(data) = tree.node(id) else {
                continue;
            };
            if let NodeKind::Text(text) = &data.kind {
                out.push_str(text);
            }
            stack.extend(data.children.iter().rev());
        }
        out
    }

    /// Depth-first search below (and including) `scope` for an element whose
    /// part name matches.
    pub fn find_part(&self, scope: NodeId, part: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let mut stack = vec![scope];
        while let Some(id) = stack.pop() {
            let data = tree.node(id).ok()?;
            if let NodeKind::Element { part: Some(p), .. } = &data.kind
                && p == part
            {
                return Some(id);
            }
            stack.extend(data.children.iter().rev());
        }
        None
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let mut tree = self.tree.borrow_mut();
        if let NodeKind::Element { attributes, .. } = &mut tree.node_mut(node)?.kind {
            attributes.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), DomError> {
        let mut tree = self.tree.borrow_mut();
        if let NodeKind::Element { attributes, .. } = &mut tree.node_mut(node)?.kind {
            attributes.remove(name);
        }
        Ok(())
    }

    /// Set or remove a valueless boolean attribute.
    pub fn toggle_attribute(&self, node: NodeId, name: &str, on: bool) -> Result<(), DomError> {
        if on {
            self.set_attribute(node, name, "")
        } else {
            self.remove_attribute(node, name)
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        match &self.tree.borrow().node(node).ok()?.kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).cloned(),
            _ => None,
        }
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Register `listener` on `target`. Returns `false` when the exact same
    /// registration already exists.
    pub fn add_event_listener(
        &self,
        target: NodeId,
        kind: EventKind,
        phase: Phase,
        listener: &Listener,
    ) -> bool {
        self.listeners
            .borrow_mut()
            .add(target, kind, phase, listener.clone())
    }

    /// Returns `false` when nothing matched.
    pub fn remove_event_listener(
        &self,
        target: NodeId,
        kind: EventKind,
        phase: Phase,
        listener: &Listener,
    ) -> bool {
        self.listeners
            .borrow_mut()
            .remove(target, kind, phase, listener)
    }

    pub fn add_document_listener(&self, kind: EventKind, phase: Phase, listener: &Listener) -> bool {
        self.add_event_listener(self.root, kind, phase, listener)
    }

    pub fn remove_document_listener(
        &self,
        kind: EventKind,
        phase: Phase,
        listener: &Listener,
    ) -> bool {
        self.remove_event_listener(self.root, kind, phase, listener)
    }

    /// Total number of registrations across all targets.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn document_listener_count(&self) -> usize {
        self.listeners.borrow().count_for(self.root)
    }

    /// Dispatch an input event along its composed path.
    ///
    /// Capture listeners run from the document down to the target, then bubble
    /// listeners from the target back up. The document is always the outermost stop even when the path
    /// omits it. Listeners are snapshotted per stop, and a listener removed
    /// by an earlier callback does not run.
    pub fn dispatch(&self, event: &Event) {
        let mut path = event.composed_path().to_vec();
        if path.last() != Some(&self.root) {
            path.push(self.root);
        }
        let capture = path.iter().rev().map(|id| (*id, Phase::Capture));
        let bubble = path.iter().map(|id| (*id, Phase::Bubble));
        for (target, phase) in capture.chain(bubble).collect::<Vec<_>>() {
            let snapshot = self
                .listeners
                .borrow()
                .matching(target, event.kind(), phase);
            for listener in snapshot {
                if event.propagation_stopped() {
                    return;
                }
                let live = self
                    .listeners
                    .borrow()
                    .contains(target, event.kind(), phase, &listener);
                if live {
                    listener.call(event);
                }
            }
            if event.propagation_stopped() {
                return;
            }
        }
    }

    /// Dispatch `event` with `target` as its origin, deriving the path from
    /// the target's current ancestry.
    pub fn dispatch_at(&self, target: NodeId, mut event: Event) -> Event {
        event.set_composed_path(self.path_to_root(target));
        self.dispatch(&event);
        event
    }
}

fn element_kind(tag: &str, part: Option<&str>) -> NodeKind {
    NodeKind::Element {
        tag: tag.to_string(),
        part: part.map(str::to_string),
        attributes: BTreeMap::new(),
    }
}
