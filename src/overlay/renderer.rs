//! Hand-off of the content container to a caller-supplied renderer.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::dom::{Document, NodeId};

/// The node that receives renderer output. Its identity is fixed for the
/// lifetime of the host; only its children change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentContainer(NodeId);

impl ContentContainer {
    pub(crate) fn new(node: NodeId) -> Self {
        Self(node)
    }

    pub fn node(self) -> NodeId {
        self.0
    }
}

type ErasedRender = dyn Fn(&dyn Any, &Document, ContentContainer) -> bool;

/// Render callback invoked with the owner as its execution context.
///
/// The owner type is fixed when the renderer is built; an owner of another
/// type is reported and the call skipped.
#[derive(Clone)]
pub struct Renderer(Rc<ErasedRender>);

impl Renderer {
    pub fn new<O, F>(render: F) -> Self
    where
        O: Any,
        F: Fn(&O, &Document, ContentContainer) + 'static,
    {
        Self(Rc::new(move |owner: &dyn Any, document: &Document, container| {
            match owner.downcast_ref::<O>() {
                Some(owner) => {
                    render(owner, document, container);
                    true
                }
                None => {
                    tracing::warn!(
                        expected = std::any::type_name::<O>(),
                        "renderer owner has an unexpected type; skipping render"
                    );
                    false
                }
            }
        }))
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Renderer")
    }
}

#[derive(Debug, Default, Clone)]
pub struct RendererBinding {
    renderer: Option<Renderer>,
    owner: Option<Rc<dyn Any>>,
    invocations: usize,
}

impl RendererBinding {
    pub fn set_renderer(&mut self, renderer: Option<Renderer>) {
        self.renderer = renderer;
    }

    pub fn set_owner(&mut self, owner: Option<Rc<dyn Any>>) {
        self.owner = owner;
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn has_owner(&self) -> bool {
        self.owner.is_some()
    }

    /// Call the renderer once if renderer, owner and container are all
    /// present. Returns whether it ran.
    pub fn invoke(&mut self, document: &Document, container: Option<ContentContainer>) -> bool {
        let (Some(renderer), Some(owner), Some(container)) =
            (&self.renderer, &self.owner, container)
        else {
            tracing::trace!("render skipped: renderer, owner or container missing");
            return false;
        };
        let ran = (renderer.0)(&**owner, document, container);
        if ran {
            self.invocations += 1;
        }
        ran
    }

    pub fn invocations(&self) -> usize {
        self.invocations
    }
}
