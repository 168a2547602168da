//! Overlay host over an arena document, with a terminal front-end.
//!
//! The core lives in [`dom`] and [`overlay`]: a small document tree with
//! capture/bubble event dispatch, and the host that reparents itself to the
//! body while open, watches document input for outside clicks and Escape, and
//! hands its content container to a renderer. Everything else ([`components`],
//! [`drivers`], [`layout`], [`ui`]) puts that document on a terminal.

pub mod components;
pub mod constants;
pub mod dom;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod layout;
pub mod overlay;
pub mod tracing_sub;
pub mod ui;

pub use dom::{Document, Event, EventKind, Listener, NodeId, Phase};
pub use error::{DomError, OverlayError};
pub use overlay::{HostStats, OverlayHost, Renderer, Transition};
