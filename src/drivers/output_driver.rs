use crate::ui::UiFrame;
use ratatui::backend::Backend;
use std::io;

/// Where frames go. `enter`/`exit` bracket the session (raw mode, alternate
/// screen) and must both be safe to call twice.
pub trait OutputDriver {
    type Backend: Backend;

    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}
