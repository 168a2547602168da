use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod document_view;
pub mod overlay_chrome;
pub mod status_bar;

pub use document_view::DocumentView;
pub use overlay_chrome::OverlayChrome;
pub use status_bar::StatusBar;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect);

    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }
}
