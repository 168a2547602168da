use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear};

use crate::layout::centered_rect;
use crate::ui::UiFrame;

/// Visual treatment of an open overlay in the terminal: an optional dimmed
/// backdrop and a bordered box. Placement is a plain centered box; the
/// overlay core itself has no notion of position.
#[derive(Debug, Clone)]
pub struct OverlayChrome {
    title: String,
    width: u16,
    min_height: u16,
    bg: Color,
}

impl OverlayChrome {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            width: 48,
            min_height: 5,
            bg: Color::Black,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    pub fn set_bg(&mut self, bg: Color) {
        self.bg = bg;
    }

    /// Box for `content_rows` lines of content plus the border.
    pub fn rect_for(&self, area: Rect, content_rows: u16) -> Rect {
        let height = content_rows.saturating_add(2).max(self.min_height);
        centered_rect(area, self.width, height)
    }

    /// Dim whatever the page painted under `area`.
    pub fn render_backdrop(&self, frame: &mut UiFrame<'_>, area: Rect) {
        frame.set_style(area, Style::default().add_modifier(Modifier::DIM));
    }

    /// Clear `rect`, draw the border and return the inner content area.
    pub fn render_frame(&self, frame: &mut UiFrame<'_>, rect: Rect) -> Rect {
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .style(Style::default().bg(self.bg));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        inner
    }
}

impl Default for OverlayChrome {
    fn default() -> Self {
        Self::new()
    }
}
