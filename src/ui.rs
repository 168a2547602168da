//! Clipped drawing surface handed to components.
//!
//! Layout rectangles come from the document flow and from the overlay box,
//! and either can run past the edge of a small terminal. `ratatui::Buffer`
//! panics on out-of-range writes, so components only draw through
//! [`UiFrame`], which intersects every request with the visible area first.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Draw into an offscreen buffer, e.g. to rebuild layout without
    /// touching the terminal.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    fn visible(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        (clipped.width > 0 && clipped.height > 0).then_some(clipped)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        if let Some(clipped) = self.visible(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Apply `style` to every visible cell of `rect`, keeping the symbols.
    pub fn set_style(&mut self, rect: Rect, style: Style) {
        if let Some(clipped) = self.visible(rect) {
            self.buffer.set_style(clipped, style);
        }
    }

    /// Write one line of text starting at `(x, y)`, cut at the right edge of
    /// the frame. Returns the number of cells written.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let Some(row) = self.visible(Rect {
            x,
            y,
            width: self.area.right().saturating_sub(x),
            height: 1,
        }) else {
            return 0;
        };
        if row.x != x {
            return 0;
        }
        let (end, _) = self
            .buffer
            .set_stringn(x, y, text, row.width as usize, style);
        end - x
    }
}
