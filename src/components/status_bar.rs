use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::overlay::HostStats;
use crate::ui::UiFrame;

/// Bottom line showing whether the overlay is open, a key hint, and the
/// host's attach/detach/render counters flush right.
#[derive(Debug)]
pub struct StatusBar {
    opened: bool,
    stats: HostStats,
    hint: String,
    style: Style,
}

impl StatusBar {
    pub fn new(hint: impl Into<String>) -> Self {
        Self {
            opened: false,
            stats: HostStats::default(),
            hint: hint.into(),
            style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn update(&mut self, opened: bool, stats: HostStats) {
        self.opened = opened;
        self.stats = stats;
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn state_label(&self) -> String {
        let state = if self.opened { "open" } else { "closed" };
        if self.hint.is_empty() {
            format!(" {state}")
        } else {
            format!(" {state} | {}", self.hint)
        }
    }

    fn counters_label(&self) -> String {
        let HostStats {
            attaches,
            detaches,
            renders,
            listeners_active,
        } = self.stats;
        let listening = if listeners_active { " *" } else { "" };
        format!("attach {attaches} detach {detaches} render {renders}{listening} ")
    }
}

impl super::Component for StatusBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        frame.render_widget(ratatui::widgets::Clear, area);
        frame.set_style(area, self.style);
        let counters = self.counters_label();
        let counters_width = counters.chars().count() as u16;
        // counters win when the line is too narrow for both
        let split = area.right().saturating_sub(counters_width).max(area.x);
        let left = Rect {
            width: split - area.x,
            ..area
        };
        if left.width > 0 {
            let label = self.state_label();
            let cut: String = label.chars().take(left.width as usize).collect();
            frame.set_string(left.x, left.y, &cut, self.style);
        }
        frame.set_string(split, area.y, &counters, self.style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use ratatui::buffer::Buffer;

    fn line(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect()
    }

    fn draw(bar: &mut StatusBar, width: u16) -> String {
        let area = Rect {
            x: 0,
            y: 0,
            width,
            height: 1,
        };
        let mut buf = Buffer::empty(area);
        bar.render(&mut UiFrame::from_parts(area, &mut buf), area);
        line(&buf)
    }

    #[test]
    fn shows_state_and_counters() {
        let mut bar = StatusBar::new("Esc dismiss");
        bar.update(
            true,
            HostStats {
                attaches: 2,
                detaches: 1,
                renders: 2,
                listeners_active: true,
            },
        );
        let text = draw(&mut bar, 60);
        assert!(text.starts_with(" open | Esc dismiss"));
        assert!(text.ends_with("attach 2 detach 1 render 2 * "));
    }

    #[test]
    fn narrow_line_keeps_the_counters() {
        let mut bar = StatusBar::new("a long hint that cannot fit");
        let text = draw(&mut bar, 30);
        assert!(text.ends_with("attach 0 detach 0 render 0 "));
        assert!(text.starts_with(" cl"));
    }
}
