//! Terminal rendering of an arena document, plus input routing back into it.
//!
//! Normal content is laid out as a simple vertical flow: one row per text
//! line, elements as tall as their children. Overlay hosts never take space
//! in the flow. A host that is open (carries the `opened` attribute) and
//! sits directly under the body is painted last, on top of everything else:
//! backdrop first, then the bordered surface with the content zone inside.
//!
//! Every painted node gets a region in the [`LayoutMap`], so the next pointer
//! event can be hit-tested into a composed path. Input can arrive in bursts
//! with no frame in between; when the document changed since the last layout
//! (an overlay opened by a key earlier in the burst), the map is rebuilt
//! before the pointer event is translated.

use std::rc::Rc;

use crossterm::event::Event as TermEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use super::{Component, OverlayChrome};
use crate::constants::{BACKDROP_PART, CONTENT_PART, HOST_TAG, OVERLAY_PART};
use crate::dom::{Document, NodeId, NodeKind};
use crate::drivers::EventBridge;
use crate::layout::LayoutMap;
use crate::overlay::{OPENED_ATTR, WITH_BACKDROP_ATTR};
use crate::ui::UiFrame;

#[derive(Debug)]
pub struct DocumentView {
    document: Rc<Document>,
    layout: LayoutMap,
    bridge: EventBridge,
    chrome: OverlayChrome,
    /// Area and document revision the current `layout` was built from.
    laid_out: Option<(Rect, u64)>,
}

impl DocumentView {
    pub fn new(document: Rc<Document>) -> Self {
        Self {
            document,
            layout: LayoutMap::new(),
            bridge: EventBridge::new(),
            chrome: OverlayChrome::new(),
            laid_out: None,
        }
    }

    pub fn chrome_mut(&mut self) -> &mut OverlayChrome {
        &mut self.chrome
    }

    pub fn layout(&self) -> &LayoutMap {
        &self.layout
    }

    fn layout_is_stale(&self) -> Option<Rect> {
        match self.laid_out {
            Some((area, revision)) if revision != self.document.revision() => Some(area),
            _ => None,
        }
    }

    /// Rebuild the layout for `area` by painting into a throwaway buffer.
    fn relayout(&mut self, area: Rect) {
        tracing::trace!(?area, "layout stale; rebuilding before hit test");
        let mut scratch = Buffer::empty(area);
        self.render(&mut UiFrame::from_parts(area, &mut scratch), area);
    }

    fn is_host(&self, node: NodeId) -> bool {
        self.document.tag(node).as_deref() == Some(HOST_TAG)
    }

    /// Rows `node` occupies in the flow.
    fn measure(&self, node: NodeId) -> u16 {
        match self.document.kind(node) {
            Some(NodeKind::Text(text)) => text.lines().count().max(1) as u16,
            Some(NodeKind::Element { .. }) if self.is_host(node) => 0,
            Some(NodeKind::Element { .. }) | Some(NodeKind::Document) => self
                .document
                .children(node)
                .into_iter()
                .map(|child| self.measure(child))
                .fold(0u16, u16::saturating_add),
            Some(NodeKind::Marker) | None => 0,
        }
    }

    /// Paint `node` starting at the top of `area`; returns the rows used.
    fn paint_flow(&mut self, frame: &mut UiFrame<'_>, node: NodeId, area: Rect) -> u16 {
        let rows = self.measure(node).min(area.height);
        if rows == 0 {
            return 0;
        }
        let rect = Rect {
            height: rows,
            ..area
        };
        match self.document.kind(node) {
            Some(NodeKind::Text(text)) => {
                for (i, line) in text.lines().take(rows as usize).enumerate() {
                    frame.set_string(rect.x, rect.y + i as u16, line, Style::default());
                }
            }
            Some(NodeKind::Element { .. }) => {
                self.layout.set(node, rect);
                self.paint_children(frame, node, rect);
            }
            _ => {}
        }
        rows
    }

    fn paint_children(&mut self, frame: &mut UiFrame<'_>, node: NodeId, area: Rect) {
        let mut y = area.y;
        let bottom = area.y.saturating_add(area.height);
        for child in self.document.children(node) {
            if y >= bottom {
                break;
            }
            let remaining = Rect {
                y,
                height: bottom - y,
                ..area
            };
            y = y.saturating_add(self.paint_flow(frame, child, remaining));
        }
    }

    fn paint_open_host(&mut self, frame: &mut UiFrame<'_>, host: NodeId, area: Rect) {
        let doc = self.document.clone();
        if doc.has_attribute(host, WITH_BACKDROP_ATTR)
            && let Some(backdrop) = doc.find_part(host, BACKDROP_PART)
        {
            self.layout.set(backdrop, area);
            self.chrome.render_backdrop(frame, area);
        }
        let Some(surface) = doc.find_part(host, OVERLAY_PART) else {
            return;
        };
        let content = doc.find_part(surface, CONTENT_PART);
        let rows = content.map(|c| self.measure(c)).unwrap_or(0);
        let rect = self.chrome.rect_for(area, rows);
        self.layout.set(surface, rect);
        let inner = self.chrome.render_frame(frame, rect);
        if let Some(content) = content {
            self.layout.set(content, inner);
            self.paint_children(frame, content, inner);
        }
    }
}

impl Component for DocumentView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        self.layout.clear();
        self.laid_out = Some((area, self.document.revision()));
        if area.width == 0 || area.height == 0 {
            return;
        }
        let body = self.document.body();
        self.layout.set(body, area);
        self.paint_children(frame, body, area);
        for child in self.document.children(body) {
            if self.is_host(child) && self.document.has_attribute(child, OPENED_ATTR) {
                self.paint_open_host(frame, child, area);
            }
        }
    }

    /// Translate the terminal event and dispatch the result into the
    /// document. Returns whether anything was dispatched.
    fn handle_event(&mut self, event: &TermEvent) -> bool {
        if matches!(event, TermEvent::Mouse(_))
            && let Some(area) = self.layout_is_stale()
        {
            self.relayout(area);
        }
        let events = self.bridge.translate(&self.document, &self.layout, event);
        for dom_event in &events {
            self.document.dispatch(dom_event);
        }
        !events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Event, EventKind, Listener, Phase};
    use crate::overlay::OverlayHost;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use std::cell::Cell;

    fn page() -> (Rc<Document>, NodeId, OverlayHost) {
        let doc = Document::new();
        let main = doc.create_element("main");
        doc.append_child(doc.body(), main).unwrap();
        let title = doc.create_element("h1");
        doc.set_text(title, "Title").unwrap();
        doc.append_child(main, title).unwrap();
        let mut host = OverlayHost::new(&doc);
        doc.append_child(main, host.node()).unwrap();
        let footer = doc.create_element("p");
        doc.set_text(footer, "Footer").unwrap();
        doc.append_child(main, footer).unwrap();
        host.first_updated();
        let content = host.content_container().unwrap().node();
        doc.set_text(content, "Inside").unwrap();
        (doc, main, host)
    }

    fn area() -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: 60,
            height: 12,
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn closed_host_takes_no_space() {
        let (doc, main, host) = page();
        let mut view = DocumentView::new(doc.clone());
        let mut buf = Buffer::empty(area());
        view.render(&mut UiFrame::from_parts(area(), &mut buf), area());
        assert!(row_text(&buf, 0).starts_with("Title"));
        assert!(row_text(&buf, 1).starts_with("Footer"));
        assert_eq!(view.layout().get(main).map(|r| r.height), Some(2));
        assert_eq!(view.layout().get(host.surface()), None);
    }

    #[test]
    fn open_host_paints_on_top_and_hit_tests_inside() {
        let (doc, _, mut host) = page();
        host.set_with_backdrop(true).unwrap();
        host.set_opened(true).unwrap();
        let mut view = DocumentView::new(doc.clone());
        let mut buf = Buffer::empty(area());
        view.render(&mut UiFrame::from_parts(area(), &mut buf), area());

        let surface = view.layout().get(host.surface()).expect("surface painted");
        let path = view.layout().hit_path(&doc, surface.x + 1, surface.y + 1);
        assert!(path.contains(&host.surface()));
        let corner = view.layout().hit_path(&doc, 0, 0);
        assert_eq!(corner.first(), Some(&host.backdrop()));
        assert!(!corner.contains(&host.surface()));
        assert!(row_text(&buf, surface.y + 1).contains("Inside"));
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> TermEvent {
        TermEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn click(view: &mut DocumentView, column: u16, row: u16) {
        view.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), column, row));
        view.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), column, row));
    }

    #[test]
    fn click_after_unpainted_open_hits_the_new_box() {
        let (doc, _, mut host) = page();
        let outside = Rc::new(Cell::new(0));
        let listener = Listener::new({
            let outside = outside.clone();
            move |_event: &Event| outside.set(outside.get() + 1)
        });
        doc.add_event_listener(host.node(), EventKind::OutsideClick, Phase::Bubble, &listener);

        let mut view = DocumentView::new(doc.clone());
        let mut buf = Buffer::empty(area());
        view.render(&mut UiFrame::from_parts(area(), &mut buf), area());

        // opened by an earlier event in the same burst; no frame since
        host.set_opened(true).unwrap();
        let expected = OverlayChrome::new().rect_for(area(), 1);
        click(
            &mut view,
            expected.x + expected.width / 2,
            expected.y + expected.height / 2,
        );
        assert_eq!(outside.get(), 0);
        assert_eq!(view.layout().get(host.surface()), Some(expected));

        click(&mut view, 0, 0);
        assert_eq!(outside.get(), 1);
    }
}
