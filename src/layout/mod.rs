//! Screen regions for document nodes and hit-testing against them.

use ratatui::prelude::Rect;
use std::collections::BTreeMap;

use crate::dom::{Document, NodeId};

/// Painted regions in paint order. Later entries sit on top of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct LayoutMap {
    order: Vec<NodeId>,
    regions: BTreeMap<NodeId, Rect>,
}

impl LayoutMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.regions.clear();
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.order.clone()
    }

    /// Record `rect` for `id`. Re-setting a node moves it to the top.
    pub fn set(&mut self, id: NodeId, rect: Rect) {
        if self.regions.insert(id, rect).is_some() {
            self.order.retain(|o| *o != id);
        }
        self.order.push(id);
    }

    pub fn get(&self, id: NodeId) -> Option<Rect> {
        self.regions.get(&id).copied()
    }

    /// Topmost node whose region contains the cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<NodeId> {
        self.order.iter().rev().copied().find(|id| {
            self.regions
                .get(id)
                .is_some_and(|rect| rect_contains(*rect, column, row))
        })
    }

    /// Composed path for a pointer event at the cell: the topmost hit node
    /// and its ancestors. Cells outside every region target the body.
    pub fn hit_path(&self, document: &Document, column: u16, row: u16) -> Vec<NodeId> {
        let target = self.hit_test(column, row).unwrap_or(document.body());
        document.path_to_root(target)
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

/// Center a box of the preferred size inside `area`, shrinking it when the
/// area is smaller.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = area.width.min(width).max(1);
    let height = area.height.min(height).max(1);
    let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_regions_win_hit_tests() {
        let doc = Document::new();
        let page = doc.create_element("main");
        let dialog = doc.create_element("div");
        doc.append_child(doc.body(), page).unwrap();
        doc.append_child(doc.body(), dialog).unwrap();
        let mut map = LayoutMap::new();
        map.set(
            page,
            Rect {
                x: 0,
                y: 0,
                width: 20,
                height: 10,
            },
        );
        map.set(
            dialog,
            Rect {
                x: 5,
                y: 2,
                width: 6,
                height: 3,
            },
        );
        assert_eq!(map.hit_test(6, 3), Some(dialog));
        assert_eq!(map.hit_test(1, 1), Some(page));
        assert_eq!(map.hit_test(50, 50), None);
        assert_eq!(map.ids(), vec![page, dialog]);
        assert_eq!(
            map.hit_path(&doc, 6, 3),
            vec![dialog, doc.body(), doc.root()]
        );
        assert_eq!(map.hit_path(&doc, 50, 50), vec![doc.body(), doc.root()]);
    }

    #[test]
    fn rect_contains_edge_cases() {
        let r = Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 5,
        };
        assert!(!rect_contains(r, 0, 0));
        let r2 = Rect {
            x: 1,
            y: 1,
            width: 3,
            height: 3,
        };
        assert!(rect_contains(r2, 1, 1));
        assert!(!rect_contains(r2, 4, 1));
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 4,
        };
        let r = centered_rect(area, 40, 8);
        assert_eq!(r, area);
        let r2 = centered_rect(
            Rect {
                x: 0,
                y: 0,
                width: 80,
                height: 24,
            },
            40,
            8,
        );
        assert_eq!((r2.x, r2.y, r2.width, r2.height), (20, 8, 40, 8));
    }
}
