//! Scrollbar geometry for panes.
//!
//! Scrollbars are slider children tagged with [`SCROLL_TAG`]. Generic passes
//! skip them; this module places them against the pane's inner edges and
//! reports the space they take so the generic passes can shrink by it.

use lav_engine::coords::Vec2;

use super::{Axis, ScaleType};
use crate::node::{NodeId, SCROLL_TAG};
use crate::tree::UiTree;

/// Default scrollbar thickness in logical pixels.
pub const SCROLLBAR_THICKNESS: f32 = 20.0;

/// Scrollbars stack this far above their pane.
pub const SCROLLBAR_Z_OFFSET: u32 = 250;

/// Layout re-runs allowed after a scrollbar attaches or detaches.
pub const MAX_SCROLL_RETRIES: u32 = 2;

/// The scrollbars a pane may own.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ScrollBars {
    pub vertical: Option<NodeId>,
    pub horizontal: Option<NodeId>,
}

impl ScrollBars {
    pub fn get(&self, axis: Axis) -> Option<NodeId> {
        match axis {
            Axis::X => self.horizontal,
            Axis::Y => self.vertical,
        }
    }

    pub fn iter(self) -> impl Iterator<Item = NodeId> {
        self.vertical.into_iter().chain(self.horizontal)
    }
}

/// Bar thickness across its scroll axis: its PIXEL scale, or the default.
fn thickness(tree: &UiTree, bar: NodeId, across: Axis) -> f32 {
    match tree.layout(bar).map(|l| l.scale.get(across)) {
        Some(s) if s.kind == ScaleType::Px => s.value,
        _ => SCROLLBAR_THICKNESS,
    }
}

fn attached_to(tree: &UiTree, bar: Option<NodeId>, pane: NodeId) -> Option<NodeId> {
    bar.filter(|&b| {
        tree.parent(b) == Some(pane) && tree.get(b).is_some_and(|n| n.custom_tag() == SCROLL_TAG)
    })
}

/// Lays out the attached scrollbars of `pane`: the vertical one along the
/// right inner edge at full height, the horizontal one along the bottom
/// without the corner the vertical one takes.
///
/// Returns the space taken on each axis.
pub fn place_scrollbars(tree: &mut UiTree, pane: NodeId, bars: ScrollBars) -> Vec2 {
    let Some(p) = tree.layout(pane) else { return Vec2::ZERO };
    let inner = p.inner_rect();
    let z = p.z_index.saturating_add(SCROLLBAR_Z_OFFSET);
    let end = inner.end();
    let mut impact = Vec2::ZERO;

    if let Some(v) = attached_to(tree, bars.vertical, pane) {
        impact.x = thickness(tree, v, Axis::X);
        if let Some(l) = tree.layout_mut(v) {
            l.set_computed(
                Vec2::new(end.x - impact.x, inner.origin.y),
                Vec2::new(impact.x, inner.size.y).max(Vec2::ZERO),
            );
            l.z_index = z;
            l.custom_index = true;
        }
    }

    if let Some(h) = attached_to(tree, bars.horizontal, pane) {
        impact.y = thickness(tree, h, Axis::Y);
        if let Some(l) = tree.layout_mut(h) {
            l.set_computed(
                Vec2::new(inner.origin.x, end.y - impact.y),
                Vec2::new(inner.size.x - impact.x, impact.y).max(Vec2::ZERO),
            );
            l.z_index = z;
            l.custom_index = true;
        }
    }

    impact
}

/// Pans every non-scrollbar child of `pane` by `-offset`.
pub fn offset_children(tree: &mut UiTree, pane: NodeId, offset: Vec2) {
    if offset == Vec2::ZERO {
        return;
    }
    for child in tree.flow_children(pane) {
        if let Some(l) = tree.layout_mut(child) {
            l.computed_pos -= offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Edges, Scale, ScaleXY};
    use crate::widgets::Widget;

    fn bar(tree: &mut UiTree, pane: NodeId, axis: Axis) -> NodeId {
        let b = tree.create(Widget::Block);
        let node = tree.get_mut(b).unwrap();
        node.custom_tag = SCROLL_TAG;
        node.layout.scale = match axis {
            Axis::X => ScaleXY::new(Scale::rel(1.0), Scale::px(SCROLLBAR_THICKNESS)),
            Axis::Y => ScaleXY::new(Scale::px(SCROLLBAR_THICKNESS), Scale::rel(1.0)),
        };
        tree.attach(pane, b);
        b
    }

    #[test]
    fn bars_hug_inner_edges() {
        let mut t = UiTree::new();
        let pane = t.create(Widget::Block);
        t.add(t.root(), pane);
        {
            let l = t.layout_mut(pane).unwrap();
            l.set_computed(Vec2::new(10.0, 10.0), Vec2::new(200.0, 100.0));
            l.border = Edges::all(2);
            l.z_index = 3;
        }
        let v = bar(&mut t, pane, Axis::Y);
        let h = bar(&mut t, pane, Axis::X);

        let impact = place_scrollbars(&mut t, pane, ScrollBars { vertical: Some(v), horizontal: Some(h) });
        assert_eq!(impact, Vec2::new(20.0, 20.0));

        let lv = t.layout(v).unwrap();
        assert_eq!(lv.computed_pos(), Vec2::new(188.0, 12.0));
        assert_eq!(lv.computed_scale(), Vec2::new(20.0, 96.0));
        assert_eq!(lv.z_index, 253);

        let lh = t.layout(h).unwrap();
        assert_eq!(lh.computed_pos(), Vec2::new(12.0, 88.0));
        assert_eq!(lh.computed_scale(), Vec2::new(176.0, 20.0));
    }

    #[test]
    fn detached_bars_take_no_space() {
        let mut t = UiTree::new();
        let pane = t.create(Widget::Block);
        let v = t.create(Widget::Block);
        let impact = place_scrollbars(&mut t, pane, ScrollBars { vertical: Some(v), horizontal: None });
        assert_eq!(impact, Vec2::ZERO);
    }

    #[test]
    fn pixel_scale_overrides_thickness() {
        let mut t = UiTree::new();
        let pane = t.create(Widget::Block);
        t.layout_mut(pane).unwrap().set_computed(Vec2::ZERO, Vec2::splat(100.0));
        let v = bar(&mut t, pane, Axis::Y);
        t.layout_mut(v).unwrap().scale = ScaleXY::px(12.0, 1.0);
        let impact = place_scrollbars(&mut t, pane, ScrollBars { vertical: Some(v), horizontal: None });
        assert_eq!(impact, Vec2::new(12.0, 0.0));
    }

    #[test]
    fn offset_skips_scrollbars() {
        let mut t = UiTree::new();
        let pane = t.create(Widget::Block);
        let c = t.create(Widget::Block);
        t.add(pane, c);
        let v = bar(&mut t, pane, Axis::Y);
        t.layout_mut(c).unwrap().set_computed(Vec2::new(0.0, 50.0), Vec2::splat(10.0));
        t.layout_mut(v).unwrap().set_computed(Vec2::new(0.0, 50.0), Vec2::splat(10.0));

        offset_children(&mut t, pane, Vec2::new(0.0, 25.0));
        assert_eq!(t.layout(c).unwrap().computed_pos(), Vec2::new(0.0, 25.0));
        assert_eq!(t.layout(v).unwrap().computed_pos(), Vec2::new(0.0, 50.0));
    }
}
