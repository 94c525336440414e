use lav_engine::coords::Vec2;

use super::slider::Slider;
use crate::layout::calculator;
use crate::layout::scroll::{self, ScrollBars, MAX_SCROLL_RETRIES, SCROLLBAR_THICKNESS};
use crate::layout::{Axis, Scale, ScaleXY};
use crate::node::{NodeId, SCROLL_TAG};
use crate::tree::UiTree;

/// Container that grows scrollbars when its children overflow.
///
/// Per axis the scrollbar is either detached (no overflow) or attached as a
/// tagged child whose value pans the content.
#[derive(Debug, Clone)]
pub struct Pane {
    scroll_x: bool,
    scroll_y: bool,
    sensitivity: f32,
    bars: ScrollBars,
}

impl Default for Pane {
    fn default() -> Self {
        Self::new()
    }
}

impl Pane {
    /// Wheel sensitivity of pane scrollbars, in pixels per line.
    pub const SCROLL_SENSITIVITY: f32 = 20.0;

    pub fn new() -> Self {
        Self {
            scroll_x: true,
            scroll_y: true,
            sensitivity: Self::SCROLL_SENSITIVITY,
            bars: ScrollBars::default(),
        }
    }

    /// Which axes may scroll. Applied when the pane is created.
    pub fn scroll(mut self, horizontal: bool, vertical: bool) -> Self {
        self.scroll_x = horizontal;
        self.scroll_y = vertical;
        self
    }

    pub fn scroll_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    #[inline]
    pub fn bars(&self) -> ScrollBars {
        self.bars
    }

    #[inline]
    pub fn vertical_bar(&self) -> Option<NodeId> {
        self.bars.vertical
    }

    #[inline]
    pub fn horizontal_bar(&self) -> Option<NodeId> {
        self.bars.horizontal
    }
}

fn create_bar(tree: &mut UiTree, axis: Axis, sensitivity: f32) -> NodeId {
    let mut slider = Slider::scrollbar(axis);
    slider.set_sensitivity(sensitivity);
    let id = tree.create(slider);
    if let Some(node) = tree.get_mut(id) {
        node.custom_tag = SCROLL_TAG;
        node.layout.scale = match axis {
            Axis::X => ScaleXY::new(Scale::rel(1.0), Scale::px(SCROLLBAR_THICKNESS)),
            Axis::Y => ScaleXY::new(Scale::px(SCROLLBAR_THICKNESS), Scale::rel(1.0)),
        };
        node.layout.custom_index = true;
        node.visual.color = lav_engine::coords::Color::from_hex(0x1e1f22ff);
        node.name(format!("scroll-{}", if axis == Axis::X { "h" } else { "v" }));
    }
    id
}

pub(super) fn install(tree: &mut UiTree, id: NodeId, pane: &mut Pane) {
    if let Some(node) = tree.get_mut(id) {
        node.layout.scale = ScaleXY::px(200.0, 50.0);
    }
    if pane.scroll_y {
        pane.bars.vertical = Some(create_bar(tree, Axis::Y, pane.sensitivity));
    }
    if pane.scroll_x {
        pane.bars.horizontal = Some(create_bar(tree, Axis::X, pane.sensitivity));
    }
}

/// Attaches or detaches the scrollbar for `axis` to match `overflow`.
/// Returns whether the pane's geometry changed.
fn sync_bar(tree: &mut UiTree, pane: NodeId, bar: Option<NodeId>, overflow: f32) -> bool {
    let Some(bar) = bar else { return false };
    let attached = tree.parent(bar) == Some(pane);
    let mut changed = false;

    if overflow > 0.0 {
        if !attached {
            changed = tree.attach(pane, bar);
        }
        if let Some(s) = tree.get_mut(bar).and_then(|n| n.widget.as_slider_mut()) {
            s.set_range(0.0, overflow);
        }
    } else if attached {
        if let Some(s) = tree.get_mut(bar).and_then(|n| n.widget.as_slider_mut()) {
            s.set_value(0.0);
        }
        changed = tree.detach(pane, bar);
    }
    changed
}

fn bar_value(tree: &UiTree, pane: NodeId, bar: Option<NodeId>) -> f32 {
    bar.filter(|&b| tree.parent(b) == Some(pane))
        .and_then(|b| tree.get(b))
        .and_then(|n| n.widget().as_slider())
        .map_or(0.0, Slider::get_value)
}

/// Lays out the pane until its attached scrollbars match the overflow or
/// the retry cap is hit. With `virtual_height` the vertical overflow is
/// measured against content of that height instead of the children.
///
/// Returns the space the scrollbars take.
pub(super) fn settle(tree: &mut UiTree, id: NodeId, pane: &Pane, virtual_height: Option<f32>) -> Vec2 {
    let mut tries = 0;
    loop {
        let impact = scroll::place_scrollbars(tree, id, pane.bars);
        let mut overflow = calculator::layout_generic(tree, id, impact);
        if let Some(height) = virtual_height {
            let visible = tree.layout(id).map_or(0.0, |l| l.content_rect().size.y) - impact.y;
            overflow.y = height - visible;
        }
        tries += 1;

        // Attaching or detaching a bar changes the space left for content.
        let changed_x = sync_bar(tree, id, pane.bars.horizontal, overflow.x);
        let changed_y = sync_bar(tree, id, pane.bars.vertical, overflow.y);
        if !(changed_x || changed_y) || tries >= MAX_SCROLL_RETRIES {
            break;
        }
        log::trace!("pane {id}: scrollbars changed, re-running layout");
    }
    scroll::place_scrollbars(tree, id, pane.bars)
}

/// Current scroll position: the values of the attached scrollbars.
pub(super) fn scroll_offset(tree: &UiTree, id: NodeId, pane: &Pane) -> Vec2 {
    Vec2::new(
        bar_value(tree, id, pane.bars.horizontal),
        bar_value(tree, id, pane.bars.vertical),
    )
}

pub(super) fn layout(tree: &mut UiTree, id: NodeId, pane: &mut Pane) {
    settle(tree, id, pane, None);
    let offset = scroll_offset(tree, id, pane);
    scroll::offset_children(tree, id, offset);
}

/// Scrollbar of the pane that should take wheel input at `mouse`: the
/// horizontal one when the pointer is on it, otherwise the vertical one,
/// otherwise the horizontal one.
pub(crate) fn closest_bar(tree: &UiTree, id: NodeId, mouse: Vec2) -> Option<NodeId> {
    let pane = tree.get(id)?.widget().scroll_pane()?;
    let attached = |bar: Option<NodeId>| bar.filter(|&b| tree.parent(b) == Some(id));
    let h = attached(pane.bars.horizontal);
    let v = attached(pane.bars.vertical);

    let on_h = h.filter(|&b| tree.layout(b).is_some_and(|l| l.is_point_inside_view(mouse)));
    on_h.or(v).or(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutType;
    use crate::widgets::Widget;

    /// Pane of `size` at the origin, attached to the root, with `count`
    /// 100x50 children stacked vertically.
    fn pane_with_children(size: Vec2, count: usize) -> (UiTree, NodeId, Vec<NodeId>) {
        let mut t = UiTree::new();
        let p = t.create(Pane::new());
        t.add(t.root(), p);
        t.configure(p, |n| {
            n.kind(LayoutType::Vertical);
            n.layout.set_computed(Vec2::ZERO, size);
        });
        let kids = (0..count)
            .map(|_| {
                let c = t.create(Widget::Block);
                t.layout_mut(c).unwrap().scale = ScaleXY::px(100.0, 50.0);
                t.add(p, c);
                c
            })
            .collect();
        (t, p, kids)
    }

    fn bars(t: &UiTree, p: NodeId) -> ScrollBars {
        t.get(p).unwrap().widget().as_pane().unwrap().bars()
    }

    fn run_layout(t: &mut UiTree, p: NodeId) {
        crate::widgets::layout(t, p);
    }

    #[test]
    fn no_overflow_no_scrollbar() {
        let (mut t, p, _) = pane_with_children(Vec2::new(200.0, 200.0), 2);
        run_layout(&mut t, p);
        let b = bars(&t, p);
        assert!(!t.is_attached(b.vertical.unwrap()));
        assert!(!t.is_attached(b.horizontal.unwrap()));
    }

    #[test]
    fn overflow_attaches_vertical_bar_with_range() {
        // 3 x 50 tall in 100 tall: 50px overflow.
        let (mut t, p, _) = pane_with_children(Vec2::new(200.0, 100.0), 3);
        run_layout(&mut t, p);

        let v = bars(&t, p).vertical.unwrap();
        assert_eq!(t.parent(v), Some(p));
        let s = t.get(v).unwrap().widget().as_slider().unwrap();
        assert_eq!(s.range_bounds(), (0.0, 50.0));
        assert!(!t.is_attached(bars(&t, p).horizontal.unwrap()));

        // Scrollbars never count as flow children.
        assert_eq!(t.flow_children(p).len(), 3);
    }

    #[test]
    fn scroll_value_pans_content() {
        let (mut t, p, kids) = pane_with_children(Vec2::new(200.0, 100.0), 3);
        run_layout(&mut t, p);
        let before: Vec<f32> = kids.iter().map(|&k| t.layout(k).unwrap().computed_pos().y).collect();

        let v = bars(&t, p).vertical.unwrap();
        t.get_mut(v).unwrap().widget_mut().as_slider_mut().unwrap().set_value(25.0);
        run_layout(&mut t, p);

        for (i, &k) in kids.iter().enumerate() {
            assert_eq!(t.layout(k).unwrap().computed_pos().y, before[i] - 25.0);
        }
        let bar = t.layout(v).unwrap();
        assert_eq!(bar.computed_pos(), Vec2::new(180.0, 0.0));
    }

    #[test]
    fn layout_is_stable_once_attached() {
        let (mut t, p, _) = pane_with_children(Vec2::new(200.0, 100.0), 3);
        run_layout(&mut t, p);
        let first = calculator::overflow(&t, p, Vec2::new(SCROLLBAR_THICKNESS, 0.0));
        for _ in 0..3 {
            run_layout(&mut t, p);
        }
        let again = calculator::overflow(&t, p, Vec2::new(SCROLLBAR_THICKNESS, 0.0));
        assert!(first.y > 0.0 && again.y > 0.0);
        assert!(t.is_attached(bars(&t, p).vertical.unwrap()));
    }

    #[test]
    fn shrinking_content_detaches_and_resets_bar() {
        let (mut t, p, kids) = pane_with_children(Vec2::new(200.0, 100.0), 3);
        run_layout(&mut t, p);
        let v = bars(&t, p).vertical.unwrap();
        t.get_mut(v).unwrap().widget_mut().as_slider_mut().unwrap().set_value(40.0);

        t.remove(p, kids[2]);
        run_layout(&mut t, p);

        assert!(!t.is_attached(v));
        let s = t.get(v).unwrap().widget().as_slider().unwrap();
        assert_eq!(s.percentage(), 0.0);
        assert_eq!(t.layout(kids[0]).unwrap().computed_pos().y, 0.0);
    }

    #[test]
    fn disabled_axis_has_no_bar() {
        let mut t = UiTree::new();
        let p = t.create(Pane::new().scroll(false, true));
        let b = bars(&t, p);
        assert!(b.horizontal.is_none());
        assert!(b.vertical.is_some());
    }
}
