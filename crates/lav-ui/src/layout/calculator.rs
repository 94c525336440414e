//! Stateless layout passes for generic (flow) parents.
//!
//! Each pass takes the parent id and a `shrink` vector: space on each axis
//! reserved inside the parent's content box (scrollbars, split handles).
//! Children tagged as scrollbars are never touched here.

use lav_engine::coords::Vec2;

use super::{grid, Align, Axis, LayoutIssue, LayoutType, Position, ScaleType, Spacing};
use crate::node::NodeId;
use crate::tree::UiTree;

const AXES: [Axis; 2] = [Axis::X, Axis::Y];

/// Available content extent of `parent` after `shrink`.
fn available(tree: &UiTree, parent: NodeId, shrink: Vec2) -> Option<(Vec2, Vec2)> {
    let content = tree.layout(parent)?.content_rect();
    Some((content.origin, (content.size - shrink).max(Vec2::ZERO)))
}

fn label(tree: &UiTree, id: NodeId) -> String {
    tree.get(id).map(|n| n.label()).unwrap_or_else(|| id.to_string())
}

// ── scale ─────────────────────────────────────────────────────────────────

/// Resolves `computed_scale` for every flow child of `parent`.
///
/// PIXEL, RELATIVE and FIT resolve first; FILL children then split what is
/// left along the flow axis. Across the flow axis FILL takes the whole
/// content extent.
pub fn resolve_scale(tree: &mut UiTree, parent: NodeId, shrink: Vec2) {
    let Some(p) = tree.layout(parent) else { return };
    if p.kind == LayoutType::Grid {
        grid::resolve_scale(tree, parent, shrink);
        return;
    }
    let flow = p.kind.flow_axis();
    let Some((_, avail)) = available(tree, parent, shrink) else { return };
    let children = tree.flow_children(parent);

    let mut used = 0.0;
    let mut fills = Vec::new();

    for &child in &children {
        let Some(l) = tree.layout(child) else { continue };
        let (scale, margin) = (l.scale, l.margin);
        let mut size = Vec2::ZERO;

        for axis in AXES {
            let s = scale.get(axis);
            let m = margin.along(axis);
            let extent = match s.kind {
                ScaleType::Px => s.value,
                ScaleType::Rel => {
                    if s.value > 0.0 && s.value <= 1.0 {
                        axis.get(avail) * s.value - m
                    } else {
                        tree.report_issue(LayoutIssue::RelativeOutOfRange {
                            node: label(tree, child),
                            value: s.value,
                        });
                        0.0
                    }
                }
                ScaleType::Fit => fit_extent(tree, child, axis),
                ScaleType::Fill if axis == flow => {
                    fills.push(child);
                    0.0
                }
                ScaleType::Fill => axis.get(avail) - m,
                ScaleType::Fr => {
                    tree.report_issue(LayoutIssue::FrOutsideGrid { node: label(tree, child) });
                    0.0
                }
            };
            axis.set(&mut size, extent.max(0.0));
            if axis == flow && s.kind != ScaleType::Fill {
                used += axis.get(size) + m;
            }
        }

        if let Some(l) = tree.layout_mut(child) {
            l.computed_scale = size;
        }
    }

    if fills.is_empty() {
        return;
    }
    let share = ((flow.get(avail) - used) / fills.len() as f32).max(0.0);
    for child in fills {
        if let Some(l) = tree.layout_mut(child) {
            let extent = (share - l.margin.along(flow)).max(0.0);
            flow.set(&mut l.computed_scale, extent);
        }
    }
}

/// Smallest extent of `id` on `axis` that wraps its own children, padding
/// and border included. Children must be PIXEL or FIT on that axis.
pub fn fit_extent(tree: &UiTree, id: NodeId, axis: Axis) -> f32 {
    let Some(l) = tree.layout(id) else { return 0.0 };
    if l.kind == LayoutType::Grid {
        tree.report_issue(LayoutIssue::FitInGrid { node: label(tree, id) });
        return 0.0;
    }
    let children = tree.flow_children(id);
    if children.is_empty() {
        tree.report_issue(LayoutIssue::FitWithoutChildren { node: label(tree, id) });
        return 0.0;
    }

    let flow = l.kind.flow_axis();
    let mut acc: f32 = 0.0;
    for child in children {
        let Some(cl) = tree.layout(child) else { continue };
        let s = cl.scale.get(axis);
        let inner = match s.kind {
            ScaleType::Px => s.value,
            ScaleType::Fit => fit_extent(tree, child, axis),
            ScaleType::Fill => {
                tree.report_issue(LayoutIssue::FitWithFill { node: label(tree, id), child: label(tree, child) });
                0.0
            }
            ScaleType::Rel | ScaleType::Fr => {
                tree.report_issue(LayoutIssue::FitChildNotPixel {
                    node: label(tree, id),
                    child: label(tree, child),
                });
                0.0
            }
        };
        let full = inner + cl.margin.along(axis);
        if axis == flow {
            acc += full;
        } else {
            acc = acc.max(full);
        }
    }
    acc + l.padding.along(axis) + l.border.along(axis)
}

// ── position ──────────────────────────────────────────────────────────────

/// Leading push and gap between children for the parent's spacing rule.
fn spacing_offsets(spacing: Spacing, slack: f32, count: usize) -> (f32, f32) {
    if slack <= 0.0 || count == 0 {
        return (0.0, 0.0);
    }
    match spacing {
        Spacing::Tight => (0.0, 0.0),
        Spacing::EvenNoGap if count == 1 => (0.0, 0.0),
        Spacing::EvenNoGap => (0.0, slack / (count - 1) as f32),
        Spacing::EvenGap => {
            let gap = slack / (count + 1) as f32;
            (gap, gap)
        }
    }
}

/// Resolves `computed_pos` for every flow child of `parent`.
///
/// Children advance a cursor along the flow axis from the content-box
/// origin. With `wrap`, a child that would cross the content end starts a
/// new line, offset across by the largest child of the finished line. The
/// first child of a line never wraps. An absolute position on an axis
/// replaces the cursor there and does not advance it.
pub fn resolve_position(tree: &mut UiTree, parent: NodeId, shrink: Vec2) {
    let Some(p) = tree.layout(parent) else { return };
    if p.kind == LayoutType::Grid {
        grid::place_cells(tree, parent, shrink);
        return;
    }
    let (flow, wrap, spacing) = (p.kind.flow_axis(), p.wrap, p.spacing);
    let cross = flow.other();
    let Some((origin, avail)) = available(tree, parent, shrink) else { return };
    let children = tree.flow_children(parent);

    let (mut cursor, gap) = if wrap {
        (0.0, 0.0)
    } else {
        let mut total = 0.0;
        let mut count = 0;
        for &c in &children {
            if let Some(l) = tree.layout(c) {
                if l.pos.get(flow) == Position::Computed {
                    total += flow.get(l.computed_scale) + l.margin.along(flow);
                    count += 1;
                }
            }
        }
        spacing_offsets(spacing, flow.get(avail) - total, count)
    };
    let mut line = 0.0;
    let mut line_extent: f32 = 0.0;
    let mut line_items = 0;

    for child in children {
        let Some(l) = tree.layout_mut(child) else { continue };
        let full = l.computed_scale + l.margin.sum();
        let start = l.margin.start();

        let along = match l.pos.get(flow) {
            Position::Absolute(v) => v,
            Position::Computed => {
                if wrap && line_items > 0 && cursor + flow.get(full) > flow.get(avail) {
                    line += line_extent;
                    cursor = 0.0;
                    line_extent = 0.0;
                    line_items = 0;
                }
                let at = cursor + flow.get(start);
                cursor += flow.get(full) + gap;
                line_extent = line_extent.max(cross.get(full));
                line_items += 1;
                at
            }
        };
        let across = match l.pos.get(cross) {
            Position::Absolute(v) => v,
            Position::Computed => line + cross.get(start),
        };

        l.computed_pos = origin + flow.compose(along, across);
    }
}

// ── overflow + alignment ──────────────────────────────────────────────────

/// How far the children's full boxes reach past the parent's content end.
/// Positive on an axis means the content does not fit there.
pub fn overflow(tree: &UiTree, parent: NodeId, shrink: Vec2) -> Vec2 {
    let Some((origin, avail)) = available(tree, parent, shrink) else { return Vec2::ZERO };
    let end = origin + avail;
    let mut reach = origin;
    for child in tree.flow_children(parent) {
        if let Some(l) = tree.layout(child) {
            reach = reach.max(l.full_rect().end());
        }
    }
    reach - end
}

/// Shifts all flow children of `parent` into the slack left by a negative
/// `overflow`, according to the parent's `align`.
pub fn align(tree: &mut UiTree, parent: NodeId, overflow: Vec2) {
    let Some(p) = tree.layout(parent) else { return };
    if p.align == Align::TopLeft || p.kind == LayoutType::Grid {
        return;
    }
    let slack = (-overflow).max(Vec2::ZERO);
    let shift = Vec2::new(slack.x * p.align.factor(Axis::X), slack.y * p.align.factor(Axis::Y));
    if shift == Vec2::ZERO {
        return;
    }
    for child in tree.flow_children(parent) {
        if let Some(l) = tree.layout_mut(child) {
            l.computed_pos += shift;
        }
    }
}

/// Scale, position, overflow and alignment for a plain parent.
pub fn layout_generic(tree: &mut UiTree, parent: NodeId, shrink: Vec2) -> Vec2 {
    resolve_scale(tree, parent, shrink);
    resolve_position(tree, parent, shrink);
    let over = overflow(tree, parent, shrink);
    align(tree, parent, over);
    over
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Edges, PositionXY, Scale, ScaleXY};
    use crate::widgets::Widget;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    /// Root-attached parent with a fixed computed box.
    fn parent(tree: &mut UiTree, kind: LayoutType, size: Vec2) -> NodeId {
        let p = tree.create(Widget::Block);
        tree.add(tree.root(), p);
        let l = tree.layout_mut(p).unwrap();
        l.kind = kind;
        l.set_computed(Vec2::ZERO, size);
        p
    }

    fn child(tree: &mut UiTree, parent: NodeId, scale: ScaleXY) -> NodeId {
        let c = tree.create(Widget::Block);
        tree.layout_mut(c).unwrap().scale = scale;
        tree.add(parent, c);
        c
    }

    fn scale_of(tree: &UiTree, id: NodeId) -> Vec2 {
        tree.layout(id).unwrap().computed_scale()
    }

    fn pos_of(tree: &UiTree, id: NodeId) -> Vec2 {
        tree.layout(id).unwrap().computed_pos()
    }

    // ── scale ─────────────────────────────────────────────────────────────

    #[test]
    fn pixel_ignores_parent_size() {
        for size in [0.0, 10.0, 500.0, 5000.0] {
            let mut t = UiTree::new();
            let p = parent(&mut t, LayoutType::Horizontal, Vec2::splat(size));
            let c = child(&mut t, p, ScaleXY::px(120.0, 30.0));
            resolve_scale(&mut t, p, Vec2::ZERO);
            assert_eq!(scale_of(&t, c), Vec2::new(120.0, 30.0));
        }
    }

    #[test]
    fn relative_uses_content_box_minus_margin() {
        let mut last = 0.0;
        for width in [100.0, 200.0, 400.0] {
            let mut t = UiTree::new();
            let p = parent(&mut t, LayoutType::Horizontal, Vec2::new(width, 100.0));
            t.layout_mut(p).unwrap().padding = Edges::all(5);
            let c = child(&mut t, p, ScaleXY::rel(0.5, 1.0));
            t.layout_mut(c).unwrap().margin = Edges::symmetric(0, 2);
            resolve_scale(&mut t, p, Vec2::ZERO);

            let s = scale_of(&t, c);
            assert!(approx(s.x, (width - 10.0) * 0.5 - 4.0));
            assert!(approx(s.y, 90.0));
            assert!(s.x >= last);
            last = s.x;
        }
    }

    #[test]
    fn relative_respects_shrink() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Vertical, Vec2::new(200.0, 100.0));
        let c = child(&mut t, p, ScaleXY::rel(1.0, 1.0));
        resolve_scale(&mut t, p, Vec2::new(20.0, 0.0));
        assert_eq!(scale_of(&t, c), Vec2::new(180.0, 100.0));
    }

    #[test]
    fn relative_out_of_range_falls_back_to_zero() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::splat(100.0));
        let bad = child(&mut t, p, ScaleXY::rel(1.5, 0.0));
        let good = child(&mut t, p, ScaleXY::px(10.0, 10.0));
        resolve_scale(&mut t, p, Vec2::ZERO);
        assert_eq!(scale_of(&t, bad), Vec2::ZERO);
        assert_eq!(scale_of(&t, good), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn fit_wraps_pixel_child() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::splat(500.0));
        let fit = child(&mut t, p, ScaleXY::fit());
        child(&mut t, fit, ScaleXY::px(100.0, 50.0));

        resolve_scale(&mut t, p, Vec2::ZERO);
        assert_eq!(scale_of(&t, fit), Vec2::new(100.0, 50.0));

        t.layout_mut(fit).unwrap().padding = Edges::all(10);
        resolve_scale(&mut t, p, Vec2::ZERO);
        assert_eq!(scale_of(&t, fit), Vec2::new(120.0, 70.0));
    }

    #[test]
    fn fit_recurses_and_sums_along_flow() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::splat(500.0));
        let outer = child(&mut t, p, ScaleXY::fit());
        let inner = child(&mut t, outer, ScaleXY::fit());
        t.layout_mut(inner).unwrap().kind = LayoutType::Vertical;
        child(&mut t, inner, ScaleXY::px(30.0, 10.0));
        child(&mut t, inner, ScaleXY::px(40.0, 10.0));
        let side = child(&mut t, outer, ScaleXY::px(20.0, 5.0));
        t.layout_mut(side).unwrap().margin = Edges::all(1);

        resolve_scale(&mut t, p, Vec2::ZERO);
        // inner: 40 wide (max), 20 tall (sum). outer: 40 + 22 wide, max(20, 7) tall.
        assert_eq!(fit_extent(&t, inner, Axis::X), 40.0);
        assert_eq!(scale_of(&t, outer), Vec2::new(62.0, 20.0));
    }

    #[test]
    fn fit_with_fill_child_is_reported_as_zero() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::splat(500.0));
        let fit = child(&mut t, p, ScaleXY::fit());
        child(&mut t, fit, ScaleXY::fill());
        resolve_scale(&mut t, p, Vec2::ZERO);
        assert_eq!(scale_of(&t, fit), Vec2::ZERO);
    }

    #[test]
    fn fit_with_relative_child_is_reported_as_zero() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::splat(500.0));
        let fit = child(&mut t, p, ScaleXY::fit());
        let leaf = child(&mut t, fit, ScaleXY::rel(0.5, 0.5));
        resolve_scale(&mut t, p, Vec2::ZERO);
        resolve_scale(&mut t, fit, Vec2::ZERO);
        assert_eq!(scale_of(&t, fit), Vec2::ZERO);
        assert_eq!(scale_of(&t, leaf), Vec2::ZERO);
    }

    #[test]
    fn repeated_issues_warn_once() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::splat(100.0));
        let bad = child(&mut t, p, ScaleXY::rel(1.5, 1.0));
        resolve_scale(&mut t, p, Vec2::ZERO);

        let issue = LayoutIssue::RelativeOutOfRange { node: label(&t, bad), value: 1.5 };
        assert!(!t.report_issue(issue));
        assert!(t.report_issue(LayoutIssue::FitWithoutChildren { node: label(&t, bad) }));
    }

    #[test]
    fn fill_partitions_flow_axis() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::new(300.0, 80.0));
        let kids: Vec<_> = (0..3).map(|_| child(&mut t, p, ScaleXY::fill())).collect();
        layout_generic(&mut t, p, Vec2::ZERO);

        let mut total = 0.0;
        for &k in &kids {
            let s = scale_of(&t, k);
            assert_eq!(s, Vec2::new(100.0, 80.0));
            total += t.layout(k).unwrap().full_rect().size.x;
        }
        assert_eq!(total, 300.0);
        assert_eq!(pos_of(&t, kids[2]).x, 200.0);
    }

    #[test]
    fn fill_takes_what_fixed_siblings_leave() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Vertical, Vec2::new(100.0, 300.0));
        child(&mut t, p, ScaleXY::new(Scale::fill(), Scale::px(100.0)));
        let a = child(&mut t, p, ScaleXY::fill());
        let b = child(&mut t, p, ScaleXY::fill());
        t.layout_mut(b).unwrap().margin = Edges::symmetric(5, 0);
        resolve_scale(&mut t, p, Vec2::ZERO);

        assert_eq!(scale_of(&t, a), Vec2::new(100.0, 100.0));
        assert_eq!(scale_of(&t, b), Vec2::new(100.0, 90.0));
    }

    #[test]
    fn fr_outside_grid_is_zero() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::splat(100.0));
        let c = child(&mut t, p, ScaleXY::new(Scale::fr(1.0), Scale::px(10.0)));
        resolve_scale(&mut t, p, Vec2::ZERO);
        assert_eq!(scale_of(&t, c), Vec2::new(0.0, 10.0));
    }

    // ── position ──────────────────────────────────────────────────────────

    #[test]
    fn vertical_stack() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Vertical, Vec2::new(300.0, 300.0));
        t.layout_mut(p).unwrap().set_computed(Vec2::new(7.0, 9.0), Vec2::new(300.0, 300.0));
        let kids: Vec<_> = (0..3).map(|_| child(&mut t, p, ScaleXY::px(100.0, 40.0))).collect();
        layout_generic(&mut t, p, Vec2::ZERO);

        let ys: Vec<f32> = kids.iter().map(|&k| pos_of(&t, k).y).collect();
        assert_eq!(ys, vec![9.0, 49.0, 89.0]);
        assert!(kids.iter().all(|&k| pos_of(&t, k).x == 7.0));
    }

    #[test]
    fn margins_offset_children() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::new(300.0, 100.0));
        t.layout_mut(p).unwrap().padding = Edges::all(4);
        let a = child(&mut t, p, ScaleXY::px(50.0, 20.0));
        let b = child(&mut t, p, ScaleXY::px(50.0, 20.0));
        t.layout_mut(a).unwrap().margin = Edges::all(3);
        layout_generic(&mut t, p, Vec2::ZERO);

        assert_eq!(pos_of(&t, a), Vec2::new(7.0, 7.0));
        assert_eq!(pos_of(&t, b), Vec2::new(60.0, 4.0));
    }

    #[test]
    fn wrap_starts_new_line() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::new(250.0, 300.0));
        t.layout_mut(p).unwrap().wrap = true;
        let kids: Vec<_> = (0..3).map(|_| child(&mut t, p, ScaleXY::px(100.0, 30.0))).collect();
        t.layout_mut(kids[1]).unwrap().scale = ScaleXY::px(100.0, 50.0);
        layout_generic(&mut t, p, Vec2::ZERO);

        assert_eq!(pos_of(&t, kids[0]), Vec2::new(0.0, 0.0));
        assert_eq!(pos_of(&t, kids[1]), Vec2::new(100.0, 0.0));
        assert_eq!(pos_of(&t, kids[2]), Vec2::new(0.0, 50.0));
    }

    #[test]
    fn wrap_never_breaks_before_first_item() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::new(50.0, 300.0));
        t.layout_mut(p).unwrap().wrap = true;
        let a = child(&mut t, p, ScaleXY::px(100.0, 30.0));
        let b = child(&mut t, p, ScaleXY::px(100.0, 30.0));
        layout_generic(&mut t, p, Vec2::ZERO);

        assert_eq!(pos_of(&t, a), Vec2::ZERO);
        assert_eq!(pos_of(&t, b), Vec2::new(0.0, 30.0));
    }

    #[test]
    fn absolute_position_does_not_advance_cursor() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::new(300.0, 100.0));
        t.layout_mut(p).unwrap().padding = Edges::all(10);
        let pinned = child(&mut t, p, ScaleXY::px(50.0, 50.0));
        t.layout_mut(pinned).unwrap().pos = PositionXY::absolute(100.0, 20.0);
        let flowing = child(&mut t, p, ScaleXY::px(50.0, 50.0));
        layout_generic(&mut t, p, Vec2::ZERO);

        assert_eq!(pos_of(&t, pinned), Vec2::new(110.0, 30.0));
        assert_eq!(pos_of(&t, flowing), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn even_spacing() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::new(300.0, 100.0));
        let kids: Vec<_> = (0..2).map(|_| child(&mut t, p, ScaleXY::px(100.0, 10.0))).collect();

        t.layout_mut(p).unwrap().spacing = Spacing::EvenNoGap;
        layout_generic(&mut t, p, Vec2::ZERO);
        assert_eq!(pos_of(&t, kids[0]).x, 0.0);
        assert_eq!(pos_of(&t, kids[1]).x, 200.0);

        t.layout_mut(p).unwrap().spacing = Spacing::EvenGap;
        layout_generic(&mut t, p, Vec2::ZERO);
        assert!(approx(pos_of(&t, kids[0]).x, 100.0 / 3.0));
        assert!(approx(pos_of(&t, kids[1]).x, 100.0 + 200.0 / 3.0));
    }

    #[test]
    fn spacing_with_no_slack_is_tight() {
        assert_eq!(spacing_offsets(Spacing::EvenGap, -5.0, 3), (0.0, 0.0));
        assert_eq!(spacing_offsets(Spacing::EvenNoGap, 10.0, 1), (0.0, 0.0));
    }

    // ── overflow + align ──────────────────────────────────────────────────

    #[test]
    fn overflow_is_signed_reach_past_content_end() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Vertical, Vec2::new(100.0, 100.0));
        for _ in 0..3 {
            child(&mut t, p, ScaleXY::px(80.0, 50.0));
        }
        let over = layout_generic(&mut t, p, Vec2::ZERO);
        assert_eq!(over, Vec2::new(-20.0, 50.0));

        let shrunk = layout_generic(&mut t, p, Vec2::new(20.0, 0.0));
        assert_eq!(shrunk, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn overflow_of_empty_parent_is_negative_extent() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Vertical, Vec2::new(100.0, 60.0));
        assert_eq!(overflow(&t, p, Vec2::ZERO), Vec2::new(-100.0, -60.0));
    }

    #[test]
    fn center_alignment_consumes_slack() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::new(200.0, 100.0));
        t.layout_mut(p).unwrap().align = Align::Center;
        let c = child(&mut t, p, ScaleXY::px(100.0, 40.0));
        layout_generic(&mut t, p, Vec2::ZERO);
        assert_eq!(pos_of(&t, c), Vec2::new(50.0, 30.0));

        t.layout_mut(p).unwrap().align = Align::BottomRight;
        layout_generic(&mut t, p, Vec2::ZERO);
        assert_eq!(pos_of(&t, c), Vec2::new(100.0, 60.0));
    }

    #[test]
    fn alignment_ignores_overflowing_axis() {
        let mut t = UiTree::new();
        let p = parent(&mut t, LayoutType::Horizontal, Vec2::new(50.0, 100.0));
        t.layout_mut(p).unwrap().align = Align::Center;
        let c = child(&mut t, p, ScaleXY::px(100.0, 40.0));
        layout_generic(&mut t, p, Vec2::ZERO);
        assert_eq!(pos_of(&t, c), Vec2::new(0.0, 30.0));
    }
}
