//! Split-pane resizing: converts a handle drag into relative-scale changes
//! on the two panes around that handle.

use lav_engine::coords::Vec2;

use super::{Axis, ScaleType};
use crate::node::NodeId;
use crate::tree::UiTree;

/// Current share and size limits of one pane, all relative to the space
/// the panes split between them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PaneBounds {
    pub rel: f32,
    pub min: f32,
    pub max: f32,
}

/// Tightens `offset` so neither pane leaves its bounds once the left/top
/// pane gains it and the right/bottom pane loses it.
///
/// Checks run in order: left minimum, right minimum, left maximum, right
/// maximum. Each check works on the offset left by the previous one.
pub fn clamp_split_offset(offset: f32, left: PaneBounds, right: PaneBounds) -> f32 {
    let mut o = offset;
    if left.rel + o < left.min {
        o = left.min - left.rel;
    }
    if right.rel - o < right.min {
        o = right.rel - right.min;
    }
    if left.rel + o > left.max {
        o = left.max - left.rel;
    }
    if right.rel - o > right.max {
        o = right.rel - right.max;
    }
    o
}

fn bounds(tree: &UiTree, pane: NodeId, axis: Axis, avail: f32) -> Option<PaneBounds> {
    let l = tree.layout(pane)?;
    let s = l.scale.get(axis);
    if s.kind != ScaleType::Rel {
        return None;
    }
    Some(PaneBounds {
        rel: s.value,
        min: axis.get(l.min_scale) / avail,
        max: axis.get(l.max_scale) / avail,
    })
}

/// Moves handle `index` of `split` towards `mouse` along `axis`.
///
/// The offset is the pointer's distance from the handle centre over the
/// space the panes share (`content - handles`). Returns the relative offset
/// actually applied.
pub fn drag_split(
    tree: &mut UiTree,
    split: NodeId,
    axis: Axis,
    panes: &[NodeId],
    handles: &[NodeId],
    index: usize,
    mouse: Vec2,
) -> f32 {
    let (Some(&handle), Some(&left), Some(&right)) =
        (handles.get(index), panes.get(index), panes.get(index + 1))
    else {
        return 0.0;
    };
    let Some(content) = tree.layout(split).map(|l| l.content_rect()) else { return 0.0 };

    let handles_total: f32 = handles
        .iter()
        .filter_map(|&h| tree.layout(h))
        .map(|l| axis.get(l.full_rect().size))
        .sum();
    let avail = axis.get(content.size) - handles_total;
    if avail <= 0.0 {
        return 0.0;
    }

    let Some(centre) = tree.layout(handle).map(|l| axis.get(l.computed_rect().center())) else {
        return 0.0;
    };
    let wanted = (axis.get(mouse) - centre) / avail;
    if wanted == 0.0 {
        return 0.0;
    }

    let (Some(lb), Some(rb)) = (bounds(tree, left, axis, avail), bounds(tree, right, axis, avail)) else {
        log::warn!("split {split}: panes {left} and {right} must be RELATIVE on the split axis");
        return 0.0;
    };
    let applied = clamp_split_offset(wanted, lb, rb);

    if let Some(l) = tree.layout_mut(left) {
        l.scale.get_mut(axis).value = lb.rel + applied;
    }
    if let Some(l) = tree.layout_mut(right) {
        l.scale.get_mut(axis).value = rb.rel - applied;
    }
    applied
}
