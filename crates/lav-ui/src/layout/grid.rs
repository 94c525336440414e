//! Grid parents: track boundaries first, then each cell's box.

use lav_engine::coords::Vec2;

use super::{Axis, GridCell, LayoutIssue, Position, Scale, ScaleType};
use crate::node::NodeId;
use crate::tree::UiTree;

/// Start offset of every track plus the end of the last one (`n + 1`
/// entries), relative to the content origin.
///
/// PIXEL tracks take their value; FR tracks split what is left in
/// proportion. Anything else counts as an empty track. No tracks means a
/// single `1fr` track.
pub fn track_starts(tracks: &[Scale], extent: f32, mut bad: impl FnMut(usize)) -> Vec<f32> {
    if tracks.is_empty() {
        return vec![0.0, extent.max(0.0)];
    }

    let mut px_total = 0.0;
    let mut fr_total = 0.0;
    for (i, t) in tracks.iter().enumerate() {
        match t.kind {
            ScaleType::Px => px_total += t.value.max(0.0),
            ScaleType::Fr => fr_total += t.value.max(0.0),
            _ => bad(i),
        }
    }
    let fr_unit = if fr_total > 0.0 { (extent - px_total).max(0.0) / fr_total } else { 0.0 };

    let mut starts = Vec::with_capacity(tracks.len() + 1);
    let mut at = 0.0;
    starts.push(at);
    for t in tracks {
        at += match t.kind {
            ScaleType::Px => t.value.max(0.0),
            ScaleType::Fr => t.value.max(0.0) * fr_unit,
            _ => 0.0,
        };
        starts.push(at);
    }
    starts
}

/// Cell origin offset and size, or `None` when the cell lies outside the
/// tracks.
fn cell_of(cols: &[f32], rows: &[f32], at: GridCell, span: GridCell) -> Option<(Vec2, Vec2)> {
    let (r0, c0) = (at.row as usize, at.col as usize);
    let r1 = r0 + span.row.max(1) as usize;
    let c1 = c0 + span.col.max(1) as usize;
    if r1 >= rows.len() || c1 >= cols.len() {
        return None;
    }
    let origin = Vec2::new(cols[c0], rows[r0]);
    let end = Vec2::new(cols[c1], rows[r1]);
    Some((origin, end - origin))
}

/// Resolves track boundaries for `parent` and the scale of every cell child.
pub fn resolve_scale(tree: &mut UiTree, parent: NodeId, shrink: Vec2) {
    let Some(node) = tree.get(parent) else { return };
    let label = node.label();
    let l = &node.layout;
    let avail = (l.content_rect().size - shrink).max(Vec2::ZERO);

    let cols = track_starts(&l.grid.columns, avail.x, |index| {
        tree.report_issue(LayoutIssue::BadGridTrack { node: label.clone(), index });
    });
    let rows = track_starts(&l.grid.rows, avail.y, |index| {
        tree.report_issue(LayoutIssue::BadGridTrack { node: label.clone(), index });
    });

    for child in tree.flow_children(parent) {
        let Some(c) = tree.get(child) else { continue };
        let cl = &c.layout;
        let mut size = Vec2::ZERO;

        match cell_of(&cols, &rows, cl.grid_pos, cl.grid_span) {
            None => {
                tree.report_issue(LayoutIssue::GridCellOutOfRange {
                    node: c.label(),
                    row: cl.grid_pos.row,
                    col: cl.grid_pos.col,
                });
            }
            Some((_, cell)) => {
                for axis in [Axis::X, Axis::Y] {
                    let s = cl.scale.get(axis);
                    let m = cl.margin.along(axis);
                    let extent = match s.kind {
                        ScaleType::Px => s.value,
                        ScaleType::Rel if s.value > 0.0 && s.value <= 1.0 => axis.get(cell) * s.value - m,
                        ScaleType::Rel => {
                            tree.report_issue(LayoutIssue::RelativeOutOfRange { node: c.label(), value: s.value });
                            0.0
                        }
                        ScaleType::Fill => axis.get(cell) - m,
                        ScaleType::Fit => {
                            tree.report_issue(LayoutIssue::FitInGrid { node: c.label() });
                            0.0
                        }
                        ScaleType::Fr => {
                            tree.report_issue(LayoutIssue::FrOutsideGrid { node: c.label() });
                            0.0
                        }
                    };
                    axis.set(&mut size, extent.max(0.0));
                }
            }
        }

        if let Some(cl) = tree.layout_mut(child) {
            cl.computed_scale = size;
        }
    }

    if let Some(l) = tree.layout_mut(parent) {
        l.grid.col_starts = cols;
        l.grid.row_starts = rows;
    }
}

/// Places every cell child at its cell origin, moved by its margin and by
/// its `self_align` share of the cell's free space.
pub fn place_cells(tree: &mut UiTree, parent: NodeId, _shrink: Vec2) {
    let Some(l) = tree.layout(parent) else { return };
    let origin = l.content_rect().origin;
    let cols = l.grid.col_starts.clone();
    let rows = l.grid.row_starts.clone();

    for child in tree.flow_children(parent) {
        let Some(cl) = tree.layout_mut(child) else { continue };
        let Some((cell_at, cell)) = cell_of(&cols, &rows, cl.grid_pos, cl.grid_span) else {
            cl.computed_pos = origin;
            continue;
        };

        let full = cl.computed_scale + cl.margin.sum();
        let slack = (cell - full).max(Vec2::ZERO);
        let mut at = Vec2::ZERO;
        for axis in [Axis::X, Axis::Y] {
            let v = match cl.pos.get(axis) {
                Position::Absolute(v) => v,
                Position::Computed => {
                    axis.get(cell_at)
                        + axis.get(cl.margin.start())
                        + axis.get(slack) * cl.self_align.factor(axis)
                }
            };
            axis.set(&mut at, v);
        }
        cl.computed_pos = origin + at;
    }
}
