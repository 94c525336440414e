use lav_engine::coords::{Color, Vec2};
use lav_engine::input::{CursorShape, MouseButtonState};

use super::button::Button;
use super::pane::Pane;
use crate::event::EventKind;
use crate::layout::{calculator, split, Axis, LayoutType, Scale, ScaleXY};
use crate::node::NodeId;
use crate::state::UiState;
use crate::tree::UiTree;

/// Row or column of panes separated by draggable handles.
///
/// Panes are RELATIVE on the split axis and share the content extent left
/// after the handles. Dragging handle `i` moves space between panes `i` and
/// `i + 1`, within each pane's `min_scale`/`max_scale`. User content goes
/// into the panes, never into the split pane itself.
#[derive(Debug, Clone)]
pub struct SplitPane {
    axis: Axis,
    count: usize,
    handle_thickness: f32,
    handle_color: Color,
    min_size: f32,
    panes: Vec<NodeId>,
    handles: Vec<NodeId>,
    dragged: Option<usize>,
    drag_to: Option<Vec2>,
}

impl SplitPane {
    pub const DEFAULT_HANDLE_THICKNESS: f32 = 6.0;

    /// `Horizontal` places panes side by side; `Vertical` stacks them.
    pub fn new(kind: LayoutType) -> Self {
        Self {
            axis: if kind == LayoutType::Vertical { Axis::Y } else { Axis::X },
            count: 2,
            handle_thickness: Self::DEFAULT_HANDLE_THICKNESS,
            handle_color: Color::from_hex(0x1e1f22ff),
            min_size: 10.0,
            panes: Vec::new(),
            handles: Vec::new(),
            dragged: None,
            drag_to: None,
        }
    }

    /// Number of panes, at least 2. Applied when created.
    pub fn panes(mut self, count: usize) -> Self {
        self.count = count.max(2);
        self
    }

    pub fn handle_thickness(mut self, thickness: f32) -> Self {
        self.handle_thickness = thickness.max(0.0);
        self
    }

    pub fn handle_color(mut self, color: Color) -> Self {
        self.handle_color = color;
        self
    }

    /// Minimum pane extent along the split axis, in pixels.
    pub fn min_size(mut self, px: f32) -> Self {
        self.min_size = px.max(0.0);
        self
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    pub fn pane(&self, index: usize) -> Option<NodeId> {
        self.panes.get(index).copied()
    }

    #[inline]
    pub fn pane_ids(&self) -> &[NodeId] {
        &self.panes
    }

    #[inline]
    pub fn handle_ids(&self) -> &[NodeId] {
        &self.handles
    }

    #[inline]
    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }
}

fn along(axis: Axis, along: Scale, across: Scale) -> ScaleXY {
    match axis {
        Axis::X => ScaleXY::new(along, across),
        Axis::Y => ScaleXY::new(across, along),
    }
}

pub(super) fn install(tree: &mut UiTree, id: NodeId, split: &mut SplitPane) {
    let kind = if split.axis == Axis::Y { LayoutType::Vertical } else { LayoutType::Horizontal };
    if let Some(node) = tree.get_mut(id) {
        node.layout.kind = kind;
        node.layout.scale = ScaleXY::fill();
    }

    let share = 1.0 / split.count as f32;
    let cursor = if split.axis == Axis::X { CursorShape::HResize } else { CursorShape::VResize };

    for i in 0..split.count {
        if i > 0 {
            let handle = tree.create(
                Button::new()
                    .color(split.handle_color)
                    .hover_color(Color::from_hex(0x5865f2ff))
                    .pressed_color(Color::from_hex(0x4752c4ff))
                    .cursor(cursor),
            );
            if let Some(node) = tree.get_mut(handle) {
                node.layout.scale = along(split.axis, Scale::px(split.handle_thickness), Scale::rel(1.0));
                node.name("split-handle");
            }
            tree.attach(id, handle);
            split.handles.push(handle);
        }

        let pane = tree.create(Pane::new());
        if let Some(node) = tree.get_mut(pane) {
            node.layout.scale = along(split.axis, Scale::rel(share), Scale::rel(1.0));
            split.axis.set(&mut node.layout.min_scale, split.min_size);
        }
        tree.attach(id, pane);
        split.panes.push(pane);
    }
}

pub(super) fn handle(split: &mut SplitPane, state: &mut UiState) {
    match state.current_event {
        Some(EventKind::MouseMove) if state.dragging => {
            let grabbed = state.clicked.and_then(|c| split.handles.iter().position(|&h| h == c));
            if let Some(index) = grabbed {
                split.dragged = Some(index);
                split.drag_to = Some(state.mouse_pos);
            }
        }
        Some(EventKind::MouseButton) if state.mouse_action == MouseButtonState::Released => {
            split.dragged = None;
            split.drag_to = None;
        }
        _ => {}
    }
}

pub(super) fn layout(tree: &mut UiTree, id: NodeId, sp: &mut SplitPane) {
    if let (Some(index), Some(mouse)) = (sp.dragged, sp.drag_to.take()) {
        split::drag_split(tree, id, sp.axis, &sp.panes, &sp.handles, index, mouse);
    }

    let handles_total = sp.handle_thickness * sp.handles.len() as f32;
    let shrink = sp.axis.compose(handles_total, 0.0);
    calculator::resolve_scale(tree, id, shrink);
    calculator::resolve_position(tree, id, Vec2::ZERO);
}
