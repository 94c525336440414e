//! Concrete widget kinds and the per-kind dispatch the window driver uses.
//!
//! Geometry, visuals and listeners live on [`Node`](crate::node::Node); a
//! [`Widget`] holds only what is specific to its kind.

mod button;
mod pane;
mod slider;
mod split_pane;
mod tree_view;

pub use button::{Button, ButtonState};
pub use pane::Pane;
pub use slider::{remap, Slider};
pub use split_pane::SplitPane;
pub use tree_view::{ItemId, TreeItem, TreeView};

pub(crate) use pane::closest_bar;

use glam::Mat4;
use lav_engine::coords::{Color, Rect, Vec2};
use lav_engine::render::{GpuBinder, MeshHandle, QuadDraw, ShaderHandle, ShaderSource};

use crate::event::UiEvent;
use crate::layout::calculator;
use crate::node::{Node, NodeId};
use crate::state::UiState;
use crate::tree::UiTree;

/// Closed set of element kinds.
#[derive(Debug, Clone, Default)]
pub enum Widget {
    /// Window root; sized to the window every frame.
    Root,
    /// Plain box.
    #[default]
    Block,
    Pane(Pane),
    Button(Button),
    Slider(Slider),
    SplitPane(SplitPane),
    TreeView(TreeView),
}

impl Widget {
    /// Stable kind name, used in node labels.
    pub fn tag(&self) -> &'static str {
        match self {
            Widget::Root => "Root",
            Widget::Block => "Block",
            Widget::Pane(_) => "Pane",
            Widget::Button(_) => "Button",
            Widget::Slider(_) => "Slider",
            Widget::SplitPane(_) => "SplitPane",
            Widget::TreeView(_) => "TreeView",
        }
    }

    /// Whether `UiTree::add`/`remove` may edit this node's children.
    pub fn accepts_user_children(&self) -> bool {
        !matches!(self, Widget::Slider(_) | Widget::SplitPane(_) | Widget::TreeView(_))
    }

    /// Helper nodes owned by this widget that may not be attached to it.
    pub(crate) fn owned_nodes(&self) -> Vec<NodeId> {
        match self {
            Widget::Pane(p) => p.bars().iter().collect(),
            Widget::TreeView(t) => t.owned_nodes().collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_pane(&self) -> Option<&Pane> {
        match self {
            Widget::Pane(p) => Some(p),
            _ => None,
        }
    }

    /// The scroll container behind panes and tree views.
    pub fn scroll_pane(&self) -> Option<&Pane> {
        match self {
            Widget::Pane(p) => Some(p),
            Widget::TreeView(t) => Some(t.pane()),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Widget::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Widget::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_slider(&self) -> Option<&Slider> {
        match self {
            Widget::Slider(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_slider_mut(&mut self) -> Option<&mut Slider> {
        match self {
            Widget::Slider(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_split(&self) -> Option<&SplitPane> {
        match self {
            Widget::SplitPane(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tree_view(&self) -> Option<&TreeView> {
        match self {
            Widget::TreeView(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tree_view_mut(&mut self) -> Option<&mut TreeView> {
        match self {
            Widget::TreeView(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Pane> for Widget {
    fn from(p: Pane) -> Self {
        Widget::Pane(p)
    }
}

impl From<Button> for Widget {
    fn from(b: Button) -> Self {
        Widget::Button(b)
    }
}

impl From<Slider> for Widget {
    fn from(s: Slider) -> Self {
        Widget::Slider(s)
    }
}

impl From<SplitPane> for Widget {
    fn from(s: SplitPane) -> Self {
        Widget::SplitPane(s)
    }
}

impl From<TreeView> for Widget {
    fn from(t: TreeView) -> Self {
        Widget::TreeView(t)
    }
}

// ── dispatch ──────────────────────────────────────────────────────────────

/// Creates the helper nodes a freshly created widget needs.
pub(crate) fn install(tree: &mut UiTree, id: NodeId) {
    tree.with_widget(id, |tree, widget| match widget {
        Widget::Pane(p) => pane::install(tree, id, p),
        Widget::Button(b) => button::install(tree, id, b),
        Widget::Slider(s) => slider::install(tree, id, s),
        Widget::SplitPane(s) => split_pane::install(tree, id, s),
        Widget::TreeView(t) => tree_view::install(tree, id, t),
        Widget::Root | Widget::Block => {}
    });
}

/// Lays out the children of `id`.
pub(crate) fn layout(tree: &mut UiTree, id: NodeId) {
    tree.with_widget(id, |tree, widget| match widget {
        Widget::Pane(p) => pane::layout(tree, id, p),
        Widget::Slider(s) => slider::layout(tree, id, s),
        Widget::SplitPane(s) => split_pane::layout(tree, id, s),
        Widget::TreeView(t) => tree_view::layout(tree, id, t),
        Widget::Root | Widget::Block | Widget::Button(_) => {
            calculator::layout_generic(tree, id, Vec2::ZERO);
        }
    });
}

/// Runs the kind-specific handler for the event in `state.current_event`,
/// then the node's listeners.
pub(crate) fn handle_event(tree: &mut UiTree, id: NodeId, state: &mut UiState) {
    let Some(kind) = state.current_event else { return };

    tree.with_widget(id, |tree, widget| match widget {
        Widget::Button(b) => button::handle(tree, id, b, state),
        Widget::Slider(s) => slider::handle(tree, id, s, state),
        Widget::SplitPane(s) => split_pane::handle(s, state),
        Widget::TreeView(t) => tree_view::handle(t, state),
        Widget::Root | Widget::Block | Widget::Pane(_) => {}
    });

    let Some(node) = tree.get_mut(id) else { return };
    if node.events.has(kind) {
        if let Some(event) = UiEvent::from_state(kind, state) {
            node.events.emit(&event);
        }
    }
}

/// Draws `id`. The clip is already set to its view box.
pub(crate) fn render(tree: &mut UiTree, id: NodeId, projection: Mat4, gpu: &mut dyn GpuBinder) {
    let Some(node) = tree.get_mut(id) else { return };
    if matches!(node.widget, Widget::Root) || node.layout.view_rect().is_empty() {
        return;
    }
    let Some((mesh, shader)) = acquire(node, gpu) else { return };

    let base = quad(node, mesh, shader, projection, node.layout.computed_rect(), node.visual.color);
    gpu.draw_quad(&base);

    if let Widget::Slider(s) = &node.widget {
        let mut knob = quad(node, mesh, shader, projection, s.knob(), s.knob_fill());
        knob.border = [0.0; 4];
        gpu.draw_quad(&knob);
    }
}

fn quad(node: &Node, mesh: MeshHandle, shader: ShaderHandle, projection: Mat4, rect: Rect, color: Color) -> QuadDraw {
    QuadDraw {
        mesh,
        shader,
        projection,
        model: QuadDraw::model_for(rect, node.layout.z_index),
        color,
        border_color: node.visual.border_color,
        border: node.layout.border.to_array(),
        radii: node.layout.border_radius.to_array(),
    }
}

/// Lazily loads the node's quad mesh and shader. A failed load is logged
/// once and the node stops drawing.
fn acquire(node: &mut Node, gpu: &mut dyn GpuBinder) -> Option<(MeshHandle, ShaderHandle)> {
    if node.gpu.failed {
        return None;
    }
    if node.gpu.mesh.is_none() {
        node.gpu.mesh = gpu.load_quad_mesh();
    }
    if node.gpu.shader.is_none() {
        node.gpu.shader = gpu.load_shader(&ShaderSource::element());
    }
    match (node.gpu.mesh, node.gpu.shader) {
        (Some(mesh), Some(shader)) => Some((mesh, shader)),
        _ => {
            log::error!("{}: GPU resources unavailable, skipping draw", node.label());
            node.gpu.failed = true;
            None
        }
    }
}
