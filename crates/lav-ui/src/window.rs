//! Per-window frame driver.
//!
//! A [`UiWindow`] owns one element tree, its interaction state and its
//! projection. The application feeds it input through the `on_*` hooks
//! (or [`UiWindow::handle_input`]) and calls [`UiWindow::run`] once per
//! frame with the window's GPU binder.

use glam::Mat4;
use lav_engine::coords::{Color, Rect, Vec2};
use lav_engine::input::{
    CursorShape, InputEvent, Key, KeyState, MouseButton, MouseButtonState, MouseWheelDelta,
};
use lav_engine::render::{ortho_projection, GpuBinder};

use crate::event::EventKind;
use crate::node::NodeId;
use crate::state::UiState;
use crate::tree::{UiTree, Visit};
use crate::widgets;

/// Something the window asks its host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowRequest {
    Close,
    SpawnWindow { title: String, size: Vec2 },
}

/// What a frame produced for the host window.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Cursor to apply, when it changed this frame.
    pub cursor: Option<CursorShape>,
}

pub struct UiWindow {
    title: String,
    tree: UiTree,
    state: UiState,
    projection: Mat4,
    clear_color: Color,
}

impl UiWindow {
    /// Window of `size` logical pixels holding an empty tree.
    pub fn new(title: impl Into<String>, size: Vec2) -> Self {
        let state = UiState { window_size: size, ..UiState::default() };
        Self {
            title: title.into(),
            tree: UiTree::new(),
            state,
            projection: ortho_projection(size),
            clear_color: Color::from_hex(0x1e1f22ff),
        }
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    #[inline]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.state.window_size
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// One frame: release handles of destroyed nodes, lay out, render, then
    /// report the cursor change requested since the last frame.
    pub fn run(&mut self, gpu: &mut dyn GpuBinder) -> FrameOutcome {
        for slots in self.tree.take_pending_release() {
            if let Some(mesh) = slots.mesh {
                gpu.release_mesh(mesh);
            }
            if let Some(shader) = slots.shader {
                gpu.release_shader(shader);
            }
        }

        self.layout_pass();
        self.render_pass(gpu);

        FrameOutcome { cursor: self.state.take_cursor_change() }
    }

    /// Lays out every attached node, parent before children.
    pub fn layout_pass(&mut self) {
        self.tree.prepare_root(self.state.window_size);
        let root = self.tree.root();
        self.tree.walk(root, |tree, id| {
            widgets::layout(tree, id);
            propagate_to_children(tree, id);
            Visit::Continue
        });
    }

    fn render_pass(&mut self, gpu: &mut dyn GpuBinder) {
        let projection = self.projection;
        let root = self.tree.root();
        self.tree.walk(root, |tree, id| {
            let Some(view) = tree.layout(id).map(|l| l.view_rect()) else {
                return Visit::SkipChildren;
            };
            // Children are clipped to this view, so they are invisible too.
            if view.is_empty() {
                return Visit::SkipChildren;
            }
            gpu.set_clip(view);
            widgets::render(tree, id, projection, &mut *gpu);
            Visit::Continue
        });
    }

    // ── dispatch ──────────────────────────────────────────────────────────

    /// Runs the handler of every node that listens to `kind`.
    ///
    /// Broadcast kinds reach every node and ignore `target`. Targeted kinds
    /// reach only `target` and are dropped when there is none.
    fn dispatch(&mut self, kind: EventKind, target: Option<NodeId>) {
        let target = if kind.is_broadcast() {
            None
        } else if target.is_some() {
            target
        } else {
            return;
        };

        self.state.current_event = Some(kind);
        let state = &mut self.state;
        let root = self.tree.root();
        self.tree.walk(root, |tree, id| {
            let ignored = tree.get(id).is_none_or(|n| n.ignore_events);
            if !ignored && target.is_none_or(|t| t == id) {
                widgets::handle_event(tree, id, state);
            }
            Visit::Continue
        });
        self.state.current_event = None;
    }

    /// Finds the topmost node under the pointer. Equal z goes to the node
    /// visited last.
    fn hover_scan(&mut self) {
        let mouse = self.state.mouse_pos;
        let mut best: Option<(NodeId, u32)> = None;
        let root = self.tree.root();
        self.tree.walk(root, |tree, id| {
            if let Some(node) = tree.get(id) {
                let z = node.layout.z_index;
                if !node.ignore_events
                    && node.layout.is_point_inside_view(mouse)
                    && best.is_none_or(|(_, top)| z >= top)
                {
                    best = Some((id, z));
                }
            }
            Visit::Continue
        });

        self.state.hovered = best.map(|(id, _)| id);
        self.state.hovered_z = best.map_or(0, |(_, z)| z);
        self.state.closest_scroll = self.scroll_target();
    }

    /// Slider that takes wheel input: the hovered slider itself, else a bar
    /// of the nearest pane around the hovered node.
    fn scroll_target(&self) -> Option<NodeId> {
        let hovered = self.state.hovered?;
        if self.tree.get(hovered)?.widget().as_slider().is_some() {
            return Some(hovered);
        }
        let mut cursor = Some(hovered);
        while let Some(id) = cursor {
            if let Some(bar) = widgets::closest_bar(&self.tree, id, self.state.mouse_pos) {
                return Some(bar);
            }
            cursor = self.tree.parent(id);
        }
        None
    }

    // ── input hooks ───────────────────────────────────────────────────────

    pub fn on_mouse_move(&mut self, pos: Vec2) {
        let bounds = Rect::from_origin_size(Vec2::ZERO, self.state.window_size);
        let pos = bounds.clamp_point(pos);
        self.state.mouse_delta = pos - self.state.mouse_pos;
        self.state.mouse_pos = pos;

        self.state.prev_hovered = self.state.hovered;
        self.hover_scan();

        let (prev, now) = (self.state.prev_hovered, self.state.hovered);
        if prev != now {
            self.dispatch(EventKind::MouseExit, prev);
            self.dispatch(EventKind::MouseEnter, now);
        }
        if self.state.dragging {
            self.dispatch(EventKind::MouseDrag, self.state.clicked);
        }
        self.dispatch(EventKind::MouseMove, None);
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, action: MouseButtonState) {
        self.state.mouse_button = button;
        self.state.mouse_action = action;
        self.hover_scan();
        self.dispatch(EventKind::MouseButton, None);

        if button != MouseButton::Left {
            return;
        }
        match action {
            MouseButtonState::Pressed => {
                self.state.clicked = self.state.hovered;
                self.state.selected = self.state.hovered;
                self.state.dragging = true;
                self.dispatch(EventKind::MouseLeftClick, self.state.clicked);
            }
            MouseButtonState::Released => {
                self.state.dragging = false;
                self.state.clicked = None;
                self.dispatch(EventKind::MouseLeftRelease, self.state.selected);
            }
        }
    }

    /// Wheel offset in lines; positive `y` scrolls up.
    pub fn on_scroll(&mut self, offset: Vec2) {
        self.state.scroll_offset = offset;
        self.dispatch(EventKind::MouseScroll, self.state.closest_scroll);
        self.state.scroll_offset = Vec2::ZERO;
    }

    pub fn on_resize(&mut self, size: Vec2) {
        self.state.window_size_delta = size - self.state.window_size;
        self.state.window_size = size;
        self.projection = ortho_projection(size);
        self.dispatch(EventKind::WindowResize, None);
    }

    pub fn on_pointer_left(&mut self) {
        self.dispatch(EventKind::MouseExit, self.state.hovered);
        self.state.hovered = None;
        self.state.prev_hovered = None;
        self.state.clicked = None;
        self.state.dragging = false;
    }

    /// Built-in key bindings.
    pub fn on_key(&mut self, key: Key) -> Option<WindowRequest> {
        match key {
            Key::Escape => Some(WindowRequest::Close),
            Key::C => Some(WindowRequest::SpawnWindow {
                title: format!("{} (new)", self.title),
                size: self.state.window_size,
            }),
            Key::P => {
                log::info!("tree of '{}':\n{}", self.title, self.tree.dump());
                None
            }
            _ => None,
        }
    }

    /// Routes an engine input event to the matching hook.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<WindowRequest> {
        match *event {
            InputEvent::PointerMoved { x, y } => self.on_mouse_move(Vec2::new(x, y)),
            InputEvent::PointerButton { button, state, .. } => self.on_mouse_button(button, state),
            InputEvent::MouseWheel { delta, .. } => {
                let (x, y) = MouseWheelDelta::lines(delta);
                self.on_scroll(Vec2::new(x, y));
            }
            InputEvent::Resized { width, height } => self.on_resize(Vec2::new(width, height)),
            InputEvent::PointerLeft => self.on_pointer_left(),
            InputEvent::PointerEntered => {}
            InputEvent::Key { key, state: KeyState::Pressed, repeat: false, .. } => {
                return self.on_key(key);
            }
            InputEvent::Key { .. } => {}
        }
        None
    }
}

/// Clips each child of `id` to its view, derives its z and depth.
fn propagate_to_children(tree: &mut UiTree, id: NodeId) {
    let Some(parent) = tree.get(id) else { return };
    let (view, border) = (parent.layout.view_rect(), parent.layout.border);
    let (z, depth) = (parent.layout.z_index, parent.depth);

    for child in tree.children(id).to_vec() {
        let Some(node) = tree.get_mut(child) else { continue };
        node.layout.compute_view_box(view, border);
        if !node.layout.custom_index {
            node.layout.z_index = z.saturating_add(1);
        }
        node.depth = depth + 1;
    }
}
