use lav_engine::coords::{Color, Vec2};
use lav_engine::input::{MouseButton, MouseButtonState};

use super::button::{Button, ButtonState};
use super::pane::{self, Pane};
use crate::event::EventKind;
use crate::layout::{calculator, scroll, Edges, LayoutType, Scale, ScaleXY};
use crate::node::NodeId;
use crate::state::UiState;
use crate::tree::UiTree;

/// Handle of an item inside one [`TreeView`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ItemId(u32);

#[derive(Debug, Clone)]
pub struct TreeItem {
    pub label: String,
    pub color: Color,
    /// Closed items hide their descendants.
    pub open: bool,
    children: Vec<ItemId>,
}

impl TreeItem {
    #[inline]
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }
}

/// One visible line of the flattened tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Line {
    item: ItemId,
    depth: u32,
}

/// Scrolling list of collapsible items.
///
/// Items form a forest; the open part of it is flattened in pre-order into
/// lines of equal height. Only the lines inside the viewport get a row node,
/// and row nodes are recycled as the list scrolls. Releasing the left button
/// on a row opens or closes its item.
#[derive(Debug, Clone)]
pub struct TreeView {
    pane: Pane,
    items: Vec<TreeItem>,
    roots: Vec<ItemId>,
    lines: Vec<Line>,
    row_size: f32,
    indent: f32,
    hover_color: Color,
    /// Row nodes; the first `bound` are attached and show `lines[top..]`.
    pool: Vec<NodeId>,
    bound: usize,
    top: usize,
    /// `(top, capacity)` of the last binding.
    window: Option<(usize, usize)>,
    dirty: bool,
}

impl Default for TreeView {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeView {
    pub const DEFAULT_ROW_SIZE: f32 = 30.0;
    pub const DEFAULT_INDENT: f32 = 20.0;

    pub fn new() -> Self {
        Self {
            pane: Pane::new().scroll(false, true),
            items: Vec::new(),
            roots: Vec::new(),
            lines: Vec::new(),
            row_size: Self::DEFAULT_ROW_SIZE,
            indent: Self::DEFAULT_INDENT,
            hover_color: Color::from_hex(0x6d6f78ff),
            pool: Vec::new(),
            bound: 0,
            top: 0,
            window: None,
            dirty: true,
        }
    }

    /// Height of every row, in pixels.
    pub fn row_size(mut self, px: f32) -> Self {
        self.row_size = px.max(1.0);
        self
    }

    /// Left margin added per nesting level.
    pub fn indent(mut self, px: f32) -> Self {
        self.indent = px.max(0.0);
        self
    }

    pub fn hover_color(mut self, color: Color) -> Self {
        self.hover_color = color;
        self
    }

    pub fn scroll_sensitivity(mut self, sensitivity: f32) -> Self {
        self.pane = self.pane.scroll_sensitivity(sensitivity);
        self
    }

    // ── items ─────────────────────────────────────────────────────────────

    fn push_item(&mut self, label: String, color: Color) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(TreeItem { label, color, open: true, children: Vec::new() });
        id
    }

    pub fn add_root(&mut self, label: impl Into<String>, color: Color) -> ItemId {
        let id = self.push_item(label.into(), color);
        self.roots.push(id);
        self.refresh();
        id
    }

    /// Appends a child to `parent`. `None` if `parent` is not an item of
    /// this view.
    pub fn add_child(&mut self, parent: ItemId, label: impl Into<String>, color: Color) -> Option<ItemId> {
        if self.item(parent).is_none() {
            log::warn!("tree view: no item {parent:?}");
            return None;
        }
        let id = self.push_item(label.into(), color);
        self.items[parent.0 as usize].children.push(id);
        self.refresh();
        Some(id)
    }

    #[inline]
    pub fn item(&self, id: ItemId) -> Option<&TreeItem> {
        self.items.get(id.0 as usize)
    }

    pub fn set_open(&mut self, id: ItemId, open: bool) {
        if let Some(item) = self.items.get_mut(id.0 as usize) {
            if item.open != open {
                item.open = open;
                self.refresh();
            }
        }
    }

    pub fn toggle(&mut self, id: ItemId) {
        if let Some(open) = self.item(id).map(|i| i.open) {
            self.set_open(id, !open);
        }
    }

    /// Pre-order flattening of the open part of the forest.
    fn refresh(&mut self) {
        self.lines.clear();
        let mut stack: Vec<Line> = self.roots.iter().rev().map(|&item| Line { item, depth: 0 }).collect();
        while let Some(line) = stack.pop() {
            let Some(item) = self.items.get(line.item.0 as usize) else { continue };
            self.lines.push(line);
            if item.open {
                let depth = line.depth + 1;
                stack.extend(item.children.iter().rev().map(|&item| Line { item, depth }));
            }
        }
        self.dirty = true;
    }

    // ── view ──────────────────────────────────────────────────────────────

    /// Number of visible lines, on screen or not.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Item and nesting depth of line `index`.
    pub fn line(&self, index: usize) -> Option<(ItemId, u32)> {
        self.lines.get(index).map(|l| (l.item, l.depth))
    }

    /// Attached row nodes, top to bottom.
    #[inline]
    pub fn rows(&self) -> &[NodeId] {
        &self.pool[..self.bound]
    }

    /// Line shown by the first row.
    #[inline]
    pub fn first_line(&self) -> usize {
        self.top
    }

    /// Item shown by row `slot`.
    pub fn row_item(&self, slot: usize) -> Option<ItemId> {
        if slot >= self.bound {
            return None;
        }
        self.line(self.top + slot).map(|(item, _)| item)
    }

    #[inline]
    pub fn pane(&self) -> &Pane {
        &self.pane
    }

    pub(crate) fn owned_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.pane.bars().iter().chain(self.pool.iter().copied())
    }
}

pub(super) fn install(tree: &mut UiTree, id: NodeId, view: &mut TreeView) {
    pane::install(tree, id, &mut view.pane);
    if let Some(node) = tree.get_mut(id) {
        node.layout.kind = LayoutType::Vertical;
        node.layout.scale = ScaleXY::px(300.0, 400.0);
    }
}

pub(super) fn handle(view: &mut TreeView, state: &mut UiState) {
    let released = state.current_event == Some(EventKind::MouseButton)
        && state.mouse_button == MouseButton::Left
        && state.mouse_action == MouseButtonState::Released;
    if !released {
        return;
    }
    let Some(row) = state.clicked.filter(|&c| state.hovered == Some(c)) else { return };
    let Some(slot) = view.rows().iter().position(|&r| r == row) else { return };
    if let Some(item) = view.row_item(slot) {
        view.toggle(item);
        log::debug!("tree view: toggled {item:?}");
    }
}

/// Points the first `capacity` rows at `lines[top..]`, creating rows as
/// needed and detaching the unused ones.
fn bind_rows(tree: &mut UiTree, id: NodeId, view: &mut TreeView, top: usize, capacity: usize) {
    let want = capacity.min(view.lines.len().saturating_sub(top));
    while view.pool.len() < want {
        let row = tree.create(Button::new().hover_color(view.hover_color));
        view.pool.push(row);
    }

    for (slot, &row) in view.pool.iter().enumerate() {
        if slot >= want {
            if tree.parent(row) == Some(id) {
                tree.detach(id, row);
            }
            continue;
        }
        let line = view.lines[top + slot];
        let Some(item) = view.items.get(line.item.0 as usize) else { continue };
        if let Some(node) = tree.get_mut(row) {
            if let Some(button) = node.widget_mut().as_button_mut() {
                button.set_color(item.color);
                if button.state() == ButtonState::Idle {
                    node.visual.color = item.color;
                }
            }
            node.layout.scale = ScaleXY::new(Scale::rel(1.0), Scale::px(view.row_size));
            node.layout.margin = Edges { left: (line.depth as f32 * view.indent) as i32, ..Edges::default() };
            node.name(item.label.clone());
        }
        if tree.parent(row) != Some(id) {
            tree.attach(id, row);
        }
    }

    view.top = top;
    view.bound = want;
    view.window = Some((top, capacity));
    view.dirty = false;
}

pub(super) fn layout(tree: &mut UiTree, id: NodeId, view: &mut TreeView) {
    let total = view.lines.len() as f32 * view.row_size;
    let impact = pane::settle(tree, id, &view.pane, Some(total));
    let offset = pane::scroll_offset(tree, id, &view.pane);

    let height = tree.layout(id).map_or(0.0, |l| l.content_rect().size.y) - impact.y;
    let top = ((offset.y.max(0.0) / view.row_size) as usize).min(view.lines.len());
    let capacity = (height.max(0.0) / view.row_size) as usize + 2;

    if view.dirty || view.window != Some((top, capacity)) {
        bind_rows(tree, id, view, top, capacity);
        calculator::layout_generic(tree, id, impact);
    }
    let within = offset.y - top as f32 * view.row_size;
    scroll::offset_children(tree, id, Vec2::new(offset.x, within));
}

#[cfg(test)]
mod tests {
    use lav_engine::render::RecordingBinder;

    use super::*;
    use crate::widgets;
    use crate::window::UiWindow;

    fn grey() -> Color {
        Color::from_hex(0xa8a8a8ff)
    }

    fn view_of(t: &UiTree, id: NodeId) -> &TreeView {
        t.get(id).unwrap().widget().as_tree_view().unwrap()
    }

    /// `count` root items in a `size` view attached to the root.
    fn flat_list(count: usize, size: Vec2) -> (UiTree, NodeId) {
        let mut view = TreeView::new();
        for i in 0..count {
            view.add_root(format!("item {i}"), grey());
        }
        let mut t = UiTree::new();
        let id = t.create(view);
        t.add(t.root(), id);
        t.layout_mut(id).unwrap().set_computed(Vec2::ZERO, size);
        (t, id)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    // ── flattening ────────────────────────────────────────────────────────

    #[test]
    fn open_items_flatten_in_pre_order() {
        let mut v = TreeView::new();
        let a = v.add_root("a", grey());
        let c = v.add_child(a, "c", grey()).unwrap();
        let d = v.add_child(a, "d", grey()).unwrap();
        let g = v.add_child(d, "g", grey()).unwrap();
        let e = v.add_child(a, "e", grey()).unwrap();
        let b = v.add_root("b", grey());
        let f = v.add_child(b, "f", grey()).unwrap();

        let order: Vec<_> = (0..v.line_count()).map(|i| v.line(i).unwrap()).collect();
        assert_eq!(order, vec![(a, 0), (c, 1), (d, 1), (g, 2), (e, 1), (b, 0), (f, 1)]);

        v.toggle(d);
        let items: Vec<_> = (0..v.line_count()).map(|i| v.line(i).unwrap().0).collect();
        assert_eq!(items, vec![a, c, d, e, b, f]);

        v.set_open(a, false);
        assert_eq!(v.line_count(), 3);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut v = TreeView::new();
        let mut other = TreeView::new();
        other.add_root("x", grey());
        let foreign = other.add_root("y", grey());
        assert_eq!(v.add_child(foreign, "z", grey()), None);
        assert_eq!(v.line_count(), 0);
    }

    // ── virtualization ────────────────────────────────────────────────────

    #[test]
    fn only_the_viewport_gets_rows() {
        let (mut t, id) = flat_list(100, Vec2::new(300.0, 300.0));
        widgets::layout(&mut t, id);

        let v = view_of(&t, id);
        assert_eq!(v.rows().len(), 12);
        assert_eq!(v.first_line(), 0);
        assert_eq!(t.layout(v.rows()[0]).unwrap().computed_pos(), Vec2::ZERO);
        assert_eq!(t.layout(v.rows()[1]).unwrap().computed_pos().y, 30.0);

        let bar = v.pane().vertical_bar().unwrap();
        assert!(t.is_attached(bar));
        let range = t.get(bar).unwrap().widget().as_slider().unwrap().range_bounds();
        assert_eq!(range, (0.0, 2700.0));
    }

    #[test]
    fn scrolling_recycles_rows() {
        let (mut t, id) = flat_list(100, Vec2::new(300.0, 300.0));
        widgets::layout(&mut t, id);
        let nodes_before = t.len();
        let first_row = view_of(&t, id).rows()[0];

        let bar = view_of(&t, id).pane().vertical_bar().unwrap();
        t.get_mut(bar).unwrap().widget_mut().as_slider_mut().unwrap().set_value(95.0);
        widgets::layout(&mut t, id);

        let v = view_of(&t, id);
        assert_eq!(v.first_line(), 3);
        assert_eq!(v.row_item(0), v.line(3).map(|(item, _)| item));
        assert_eq!(v.rows()[0], first_row);
        assert!(approx(t.layout(first_row).unwrap().computed_pos().y, -5.0));
        assert_eq!(t.get(first_row).unwrap().label(), format!("item 3{first_row}"));
        assert_eq!(t.len(), nodes_before);
    }

    #[test]
    fn short_lists_have_no_scrollbar_and_fewer_rows() {
        let (mut t, id) = flat_list(3, Vec2::new(300.0, 300.0));
        widgets::layout(&mut t, id);
        let v = view_of(&t, id);
        assert_eq!(v.rows().len(), 3);
        assert!(!t.is_attached(v.pane().vertical_bar().unwrap()));
    }

    #[test]
    fn nested_rows_are_indented() {
        let mut view = TreeView::new().indent(16.0);
        let a = view.add_root("a", grey());
        view.add_child(a, "b", grey());
        let mut t = UiTree::new();
        let id = t.create(view);
        t.add(t.root(), id);
        t.layout_mut(id).unwrap().set_computed(Vec2::ZERO, Vec2::new(300.0, 300.0));
        widgets::layout(&mut t, id);

        let child_row = view_of(&t, id).rows()[1];
        let l = t.layout(child_row).unwrap();
        assert_eq!(l.computed_pos().x, 16.0);
        assert_eq!(l.computed_scale().x, 284.0);
    }

    #[test]
    fn destroying_the_view_frees_pooled_rows() {
        let (mut t, id) = flat_list(20, Vec2::new(300.0, 120.0));
        widgets::layout(&mut t, id);
        let pooled = view_of(&t, id).rows().len();
        // view + vertical bar + rows
        assert_eq!(t.destroy(id), 1 + 1 + pooled);
        assert!(t.is_empty());
    }

    // ── through the window ────────────────────────────────────────────────

    fn window_with_groups() -> (UiWindow, RecordingBinder, NodeId) {
        let mut view = TreeView::new();
        for g in 0..3 {
            let group = view.add_root(format!("group {g}"), grey());
            for i in 0..2 {
                view.add_child(group, format!("leaf {g}.{i}"), grey());
            }
        }
        let mut win = UiWindow::new("tree", Vec2::new(400.0, 300.0));
        let root = win.root();
        let id = win.tree_mut().create(view);
        win.tree_mut().configure(id, |n| {
            n.scale(ScaleXY::px(300.0, 300.0));
        });
        win.tree_mut().add(root, id);
        (win, RecordingBinder::new(), id)
    }

    #[test]
    fn releasing_on_a_row_toggles_its_item() {
        let (mut win, mut gpu, id) = window_with_groups();
        win.run(&mut gpu);
        assert_eq!(view_of(win.tree(), id).rows().len(), 9);

        win.on_mouse_move(Vec2::new(10.0, 15.0));
        win.on_mouse_button(MouseButton::Left, MouseButtonState::Pressed);
        win.on_mouse_button(MouseButton::Left, MouseButtonState::Released);
        win.run(&mut gpu);

        let v = view_of(win.tree(), id);
        assert_eq!(v.line_count(), 7);
        assert_eq!(v.rows().len(), 7);
        assert!(!v.item(v.line(0).unwrap().0).unwrap().open);
    }

    #[test]
    fn release_off_the_pressed_row_does_nothing() {
        let (mut win, mut gpu, id) = window_with_groups();
        win.run(&mut gpu);

        win.on_mouse_move(Vec2::new(10.0, 15.0));
        win.on_mouse_button(MouseButton::Left, MouseButtonState::Pressed);
        win.on_mouse_move(Vec2::new(10.0, 75.0));
        win.on_mouse_button(MouseButton::Left, MouseButtonState::Released);
        win.run(&mut gpu);

        assert_eq!(view_of(win.tree(), id).line_count(), 9);
    }

    #[test]
    fn wheel_over_rows_scrolls_the_list() {
        let (mut win, mut gpu, id) = window_with_groups();
        win.tree_mut().configure(id, |n| {
            n.scale(ScaleXY::px(300.0, 120.0));
        });
        win.run(&mut gpu);
        let bar = view_of(win.tree(), id).pane().vertical_bar().unwrap();
        assert!(win.tree().is_attached(bar));

        win.on_mouse_move(Vec2::new(10.0, 15.0));
        assert_eq!(win.state().closest_scroll(), Some(bar));

        win.on_scroll(Vec2::new(0.0, -1.0));
        win.run(&mut gpu);
        let v = view_of(win.tree(), id);
        assert_eq!(v.first_line(), 0);
        assert!(approx(win.tree().layout(v.rows()[0]).unwrap().computed_pos().y, -20.0));
    }
}
