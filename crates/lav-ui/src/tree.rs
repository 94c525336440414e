//! Arena storage for one window's element tree.
//!
//! Nodes live in a hash map keyed by [`NodeId`]; parent/child edges are
//! plain ids. The tree is the only place edges are changed, so the
//! single-parent invariant holds by construction: a node has a parent iff it
//! appears exactly once in that parent's `children`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::{self, Write as _};

use lav_engine::coords::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::event::EventTable;
use crate::layout::{LayoutAttribs, LayoutIssue};
use crate::node::{GpuSlots, Node, NodeId};
use crate::widgets::{self, Widget};

/// Rejected tree edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    MissingNode(NodeId),
    SelfParent(NodeId),
    AlreadyParented { child: NodeId, parent: NodeId },
    WouldCycle { parent: NodeId, child: NodeId },
    RejectsChildren(NodeId),
    IsRoot(NodeId),
    NotAChild { parent: NodeId, child: NodeId },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::MissingNode(id) => write!(f, "node {id} does not exist"),
            TreeError::SelfParent(id) => write!(f, "node {id} cannot be its own parent"),
            TreeError::AlreadyParented { child, parent } => {
                write!(f, "node {child} is already a child of {parent}")
            }
            TreeError::WouldCycle { parent, child } => {
                write!(f, "adding {child} under {parent} would create a cycle")
            }
            TreeError::RejectsChildren(id) => write!(f, "node {id} does not accept children"),
            TreeError::IsRoot(id) => write!(f, "root {id} cannot be re-parented or destroyed"),
            TreeError::NotAChild { parent, child } => {
                write!(f, "node {child} is not a child of {parent}")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Return value of a [`UiTree::walk`] callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Visit {
    Continue,
    SkipChildren,
}

pub struct UiTree {
    nodes: FxHashMap<NodeId, Node>,
    root: NodeId,
    /// Handles of destroyed nodes, released by the window before its next render.
    pending_release: Vec<GpuSlots>,
    /// Layout issues already logged at warn.
    reported: RefCell<FxHashSet<String>>,
}

impl Default for UiTree {
    fn default() -> Self {
        Self::new()
    }
}

impl UiTree {
    pub fn new() -> Self {
        let root = Node::new(Widget::Root);
        let root_id = root.id();
        let mut nodes = FxHashMap::default();
        nodes.insert(root_id, root);
        Self {
            nodes,
            root: root_id,
            pending_release: Vec::new(),
            reported: RefCell::default(),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Creates a detached node. Widgets with internal structure (panes,
    /// split panes) create their helper nodes here too.
    pub fn create(&mut self, widget: impl Into<Widget>) -> NodeId {
        let node = Node::new(widget.into());
        let id = node.id();
        self.nodes.insert(id, node);
        widgets::install(self, id);
        id
    }

    // ── access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Runs `f` on the node. Returns `false` if it does not exist.
    pub fn configure(&mut self, id: NodeId, f: impl FnOnce(&mut Node)) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                f(node);
                true
            }
            None => {
                log::warn!("configure: node {id} does not exist");
                false
            }
        }
    }

    #[inline]
    pub fn layout(&self, id: NodeId) -> Option<&LayoutAttribs> {
        self.nodes.get(&id).map(|n| &n.layout)
    }

    #[inline]
    pub fn layout_mut(&mut self, id: NodeId) -> Option<&mut LayoutAttribs> {
        self.nodes.get_mut(&id).map(|n| &mut n.layout)
    }

    #[inline]
    pub fn events_mut(&mut self, id: NodeId) -> Option<&mut EventTable> {
        self.nodes.get_mut(&id).map(|n| &mut n.events)
    }

    /// Children of `id` in flow order; empty when the node is missing.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    #[inline]
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.parent(id).is_some()
    }

    /// Children that take part in generic layout (scrollbars excluded).
    pub(crate) fn flow_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.nodes.get(c).is_some_and(|n| !n.is_scrollbar()))
            .collect()
    }

    /// Temporarily moves the node's widget out so it can be used alongside
    /// `&mut self`. While `f` runs the node reads as a plain block.
    pub(crate) fn with_widget<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut UiTree, &mut Widget) -> R,
    ) -> Option<R> {
        let mut widget = std::mem::take(&mut self.nodes.get_mut(&id)?.widget);
        let out = f(self, &mut widget);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.widget = widget;
        }
        Some(out)
    }

    // ── edges ─────────────────────────────────────────────────────────────

    /// Appends `child` to `parent`.
    ///
    /// Fails when either node is missing, when `child` is `parent`, the root,
    /// already parented or an ancestor of `parent`, and when `parent` does not
    /// take user children.
    pub fn try_add(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let p = self.nodes.get(&parent).ok_or(TreeError::MissingNode(parent))?;
        if !p.widget.accepts_user_children() {
            return Err(TreeError::RejectsChildren(parent));
        }
        self.check_attach(parent, child)?;
        self.link(parent, child);
        Ok(())
    }

    /// [`try_add`](Self::try_add) that logs the failure and reports it as `false`.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> bool {
        match self.try_add(parent, child) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("add: {err}");
                false
            }
        }
    }

    /// Adds each child in order. Returns how many were added.
    pub fn add_all(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) -> usize {
        children.into_iter().filter(|&c| self.add(parent, c)).count()
    }

    /// Internal attach that ignores the parent's user-child policy.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.nodes.contains_key(&parent) {
            log::warn!("attach: {}", TreeError::MissingNode(parent));
            return false;
        }
        match self.check_attach(parent, child) {
            Ok(()) => {
                self.link(parent, child);
                true
            }
            Err(err) => {
                log::warn!("attach: {err}");
                false
            }
        }
    }

    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let c = self.nodes.get(&child).ok_or(TreeError::MissingNode(child))?;
        if parent == child {
            return Err(TreeError::SelfParent(child));
        }
        if child == self.root {
            return Err(TreeError::IsRoot(child));
        }
        if let Some(existing) = c.parent {
            return Err(TreeError::AlreadyParented { child, parent: existing });
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(TreeError::WouldCycle { parent, child });
            }
            cursor = self.parent(id);
        }
        Ok(())
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
    }

    /// Removes every child of `parent` matching `pred`, clearing its parent
    /// link. Removed nodes stay alive and may be re-attached elsewhere.
    pub fn remove_where(&mut self, parent: NodeId, pred: impl FnMut(&Node) -> bool) -> usize {
        match self.nodes.get(&parent) {
            None => {
                log::warn!("remove: {}", TreeError::MissingNode(parent));
                0
            }
            Some(p) if !p.widget.accepts_user_children() => {
                log::warn!("remove: {}", TreeError::RejectsChildren(parent));
                0
            }
            Some(_) => self.detach_where(parent, pred),
        }
    }

    /// Removes one child. Logs and returns `false` if it is not a child of `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> bool {
        let removed = self.remove_where(parent, |n| n.id() == child) == 1;
        if !removed && self.parent(child) != Some(parent) {
            log::warn!("remove: {}", TreeError::NotAChild { parent, child });
        }
        removed
    }

    pub fn remove_all(&mut self, parent: NodeId, children: &[NodeId]) -> usize {
        self.remove_where(parent, |n| children.contains(&n.id()))
    }

    pub(crate) fn detach_where(&mut self, parent: NodeId, mut pred: impl FnMut(&Node) -> bool) -> usize {
        let Some(p) = self.nodes.get(&parent) else {
            return 0;
        };
        let (gone, kept): (Vec<NodeId>, Vec<NodeId>) = p
            .children
            .iter()
            .copied()
            .partition(|c| self.nodes.get(c).is_some_and(&mut pred));

        for id in &gone {
            if let Some(n) = self.nodes.get_mut(id) {
                n.parent = None;
            }
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children = kept;
        }
        gone.len()
    }

    pub(crate) fn detach(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.detach_where(parent, |n| n.id() == child) == 1
    }

    /// Frees `id`, its descendants and any helper nodes they own.
    /// Returns how many nodes were freed.
    pub fn destroy(&mut self, id: NodeId) -> usize {
        if id == self.root {
            log::warn!("destroy: {}", TreeError::IsRoot(id));
            return 0;
        }
        if let Some(parent) = self.parent(id) {
            self.detach(parent, id);
        }

        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(next) = stack.pop() {
            let Some(node) = self.nodes.remove(&next) else {
                continue;
            };
            // Owned helpers may have been attached outside the subtree.
            if let Some(p) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
                p.children.retain(|&c| c != next);
            }
            stack.extend(node.children.iter().copied());
            stack.extend(node.widget.owned_nodes());
            if !node.gpu.is_empty() {
                self.pending_release.push(node.gpu);
            }
            freed += 1;
        }
        log::debug!("destroyed {freed} node(s) from {id}");
        freed
    }

    /// Logs a layout issue. The first occurrence goes to warn, repeats from
    /// later passes go to debug. Returns whether it was new.
    pub(crate) fn report_issue(&self, issue: LayoutIssue) -> bool {
        let msg = issue.to_string();
        let fresh = self.reported.borrow_mut().insert(msg.clone());
        if fresh {
            log::warn!("layout: {msg}");
        } else {
            log::debug!("layout: {msg}");
        }
        fresh
    }

    pub(crate) fn take_pending_release(&mut self) -> Vec<GpuSlots> {
        std::mem::take(&mut self.pending_release)
    }

    // ── traversal ─────────────────────────────────────────────────────────

    /// Breadth-first walk from `start`, parent before children.
    ///
    /// Children are read after the callback returns, so a callback that
    /// attaches nodes (scrollbars) sees them visited in the same walk.
    pub fn walk(&mut self, start: NodeId, mut f: impl FnMut(&mut UiTree, NodeId) -> Visit) {
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            if !self.nodes.contains_key(&id) {
                continue;
            }
            if f(self, id) == Visit::SkipChildren {
                continue;
            }
            queue.extend(self.children(id).iter().copied());
        }
    }

    /// Sizes the root to the window. The root is its own clip.
    pub(crate) fn prepare_root(&mut self, size: Vec2) {
        if let Some(root) = self.nodes.get_mut(&self.root) {
            root.layout.set_computed(Vec2::ZERO, size);
            root.layout.reset_view_box();
            if !root.layout.custom_index {
                root.layout.z_index = 1;
            }
            root.depth = 0;
        }
    }

    /// Indented listing of the attached tree.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, indent: usize, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let l = &node.layout;
        let _ = writeln!(
            out,
            "{:indent$}{} box=({}, {}, {}x{}) view=({}, {}, {}x{}) z={}",
            "",
            node.label(),
            l.computed_pos.x,
            l.computed_pos.y,
            l.computed_scale.x,
            l.computed_scale.y,
            l.view_pos.x,
            l.view_pos.y,
            l.view_scale.x,
            l.view_scale.y,
            l.z_index,
            indent = indent * 2,
        );
        for &child in &node.children {
            self.dump_node(child, indent + 1, out);
        }
    }
}

impl fmt::Debug for UiTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiTree")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Pane, Slider};

    fn block(tree: &mut UiTree) -> NodeId {
        tree.create(Widget::Block)
    }

    // ── add ───────────────────────────────────────────────────────────────

    #[test]
    fn add_sets_both_edges() {
        let mut t = UiTree::new();
        let a = block(&mut t);
        assert!(t.add(t.root(), a));
        assert_eq!(t.parent(a), Some(t.root()));
        assert_eq!(t.children(t.root()), &[a]);
    }

    #[test]
    fn add_rejects_invalid_edges() {
        let mut t = UiTree::new();
        let root = t.root();
        let a = block(&mut t);
        let b = block(&mut t);
        t.add(root, a);
        t.add(a, b);

        assert_eq!(t.try_add(a, a), Err(TreeError::SelfParent(a)));
        assert_eq!(t.try_add(b, a), Err(TreeError::AlreadyParented { child: a, parent: root }));
        assert_eq!(t.try_add(a, root), Err(TreeError::IsRoot(root)));

        let c = block(&mut t);
        let d = block(&mut t);
        t.add(c, d);
        assert_eq!(t.try_add(d, c), Err(TreeError::WouldCycle { parent: d, child: c }));

        let ghost = NodeId(u32::MAX);
        assert_eq!(t.try_add(a, ghost), Err(TreeError::MissingNode(ghost)));
        assert!(!t.add(a, ghost));

        assert_eq!(t.children(a), &[b]);
    }

    #[test]
    fn slider_rejects_user_children() {
        let mut t = UiTree::new();
        let s = t.create(Slider::new());
        let a = block(&mut t);
        assert_eq!(t.try_add(s, a), Err(TreeError::RejectsChildren(s)));
        assert!(!t.is_attached(a));
    }

    // ── remove ────────────────────────────────────────────────────────────

    #[test]
    fn remove_where_clears_links_and_keeps_others() {
        let mut t = UiTree::new();
        let root = t.root();
        let ids: Vec<_> = (0..4).map(|_| block(&mut t)).collect();
        t.add_all(root, ids.iter().copied());

        let removed = t.remove_where(root, |n| n.id() == ids[1] || n.id() == ids[3]);
        assert_eq!(removed, 2);
        assert_eq!(t.children(root), &[ids[0], ids[2]]);
        assert!(!t.is_attached(ids[1]));
        assert!(t.contains(ids[1]));

        // Re-attaching elsewhere is allowed once removed.
        assert!(t.add(ids[0], ids[1]));
    }

    #[test]
    fn remove_missing_child_is_noop() {
        let mut t = UiTree::new();
        let a = block(&mut t);
        assert!(!t.remove(t.root(), a));
        assert_eq!(t.remove_all(t.root(), &[a]), 0);
    }

    // ── destroy ───────────────────────────────────────────────────────────

    #[test]
    fn destroy_cascades_and_queues_gpu_handles() {
        let mut t = UiTree::new();
        let root = t.root();
        let a = block(&mut t);
        let b = block(&mut t);
        t.add(root, a);
        t.add(a, b);
        if let Some(n) = t.get_mut(b) {
            n.gpu.mesh = Some(lav_engine::render::MeshHandle::from_raw(9));
        }

        assert_eq!(t.destroy(a), 2);
        assert!(!t.contains(a) && !t.contains(b));
        assert!(t.children(root).is_empty());
        assert_eq!(t.take_pending_release().len(), 1);
        assert!(t.take_pending_release().is_empty());
    }

    #[test]
    fn destroying_a_pane_frees_detached_scrollbars() {
        let mut t = UiTree::new();
        let pane = t.create(Pane::new());
        // pane + its two scrollbars
        assert_eq!(t.destroy(pane), 3);
        assert!(t.is_empty());
    }

    #[test]
    fn destroying_a_pane_unlinks_its_bar_from_other_parents() {
        let mut t = UiTree::new();
        let root = t.root();
        let pane = t.create(Pane::new());
        let holder = block(&mut t);
        t.add(root, holder);
        let bar = t
            .get(pane)
            .and_then(|n| n.widget.owned_nodes().first().copied())
            .unwrap();
        assert!(t.add(holder, bar));

        assert_eq!(t.destroy(pane), 3);
        assert!(!t.contains(bar));
        assert!(t.children(holder).is_empty());
    }

    #[test]
    fn root_cannot_be_destroyed() {
        let mut t = UiTree::new();
        assert_eq!(t.destroy(t.root()), 0);
        assert!(t.contains(t.root()));
    }

    // ── walk ──────────────────────────────────────────────────────────────

    #[test]
    fn walk_is_breadth_first_and_can_skip() {
        let mut t = UiTree::new();
        let root = t.root();
        let a = block(&mut t);
        let b = block(&mut t);
        let a1 = block(&mut t);
        let b1 = block(&mut t);
        t.add_all(root, [a, b]);
        t.add(a, a1);
        t.add(b, b1);

        let mut seen = Vec::new();
        t.walk(root, |_, id| {
            seen.push(id);
            Visit::Continue
        });
        assert_eq!(seen, vec![root, a, b, a1, b1]);

        seen.clear();
        t.walk(root, |_, id| {
            seen.push(id);
            if id == a { Visit::SkipChildren } else { Visit::Continue }
        });
        assert_eq!(seen, vec![root, a, b, b1]);
    }

    #[test]
    fn dump_lists_attached_nodes() {
        let mut t = UiTree::new();
        let a = block(&mut t);
        t.configure(a, |n| {
            n.name("child");
        });
        t.add(t.root(), a);
        let dump = t.dump();
        assert!(dump.starts_with("Root#"));
        assert!(dump.contains("  child#"));
    }
}
