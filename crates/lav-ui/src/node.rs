use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use lav_engine::coords::Color;
use lav_engine::render::{MeshHandle, ShaderHandle};

use crate::event::EventTable;
use crate::layout::{Align, Edges, LayoutAttribs, LayoutType, PositionXY, ScaleXY, Spacing};
use crate::widgets::Widget;

/// Process-unique node identity. Ids are never reused, across windows too.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

impl NodeId {
    pub(crate) fn next() -> Self {
        NodeId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Custom tag carried by auto-injected scrollbars. Generic layout passes
/// skip children with this tag.
pub const SCROLL_TAG: u32 = 1;

/// Fill and border colours.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Visual {
    pub color: Color,
    pub border_color: Color,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x2b2d31ff),
            border_color: Color::from_hex(0x1e1f22ff),
        }
    }
}

/// GPU handles owned by a node. Acquired on first render.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct GpuSlots {
    pub mesh: Option<MeshHandle>,
    pub shader: Option<ShaderHandle>,
    /// Set after a failed load so the node stops retrying every frame.
    pub failed: bool,
}

impl GpuSlots {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_none() && self.shader.is_none()
    }
}

/// One element of a [`UiTree`](crate::tree::UiTree).
///
/// Edges (`parent`, `children`) are maintained by the tree; everything else
/// is freely configurable.
pub struct Node {
    id: NodeId,
    name: Option<String>,
    pub(crate) widget: Widget,
    pub(crate) custom_tag: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    pub layout: LayoutAttribs,
    pub visual: Visual,
    pub events: EventTable,
    /// Excludes this node from hover scans and dispatch. Children still take part.
    pub ignore_events: bool,

    pub(crate) depth: u32,
    pub(crate) gpu: GpuSlots,
}

impl Node {
    pub(crate) fn new(widget: Widget) -> Self {
        Self {
            id: NodeId::next(),
            name: None,
            widget,
            custom_tag: 0,
            parent: None,
            children: Vec::new(),
            layout: LayoutAttribs::default(),
            visual: Visual::default(),
            events: EventTable::new(),
            ignore_events: false,
            depth: 0,
            gpu: GpuSlots::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    #[inline]
    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn custom_tag(&self) -> u32 {
        self.custom_tag
    }

    #[inline]
    pub fn is_scrollbar(&self) -> bool {
        self.custom_tag == SCROLL_TAG
    }

    /// Distance from the window root, refreshed every layout pass.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// `name` if set, otherwise `Kind#id`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name}{}", self.id),
            None => format!("{}{}", self.widget.tag(), self.id),
        }
    }

    // ── chained setters ───────────────────────────────────────────────────

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn scale(&mut self, scale: ScaleXY) -> &mut Self {
        self.layout.scale = scale;
        self
    }

    pub fn pos(&mut self, pos: PositionXY) -> &mut Self {
        self.layout.pos = pos;
        self
    }

    pub fn kind(&mut self, kind: LayoutType) -> &mut Self {
        self.layout.kind = kind;
        self
    }

    pub fn margin(&mut self, margin: Edges) -> &mut Self {
        self.layout.margin = margin;
        self
    }

    pub fn padding(&mut self, padding: Edges) -> &mut Self {
        self.layout.padding = padding;
        self
    }

    pub fn border(&mut self, border: Edges) -> &mut Self {
        self.layout.border = border;
        self
    }

    pub fn radius(&mut self, radius: Edges) -> &mut Self {
        self.layout.border_radius = radius;
        self
    }

    pub fn align(&mut self, align: Align) -> &mut Self {
        self.layout.align = align;
        self
    }

    pub fn spacing(&mut self, spacing: Spacing) -> &mut Self {
        self.layout.spacing = spacing;
        self
    }

    pub fn wrap(&mut self, wrap: bool) -> &mut Self {
        self.layout.wrap = wrap;
        self
    }

    /// Pins the stacking index instead of deriving it from the parent.
    pub fn z_index(&mut self, z: u32) -> &mut Self {
        self.layout.z_index = z;
        self.layout.custom_index = true;
        self
    }

    pub fn color(&mut self, color: Color) -> &mut Self {
        self.visual.color = color;
        self
    }

    pub fn border_color(&mut self, color: Color) -> &mut Self {
        self.visual.border_color = color;
        self
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("widget", &self.widget.tag())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("custom_tag", &self.custom_tag)
            .finish_non_exhaustive()
    }
}
