use glam::Mat4;
use lav_engine::coords::{Rect, Vec2};
use lav_engine::render::QuadDraw;

// ── axis ──────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    #[inline]
    pub fn get(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    pub fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }

    /// Builds a vector from a component along `self` and one across it.
    #[inline]
    pub fn compose(self, along: f32, across: f32) -> Vec2 {
        match self {
            Axis::X => Vec2::new(along, across),
            Axis::Y => Vec2::new(across, along),
        }
    }
}

// ── scale ─────────────────────────────────────────────────────────────────

/// How a node's extent on one axis is resolved.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScaleType {
    /// Literal logical pixels.
    Px,
    /// Fraction in `(0, 1]` of the parent's content box.
    Rel,
    /// Wraps the node's own children.
    Fit,
    /// Equal share of what flow siblings leave over.
    Fill,
    /// Fractional grid track unit.
    Fr,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scale {
    pub value: f32,
    pub kind: ScaleType,
}

impl Scale {
    #[inline]
    pub const fn px(value: f32) -> Self {
        Self { value, kind: ScaleType::Px }
    }

    #[inline]
    pub const fn rel(value: f32) -> Self {
        Self { value, kind: ScaleType::Rel }
    }

    #[inline]
    pub const fn fit() -> Self {
        Self { value: 0.0, kind: ScaleType::Fit }
    }

    #[inline]
    pub const fn fill() -> Self {
        Self { value: 0.0, kind: ScaleType::Fill }
    }

    #[inline]
    pub const fn fr(value: f32) -> Self {
        Self { value, kind: ScaleType::Fr }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaleXY {
    pub x: Scale,
    pub y: Scale,
}

impl ScaleXY {
    #[inline]
    pub const fn new(x: Scale, y: Scale) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn px(x: f32, y: f32) -> Self {
        Self::new(Scale::px(x), Scale::px(y))
    }

    #[inline]
    pub const fn rel(x: f32, y: f32) -> Self {
        Self::new(Scale::rel(x), Scale::rel(y))
    }

    #[inline]
    pub const fn fill() -> Self {
        Self::new(Scale::fill(), Scale::fill())
    }

    #[inline]
    pub const fn fit() -> Self {
        Self::new(Scale::fit(), Scale::fit())
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> Scale {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, axis: Axis) -> &mut Scale {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

// ── position ──────────────────────────────────────────────────────────────

/// Per-axis placement: by the parent's flow, or at a fixed offset from the
/// parent's content-box origin.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum Position {
    #[default]
    Computed,
    Absolute(f32),
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PositionXY {
    pub x: Position,
    pub y: Position,
}

impl PositionXY {
    #[inline]
    pub const fn absolute(x: f32, y: f32) -> Self {
        Self { x: Position::Absolute(x), y: Position::Absolute(y) }
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> Position {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

// ── edges ─────────────────────────────────────────────────────────────────

/// Four-sided integer insets (margin, padding, border).
///
/// Used as corner radii too, read clockwise from the top-left corner:
/// `top` → top-left, `right` → top-right, `bottom` → bottom-right,
/// `left` → bottom-left.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    #[inline]
    pub const fn all(v: i32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        (self.left + self.right) as f32
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        (self.top + self.bottom) as f32
    }

    /// Total inset along `axis`.
    #[inline]
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.h(),
            Axis::Y => self.v(),
        }
    }

    /// `(left, top)` offset.
    #[inline]
    pub fn start(self) -> Vec2 {
        Vec2::new(self.left as f32, self.top as f32)
    }

    /// `(h, v)` totals.
    #[inline]
    pub fn sum(self) -> Vec2 {
        Vec2::new(self.h(), self.v())
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.top as f32, self.right as f32, self.bottom as f32, self.left as f32]
    }
}

// ── flow ──────────────────────────────────────────────────────────────────

/// Child flow of a node.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LayoutType {
    #[default]
    Horizontal,
    Vertical,
    Grid,
}

impl LayoutType {
    /// Axis the flow cursor advances along. Grids report `X`; they never flow.
    #[inline]
    pub fn flow_axis(self) -> Axis {
        match self {
            LayoutType::Vertical => Axis::Y,
            LayoutType::Horizontal | LayoutType::Grid => Axis::X,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Align {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Align {
    /// Share of the slack placed before the content on `axis` (0, ½ or 1).
    pub fn factor(self, axis: Axis) -> f32 {
        use Align::*;
        let (h, v) = match self {
            TopLeft => (0.0, 0.0),
            TopCenter => (0.5, 0.0),
            TopRight => (1.0, 0.0),
            CenterLeft => (0.0, 0.5),
            Center => (0.5, 0.5),
            CenterRight => (1.0, 0.5),
            BottomLeft => (0.0, 1.0),
            BottomCenter => (0.5, 1.0),
            BottomRight => (1.0, 1.0),
        };
        match axis {
            Axis::X => h,
            Axis::Y => v,
        }
    }
}

/// Distribution of leftover main-axis space between non-wrapping children.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Spacing {
    #[default]
    Tight,
    /// First child flush with the start, last flush with the end.
    EvenNoGap,
    /// Equal gaps everywhere, including both ends.
    EvenGap,
}

// ── grid ──────────────────────────────────────────────────────────────────

/// Track definitions of a grid parent. Tracks must be PIXEL or FR; an empty
/// list means a single `1fr` track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSpec {
    pub columns: Vec<Scale>,
    pub rows: Vec<Scale>,
    /// Track boundaries from the last layout, relative to the content box.
    pub(crate) col_starts: Vec<f32>,
    pub(crate) row_starts: Vec<f32>,
}

impl GridSpec {
    pub fn new(columns: Vec<Scale>, rows: Vec<Scale>) -> Self {
        Self { columns, rows, ..Default::default() }
    }

    pub fn col_starts(&self) -> &[f32] {
        &self.col_starts
    }

    pub fn row_starts(&self) -> &[f32] {
        &self.row_starts
    }
}

/// A grid coordinate, or a span when used as `grid_span`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct GridCell {
    pub row: u16,
    pub col: u16,
}

impl GridCell {
    #[inline]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

// ── attributes ────────────────────────────────────────────────────────────

/// Per-node geometry contract: user inputs plus the boxes the calculator
/// writes each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutAttribs {
    pub kind: LayoutType,
    pub scale: ScaleXY,
    pub pos: PositionXY,

    pub margin: Edges,
    pub padding: Edges,
    pub border: Edges,
    pub border_radius: Edges,

    /// Alignment of the children inside this node.
    pub align: Align,
    /// Alignment of this node inside its grid cell.
    pub self_align: Align,
    pub spacing: Spacing,
    pub wrap: bool,

    pub min_scale: Vec2,
    pub max_scale: Vec2,

    pub grid: GridSpec,
    pub grid_pos: GridCell,
    pub grid_span: GridCell,

    pub z_index: u32,
    /// Keeps `z_index` instead of deriving it from the parent.
    pub custom_index: bool,

    pub(crate) computed_pos: Vec2,
    pub(crate) computed_scale: Vec2,
    pub(crate) view_pos: Vec2,
    pub(crate) view_scale: Vec2,
}

impl Default for LayoutAttribs {
    fn default() -> Self {
        Self {
            kind: LayoutType::Horizontal,
            scale: ScaleXY::px(100.0, 100.0),
            pos: PositionXY::default(),
            margin: Edges::default(),
            padding: Edges::default(),
            border: Edges::default(),
            border_radius: Edges::default(),
            align: Align::TopLeft,
            self_align: Align::TopLeft,
            spacing: Spacing::Tight,
            wrap: false,
            min_scale: Vec2::splat(10.0),
            max_scale: Vec2::splat(10_000.0),
            grid: GridSpec::default(),
            grid_pos: GridCell::new(0, 0),
            grid_span: GridCell::new(1, 1),
            z_index: 1,
            custom_index: false,
            computed_pos: Vec2::ZERO,
            computed_scale: Vec2::ZERO,
            view_pos: Vec2::ZERO,
            view_scale: Vec2::ZERO,
        }
    }
}

impl LayoutAttribs {
    #[inline]
    pub fn computed_pos(&self) -> Vec2 {
        self.computed_pos
    }

    #[inline]
    pub fn computed_scale(&self) -> Vec2 {
        self.computed_scale
    }

    /// Content + padding + border box, excluding margin.
    #[inline]
    pub fn computed_rect(&self) -> Rect {
        Rect::from_origin_size(self.computed_pos, self.computed_scale)
    }

    /// Computed box grown by the margin.
    #[inline]
    pub fn full_rect(&self) -> Rect {
        Rect::from_origin_size(
            self.computed_pos - self.margin.start(),
            self.computed_scale + self.margin.sum(),
        )
    }

    /// Computed box shrunk by padding and border.
    #[inline]
    pub fn content_rect(&self) -> Rect {
        let inset = self.padding.start() + self.border.start();
        let size = self.computed_scale - self.padding.sum() - self.border.sum();
        Rect::from_origin_size(self.computed_pos + inset, size.max(Vec2::ZERO))
    }

    /// Computed box shrunk by the border only.
    #[inline]
    pub fn inner_rect(&self) -> Rect {
        let b = self.border;
        self.computed_rect()
            .inset(b.top as f32, b.right as f32, b.bottom as f32, b.left as f32)
    }

    /// Visible part of the computed box after ancestor clipping.
    #[inline]
    pub fn view_rect(&self) -> Rect {
        Rect::from_origin_size(self.view_pos, self.view_scale)
    }

    #[inline]
    pub fn is_point_inside(&self, p: Vec2) -> bool {
        self.computed_rect().contains(p)
    }

    #[inline]
    pub fn is_point_inside_view(&self, p: Vec2) -> bool {
        self.view_rect().contains(p)
    }

    /// Intersects the computed box with the parent's view box shrunk by the
    /// parent's border. The result never has a negative size.
    pub fn compute_view_box(&mut self, parent_view: Rect, parent_border: Edges) {
        let b = parent_border;
        let clip = parent_view.inset(b.top as f32, b.right as f32, b.bottom as f32, b.left as f32);
        let view = self.computed_rect().clip(clip);
        self.view_pos = view.origin;
        self.view_scale = view.size;
    }

    /// View box equal to the computed box (window roots).
    pub fn reset_view_box(&mut self) {
        self.view_pos = self.computed_pos;
        self.view_scale = self.computed_scale;
    }

    pub(crate) fn set_computed(&mut self, pos: Vec2, scale: Vec2) {
        self.computed_pos = pos;
        self.computed_scale = scale;
    }

    /// Model matrix mapping the unit quad onto the computed box at this
    /// node's stacking depth.
    pub fn transform(&self) -> Mat4 {
        QuadDraw::model_for(self.computed_rect(), self.z_index)
    }
}
