use lav_engine::coords::{Color, Rect, Vec2};

use crate::event::{EventKind, SliderEvt, UiEvent};
use crate::layout::{Axis, ScaleXY};
use crate::node::NodeId;
use crate::state::UiState;
use crate::tree::UiTree;

/// Linear map of `v` from `[in_start, in_end]` onto `[out_start, out_end]`,
/// clamped to the output range. A degenerate input range maps to `out_start`.
pub fn remap(v: f32, in_start: f32, in_end: f32, out_start: f32, out_end: f32) -> f32 {
    let span = in_end - in_start;
    if span == 0.0 || !span.is_finite() {
        return out_start;
    }
    let t = ((v - in_start) / span).clamp(0.0, 1.0);
    out_start + t * (out_end - out_start)
}

/// Track with a draggable knob mapping a `[0, 1]` percentage onto
/// `from..to`. Also used as a pane scrollbar.
///
/// Vertical sliders count from the bottom unless `invert_axis` is set.
/// `invert_axis` also flips the wheel direction.
#[derive(Debug, Clone)]
pub struct Slider {
    axis: Axis,
    percentage: f32,
    from: f32,
    to: f32,
    invert_axis: bool,
    sensitivity: f32,
    scroll_role: bool,
    knob: Rect,
    knob_color: Color,
    /// Pointer offset from the knob centre at grab time.
    grab_offset: Vec2,
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

impl Slider {
    pub const DEFAULT_SENSITIVITY: f32 = 2.0;

    pub fn new() -> Self {
        Self {
            axis: Axis::X,
            percentage: 0.0,
            from: 0.0,
            to: 100.0,
            invert_axis: false,
            sensitivity: Self::DEFAULT_SENSITIVITY,
            scroll_role: false,
            knob: Rect::default(),
            knob_color: Color::from_hex(0xca5555ff),
            grab_offset: Vec2::ZERO,
        }
    }

    /// Scrollbar flavour used by panes: value range tracks the overflow and
    /// the knob length shows the visible share.
    pub(crate) fn scrollbar(axis: Axis) -> Self {
        Self {
            axis,
            invert_axis: axis == Axis::Y,
            scroll_role: true,
            knob_color: Color::from_hex(0x5c5f66ff),
            ..Self::new()
        }
    }

    // ── builder ───────────────────────────────────────────────────────────

    pub fn vertical(mut self) -> Self {
        self.axis = Axis::Y;
        self
    }

    pub fn range(mut self, from: f32, to: f32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn value(mut self, v: f32) -> Self {
        self.set_value(v);
        self
    }

    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn invert_axis(mut self, invert: bool) -> Self {
        self.invert_axis = invert;
        self
    }

    pub fn knob_color(mut self, color: Color) -> Self {
        self.knob_color = color;
        self
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    #[inline]
    pub fn get_value(&self) -> f32 {
        remap(self.percentage, 0.0, 1.0, self.from, self.to)
    }

    pub fn set_value(&mut self, v: f32) {
        self.percentage = remap(v, self.from, self.to, 0.0, 1.0);
    }

    /// Changes the range, keeping the percentage.
    pub fn set_range(&mut self, from: f32, to: f32) {
        self.from = from;
        self.to = to;
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    #[inline]
    pub fn range_bounds(&self) -> (f32, f32) {
        (self.from, self.to)
    }

    #[inline]
    pub fn is_scrollbar(&self) -> bool {
        self.scroll_role
    }

    /// Knob box from the last layout.
    #[inline]
    pub fn knob(&self) -> Rect {
        self.knob
    }

    #[inline]
    pub fn knob_fill(&self) -> Color {
        self.knob_color
    }

    /// Fraction of the free track in front of the knob, start at top/left.
    fn track_fraction(&self) -> f32 {
        if self.axis == Axis::Y && !self.invert_axis {
            1.0 - self.percentage
        } else {
            self.percentage
        }
    }

    fn place_knob(&mut self, track: Rect) {
        let along = self.axis;
        let across = along.other();
        let track_len = along.get(track.size);
        let thickness = across.get(track.size);

        let len = if self.scroll_role {
            thickness.max(track_len - (self.to - self.from).abs())
        } else {
            thickness
        }
        .min(track_len)
        .max(0.0);

        let start = along.get(track.origin);
        let at = remap(self.track_fraction(), 0.0, 1.0, start, start + track_len - len);
        let origin = along.compose(at, across.get(track.origin));
        self.knob = Rect::from_origin_size(origin, along.compose(len, thickness));
    }

    /// Percentage for a knob centred on `pos`.
    fn percentage_at(&self, track: Rect, pos: Vec2) -> f32 {
        let along = self.axis;
        let half = along.get(self.knob.size) / 2.0;
        let start = along.get(track.origin) + half;
        let end = along.get(track.end()) - half;
        let r = remap(along.get(pos), start, end, 0.0, 1.0);
        if self.axis == Axis::Y && !self.invert_axis { 1.0 - r } else { r }
    }
}

pub(super) fn install(tree: &mut UiTree, id: NodeId, slider: &mut Slider) {
    if slider.scroll_role {
        return;
    }
    if let Some(node) = tree.get_mut(id) {
        node.layout.scale = match slider.axis {
            Axis::X => ScaleXY::px(200.0, 20.0),
            Axis::Y => ScaleXY::px(20.0, 200.0),
        };
        node.visual.color = Color::from_hex(0x3a3d42ff);
    }
}

pub(super) fn layout(tree: &mut UiTree, id: NodeId, slider: &mut Slider) {
    if let Some(l) = tree.layout(id) {
        slider.place_knob(l.computed_rect());
    }
}

pub(super) fn handle(tree: &mut UiTree, id: NodeId, slider: &mut Slider, state: &mut UiState) {
    let Some(track) = tree.layout(id).map(|l| l.computed_rect()) else { return };

    match state.current_event {
        Some(EventKind::MouseScroll) => {
            let o = state.scroll_offset;
            let lines = if slider.axis == Axis::X && o.x != 0.0 { o.x } else { o.y };
            let sign = if slider.invert_axis { -1.0 } else { 1.0 };
            slider.set_value(slider.get_value() + lines * slider.sensitivity * sign);
        }
        Some(EventKind::MouseLeftClick) => {
            let half = slider.knob.size / 2.0;
            let d = state.mouse_pos - slider.knob.center();
            // Grabbing the knob keeps the grab point; elsewhere the knob jumps under the pointer.
            slider.grab_offset = Vec2::new(
                if d.x.abs() < half.x { d.x } else { 0.0 },
                if d.y.abs() < half.y { d.y } else { 0.0 },
            );
            slider.percentage = slider.percentage_at(track, state.mouse_pos - slider.grab_offset);
        }
        Some(EventKind::MouseDrag) => {
            slider.percentage = slider.percentage_at(track, state.mouse_pos - slider.grab_offset);
        }
        _ => return,
    }

    slider.place_knob(track);
    let event = UiEvent::from(SliderEvt { value: slider.get_value(), percentage: slider.percentage });
    if let Some(events) = tree.events_mut(id) {
        events.emit(&event);
    }
}
