use lav_engine::coords::Vec2;
use lav_engine::input::{CursorShape, MouseButton, MouseButtonState};

use crate::event::EventKind;
use crate::node::NodeId;

/// Per-window interaction state.
///
/// Written by the window driver before each dispatch; widgets read it and
/// may set `dragging` or request a cursor.
#[derive(Debug, Clone)]
pub struct UiState {
    pub(crate) mouse_pos: Vec2,
    pub(crate) mouse_delta: Vec2,

    pub(crate) hovered: Option<NodeId>,
    pub(crate) prev_hovered: Option<NodeId>,
    /// Highest z seen by the running hover scan.
    pub(crate) hovered_z: u32,
    pub(crate) clicked: Option<NodeId>,
    pub(crate) selected: Option<NodeId>,
    pub(crate) closest_scroll: Option<NodeId>,

    pub(crate) mouse_button: MouseButton,
    pub(crate) mouse_action: MouseButtonState,
    pub(crate) scroll_offset: Vec2,
    pub(crate) window_size: Vec2,
    pub(crate) window_size_delta: Vec2,

    pub(crate) dragging: bool,
    pub(crate) current_event: Option<EventKind>,

    pub(crate) current_cursor: CursorShape,
    pub(crate) wanted_cursor: Option<CursorShape>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
            hovered: None,
            prev_hovered: None,
            hovered_z: 0,
            clicked: None,
            selected: None,
            closest_scroll: None,
            mouse_button: MouseButton::Left,
            mouse_action: MouseButtonState::Released,
            scroll_offset: Vec2::ZERO,
            window_size: Vec2::ZERO,
            window_size_delta: Vec2::ZERO,
            dragging: false,
            current_event: None,
            current_cursor: CursorShape::Arrow,
            wanted_cursor: None,
        }
    }
}

impl UiState {
    #[inline]
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    #[inline]
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    #[inline]
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    #[inline]
    pub fn clicked(&self) -> Option<NodeId> {
        self.clicked
    }

    #[inline]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    #[inline]
    pub fn closest_scroll(&self) -> Option<NodeId> {
        self.closest_scroll
    }

    #[inline]
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    #[inline]
    pub fn window_size(&self) -> Vec2 {
        self.window_size
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[inline]
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Kind currently being dispatched, if any.
    #[inline]
    pub fn current_event(&self) -> Option<EventKind> {
        self.current_event
    }

    #[inline]
    pub fn is_left_held(&self) -> bool {
        self.mouse_button == MouseButton::Left && self.mouse_action == MouseButtonState::Pressed
    }

    /// Requests a cursor shape; the last request of a frame wins.
    #[inline]
    pub fn want_cursor(&mut self, shape: CursorShape) {
        self.wanted_cursor = Some(shape);
    }

    #[inline]
    pub fn wanted_cursor(&self) -> Option<CursorShape> {
        self.wanted_cursor
    }

    /// Consumes the pending request. Returns it only when it differs from the
    /// shape currently applied.
    pub fn take_cursor_change(&mut self) -> Option<CursorShape> {
        let wanted = self.wanted_cursor.take()?;
        if wanted == self.current_cursor {
            return None;
        }
        self.current_cursor = wanted;
        Some(wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_change_is_reported_once() {
        let mut s = UiState::default();
        assert_eq!(s.take_cursor_change(), None);

        s.want_cursor(CursorShape::Hand);
        assert_eq!(s.take_cursor_change(), Some(CursorShape::Hand));
        assert_eq!(s.take_cursor_change(), None);

        s.want_cursor(CursorShape::Hand);
        assert_eq!(s.take_cursor_change(), None);

        s.want_cursor(CursorShape::Hand);
        s.want_cursor(CursorShape::Arrow);
        assert_eq!(s.take_cursor_change(), Some(CursorShape::Arrow));
    }
}
