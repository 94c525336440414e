use lav_engine::coords::Color;
use lav_engine::input::CursorShape;

use crate::event::EventKind;
use crate::layout::ScaleXY;
use crate::node::NodeId;
use crate::state::UiState;
use crate::tree::UiTree;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ButtonState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

/// Clickable box that recolours itself on hover and press.
///
/// Listeners receive the usual mouse events; use `MouseLeftRelease` while
/// hovered as "clicked".
#[derive(Debug, Clone)]
pub struct Button {
    color: Color,
    hover_color: Color,
    pressed_color: Color,
    cursor: CursorShape,
    state: ButtonState,
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Button {
    pub fn new() -> Self {
        Self {
            color: Color::from_hex(0x4e5058ff),
            hover_color: Color::from_hex(0x6d6f78ff),
            pressed_color: Color::from_hex(0x3b3d44ff),
            cursor: CursorShape::Hand,
            state: ButtonState::Idle,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn hover_color(mut self, color: Color) -> Self {
        self.hover_color = color;
        self
    }

    pub fn pressed_color(mut self, color: Color) -> Self {
        self.pressed_color = color;
        self
    }

    /// Cursor shown while hovered.
    pub fn cursor(mut self, cursor: CursorShape) -> Self {
        self.cursor = cursor;
        self
    }

    /// Changes the idle colour of a live button.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn state(&self) -> ButtonState {
        self.state
    }
}

pub(super) fn install(tree: &mut UiTree, id: NodeId, button: &mut Button) {
    if let Some(node) = tree.get_mut(id) {
        node.layout.scale = ScaleXY::px(120.0, 32.0);
        node.visual.color = button.color;
    }
}

pub(super) fn handle(tree: &mut UiTree, id: NodeId, button: &mut Button, state: &mut UiState) {
    let color = match state.current_event {
        Some(EventKind::MouseEnter) => {
            state.want_cursor(button.cursor);
            if button.state == ButtonState::Pressed {
                return;
            }
            button.state = ButtonState::Hovered;
            button.hover_color
        }
        Some(EventKind::MouseExit) => {
            if button.state == ButtonState::Pressed && state.dragging {
                return;
            }
            state.want_cursor(CursorShape::Arrow);
            button.state = ButtonState::Idle;
            button.color
        }
        Some(EventKind::MouseLeftClick) => {
            button.state = ButtonState::Pressed;
            button.pressed_color
        }
        Some(EventKind::MouseLeftRelease) => {
            if state.hovered == Some(id) {
                button.state = ButtonState::Hovered;
                button.hover_color
            } else {
                state.want_cursor(CursorShape::Arrow);
                button.state = ButtonState::Idle;
                button.color
            }
        }
        _ => return,
    };
    if let Some(node) = tree.get_mut(id) {
        node.visual.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire(tree: &mut UiTree, id: NodeId, b: &mut Button, s: &mut UiState, kind: EventKind) {
        s.current_event = Some(kind);
        handle(tree, id, b, s);
    }

    #[test]
    fn colours_follow_interaction() {
        let mut tree = UiTree::new();
        let mut b = Button::new().color(Color::BLACK).hover_color(Color::WHITE);
        let id = tree.create(b.clone());
        let mut s = UiState::default();
        let color = |t: &UiTree| t.get(id).unwrap().visual.color;

        assert_eq!(color(&tree), Color::BLACK);

        fire(&mut tree, id, &mut b, &mut s, EventKind::MouseEnter);
        assert_eq!(color(&tree), Color::WHITE);
        assert_eq!(s.wanted_cursor(), Some(CursorShape::Hand));

        fire(&mut tree, id, &mut b, &mut s, EventKind::MouseLeftClick);
        assert_eq!(b.state(), ButtonState::Pressed);

        // Dragging out of a pressed button keeps it pressed.
        s.dragging = true;
        fire(&mut tree, id, &mut b, &mut s, EventKind::MouseExit);
        assert_eq!(b.state(), ButtonState::Pressed);

        s.dragging = false;
        s.hovered = None;
        fire(&mut tree, id, &mut b, &mut s, EventKind::MouseLeftRelease);
        assert_eq!(b.state(), ButtonState::Idle);
        assert_eq!(color(&tree), Color::BLACK);
    }

    #[test]
    fn release_while_hovered_returns_to_hover() {
        let mut tree = UiTree::new();
        let mut b = Button::new();
        let id = tree.create(b.clone());
        let mut s = UiState::default();
        s.hovered = Some(id);
        fire(&mut tree, id, &mut b, &mut s, EventKind::MouseLeftClick);
        fire(&mut tree, id, &mut b, &mut s, EventKind::MouseLeftRelease);
        assert_eq!(b.state(), ButtonState::Hovered);
    }
}
