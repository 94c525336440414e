use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the UI layer binds are named; everything else maps to
/// `Key::Unknown` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse wheel delta.
///
/// `Line` corresponds to notched wheels; `Pixel` to touchpads.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Logical pixels that count as one wheel line.
    pub const PIXELS_PER_LINE: f32 = 20.0;

    /// Delta expressed in lines, the unit scroll sensitivities are tuned for.
    pub fn lines(self) -> (f32, f32) {
        match self {
            MouseWheelDelta::Line { x, y } => (x, y),
            MouseWheelDelta::Pixel { x, y } => (x / Self::PIXELS_PER_LINE, y / Self::PIXELS_PER_LINE),
        }
    }
}

/// Cursor shapes the UI may request for a window.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CursorShape {
    #[default]
    Arrow,
    Hand,
    Text,
    HResize,
    VResize,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        repeat: bool,
    },

    /// Pointer position in logical pixels.
    PointerMoved { x: f32, y: f32 },

    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
        modifiers: Modifiers,
    },

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    /// Window content area resized, in logical pixels.
    Resized { width: f32, height: f32 },

    /// Pointer entered the window surface.
    PointerEntered,

    /// Pointer left the window surface.
    PointerLeft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_wheel_delta_converts_to_lines() {
        let d = MouseWheelDelta::Pixel { x: 0.0, y: 40.0 };
        assert_eq!(d.lines(), (0.0, 2.0));
        assert_eq!(MouseWheelDelta::Line { x: 1.0, y: -1.0 }.lines(), (1.0, -1.0));
    }
}
