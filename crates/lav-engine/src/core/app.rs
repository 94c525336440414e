use crate::input::InputEvent;
use crate::window::{RuntimeConfig, WindowId};

use super::ctx::{FrameCtx, InputCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once after a window and its GPU context exist, with the config
    /// it was created from.
    fn on_window_created(&mut self, window: &WindowCtx<'_>, config: &RuntimeConfig) {
        let _ = (window, config);
    }

    /// Called for every translated input event, before the next frame.
    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called after a window has been destroyed.
    fn on_window_closed(&mut self, id: WindowId) {
        let _ = id;
    }
}
