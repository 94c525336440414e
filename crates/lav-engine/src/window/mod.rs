//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and every open window, and wires each window
//! to its own GPU context.

mod runtime;

pub use runtime::{LoopMode, Runtime, RuntimeConfig, RuntimeCtx};
pub use winit::window::WindowId;
