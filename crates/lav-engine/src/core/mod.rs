//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and higher
//! layers. Runtime internals stay out of user code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InputCtx, WindowCtx};
