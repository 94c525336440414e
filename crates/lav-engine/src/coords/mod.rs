//! Coordinate and geometry types shared by the engine and the UI core.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod color;
mod rect;
mod vec2;

pub use color::Color;
pub use rect::Rect;
pub use vec2::Vec2;
