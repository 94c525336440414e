//! Lav engine crate.
//!
//! Platform and GPU services consumed by the `lav-ui` core: the winit window
//! runtime, the wgpu device, the quad binder used to draw elements, input
//! types, 2D coordinates and logging bootstrap.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
