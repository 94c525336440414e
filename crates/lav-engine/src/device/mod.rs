//! GPU device + surface management.
//!
//! One [`Gpu`] exists per window. It owns the wgpu instance, adapter,
//! device, queue and the window surface, and hands out frames to render into.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
