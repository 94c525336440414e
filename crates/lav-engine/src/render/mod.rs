//! GPU rendering subsystem.
//!
//! The UI core never touches wgpu directly. It talks to a [`GpuBinder`]:
//! acquire a quad mesh and a shader, set a clip rect, draw quads.
//! [`WgpuBinder`] is the real implementation; [`RecordingBinder`] records
//! calls for headless tests.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders apply the projection built by [`ortho_projection`].

mod binder;
mod ctx;
mod recording;
mod wgpu_binder;

pub use binder::{
    layer_depth, ortho_projection, GpuBinder, MeshHandle, QuadDraw, ShaderHandle, ShaderSource,
    MAX_LAYERS,
};
pub use ctx::{RenderCtx, RenderTarget};
pub use recording::{RecordedDraw, RecordingBinder};
pub use wgpu_binder::WgpuBinder;
