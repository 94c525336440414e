use crate::coords::Rect;

use super::binder::{GpuBinder, MeshHandle, QuadDraw, ShaderHandle, ShaderSource};

/// A draw captured by [`RecordingBinder`] together with the clip active at
/// the time.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub clip: Rect,
    pub quad: QuadDraw,
}

/// Headless [`GpuBinder`] that records calls instead of touching a device.
///
/// Used by UI tests and by tools that want to inspect a frame.
#[derive(Debug, Default)]
pub struct RecordingBinder {
    next_id: u32,
    live_meshes: Vec<MeshHandle>,
    live_shaders: Vec<ShaderHandle>,
    clip: Rect,
    draws: Vec<RecordedDraw>,
    /// Makes every `load_shader` fail, to exercise resource-error paths.
    pub fail_shaders: bool,
}

impl RecordingBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Returns and clears the recorded draws.
    pub fn take_draws(&mut self) -> Vec<RecordedDraw> {
        std::mem::take(&mut self.draws)
    }

    pub fn live_meshes(&self) -> usize {
        self.live_meshes.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.live_shaders.len()
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GpuBinder for RecordingBinder {
    fn load_quad_mesh(&mut self) -> Option<MeshHandle> {
        let h = MeshHandle::from_raw(self.next());
        self.live_meshes.push(h);
        Some(h)
    }

    fn load_shader(&mut self, source: &ShaderSource) -> Option<ShaderHandle> {
        if self.fail_shaders || !source.has_entry_points() {
            log::error!("shader '{}' failed to load", source.label);
            return None;
        }
        let h = ShaderHandle::from_raw(self.next());
        self.live_shaders.push(h);
        Some(h)
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        self.live_meshes.retain(|m| *m != mesh);
    }

    fn release_shader(&mut self, shader: ShaderHandle) {
        self.live_shaders.retain(|s| *s != shader);
    }

    fn set_clip(&mut self, clip: Rect) {
        self.clip = clip;
    }

    fn draw_quad(&mut self, quad: &QuadDraw) {
        self.draws.push(RecordedDraw { clip: self.clip, quad: *quad });
    }
}
