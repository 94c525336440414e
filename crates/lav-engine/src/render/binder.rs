use std::borrow::Cow;

use glam::{Mat4, Vec3};

use crate::coords::{Color, Rect, Vec2};

/// Number of stacking layers the projection's depth range covers.
pub const MAX_LAYERS: u32 = 1000;

/// Orthographic projection for a window of `size` logical pixels: origin
/// top-left, +Y down, depth sized for [`MAX_LAYERS`] layers.
pub fn ortho_projection(size: Vec2) -> Mat4 {
    Mat4::orthographic_rh(0.0, size.x, size.y, 0.0, -(MAX_LAYERS as f32), 0.0)
}

/// Model-space depth of a stacking index, clamped into the projection's range.
#[inline]
pub fn layer_depth(z: u32) -> f32 {
    z.min(MAX_LAYERS - 1) as f32
}

/// Handle to a quad mesh owned by a binder.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshHandle(u32);

/// Handle to a compiled shader owned by a binder.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderHandle(u32);

impl MeshHandle {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl ShaderHandle {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// WGSL source for a quad shader. The module must export `vs_main` and
/// `fs_main` and consume the [`QuadDraw`] instance layout.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub label: Cow<'static, str>,
    pub wgsl: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(label: impl Into<Cow<'static, str>>, wgsl: impl Into<Cow<'static, str>>) -> Self {
        Self { label: label.into(), wgsl: wgsl.into() }
    }

    /// Rounded rectangle with per-side border, used by every built-in element.
    pub fn element() -> Self {
        Self::new("lav element", include_str!("shaders/element.wgsl"))
    }

    /// Entry points present in the source.
    pub fn has_entry_points(&self) -> bool {
        self.wgsl.contains("fn vs_main") && self.wgsl.contains("fn fs_main")
    }
}

/// One textured-less quad draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadDraw {
    pub mesh: MeshHandle,
    pub shader: ShaderHandle,
    pub projection: Mat4,
    /// Unit quad → logical pixels (translate + scale, z = stacking depth).
    pub model: Mat4,
    pub color: Color,
    pub border_color: Color,
    /// Border widths: top, right, bottom, left.
    pub border: [f32; 4],
    /// Corner radii: top-left, top-right, bottom-right, bottom-left.
    pub radii: [f32; 4],
}

impl QuadDraw {
    /// Model matrix placing the unit quad over `rect` at stacking index `z`.
    pub fn model_for(rect: Rect, z: u32) -> Mat4 {
        Mat4::from_translation(Vec3::new(rect.origin.x, rect.origin.y, layer_depth(z)))
            * Mat4::from_scale(Vec3::new(rect.size.x, rect.size.y, 1.0))
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.model.w_axis.z
    }

    /// Screen rect covered by the quad.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.model.w_axis.x,
            self.model.w_axis.y,
            self.model.x_axis.x,
            self.model.y_axis.y,
        )
    }
}

/// GPU collaborator consumed by the UI core.
///
/// Load failures return `None`; the caller logs and skips the draw. Nothing
/// here may abort a frame.
pub trait GpuBinder {
    fn load_quad_mesh(&mut self) -> Option<MeshHandle>;

    fn load_shader(&mut self, source: &ShaderSource) -> Option<ShaderHandle>;

    fn release_mesh(&mut self, mesh: MeshHandle);

    fn release_shader(&mut self, shader: ShaderHandle);

    /// Clip rectangle in logical pixels for subsequent draws.
    fn set_clip(&mut self, clip: Rect);

    fn draw_quad(&mut self, quad: &QuadDraw);

    /// Instanced form. Binders that batch anyway can keep the default.
    fn draw_quads(&mut self, quads: &[QuadDraw]) {
        for q in quads {
            self.draw_quad(q);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_maps_window_corners_to_ndc() {
        let p = ortho_projection(Vec2::new(800.0, 600.0));
        let top_left = p.project_point3(Vec3::new(0.0, 0.0, 0.0));
        let bottom_right = p.project_point3(Vec3::new(800.0, 600.0, 0.0));
        assert!((top_left.x + 1.0).abs() < 1e-5 && (top_left.y - 1.0).abs() < 1e-5);
        assert!((bottom_right.x - 1.0).abs() < 1e-5 && (bottom_right.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn every_layer_stays_inside_depth_range() {
        let p = ortho_projection(Vec2::new(100.0, 100.0));
        for z in [0, 1, 500, MAX_LAYERS - 1, MAX_LAYERS + 40] {
            let d = p.project_point3(Vec3::new(0.0, 0.0, layer_depth(z))).z;
            assert!((0.0..=1.0).contains(&d), "z {z} → depth {d}");
        }
    }

    #[test]
    fn model_round_trips_rect() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let q = QuadDraw {
            mesh: MeshHandle::from_raw(1),
            shader: ShaderHandle::from_raw(1),
            projection: Mat4::IDENTITY,
            model: QuadDraw::model_for(rect, 3),
            color: Color::WHITE,
            border_color: Color::TRANSPARENT,
            border: [0.0; 4],
            radii: [0.0; 4],
        };
        assert_eq!(q.rect(), rect);
        assert_eq!(q.depth(), 3.0);
    }

    #[test]
    fn element_shader_has_entry_points() {
        assert!(ShaderSource::element().has_entry_points());
        assert!(!ShaderSource::new("broken", "fn main() {}").has_entry_points());
    }
}
