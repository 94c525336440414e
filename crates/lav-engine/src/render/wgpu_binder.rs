use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::coords::{Rect, Vec2};

use super::binder::{GpuBinder, MeshHandle, QuadDraw, ShaderHandle, ShaderSource};
use super::ctx::{RenderCtx, RenderTarget};

/// [`GpuBinder`] backed by wgpu.
///
/// Draws are buffered during the UI pass and issued by [`flush`](Self::flush)
/// inside the frame's render closure: stable-sorted by depth, then drawn as
/// one instanced call per consecutive (shader, clip) run.
///
/// All quad meshes share one unit-quad vertex/index buffer; a mesh handle
/// only tracks ownership.
pub struct WgpuBinder {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,

    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    globals_ubo: wgpu::Buffer,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    /// Indexed by `ShaderHandle::raw() - 1`; `None` once released.
    pipelines: Vec<Option<wgpu::RenderPipeline>>,
    /// Indexed by `MeshHandle::raw() - 1`; `false` once released.
    meshes: Vec<bool>,

    clip: Rect,
    pending: Vec<PendingDraw>,
}

struct PendingDraw {
    instance: QuadInstance,
    depth: f32,
    clip: Rect,
    shader: ShaderHandle,
    mesh: MeshHandle,
    projection: Mat4,
}

impl WgpuBinder {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lav quad bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<GlobalsUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let globals_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lav quad globals ubo"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lav quad bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lav quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lav quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            device: device.clone(),
            queue: queue.clone(),
            format,
            bind_group_layout,
            bind_group,
            globals_ubo,
            quad_vbo,
            quad_ibo,
            instance_vbo: None,
            instance_capacity: 0,
            pipelines: Vec::new(),
            meshes: Vec::new(),
            clip: Rect::default(),
            pending: Vec::new(),
        }
    }

    /// Issues every buffered draw into `target` and clears the buffer.
    pub fn flush(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.pending.is_empty() {
            return;
        }

        // Stable: equal depths keep submission (tree) order.
        self.pending.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        let projection = self.pending[self.pending.len() - 1].projection;
        let globals = GlobalsUniform { projection: projection.to_cols_array_2d() };
        self.queue.write_buffer(&self.globals_ubo, 0, bytemuck::bytes_of(&globals));

        self.ensure_instance_capacity(self.pending.len());
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        let raw: Vec<QuadInstance> = self.pending.iter().map(|p| p.instance).collect();
        self.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&raw));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lav quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        let n = self.pending.len();
        let mut i = 0;
        while i < n {
            let head = &self.pending[i];
            let mut j = i + 1;
            while j < n && self.pending[j].shader == head.shader && self.pending[j].clip == head.clip {
                j += 1;
            }

            let pipeline = self
                .pipelines
                .get(head.shader.raw() as usize - 1)
                .and_then(Option::as_ref);
            let mesh_alive = self
                .meshes
                .get(head.mesh.raw() as usize - 1)
                .copied()
                .unwrap_or(false);

            if let (Some(pipeline), true) = (pipeline, mesh_alive) {
                if let Some((sx, sy, sw, sh)) =
                    logical_clip_to_scissor(head.clip, ctx.viewport, ctx.scale_factor)
                {
                    rpass.set_pipeline(pipeline);
                    rpass.set_scissor_rect(sx, sy, sw, sh);
                    rpass.draw_indexed(0..6, 0, i as u32..j as u32);
                }
            }
            i = j;
        }

        drop(rpass);
        self.pending.clear();
    }

    fn ensure_instance_capacity(&mut self, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lav quad instance vbo"),
            size: (new_cap * std::mem::size_of::<QuadInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }

    fn build_pipeline(&self, source: &ShaderSource) -> wgpu::RenderPipeline {
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.label.as_ref()),
            source: wgpu::ShaderSource::Wgsl(source.wgsl.clone()),
        });

        let layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lav quad pipeline layout"),
            bind_group_layouts: &[&self.bind_group_layout],
            immediate_size: 0,
        });

        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(source.label.as_ref()),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), QuadInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

impl GpuBinder for WgpuBinder {
    fn load_quad_mesh(&mut self) -> Option<MeshHandle> {
        self.meshes.push(true);
        Some(MeshHandle::from_raw(self.meshes.len() as u32))
    }

    fn load_shader(&mut self, source: &ShaderSource) -> Option<ShaderHandle> {
        if !source.has_entry_points() {
            log::error!("shader '{}' lacks vs_main/fs_main; not loaded", source.label);
            return None;
        }
        let pipeline = self.build_pipeline(source);
        self.pipelines.push(Some(pipeline));
        log::debug!("shader '{}' loaded", source.label);
        Some(ShaderHandle::from_raw(self.pipelines.len() as u32))
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        if let Some(slot) = self.meshes.get_mut((mesh.raw() as usize).wrapping_sub(1)) {
            *slot = false;
        }
    }

    fn release_shader(&mut self, shader: ShaderHandle) {
        if let Some(slot) = self.pipelines.get_mut((shader.raw() as usize).wrapping_sub(1)) {
            *slot = None;
        }
    }

    fn set_clip(&mut self, clip: Rect) {
        self.clip = clip;
    }

    fn draw_quad(&mut self, quad: &QuadDraw) {
        if quad.shader.raw() == 0 || quad.mesh.raw() == 0 {
            return;
        }
        self.pending.push(PendingDraw {
            instance: QuadInstance::from(quad),
            depth: quad.depth(),
            clip: self.clip,
            shader: quad.shader,
            mesh: quad.mesh,
            projection: quad.projection,
        });
    }
}

// ── gpu types ─────────────────────────────────────────────────────────────

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlobalsUniform {
    projection: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    corner: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    border_color: [f32; 4],
    border: [f32; 4],
    radii: [f32; 4],
}

impl From<&QuadDraw> for QuadInstance {
    fn from(q: &QuadDraw) -> Self {
        Self {
            model: q.model.to_cols_array_2d(),
            color: q.color.to_array(),
            border_color: q.border_color.to_array(),
            border: q.border,
            radii: q.radii,
        }
    }
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        1 => Float32x4, // model col 0
        2 => Float32x4, // model col 1
        3 => Float32x4, // model col 2
        4 => Float32x4, // model col 3
        5 => Float32x4, // color
        6 => Float32x4, // border color
        7 => Float32x4, // border widths
        8 => Float32x4  // corner radii
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Converts a logical clip rect to a physical scissor rect `(x, y, w, h)`,
/// clamped to the viewport. `None` when nothing would be visible.
fn logical_clip_to_scissor(clip: Rect, viewport: Vec2, scale: f32) -> Option<(u32, u32, u32, u32)> {
    let phys_w = (viewport.x * scale).max(1.0) as u32;
    let phys_h = (viewport.y * scale).max(1.0) as u32;

    let x = ((clip.origin.x * scale).max(0.0) as u32).min(phys_w);
    let y = ((clip.origin.y * scale).max(0.0) as u32).min(phys_h);
    let x2 = (((clip.origin.x + clip.size.x) * scale).max(0.0).ceil() as u32).min(phys_w);
    let y2 = (((clip.origin.y + clip.size.y) * scale).max(0.0).ceil() as u32).min(phys_h);

    let (w, h) = (x2.saturating_sub(x), y2.saturating_sub(y));
    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}
