use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::error::{Error, Result};
use crate::paint::Color;

use super::{PointUniforms, RenderCtx, RenderTarget};

/// Renderer for the point cloud.
///
/// One unit quad is instanced once per point. Positions and colors live in
/// two persistent per-instance vertex buffers that grow on demand and are only
/// rewritten when the caller uploads new data.
#[derive(Default)]
pub struct PointRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    positions: InstanceBuffer,
    colors: InstanceBuffer,
}

impl PointRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the pipeline, bindings and static geometry if missing.
    ///
    /// Shader compilation errors are reported as [`Error::Setup`].
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        self.ensure_pipeline(ctx)?;
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        Ok(())
    }

    pub fn upload_positions(&mut self, ctx: &RenderCtx<'_>, positions: &[[f32; 2]]) -> Result<()> {
        let bytes = bytemuck::cast_slice(positions);
        self.positions
            .write(ctx, "stipple point positions", bytes, positions.len())
    }

    pub fn upload_colors(&mut self, ctx: &RenderCtx<'_>, colors: &[[f32; 3]]) -> Result<()> {
        let bytes = bytemuck::cast_slice(colors);
        self.colors.write(ctx, "stipple point colors", bytes, colors.len())
    }

    pub fn write_uniforms(&self, ctx: &RenderCtx<'_>, uniforms: &PointUniforms) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(uniforms));
    }

    /// Clears the target and, when buffers hold at least `count` points, draws
    /// them with one instanced call.
    pub fn draw(&self, target: &mut RenderTarget<'_>, clear: Color, count: u32) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("stipple point pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if count == 0 {
            return;
        }
        let count = count as usize;
        if count > self.positions.len || count > self.colors.len {
            log::warn!(
                "skipping draw: {count} points requested, buffers hold {} positions and {} colors",
                self.positions.len,
                self.colors.len
            );
            return;
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };
        let Some(position_vbo) = self.positions.buffer.as_ref() else { return };
        let Some(color_vbo) = self.colors.buffer.as_ref() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, position_vbo.slice(..));
        rpass.set_vertex_buffer(2, color_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..count as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return Ok(());
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stipple point shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/points.wgsl").into()),
        });

        let info = pollster::block_on(shader.get_compilation_info());
        let errors: Vec<String> = info
            .messages
            .iter()
            .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
            .map(|m| m.message.clone())
            .collect();
        if !errors.is_empty() {
            return Err(Error::Setup(format!(
                "point shader failed to compile: {}",
                errors.join("; ")
            )));
        }

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("stipple point bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(size_of::<PointUniforms>() as u64),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("stipple point pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stipple point pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), position_layout(), color_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
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
        });

        log::debug!("point pipeline created for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.uniform_ubo = None;
        Ok(())
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("stipple point ubo"),
            size: size_of::<PointUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stipple point bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stipple quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stipple quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Growable per-instance vertex buffer.
#[derive(Default)]
struct InstanceBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity_bytes: u64,
    /// Elements written by the last upload.
    len: usize,
}

impl InstanceBuffer {
    fn write(
        &mut self,
        ctx: &RenderCtx<'_>,
        label: &'static str,
        bytes: &[u8],
        len: usize,
    ) -> Result<()> {
        let required = bytes.len() as u64;
        let max = ctx.device.limits().max_buffer_size;
        check_buffer_size(label, required, max)?;

        if self.buffer.is_none() || required > self.capacity_bytes {
            let capacity = required.next_power_of_two().clamp(256, max);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity_bytes = capacity;
            log::debug!("{label}: allocated {capacity} bytes");
        }

        if let Some(buffer) = self.buffer.as_ref() {
            if !bytes.is_empty() {
                ctx.queue.write_buffer(buffer, 0, bytes);
            }
        }
        self.len = len;
        Ok(())
    }
}

fn check_buffer_size(what: &'static str, bytes: u64, limit: u64) -> Result<()> {
    if bytes > limit {
        return Err(Error::BufferTooLarge { what, bytes, limit });
    }
    Ok(())
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    corner: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<QuadVertex>() as u64,
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

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &POSITION_ATTRS,
    }
}

fn color_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &COLOR_ATTRS,
    }
}
