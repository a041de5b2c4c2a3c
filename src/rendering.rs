//! Rendering system with wgpu pipeline and shader management.
//!
//! Per frame: displace the surface mesh on the CPU, upload it, and draw it
//! with `ocean.wgsl`, which shades every covered pixel from its interpolated
//! elevation.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use thiserror::Error;
use wgpu::util::DeviceExt;

use crate::animation::{Frame, FrameRenderer};
use crate::ocean::{SurfaceMesh, Vertex};
use crate::params::{OceanParams, ParamError, ParamId, ParameterStore};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Errors raised while setting up or submitting frames
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("Failed to acquire frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}

/// Render-side copy of the two gradient colors, kept current by the store's
/// color observers
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorUniforms {
    pub depth: [f32; 4],
    pub surface: [f32; 4],
}

impl ColorUniforms {
    pub fn from_params(params: &OceanParams) -> Self {
        Self {
            depth: params.depth_color.to_uniform(),
            surface: params.surface_color.to_uniform(),
        }
    }
}

/// Uniform buffer for the ocean shader (matches WGSL `SurfaceUniforms`)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SurfaceUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub depth_color: [f32; 4],
    pub surface_color: [f32; 4],
    pub color_offset: f32,
    pub color_multiplier: f32,
    /// 1.0 when the target format is sRGB and expects linear output
    pub decode_srgb: f32,
    pub _padding: f32,
}

impl SurfaceUniforms {
    pub fn new(view_proj: Mat4, colors: ColorUniforms, params: &OceanParams, srgb: bool) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            depth_color: colors.depth,
            surface_color: colors.surface,
            color_offset: params.color_offset,
            color_multiplier: params.color_multiplier,
            decode_srgb: if srgb { 1.0 } else { 0.0 },
            _padding: 0.0,
        }
    }
}

/// Register store observers that push color edits into `colors`
pub fn bind_color_uniforms(
    store: &mut ParameterStore,
    colors: &Rc<Cell<ColorUniforms>>,
) -> Result<(), ParamError> {
    let sink = Rc::clone(colors);
    store.on_color_change(ParamId::DepthColor, move |c| {
        let mut u = sink.get();
        u.depth = c.to_uniform();
        sink.set(u);
    })?;

    let sink = Rc::clone(colors);
    store.on_color_change(ParamId::SurfaceColor, move |c| {
        let mut u = sink.get();
        u.surface = c.to_uniform();
        sink.set(u);
    })?;

    Ok(())
}

/// Rendering system managing wgpu device, pipeline and buffers
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    index_count: u32,
    colors: Rc<Cell<ColorUniforms>>,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(
        window: Arc<winit::window::Window>,
        mesh: &SurfaceMesh,
        params: &OceanParams,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance.create_surface(window)?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("GPU: {} ({:?})", info.name, info.backend);

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        if !surface_format.is_srgb() {
            log::warn!("No sRGB surface format, using {:?}", surface_format);
        }

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, config.width, config.height);

        // Load shader
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Ocean Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("ocean.wgsl").into()),
        });

        // Create buffers
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let colors = ColorUniforms::from_params(params);
        let uniforms =
            SurfaceUniforms::new(Mat4::IDENTITY, colors, params, surface_format.is_srgb());

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Create ocean bind group
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Create ocean render pipeline
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Ocean Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x3,
                    }],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The surface stays visible when orbiting underneath it
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            index_count: mesh.indices.len() as u32,
            colors: Rc::new(Cell::new(colors)),
        })
    }

    /// Shared color cell, for [`bind_color_uniforms`]
    pub fn color_uniforms(&self) -> &Rc<Cell<ColorUniforms>> {
        &self.colors
    }

    /// Reconfigure the surface and depth buffer for a new window size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
        log::debug!("Surface resized to {}x{}", width, height);
    }

    /// Update ocean vertex buffer with new mesh data
    pub fn update_vertices(&self, vertices: &[Vertex]) {
        self.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
    }

    /// Update ocean uniforms
    pub fn update_uniforms(&self, uniforms: &SurfaceUniforms) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    /// Draw and present one frame
    fn draw(&mut self) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring frame, skipping");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl FrameRenderer for RenderSystem {
    fn render(&mut self, frame: Frame<'_>) -> Result<(), RenderError> {
        let params = frame.params.snapshot();

        // Per-vertex wave field
        frame.mesh.displace(&params);
        self.update_vertices(&frame.mesh.vertices);

        let uniforms = SurfaceUniforms::new(
            frame.view_proj,
            self.colors.get(),
            &params,
            self.config.format.is_srgb(),
        );
        self.update_uniforms(&uniforms);

        self.draw()
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Rgb;

    #[test]
    fn test_uniform_layout_matches_shader() {
        // mat4 (64) + two vec4 (32) + four f32 (16)
        assert_eq!(std::mem::size_of::<SurfaceUniforms>(), 112);
        assert_eq!(std::mem::size_of::<SurfaceUniforms>() % 16, 0);
    }

    #[test]
    fn test_color_observers_update_uniforms() {
        let mut store = ParameterStore::default();
        let colors = Rc::new(Cell::new(ColorUniforms::from_params(&store.snapshot())));
        bind_color_uniforms(&mut store, &colors).unwrap();

        store.set_color_hex(ParamId::DepthColor, "#000000").unwrap();
        assert_eq!(colors.get().depth, [0.0, 0.0, 0.0, 1.0]);

        store
            .set_color(ParamId::SurfaceColor, Rgb::new(1.0, 0.5, 0.25))
            .unwrap();
        assert_eq!(colors.get().surface, [1.0, 0.5, 0.25, 1.0]);
        // Depth untouched by the surface write
        assert_eq!(colors.get().depth, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_uniforms_carry_gradient_parameters() {
        let params = OceanParams::default();
        let u = SurfaceUniforms::new(
            Mat4::IDENTITY,
            ColorUniforms::from_params(&params),
            &params,
            true,
        );
        assert_eq!(u.color_offset, 0.1);
        assert_eq!(u.color_multiplier, 5.0);
        assert_eq!(u.decode_srgb, 1.0);
        assert_eq!(u.depth_color, params.depth_color.to_uniform());
    }
}
