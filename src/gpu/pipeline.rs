/// wgpu render pipeline for real-time hue rotation
///
/// This module manages all the wgpu boilerplate:
/// - Device and queue initialization
/// - Shader compilation and pipeline linking, with errors caught per step
/// - Geometry (one quad) and texture uploads
/// - Uniform buffer for the hue shift
/// - Draw commands and readback of the rendered frame

// Use wgpu from iced to avoid dependency conflicts
use iced_wgpu::wgpu;
use wgpu::util::DeviceExt;

use super::shaders;
use crate::asset::LoadedImage;
use crate::error::{Result, ShaderStage, ViewerError};
use crate::state::hue::HueShift;

/// Texture coordinates of the quad, two triangles, matching `quad_positions`
pub const QUAD_TEX_COORDS: [f32; 12] = [
    0.0, 0.0,
    1.0, 0.0,
    0.0, 1.0,
    0.0, 1.0,
    1.0, 0.0,
    1.0, 1.0,
];

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const TEX_COORD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

/// Output format of the render target (and of the readback bytes)
const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Uniforms in a GPU-friendly format
/// Must match the WGSL struct layout with proper alignment
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuUniforms {
    resolution: [f32; 2],
    hue: f32,
    padding: f32, // For 16-byte alignment
}

impl GpuUniforms {
    fn new(width: u32, height: u32, hue: HueShift) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            // A full turn is the same rotation as none
            hue: if hue.is_identity() { 0.0 } else { hue.turns() },
            padding: 0.0,
        }
    }
}

/// A rendered frame read back from the GPU
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row-major, no padding
    pub pixels: Vec<u8>,
}

/// Pixel-space positions of a quad covering the image, two triangles
pub fn quad_positions(width: u32, height: u32) -> [f32; 12] {
    let (w, h) = (width as f32, height as f32);
    [
        0.0, 0.0,
        w, 0.0,
        0.0, h,
        0.0, h,
        w, 0.0,
        w, h,
    ]
}

/// Row pitch of a texture-to-buffer copy, aligned to 256 bytes
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let bytes_per_row = width * 4;
    (bytes_per_row + align - 1) / align * align
}

/// Drop the alignment padding at the end of every row
pub fn strip_row_padding(data: &[u8], width: u32, height: u32, padded_bytes_per_row: u32) -> Vec<u8> {
    let row = (width * 4) as usize;
    let mut output = Vec::with_capacity(row * height as usize);
    for y in 0..height as usize {
        let start = y * padded_bytes_per_row as usize;
        output.extend_from_slice(&data[start..start + row]);
    }
    output
}

/// Main render pipeline for hue rotation
pub struct RenderPipeline {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    position_buffer: wgpu::Buffer,
    tex_coord_buffer: wgpu::Buffer,
    pub width: u32,  // Image natural width
    pub height: u32, // Image natural height
}

// Manual Debug implementation (wgpu types don't implement Debug)
impl std::fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPipeline")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl RenderPipeline {
    /// Create a render pipeline for the given image
    ///
    /// Fails without retry if there is no adapter, the device cannot be
    /// created, a shader does not compile or the pipeline does not link.
    pub async fn new(image: LoadedImage) -> Result<Self> {
        let (width, height) = (image.width, image.height);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ViewerError::NoAdapter)?;

        log::info!("🖥️  Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Hue Viewer Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .map_err(|e| ViewerError::Device(e.to_string()))?;

        // Errors outside an error scope are logged instead of panicking
        device.on_uncaptured_error(Box::new(|e: wgpu::Error| {
            log::error!("Uncaptured GPU error: {}", e);
        }));

        let max_side = device.limits().max_texture_dimension_2d;
        if width > max_side || height > max_side {
            return Err(ViewerError::Device(format!(
                "image is {}x{}, the device supports at most {}x{}",
                width, height, max_side, max_side
            )));
        }

        // ========== Shaders ==========

        let vertex_shader = compile_shader(&device, ShaderStage::Vertex, shaders::VERTEX_SHADER).await?;
        let fragment_shader = compile_shader(&device, ShaderStage::Fragment, shaders::FRAGMENT_SHADER).await?;

        // ========== Pipeline ==========

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Bind Group Layout"),
            entries: &[
                // Image texture (RGBA8, sampled as float)
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                // Uniform buffer (resolution for the vertex stage, hue for the fragment stage)
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Hue Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: shaders::VERTEX_ENTRY,
                // Positions in slot 0, texture coordinates in slot 1
                buffers: &[
                    vec2_buffer_layout(&POSITION_ATTRIBUTES),
                    vec2_buffer_layout(&TEX_COORD_ATTRIBUTES),
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_shader,
                entry_point: shaders::FRAGMENT_ENTRY,
                targets: &[Some(wgpu::ColorTargetState {
                    format: TARGET_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // The y flip makes the quad clockwise
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        if let Some(error) = device.pop_error_scope().await {
            return Err(ViewerError::ProgramLink(error.to_string()));
        }

        // ========== Resources ==========

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Positions"),
            contents: bytemuck::cast_slice(&quad_positions(width, height)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let tex_coord_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Texture Coordinates"),
            contents: bytemuck::cast_slice(&QUAD_TEX_COORDS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let texture_size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Image Texture (Rgba8Unorm)"),
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        log::debug!("💾 Uploading {} bytes of RGBA8 data to GPU", image.pixels.len());
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(height),
            },
            texture_size,
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Any image size renders: clamp at the edges, no mipmaps, nearest filtering
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Image Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hue Uniform Buffer"),
            contents: bytemuck::cast_slice(&[GpuUniforms::new(width, height, HueShift::default())]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        if let Some(error) = device.pop_error_scope().await {
            return Err(ViewerError::Device(error.to_string()));
        }

        log::info!("✅ Pipeline ready for {}x{} image", width, height);

        Ok(Self {
            device,
            queue,
            pipeline,
            bind_group,
            uniform_buffer,
            position_buffer,
            tex_coord_buffer,
            width,
            height,
        })
    }

    /// Update the uniform buffer with a new hue shift
    pub fn set_hue(&self, hue: HueShift) {
        let uniforms = GpuUniforms::new(self.width, self.height, hue);
        log::debug!("🎨 Hue uniform updated: {:.2}", uniforms.hue);

        self.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    /// Largest surface side this device can render to
    pub fn max_surface_side(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Record the draw into `target`, clearing it first
    pub fn render_to_target(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        viewport: (u32, u32),
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Hue Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_viewport(0.0, 0.0, viewport.0 as f32, viewport.1 as f32, 0.0, 1.0);

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.tex_coord_buffer.slice(..));
        render_pass.draw(0..6, 0..1); // Two triangles
    }

    /// Render a frame at the surface size and read it back
    pub fn draw(&self, surface: (u32, u32)) -> Result<Frame> {
        let max_side = self.max_surface_side();
        let width = surface.0.clamp(1, max_side);
        let height = surface.1.clamp(1, max_side);

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let output_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Output Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let output_view = output_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        self.render_to_target(&mut encoder, &output_view, (width, height));

        let padded_bytes_per_row = padded_bytes_per_row(width);
        let buffer_size = (padded_bytes_per_row * height) as u64;

        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Output Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &output_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &output_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(Some(encoder.finish()));

        let buffer_slice = output_buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(ViewerError::Readback(error.to_string()));
        }

        rx.recv()
            .map_err(|e| ViewerError::Readback(e.to_string()))?
            .map_err(|e| ViewerError::Readback(e.to_string()))?;

        let data = buffer_slice.get_mapped_range();
        let pixels = strip_row_padding(&data, width, height, padded_bytes_per_row);

        drop(data);
        output_buffer.unmap();

        Ok(Frame { width, height, pixels })
    }
}

/// One tightly packed vec2<f32> per vertex
fn vec2_buffer_layout(attributes: &'static [wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (2 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

/// Compile one shader stage, reporting validation errors against that stage
async fn compile_shader(
    device: &wgpu::Device,
    stage: ShaderStage,
    source: &'static str,
) -> Result<wgpu::ShaderModule> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(match stage {
            ShaderStage::Vertex => "Hue Vertex Shader",
            ShaderStage::Fragment => "Hue Fragment Shader",
        }),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    match device.pop_error_scope().await {
        Some(error) => Err(ViewerError::ShaderCompile {
            stage,
            log: error.to_string(),
        }),
        None => Ok(module),
    }
}
