use encase::{ShaderSize, ShaderType, StorageBuffer};
use glam::{Vec2, Vec4};
use wgpu::{include_wgsl, util::DeviceExt};

use super::command::CircleCommand;
use crate::{paint::StrokeCap, px::PxSize};

#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
}

const STYLE_FILL: u32 = 0;
const STYLE_STROKE: u32 = 1;

/// Extra pixels around each primitive's quad so anti-aliased edges are not
/// clipped by the instance geometry.
const AA_MARGIN: f32 = 2.0;

#[derive(ShaderType, Clone, Copy, Debug, PartialEq)]
struct CircleUniform {
    rect: Vec4,
    color: Vec4,
    center: Vec2,
    screen_size: Vec2,
    radius: f32,
    stroke_width: f32,
    start_angle_degrees: f32,
    sweep_angle_degrees: f32,
    style: u32,
    full_circle: u32,
    cap: u32,
    _pad: u32,
}

#[derive(PartialEq, ShaderType)]
struct CircleInstances {
    #[shader(size(runtime))]
    instances: Vec<CircleUniform>,
}

/// Render pipeline drawing stroked circles, filled circles and arc strokes.
pub struct CirclePipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    quad_vertex_buffer: wgpu::Buffer,
    quad_index_buffer: wgpu::Buffer,
}

impl CirclePipeline {
    /// Creates the circle pipeline for the provided target format.
    pub fn new(
        gpu: &wgpu::Device,
        format: wgpu::TextureFormat,
        pipeline_cache: Option<&wgpu::PipelineCache>,
        sample_count: u32,
    ) -> Self {
        let shader = gpu.create_shader_module(include_wgsl!("circle.wgsl"));

        let bind_group_layout = gpu.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("circle_bind_group_layout"),
        });

        let pipeline_layout = gpu.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Circle Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = gpu.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Circle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                }],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview_mask: None,
            cache: pipeline_cache,
        });

        let quad_vertices = [
            Vertex {
                position: [0.0, 0.0],
            },
            Vertex {
                position: [1.0, 0.0],
            },
            Vertex {
                position: [1.0, 1.0],
            },
            Vertex {
                position: [0.0, 1.0],
            },
        ];
        let quad_vertex_buffer = gpu.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Circle Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_indices: [u16; 6] = [0, 2, 1, 0, 3, 2];
        let quad_index_buffer = gpu.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Circle Quad Index Buffer"),
            contents: bytemuck::cast_slice(&quad_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            bind_group_layout,
            quad_vertex_buffer,
            quad_index_buffer,
        }
    }

    /// Records one instanced draw for the given commands.
    ///
    /// Instances are rasterized in command order, preserving the overlay
    /// semantics of the canvas.
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        commands: &[CircleCommand],
        target_size: PxSize,
    ) {
        let instances = build_instances(commands, target_size);
        if instances.is_empty() {
            return;
        }
        let instance_count = instances.len();

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Circle Storage Buffer"),
            size: 16 + CircleUniform::SHADER_SIZE.get() * instance_count as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniforms = CircleInstances { instances };
        let mut buffer_content = StorageBuffer::new(Vec::<u8>::new());
        buffer_content
            .write(&uniforms)
            .expect("buffer write failed");
        queue.write_buffer(&uniform_buffer, 0, buffer_content.as_ref());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("circle_bind_group"),
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.quad_vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.quad_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..6, 0, 0..instance_count as u32);
    }
}

fn quad_around(center: Vec2, extent: f32) -> Vec4 {
    Vec4::new(
        center.x - extent,
        center.y - extent,
        extent * 2.0,
        extent * 2.0,
    )
}

fn build_instances(commands: &[CircleCommand], target_size: PxSize) -> Vec<CircleUniform> {
    let screen_size = Vec2::new(target_size.width.to_f32(), target_size.height.to_f32());
    let mut instances = Vec::with_capacity(commands.len());

    for command in commands {
        if command.color().a <= 0.0 {
            continue;
        }
        match *command {
            CircleCommand::StrokeCircle {
                center,
                radius,
                stroke_width,
                color,
            } => {
                instances.push(CircleUniform {
                    rect: quad_around(center, radius + stroke_width / 2.0 + AA_MARGIN),
                    color: Vec4::from_array(color.to_array()),
                    center,
                    screen_size,
                    radius,
                    stroke_width,
                    start_angle_degrees: 0.0,
                    sweep_angle_degrees: 360.0,
                    style: STYLE_STROKE,
                    full_circle: 1,
                    cap: 0,
                    _pad: 0,
                });
            }
            CircleCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                instances.push(CircleUniform {
                    rect: quad_around(center, radius + AA_MARGIN),
                    color: Vec4::from_array(color.to_array()),
                    center,
                    screen_size,
                    radius,
                    stroke_width: 0.0,
                    start_angle_degrees: 0.0,
                    sweep_angle_degrees: 360.0,
                    style: STYLE_FILL,
                    full_circle: 1,
                    cap: 0,
                    _pad: 0,
                });
            }
            CircleCommand::StrokeArc {
                bounds,
                start_angle_degrees,
                sweep_angle_degrees,
                stroke_width,
                cap,
                color,
            } => {
                // Normalize to a non-negative sweep; a negative sweep is the
                // same arc traced from its other end.
                let mut start = start_angle_degrees;
                let mut sweep = sweep_angle_degrees;
                if sweep < 0.0 {
                    start += sweep;
                    sweep = -sweep;
                }
                if sweep <= 0.0 {
                    continue;
                }

                let radius = bounds.width().min(bounds.height()) / 2.0;
                let center = bounds.center();
                instances.push(CircleUniform {
                    rect: quad_around(center, radius + stroke_width / 2.0 + AA_MARGIN),
                    color: Vec4::from_array(color.to_array()),
                    center,
                    screen_size,
                    radius,
                    stroke_width,
                    start_angle_degrees: start,
                    sweep_angle_degrees: sweep,
                    style: STYLE_STROKE,
                    full_circle: u32::from(sweep >= 360.0),
                    cap: match cap {
                        StrokeCap::Round => 1,
                        StrokeCap::Butt => 0,
                    },
                    _pad: 0,
                });
            }
        }
    }

    instances
}
