//! Headless rasterization of recorded canvas commands.
//!
//! Hosts that embed the drawable in a windowed renderer drive
//! [`CirclePipeline`](crate::pipelines::circle::pipeline::CirclePipeline)
//! inside their own render pass. [`HeadlessRenderer`] is the standalone
//! path: it owns an off-screen target and turns a command list into RGBA8
//! pixels, which is also what the GPU smoke tests run against.

use thiserror::Error;
use tracing::info;

use crate::{
    color::Color,
    pipelines::circle::{command::CircleCommand, pipeline::CirclePipeline},
    px::PxSize,
};

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Errors from headless renderer construction and readback.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested target size has a non-positive dimension.
    #[error("render target size must be positive, got {width}x{height}")]
    InvalidSize {
        /// Requested width in physical pixels.
        width: i32,
        /// Requested height in physical pixels.
        height: i32,
    },
    /// No compatible GPU adapter was found.
    #[error("no compatible gpu adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    /// The adapter refused to create a device.
    #[error("gpu device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    /// Waiting for the GPU to finish failed.
    #[error("gpu poll failed while waiting for readback: {0}")]
    Poll(#[from] wgpu::PollError),
    /// Mapping the readback buffer failed.
    #[error("pixel readback mapping failed: {0}")]
    Readback(#[from] wgpu::BufferAsyncError),
    /// The mapping callback was dropped without reporting a result.
    #[error("readback channel closed before the buffer was mapped")]
    ReadbackChannelClosed,
}

/// An off-screen renderer for circle command lists.
pub struct HeadlessRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: CirclePipeline,
    target: wgpu::Texture,
    target_view: wgpu::TextureView,
    size: PxSize,
}

impl HeadlessRenderer {
    /// Creates a renderer with an off-screen RGBA8 target of the given size.
    ///
    /// Adapter selection accepts any backend and prefers low-power devices;
    /// software fallbacks are fine since the workload is three instanced
    /// quads.
    pub fn new(size: PxSize) -> Result<Self, RenderError> {
        if size.width.raw() <= 0 || size.height.raw() <= 0 {
            return Err(RenderError::InvalidSize {
                width: size.width.raw(),
                height: size.height.raw(),
            });
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;
        info!(adapter = %adapter.get_info().name, "rendering headless");

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            label: None,
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
            experimental_features: wgpu::ExperimentalFeatures::default(),
        }))?;

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Headless Render Target"),
            size: wgpu::Extent3d {
                width: size.width.raw() as u32,
                height: size.height.raw() as u32,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let pipeline = CirclePipeline::new(&device, TARGET_FORMAT, None, 1);

        Ok(Self {
            device,
            queue,
            pipeline,
            target,
            target_view,
            size,
        })
    }

    /// Returns the target size in physical pixels.
    pub fn size(&self) -> PxSize {
        self.size
    }

    /// Renders the commands over a cleared target and reads the result back
    /// as tightly packed RGBA8 rows.
    pub fn render(
        &mut self,
        commands: &[CircleCommand],
        clear: Color,
    ) -> Result<Vec<u8>, RenderError> {
        let width = self.size.width.raw() as u32;
        let height = self.size.height.raw() as u32;
        let unpadded_bytes_per_row = width * 4;
        let padded_bytes_per_row = unpadded_bytes_per_row
            .div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
            * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Headless Readback Buffer"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Headless Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Headless Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target_view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            self.pipeline
                .draw(&self.device, &self.queue, &mut render_pass, commands, self.size);
        }

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
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

        let slice = readback.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::PollType::wait_indefinitely())?;
        receiver
            .recv()
            .map_err(|_| RenderError::ReadbackChannelClosed)??;

        let mapped = slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
        for row in mapped.chunks_exact(padded_bytes_per_row as usize) {
            pixels.extend_from_slice(&row[..unpadded_bytes_per_row as usize]);
        }
        drop(mapped);
        readback.unmap();

        Ok(pixels)
    }
}
