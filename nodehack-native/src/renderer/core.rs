use std::sync::Arc;

use anyhow::{bail, Context};
use glam::Mat4;
use nodehack_core::mesh::{Batch, RenderGroup};
use winit::window::Window;

use crate::camera::{CameraUniform, Projection};

use super::batch::GpuBatch;
use super::depth::DepthResources;
use super::gui::GuiRenderer;
use super::pipeline::create_node_pipeline;

const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.02, g: 0.02, b: 0.03, a: 1.0 };

pub struct Renderer
{
  window: Arc<Window>,
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  depth: DepthResources,
  projection: Projection,
  camera_buffer: wgpu::Buffer,
  camera_bind_group: wgpu::BindGroup,

  fill_pipeline: wgpu::RenderPipeline,
  wireframe_pipeline: Option<wgpu::RenderPipeline>,
  meshes: GpuBatch,

  pub gui: GuiRenderer,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  pub async fn new(window: Arc<Window>) -> anyhow::Result<Self>
  {
    let instance = wgpu::Instance::default();
    let surface =
      instance.create_surface(window.clone()).context("failed to create window surface")?;

    let adapter = request_adapter(&instance, &surface).await?;
    let line_mode = adapter.features().contains(wgpu::Features::POLYGON_MODE_LINE);
    let (device, queue) = request_device(&adapter, line_mode).await?;

    let config = configure_surface(&window, &surface, &adapter, &device)?;
    let depth = DepthResources::create(&device, &config);
    let projection = Projection::new(aspect_ratio(config.width, config.height));

    let (camera_buffer, camera_bind_group, camera_bgl) = create_camera_resources(&device);

    let fill_pipeline = create_node_pipeline(&device, config.format, &camera_bgl, None);
    let wireframe_pipeline = if line_mode
    {
      let group = Some(RenderGroup::Wireframe);
      Some(create_node_pipeline(&device, config.format, &camera_bgl, group))
    }
    else
    {
      log::warn!("adapter lacks POLYGON_MODE_LINE, wireframe overlay disabled");
      None
    };

    let gui = GuiRenderer::new(&device, config.format, &window);

    Ok(Self {
      window,
      surface,
      device,
      queue,
      config,
      depth,
      projection,
      camera_buffer,
      camera_bind_group,
      fill_pipeline,
      wireframe_pipeline,
      meshes: GpuBatch::new(),
      gui,
    })
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);
    if !self.depth.matches(&self.config)
    {
      self.depth = DepthResources::create(&self.device, &self.config);
    }
    self.projection.set_aspect(aspect_ratio(width, height));
  }

  /// Draw one frame. `model_view` is the transform stack as left by the
  /// camera bracket the caller holds open.
  pub fn render(
    &mut self,
    batch: &Batch,
    model_view: Mat4,
    gui_output: egui::FullOutput,
  ) -> anyhow::Result<()>
  {
    let Some(frame) = self.acquire_frame()?
    else
    {
      self.gui.skip_frame(&self.device, &self.queue, gui_output);
      return Ok(());
    };

    let uniform = CameraUniform::new(&self.projection, model_view);
    self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));
    self.meshes.sync(&self.device, &self.queue, batch);

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
      label: Some("Render Encoder"),
    });

    record_render_pass(
      &mut encoder,
      &view,
      &self.depth.view,
      &self.camera_bind_group,
      &self.fill_pipeline,
      self.wireframe_pipeline.as_ref(),
      &self.meshes,
    );

    self.gui.render(&self.device, &self.queue, &mut encoder, &self.window, &view, gui_output);

    self.queue.submit(Some(encoder.finish()));
    frame.present();

    Ok(())
  }
}

impl Renderer
{
  /// `None` means skip this frame; the next one may succeed.
  fn acquire_frame(&mut self) -> anyhow::Result<Option<wgpu::SurfaceTexture>>
  {
    match self.surface.get_current_texture()
    {
      Ok(frame) => Ok(Some(frame)),
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
      {
        self.surface.configure(&self.device, &self.config);
        Ok(None)
      }
      Err(wgpu::SurfaceError::Timeout) =>
      {
        log::warn!("surface timed out, skipping frame");
        Ok(None)
      }
      Err(wgpu::SurfaceError::OutOfMemory) => bail!("GPU out of memory"),
      Err(err) => bail!("failed to acquire frame: {err}"),
    }
  }
}

fn aspect_ratio(width: u32, height: u32) -> f32
{
  width.max(1) as f32 / height.max(1) as f32
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

async fn request_adapter(
  instance: &wgpu::Instance,
  surface: &wgpu::Surface<'_>,
) -> anyhow::Result<wgpu::Adapter>
{
  let adapter = instance
    .request_adapter(&wgpu::RequestAdapterOptions {
      power_preference: wgpu::PowerPreference::HighPerformance,
      compatible_surface: Some(surface),
      force_fallback_adapter: false,
    })
    .await
    .context("no suitable GPU adapter found")?;

  let info = adapter.get_info();
  log::info!("using adapter {} ({:?})", info.name, info.backend);

  Ok(adapter)
}

async fn request_device(
  adapter: &wgpu::Adapter,
  line_mode: bool,
) -> anyhow::Result<(wgpu::Device, wgpu::Queue)>
{
  let required_features =
    if line_mode { wgpu::Features::POLYGON_MODE_LINE } else { wgpu::Features::empty() };

  adapter
    .request_device(&wgpu::DeviceDescriptor {
      label: Some("Nodehack Device"),
      required_features,
      required_limits: wgpu::Limits::default(),
      ..Default::default()
    })
    .await
    .context("failed to create device")
}

fn configure_surface(
  window: &Window,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
) -> anyhow::Result<wgpu::SurfaceConfiguration>
{
  let size = window.inner_size();
  let caps = surface.get_capabilities(adapter);
  let format = caps
    .formats
    .iter()
    .copied()
    .find(|f| f.is_srgb())
    .or_else(|| caps.formats.first().copied())
    .context("surface reports no supported formats")?;

  let config = wgpu::SurfaceConfiguration {
    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    format,
    width: size.width.max(1),
    height: size.height.max(1),
    present_mode: wgpu::PresentMode::Fifo,
    alpha_mode: wgpu::CompositeAlphaMode::Auto,
    view_formats: vec![],
    desired_maximum_frame_latency: 2,
  };

  surface.configure(device, &config);
  Ok(config)
}

fn create_camera_resources(
  device: &wgpu::Device,
) -> (wgpu::Buffer, wgpu::BindGroup, wgpu::BindGroupLayout)
{
  let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("Camera Buffer"),
    size: std::mem::size_of::<CameraUniform>() as u64,
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  });

  let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Camera BGL"),
    entries: &[wgpu::BindGroupLayoutEntry {
      binding: 0,
      visibility: wgpu::ShaderStages::VERTEX,
      ty: wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
      },
      count: None,
    }],
  });

  let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("Camera BG"),
    layout: &camera_bgl,
    entries: &[wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() }],
  });

  (camera_buffer, camera_bind_group, camera_bgl)
}

//
// ──────────────────────────────────────────────────────────────
//   Render Pass
// ──────────────────────────────────────────────────────────────
//

fn record_render_pass(
  encoder: &mut wgpu::CommandEncoder,
  color_view: &wgpu::TextureView,
  depth_view: &wgpu::TextureView,
  camera_bg: &wgpu::BindGroup,
  fill_pipeline: &wgpu::RenderPipeline,
  wireframe_pipeline: Option<&wgpu::RenderPipeline>,
  meshes: &GpuBatch,
)
{
  let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
    label: Some("Node Render Pass"),
    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
      view: color_view,
      resolve_target: None,
      ops: wgpu::Operations { load: wgpu::LoadOp::Clear(CLEAR_COLOR), store: wgpu::StoreOp::Store },
      depth_slice: None,
    })],
    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
      view: depth_view,
      depth_ops: Some(wgpu::Operations {
        load: wgpu::LoadOp::Clear(1.0),
        store: wgpu::StoreOp::Store,
      }),
      stencil_ops: None,
    }),
    occlusion_query_set: None,
    timestamp_writes: None,
  });

  pass.set_bind_group(0, camera_bg, &[]);

  pass.set_pipeline(fill_pipeline);
  meshes.draw_group(&mut pass, None);

  // Wireframe state applies only to lists submitted in its group
  if let Some(pipeline) = wireframe_pipeline
  {
    pass.set_pipeline(pipeline);
    meshes.draw_group(&mut pass, Some(RenderGroup::Wireframe));
  }
}
