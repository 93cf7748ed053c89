use egui_wgpu::{Renderer, RendererOptions, ScreenDescriptor};
use egui_winit::{EventResponse, State};
use winit::event::WindowEvent;
use winit::window::Window;

pub struct GuiRenderer
{
  pub context: egui::Context,
  pub state: State,
  pub renderer: Renderer,
}

impl GuiRenderer
{
  pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self
  {
    let context = egui::Context::default();
    let state = State::new(
      context.clone(),
      egui::viewport::ViewportId::ROOT,
      window,
      Some(window.scale_factor() as f32),
      None,
      None,
    );

    let renderer = Renderer::new(
      device,
      output_format,
      RendererOptions {
        depth_stencil_format: None,
        msaa_samples: 1,
        predictable_texture_filtering: false,
        dithering: true,
      },
    );

    Self { context, state, renderer }
  }

  /// `consumed` is set when egui wants the event for itself (a drag on a
  /// widget, say); `repaint` when the UI needs another frame.
  pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> EventResponse
  {
    self.state.on_window_event(window, event)
  }

  /// Build one frame of UI.
  pub fn run(&mut self, window: &Window, build_ui: impl FnMut(&egui::Context)) -> egui::FullOutput
  {
    let raw_input = self.state.take_egui_input(window);
    let mut full_output = self.context.run(raw_input, build_ui);

    let platform_output = std::mem::take(&mut full_output.platform_output);
    self.state.handle_platform_output(window, platform_output);

    full_output
  }

  pub fn render(
    &mut self,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    encoder: &mut wgpu::CommandEncoder,
    window: &Window,
    view: &wgpu::TextureView,
    full_output: egui::FullOutput,
  )
  {
    let size = window.inner_size();
    let ppp = window.scale_factor() as f32;
    let screen_descriptor =
      ScreenDescriptor { size_in_pixels: [size.width, size.height], pixels_per_point: ppp };

    for (id, delta) in full_output.textures_delta.set
    {
      self.renderer.update_texture(device, queue, id, &delta);
    }

    let tris = self.context.tessellate(full_output.shapes, ppp);
    self.renderer.update_buffers(device, queue, encoder, &tris, &screen_descriptor);

    {
      let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Egui Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
          view,
          resolve_target: None,
          ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
          depth_slice: None,
        })],
        ..Default::default()
      });

      // The pass is dropped at the end of this block, before `encoder` is
      // used again; only the lifetime annotation is erased.
      let mut pass = pass.forget_lifetime();

      self.renderer.render(&mut pass, &tris, &screen_descriptor);
    }

    for id in full_output.textures_delta.free
    {
      self.renderer.free_texture(&id);
    }
  }

  /// Keep egui's texture bookkeeping consistent when a frame is dropped.
  pub fn skip_frame(
    &mut self,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    full_output: egui::FullOutput,
  )
  {
    for (id, delta) in full_output.textures_delta.set
    {
      self.renderer.update_texture(device, queue, id, &delta);
    }

    for id in full_output.textures_delta.free
    {
      self.renderer.free_texture(&id);
    }
  }
}
