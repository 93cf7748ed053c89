use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use nodehack_core::{Batch, Camera, MatrixStack, Node, Sphere, TickClock, ViewerConfig};
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::WindowEvent,
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{Window, WindowId},
};

use crate::camera::scene_base;
use crate::input::camera_control::apply_pointer_action;
use crate::input::{InputState, WASD};
use crate::overlay::{Overlay, OverlayChanges};
use crate::renderer::Renderer;

pub fn run(config: ViewerConfig) -> anyhow::Result<()>
{
  let event_loop = EventLoop::new().context("failed to create event loop")?;
  let mut app = NodehackApp::new(config)?;

  event_loop.run_app(&mut app).context("event loop failed")?;

  match app.fatal.take()
  {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

struct NodehackApp
{
  config: ViewerConfig,
  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,

  camera: Camera,
  transform: MatrixStack,
  input: InputState,

  batch: Batch,
  node: Node,
  overlay: Overlay,
  clock: TickClock,

  fatal: Option<anyhow::Error>,
}

impl NodehackApp
{
  fn new(config: ViewerConfig) -> anyhow::Result<Self>
  {
    let camera = Camera::new(config.camera.into()).context("invalid camera settings")?;

    let node_config = &config.node;
    let sphere = Sphere::with_resolution(
      node_config.color,
      node_config.radius,
      node_config.stacks,
      node_config.sectors,
    );

    let mut batch = Batch::new();
    let node = Node::from_sphere(&mut batch, node_config.name.clone(), sphere, node_config.wireframe)
      .context("failed to build node geometry")?;

    log::info!(
      "node '{}' ready: {}x{} sphere, {} vertex lists",
      node.name,
      node.sphere().stacks(),
      node.sphere().sectors(),
      batch.len()
    );

    let overlay = Overlay::new(node_config.wireframe, node_config.color, config.fps);
    let clock = TickClock::new(config.fps, Instant::now());

    Ok(Self {
      config,
      window: None,
      renderer: None,
      camera,
      transform: MatrixStack::new(scene_base()),
      input: InputState::new(),
      batch,
      node,
      overlay,
      clock,
      fatal: None,
    })
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()>
  {
    if self.window.is_some()
    {
      return Ok(());
    }

    let window_config = &self.config.window;
    let attrs = Window::default_attributes()
      .with_title(window_config.title.as_str())
      .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
    let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);

    let renderer = pollster::block_on(Renderer::new(window.clone()))?;

    self.window = Some(window);
    self.renderer = Some(renderer);
    Ok(())
  }

  fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error)
  {
    if self.fatal.is_none()
    {
      self.fatal = Some(err);
    }
    event_loop.exit();
  }

  //
  // ── Per frame ─────────────────────────────────────────────
  //

  fn redraw(&mut self) -> anyhow::Result<()>
  {
    let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else { return Ok(()) };

    let mut changes = OverlayChanges::default();
    let gui_output = renderer.gui.run(window, |ctx| {
      changes.merge(self.overlay.show(ctx, &self.node.name, &self.camera));
    });

    if changes.color
    {
      self.node.set_color(&mut self.batch, self.overlay.color)?;
    }

    if changes.wireframe
    {
      log::info!("wireframe {}", if self.overlay.wireframe { "on" } else { "off" });
      self.node.draw(&mut self.batch, self.overlay.wireframe)?;
    }

    if changes.fps
    {
      self.clock.set_fps(self.overlay.fps, Instant::now());
    }

    // The stack returns to the scene base when `scope` drops
    let scope = self.camera.scope(&mut self.transform);
    renderer.render(&self.batch, scope.current(), gui_output)
  }

  /// One update tick: at most one movement step from the held keys.
  fn tick(&mut self)
  {
    if WASD.apply(&self.input.keys, &mut self.camera)
    {
      log::trace!("camera at {:?}", self.camera.translation());
    }

    if let Some(window) = &self.window
    {
      window.request_redraw();
    }
  }
}

impl ApplicationHandler for NodehackApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    if let Err(err) = self.init_window_and_renderer(event_loop)
    {
      self.fail(event_loop, err);
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let window = match &self.window
    {
      Some(w) if w.id() == window_id => w.clone(),
      _ => return,
    };

    let gui = match &mut self.renderer
    {
      Some(renderer) => renderer.gui.handle_event(&window, &event),
      None => return,
    };

    if gui.repaint
    {
      window.request_redraw();
    }

    // Input state is always updated so releases are never missed; only the
    // resulting gesture is dropped when egui claimed the event.
    let action = self.input.handle_event(&event);
    if let Some(action) = action.filter(|_| !gui.consumed)
    {
      apply_pointer_action(action, &mut self.camera);
      window.request_redraw();
    }

    match event
    {
      WindowEvent::CloseRequested =>
      {
        event_loop.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }
        window.request_redraw();
      }

      WindowEvent::RedrawRequested =>
      {
        if let Err(err) = self.redraw()
        {
          self.fail(event_loop, err);
        }
      }

      _ =>
      {}
    }
  }

  fn about_to_wait(&mut self, event_loop: &ActiveEventLoop)
  {
    if self.clock.poll(Instant::now()).is_some()
    {
      self.tick();
    }

    let flow = match self.clock.next_deadline()
    {
      Some(deadline) => ControlFlow::WaitUntil(deadline),
      None => ControlFlow::Wait,
    };
    event_loop.set_control_flow(flow);
  }
}
