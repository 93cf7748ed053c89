use nodehack_core::{Camera, Color};

const FPS_RANGE: std::ops::RangeInclusive<u32> = 0..=120;

//
// ──────────────────────────────────────────────────────────────
//   Overlay
//
//   Small egui panel over the scene. Holds the user-editable
//   values; the app reads them back when a frame reports a
//   change.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay
{
  pub wireframe: bool,
  pub color: Color,
  pub fps: u32,
}

/// What the user touched during one UI pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayChanges
{
  pub wireframe: bool,
  pub color: bool,
  pub fps: bool,
}

impl OverlayChanges
{
  /// egui may run the UI closure more than once per frame.
  pub fn merge(&mut self, other: OverlayChanges)
  {
    self.wireframe |= other.wireframe;
    self.color |= other.color;
    self.fps |= other.fps;
  }
}

impl Overlay
{
  pub fn new(wireframe: bool, color: Color, fps: u32) -> Self
  {
    Self { wireframe, color, fps }
  }

  pub fn show(&mut self, ctx: &egui::Context, node_name: &str, camera: &Camera) -> OverlayChanges
  {
    let mut changes = OverlayChanges::default();

    egui::Window::new(node_name).resizable(false).show(ctx, |ui| {
      camera_readout(ui, camera);
      ui.separator();

      changes.wireframe = ui.checkbox(&mut self.wireframe, "Wireframe").changed();

      ui.horizontal(|ui| {
        ui.label("Colour");
        changes.color = ui.color_edit_button_srgba_unmultiplied(&mut self.color).changed();
      });

      let slider = egui::Slider::new(&mut self.fps, FPS_RANGE).text("update fps");
      changes.fps = ui.add(slider).changed();

      if self.fps == 0
      {
        ui.weak("updates paused");
      }
    });

    changes
  }
}

fn camera_readout(ui: &mut egui::Ui, camera: &Camera)
{
  let t = camera.translation();

  egui::Grid::new("camera_readout").num_columns(2).show(ui, |ui| {
    ui.label("Translation");
    ui.monospace(format!("{:+.2} {:+.2} {:+.2}", t.x, t.y, t.z));
    ui.end_row();

    ui.label("Pitch / yaw");
    ui.monospace(format!("{:+.1}° {:+.1}°", camera.pitch(), camera.yaw()));
    ui.end_row();

    ui.label("Move speed");
    ui.monospace(format!("{:.2} / zoom", camera.movement_speed()));
    ui.end_row();

    ui.label("Zoom");
    ui.monospace(format!(
      "{:.2} ({:.2}..{:.2})",
      camera.zoom_level(),
      camera.min_zoom(),
      camera.max_zoom()
    ));
    ui.end_row();
  });
}
