use nodehack_core::Camera;

use super::{MouseButtons, PointerAction};

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

/// Right-button drags orbit (x → yaw, y → pitch); the wheel zooms.
/// Drags with any other button combination are ignored.
pub fn apply_pointer_action(action: PointerAction, camera: &mut Camera)
{
  match action
  {
    PointerAction::Drag { dx, dy, buttons } if buttons == MouseButtons::RIGHT =>
    {
      camera.rotate(dx, dy, 0.0);
    }

    PointerAction::Drag { .. } =>
    {}

    PointerAction::Scroll { y, .. } =>
    {
      camera.zoom(y);
    }
  }
}

#[cfg(test)]
mod tests
{
  use nodehack_core::CameraSettings;

  use super::*;

  fn camera() -> Camera
  {
    Camera::new(CameraSettings::default()).unwrap()
  }

  #[test]
  fn test_right_drag_rotates()
  {
    let mut cam = camera();
    let drag = PointerAction::Drag { dx: 30.0, dy: -10.0, buttons: MouseButtons::RIGHT };
    apply_pointer_action(drag, &mut cam);

    assert!((cam.yaw() - 3.0).abs() < 1e-5);
    assert!((cam.pitch() + 1.0).abs() < 1e-5);
  }

  #[test]
  fn test_other_drags_ignored()
  {
    let mut cam = camera();
    let both = MouseButtons { left: true, middle: false, right: true };
    apply_pointer_action(PointerAction::Drag { dx: 30.0, dy: 30.0, buttons: both }, &mut cam);

    let left = MouseButtons { left: true, ..MouseButtons::default() };
    apply_pointer_action(PointerAction::Drag { dx: 30.0, dy: 30.0, buttons: left }, &mut cam);

    assert_eq!(cam, camera());
  }

  #[test]
  fn test_scroll_zooms_with_saturation()
  {
    let mut cam = camera();
    apply_pointer_action(PointerAction::Scroll { x: 0.0, y: 1.0 }, &mut cam);
    assert_eq!(cam.zoom_level(), 2.0);

    apply_pointer_action(PointerAction::Scroll { x: 0.0, y: 10.0 }, &mut cam);
    assert_eq!(cam.zoom_level(), 4.0);
  }
}
