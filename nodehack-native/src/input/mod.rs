pub mod camera_control;

use nodehack_core::input::{KeyLatch, MovementBinding};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

// Trackpads report pixels; treat this many as one wheel notch
const PIXELS_PER_LINE: f32 = 40.0;

pub const WASD: MovementBinding<KeyCode> = MovementBinding {
  forward: KeyCode::KeyW,
  left: KeyCode::KeyA,
  backward: KeyCode::KeyS,
  right: KeyCode::KeyD,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseButtons
{
  pub left: bool,
  pub middle: bool,
  pub right: bool,
}

impl MouseButtons
{
  pub const RIGHT: Self = Self { left: false, middle: false, right: true };

  pub fn any(&self) -> bool
  {
    self.left || self.middle || self.right
  }
}

/// Pointer gestures distilled from raw window events. `dy` is up-positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction
{
  Drag
  {
    dx: f32,
    dy: f32,
    buttons: MouseButtons,
  },
  Scroll
  {
    x: f32,
    y: f32,
  },
}

pub struct InputState
{
  pub keys: KeyLatch<KeyCode>,
  pub buttons: MouseButtons,
  cursor: Option<PhysicalPosition<f64>>,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self { keys: KeyLatch::new(), buttons: MouseButtons::default(), cursor: None }
  }

  pub fn handle_event(&mut self, event: &WindowEvent) -> Option<PointerAction>
  {
    match event
    {
      WindowEvent::KeyboardInput { event, .. } =>
      {
        if let PhysicalKey::Code(code) = event.physical_key
        {
          self.key_changed(code, event.state);
        }
        None
      }

      WindowEvent::MouseInput { state, button, .. } =>
      {
        self.button_changed(*button, *state);
        None
      }

      WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position),

      WindowEvent::CursorLeft { .. } =>
      {
        self.cursor = None;
        None
      }

      WindowEvent::MouseWheel { delta, .. } => Some(scroll_action(*delta)),

      WindowEvent::Focused(false) =>
      {
        self.keys.clear();
        self.buttons = MouseButtons::default();
        None
      }

      _ => None,
    }
  }

  fn key_changed(&mut self, code: KeyCode, state: ElementState)
  {
    match state
    {
      ElementState::Pressed => self.keys.press(code),
      ElementState::Released => self.keys.release(code),
    }
  }

  fn button_changed(&mut self, button: MouseButton, state: ElementState)
  {
    let pressed = state == ElementState::Pressed;

    match button
    {
      MouseButton::Left => self.buttons.left = pressed,
      MouseButton::Middle => self.buttons.middle = pressed,
      MouseButton::Right => self.buttons.right = pressed,
      _ =>
      {}
    }
  }

  /// A move with a button held is a drag; plain hovering only tracks position.
  fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<PointerAction>
  {
    let previous = self.cursor.replace(position)?;

    if !self.buttons.any()
    {
      return None;
    }

    let dx = (position.x - previous.x) as f32;
    let dy = (previous.y - position.y) as f32;

    Some(PointerAction::Drag { dx, dy, buttons: self.buttons })
  }
}

fn scroll_action(delta: MouseScrollDelta) -> PointerAction
{
  match delta
  {
    MouseScrollDelta::LineDelta(x, y) => PointerAction::Scroll { x, y },
    MouseScrollDelta::PixelDelta(p) =>
    {
      PointerAction::Scroll { x: p.x as f32 / PIXELS_PER_LINE, y: p.y as f32 / PIXELS_PER_LINE }
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  fn at(x: f64, y: f64) -> PhysicalPosition<f64>
  {
    PhysicalPosition::new(x, y)
  }

  #[test]
  fn test_keys_latch_by_physical_code()
  {
    let mut input = InputState::new();
    input.key_changed(KeyCode::KeyW, ElementState::Pressed);
    assert!(input.keys.is_held(&KeyCode::KeyW));

    input.key_changed(KeyCode::KeyW, ElementState::Released);
    assert!(!input.keys.is_held(&KeyCode::KeyW));
  }

  #[test]
  fn test_hover_is_not_a_drag()
  {
    let mut input = InputState::new();
    assert_eq!(input.cursor_moved(at(10.0, 10.0)), None);
    assert_eq!(input.cursor_moved(at(30.0, 5.0)), None);
  }

  #[test]
  fn test_right_drag_reports_up_positive_delta()
  {
    let mut input = InputState::new();
    input.cursor_moved(at(100.0, 100.0));
    input.button_changed(MouseButton::Right, ElementState::Pressed);

    let action = input.cursor_moved(at(112.0, 90.0));
    assert_eq!(
      action,
      Some(PointerAction::Drag { dx: 12.0, dy: 10.0, buttons: MouseButtons::RIGHT })
    );
  }

  #[test]
  fn test_first_move_after_entering_has_no_delta()
  {
    let mut input = InputState::new();
    input.button_changed(MouseButton::Right, ElementState::Pressed);
    assert_eq!(input.cursor_moved(at(500.0, 500.0)), None);
  }

  #[test]
  fn test_scroll_units()
  {
    assert_eq!(
      scroll_action(MouseScrollDelta::LineDelta(0.0, 2.0)),
      PointerAction::Scroll { x: 0.0, y: 2.0 }
    );
    assert_eq!(
      scroll_action(MouseScrollDelta::PixelDelta(at(0.0, -80.0))),
      PointerAction::Scroll { x: 0.0, y: -2.0 }
    );
  }
}
