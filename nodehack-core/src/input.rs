use std::collections::HashMap;
use std::hash::Hash;

use glam::Vec3;

use crate::camera::Camera;

/// Distance fed to `Camera::move_by` per tick while a movement key is held.
pub const MOVE_STEP: f32 = 0.1;

//
// ──────────────────────────────────────────────────────────────
//   KeyLatch
// ──────────────────────────────────────────────────────────────
//

/// Remembers which keys are currently held. Unseen keys read as released.
#[derive(Debug, Clone)]
pub struct KeyLatch<K>
{
  held: HashMap<K, bool>,
}

impl<K: Eq + Hash> KeyLatch<K>
{
  pub fn new() -> Self
  {
    Self { held: HashMap::new() }
  }

  pub fn press(&mut self, key: K)
  {
    self.held.insert(key, true);
  }

  pub fn release(&mut self, key: K)
  {
    self.held.insert(key, false);
  }

  pub fn is_held(&self, key: &K) -> bool
  {
    self.held.get(key).copied().unwrap_or(false)
  }

  /// Forget every key, e.g. when focus is lost and releases will never arrive.
  pub fn clear(&mut self)
  {
    self.held.clear();
  }
}

impl<K: Eq + Hash> Default for KeyLatch<K>
{
  fn default() -> Self
  {
    Self::new()
  }
}

//
// ──────────────────────────────────────────────────────────────
//   MovementBinding
//
//   One direction per tick. Keys are checked forward, left,
//   backward, right; the first one held wins and the rest are
//   ignored, so diagonals do not compose.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementBinding<K>
{
  pub forward: K,
  pub left: K,
  pub backward: K,
  pub right: K,
}

impl<K: Eq + Hash> MovementBinding<K>
{
  pub fn direction(&self, latch: &KeyLatch<K>) -> Option<Vec3>
  {
    let bindings = [
      (&self.forward, Vec3::new(0.0, 0.0, MOVE_STEP)),
      (&self.left, Vec3::new(MOVE_STEP, 0.0, 0.0)),
      (&self.backward, Vec3::new(0.0, 0.0, -MOVE_STEP)),
      (&self.right, Vec3::new(-MOVE_STEP, 0.0, 0.0)),
    ];

    bindings.into_iter().find(|(key, _)| latch.is_held(key)).map(|(_, delta)| delta)
  }

  /// Issue at most one `move_by`. Returns whether the camera moved.
  pub fn apply(&self, latch: &KeyLatch<K>, camera: &mut Camera) -> bool
  {
    let Some(delta) = self.direction(latch) else { return false };

    camera.move_by(delta.x, delta.y, delta.z);
    true
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::camera::CameraSettings;

  const WASD: MovementBinding<char> =
    MovementBinding { forward: 'w', left: 'a', backward: 's', right: 'd' };

  #[test]
  fn test_latch_defaults_to_released()
  {
    let latch: KeyLatch<char> = KeyLatch::new();
    assert!(!latch.is_held(&'w'));
  }

  #[test]
  fn test_latch_last_write_wins()
  {
    let mut latch = KeyLatch::new();
    latch.press('w');
    assert!(latch.is_held(&'w'));

    latch.press('w');
    latch.release('w');
    assert!(!latch.is_held(&'w'));

    latch.release('q');
    latch.press('q');
    assert!(latch.is_held(&'q'));

    latch.clear();
    assert!(!latch.is_held(&'q'));
  }

  #[test]
  fn test_each_key_maps_to_one_axis()
  {
    let cases = [
      ('w', Vec3::new(0.0, 0.0, 0.1)),
      ('a', Vec3::new(0.1, 0.0, 0.0)),
      ('s', Vec3::new(0.0, 0.0, -0.1)),
      ('d', Vec3::new(-0.1, 0.0, 0.0)),
    ];

    for (key, expected) in cases
    {
      let mut latch = KeyLatch::new();
      latch.press(key);
      assert_eq!(WASD.direction(&latch), Some(expected), "key {key}");
    }
  }

  #[test]
  fn test_first_held_key_wins()
  {
    let mut latch = KeyLatch::new();
    latch.press('d');
    latch.press('s');
    assert_eq!(WASD.direction(&latch), Some(Vec3::new(0.0, 0.0, -MOVE_STEP)));

    latch.press('a');
    assert_eq!(WASD.direction(&latch), Some(Vec3::new(MOVE_STEP, 0.0, 0.0)));

    latch.press('w');
    assert_eq!(WASD.direction(&latch), Some(Vec3::new(0.0, 0.0, MOVE_STEP)));
  }

  #[test]
  fn test_apply_moves_camera_once_per_call()
  {
    let mut camera = Camera::new(CameraSettings::default().with_movement_speed(0.5)).unwrap();
    let mut latch = KeyLatch::new();

    assert!(!WASD.apply(&latch, &mut camera));
    assert_eq!(camera.translation(), Vec3::ZERO);

    latch.press('w');
    latch.press('a');
    assert!(WASD.apply(&latch, &mut camera));
    assert!(camera.translation().abs_diff_eq(Vec3::new(0.0, 0.0, 0.05), 1e-6));
  }
}
