use glam::{Mat4, Vec3};

//
// ──────────────────────────────────────────────────────────────
//   Transform target
//
//   Fixed-function style: every operation post-multiplies the
//   current matrix, so the last call applied is the first one
//   seen by a vertex.
// ──────────────────────────────────────────────────────────────
//

pub trait TransformTarget
{
  fn translate(&mut self, offset: Vec3);

  /// Rotate by `degrees` about `axis`. The axis need not be normalised.
  fn rotate(&mut self, degrees: f32, axis: Vec3);

  fn scale(&mut self, factors: Vec3);
}

//
// ──────────────────────────────────────────────────────────────
//   MatrixStack
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixStack
{
  base: Mat4,
  current: Mat4,
}

impl MatrixStack
{
  pub fn new(base: Mat4) -> Self
  {
    Self { base, current: base }
  }

  pub fn identity() -> Self
  {
    Self::new(Mat4::IDENTITY)
  }

  pub fn current(&self) -> Mat4
  {
    self.current
  }

  pub fn base(&self) -> Mat4
  {
    self.base
  }

  /// Drop whatever has been applied and return to the base matrix.
  pub fn reset(&mut self)
  {
    self.current = self.base;
  }

  /// True when the current matrix matches the base within `epsilon` per element.
  pub fn is_at_base(&self, epsilon: f32) -> bool
  {
    self.current.abs_diff_eq(self.base, epsilon)
  }
}

impl Default for MatrixStack
{
  fn default() -> Self
  {
    Self::identity()
  }
}

impl TransformTarget for MatrixStack
{
  fn translate(&mut self, offset: Vec3)
  {
    self.current *= Mat4::from_translation(offset);
  }

  fn rotate(&mut self, degrees: f32, axis: Vec3)
  {
    let Some(axis) = axis.try_normalize() else { return };

    self.current *= Mat4::from_axis_angle(axis, degrees.to_radians());
  }

  fn scale(&mut self, factors: Vec3)
  {
    self.current *= Mat4::from_scale(factors);
  }
}
