use std::ops::{Deref, DerefMut};

use glam::Vec3;

use super::settings::{limit_axis, AxisLimits, CameraSettings};
use super::transform::TransformTarget;
use crate::error::CameraError;
use crate::math::clamp;

//
// ──────────────────────────────────────────────────────────────
//   Camera (translate → pitch → yaw → zoom, Y-up)
//
//   begin() pushes the view onto a transform target, end()
//   undoes it op by op in reverse. Nothing is read back from
//   the target, so the pair must bracket exactly one pass.
// ──────────────────────────────────────────────────────────────
//

const PITCH_AXIS: Vec3 = Vec3::NEG_X;
const YAW_AXIS: Vec3 = Vec3::Y;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera
{
  translation: Vec3,
  movement_speed: f32,
  movement_limit: AxisLimits,

  // degrees
  pitch: f32,
  yaw: f32,
  rotation_speed: f32,
  rotation_limit: AxisLimits,

  zoom: f32,
  min_zoom: f32,
  max_zoom: f32,
}

impl Camera
{
  pub fn new(settings: CameraSettings) -> Result<Self, CameraError>
  {
    settings.validate()?;

    Ok(Self {
      translation: Vec3::ZERO,
      movement_speed: settings.movement_speed,
      movement_limit: settings.movement_limit,

      pitch: 0.0,
      yaw: 0.0,
      rotation_speed: settings.rotation_speed,
      rotation_limit: settings.rotation_limit,

      zoom: clamp(1.0, settings.min_zoom, settings.max_zoom),
      min_zoom: settings.min_zoom,
      max_zoom: settings.max_zoom,
    })
  }

  //
  // ── Mutators ──────────────────────────────────────────────
  //

  /// Saturating zoom: `zoom + delta` clamped to `[min_zoom, max_zoom]`.
  pub fn zoom(&mut self, delta: f32)
  {
    self.zoom = clamp(self.zoom + delta, self.min_zoom, self.max_zoom);
  }

  /// Accumulate a translation. The step shrinks as zoom grows, so zoomed-in
  /// movement is finer.
  pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32)
  {
    let step = self.movement_speed / self.zoom;
    let moved = self.translation + step * Vec3::new(dx, dy, dz);
    self.translation = self.movement_limit.apply(moved);
  }

  /// `roll` is accepted for call-site symmetry and ignored.
  pub fn rotate(&mut self, yaw: f32, pitch: f32, _roll: f32)
  {
    let step = self.rotation_speed;
    self.pitch = limit_axis(self.pitch + step * pitch, self.rotation_limit.y);
    self.yaw = limit_axis(self.yaw + step * yaw, self.rotation_limit.x);
  }

  //
  // ── Transform bracket ─────────────────────────────────────
  //

  pub fn begin<T: TransformTarget + ?Sized>(&self, target: &mut T)
  {
    target.translate(-self.translation);
    target.rotate(self.pitch, PITCH_AXIS);
    target.rotate(self.yaw, YAW_AXIS);
    target.scale(Vec3::splat(self.zoom));
  }

  pub fn end<T: TransformTarget + ?Sized>(&self, target: &mut T)
  {
    target.scale(Vec3::splat(1.0 / self.zoom));
    target.rotate(-self.yaw, YAW_AXIS);
    target.rotate(-self.pitch, PITCH_AXIS);
    target.translate(self.translation);
  }

  /// Run `begin` now and `end` when the returned guard drops, including on
  /// early return or unwinding out of the enclosed draw.
  pub fn scope<'a, T: TransformTarget + ?Sized>(&'a self, target: &'a mut T)
    -> CameraScope<'a, T>
  {
    self.begin(&mut *target);
    CameraScope { camera: self, target }
  }

  //
  // ── Accessors ─────────────────────────────────────────────
  //

  pub fn translation(&self) -> Vec3
  {
    self.translation
  }

  pub fn pitch(&self) -> f32
  {
    self.pitch
  }

  pub fn yaw(&self) -> f32
  {
    self.yaw
  }

  pub fn zoom_level(&self) -> f32
  {
    self.zoom
  }

  pub fn min_zoom(&self) -> f32
  {
    self.min_zoom
  }

  pub fn max_zoom(&self) -> f32
  {
    self.max_zoom
  }

  pub fn movement_speed(&self) -> f32
  {
    self.movement_speed
  }
}

//
// ──────────────────────────────────────────────────────────────
//   CameraScope
// ──────────────────────────────────────────────────────────────
//

pub struct CameraScope<'a, T: TransformTarget + ?Sized>
{
  camera: &'a Camera,
  target: &'a mut T,
}

impl<T: TransformTarget + ?Sized> Deref for CameraScope<'_, T>
{
  type Target = T;

  fn deref(&self) -> &T
  {
    &*self.target
  }
}

impl<T: TransformTarget + ?Sized> DerefMut for CameraScope<'_, T>
{
  fn deref_mut(&mut self) -> &mut T
  {
    &mut *self.target
  }
}

impl<T: TransformTarget + ?Sized> Drop for CameraScope<'_, T>
{
  fn drop(&mut self)
  {
    self.camera.end(&mut *self.target);
  }
}
