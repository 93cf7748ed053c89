use glam::Vec3;
use serde::Deserialize;

use crate::error::CameraError;
use crate::math::clamp;

//
// ──────────────────────────────────────────────────────────────
//   Defaults
// ──────────────────────────────────────────────────────────────
//

const DEFAULT_MOVEMENT_SPEED: f32 = 1.0;
const DEFAULT_ROTATION_SPEED: f32 = 0.1;
const DEFAULT_MIN_ZOOM: f32 = 1.0;
const DEFAULT_MAX_ZOOM: f32 = 4.0;

//
// ──────────────────────────────────────────────────────────────
//   Per-axis limits
// ──────────────────────────────────────────────────────────────
//

/// Optional symmetric bound per axis. `Some(l)` keeps the value in `[-l, l]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisLimits
{
  pub x: Option<f32>,
  pub y: Option<f32>,
  pub z: Option<f32>,
}

impl AxisLimits
{
  pub const NONE: Self = Self { x: None, y: None, z: None };

  pub fn uniform(limit: f32) -> Self
  {
    Self { x: Some(limit), y: Some(limit), z: Some(limit) }
  }

  pub fn apply(&self, value: Vec3) -> Vec3
  {
    Vec3::new(limit_axis(value.x, self.x), limit_axis(value.y, self.y), limit_axis(value.z, self.z))
  }

  fn validate(&self, kind: &'static str) -> Result<(), CameraError>
  {
    for (axis, limit) in [('x', self.x), ('y', self.y), ('z', self.z)]
    {
      if let Some(value) = limit
      {
        if value.is_nan() || value < 0.0
        {
          return Err(CameraError::NegativeLimit { kind, axis, value });
        }
      }
    }

    Ok(())
  }
}

pub(crate) fn limit_axis(value: f32, limit: Option<f32>) -> f32
{
  match limit
  {
    Some(l) => clamp(value, -l, l),
    None => value,
  }
}

//
// ──────────────────────────────────────────────────────────────
//   CameraSettings
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings
{
  /// World units per unit of input at zoom 1.
  pub movement_speed: f32,
  /// Degrees per unit of rotation input.
  pub rotation_speed: f32,
  pub min_zoom: f32,
  pub max_zoom: f32,

  pub movement_limit: AxisLimits,
  /// x bounds yaw, y bounds pitch. Roll is not modelled.
  pub rotation_limit: AxisLimits,
}

impl Default for CameraSettings
{
  fn default() -> Self
  {
    Self {
      movement_speed: DEFAULT_MOVEMENT_SPEED,
      rotation_speed: DEFAULT_ROTATION_SPEED,
      min_zoom: DEFAULT_MIN_ZOOM,
      max_zoom: DEFAULT_MAX_ZOOM,
      movement_limit: AxisLimits::NONE,
      rotation_limit: AxisLimits::NONE,
    }
  }
}

impl CameraSettings
{
  pub fn with_movement_speed(mut self, speed: f32) -> Self
  {
    self.movement_speed = speed;
    self
  }

  pub fn validate(&self) -> Result<(), CameraError>
  {
    let (min, max) = (self.min_zoom, self.max_zoom);
    let zoom_ok = min.is_finite() && max.is_finite() && min > 0.0 && min <= max;

    if !zoom_ok
    {
      return Err(CameraError::InvalidZoomRange { min, max });
    }

    self.movement_limit.validate("movement")?;
    self.rotation_limit.validate("rotation")
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn test_defaults_are_valid()
  {
    let settings = CameraSettings::default();
    assert_eq!(settings.movement_speed, 1.0);
    assert_eq!(settings.rotation_speed, 0.1);
    assert!(settings.validate().is_ok());
  }

  #[test]
  fn test_inverted_zoom_range_rejected()
  {
    let settings = CameraSettings { min_zoom: 5.0, max_zoom: 2.0, ..Default::default() };
    assert_eq!(settings.validate(), Err(CameraError::InvalidZoomRange { min: 5.0, max: 2.0 }));
  }

  #[test]
  fn test_non_positive_zoom_rejected()
  {
    let settings = CameraSettings { min_zoom: 0.0, max_zoom: 2.0, ..Default::default() };
    assert!(settings.validate().is_err());
  }

  #[test]
  fn test_equal_zoom_bounds_accepted()
  {
    let settings = CameraSettings { min_zoom: 2.0, max_zoom: 2.0, ..Default::default() };
    assert!(settings.validate().is_ok());
  }

  #[test]
  fn test_negative_limit_rejected()
  {
    let settings = CameraSettings {
      rotation_limit: AxisLimits { y: Some(-1.0), ..AxisLimits::NONE },
      ..Default::default()
    };

    assert_eq!(
      settings.validate(),
      Err(CameraError::NegativeLimit { kind: "rotation", axis: 'y', value: -1.0 })
    );
  }

  #[test]
  fn test_axis_limits_apply_symmetric_bounds()
  {
    let limits = AxisLimits { x: Some(2.0), y: None, z: Some(0.5) };
    let limited = limits.apply(Vec3::new(-7.0, 100.0, 0.25));
    assert_eq!(limited, Vec3::new(-2.0, 100.0, 0.25));
  }

  #[test]
  fn test_uniform_limits_bound_every_axis()
  {
    let limited = AxisLimits::uniform(1.5).apply(Vec3::new(3.0, -3.0, 1.0));
    assert_eq!(limited, Vec3::new(1.5, -1.5, 1.0));
  }
}
