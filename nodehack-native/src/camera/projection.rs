use glam::{Mat4, Vec3};

//
// ──────────────────────────────────────────────────────────────
//   Perspective projection (right-handed, Y-up, depth 0..1)
// ──────────────────────────────────────────────────────────────
//

const FOVY_DEGREES: f32 = 60.0;
const ZNEAR: f32 = 0.1;
const ZFAR: f32 = 255.0;

// Where the scene sits before the camera bracket is applied
const SCENE_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -3.0);
const SCENE_TILT_DEGREES: f32 = 40.0;

pub struct Projection
{
  pub aspect: f32,
  pub fovy: f32,
  pub znear: f32,
  pub zfar: f32,
}

impl Projection
{
  pub fn new(aspect: f32) -> Self
  {
    Self { aspect, fovy: FOVY_DEGREES.to_radians(), znear: ZNEAR, zfar: ZFAR }
  }

  pub fn set_aspect(&mut self, aspect: f32)
  {
    self.aspect = aspect;
  }

  pub fn build_matrix(&self) -> Mat4
  {
    Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
  }
}

/// Base of the transform stack: pushed back along -Z and tilted to look down
/// on the node.
pub fn scene_base() -> Mat4
{
  let tilt = Mat4::from_axis_angle(Vec3::X, SCENE_TILT_DEGREES.to_radians());
  Mat4::from_translation(SCENE_OFFSET) * tilt
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::camera::CameraUniform;

  #[test]
  fn test_origin_lands_in_front_of_the_eye()
  {
    let projection = Projection::new(16.0 / 9.0);
    let clip = projection.build_matrix() * scene_base() * glam::Vec4::W;
    let ndc = clip.truncate() / clip.w;

    assert!(clip.w > 0.0);
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
  }

  #[test]
  fn test_uniform_is_column_major()
  {
    let projection = Projection::new(1.0);
    let uniform = CameraUniform::new(&projection, Mat4::IDENTITY);
    assert_eq!(uniform.view_proj, projection.build_matrix().to_cols_array_2d());
  }
}
