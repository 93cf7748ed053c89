use glam::Mat4;

use super::projection::Projection;

//
// ──────────────────────────────────────────────────────────────
//   Camera Uniform (GPU side)
//
//   WGSL layout (node.wgsl):
//     view_proj : mat4x4<f32>   → 64 bytes
//   Total: 64 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform
{
  pub view_proj: [[f32; 4]; 4], // 64 bytes
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<CameraUniform>() == 64);

impl CameraUniform
{
  /// `model_view` is whatever the transform stack holds while the camera
  /// bracket is open.
  pub fn new(projection: &Projection, model_view: Mat4) -> Self
  {
    let view_proj = projection.build_matrix() * model_view;
    Self { view_proj: view_proj.to_cols_array_2d() }
  }
}

#[cfg(test)]
mod tests
{
  use glam::Vec4;

  use super::*;
  use crate::camera::scene_base;

  fn clip(uniform: &CameraUniform, point: Vec4) -> Vec4
  {
    Mat4::from_cols_array_2d(&uniform.view_proj) * point
  }

  #[test]
  fn test_node_origin_lands_inside_clip_volume()
  {
    let uniform = CameraUniform::new(&Projection::new(16.0 / 9.0), scene_base());
    let p = clip(&uniform, Vec4::new(0.0, 0.0, 0.0, 1.0));

    let ndc = p.truncate() / p.w;
    assert!(p.w > 0.0);
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
  }

  #[test]
  fn test_matrix_is_column_major()
  {
    let model_view = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
    let uniform = CameraUniform::new(&Projection::new(1.0), model_view);
    let expected = Projection::new(1.0).build_matrix() * model_view;

    assert_eq!(uniform.view_proj[3], expected.w_axis.to_array());
  }
}
