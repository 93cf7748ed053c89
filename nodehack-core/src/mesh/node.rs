use glam::Vec3;

use super::batch::{Batch, Color};
use super::sphere::Sphere;
use crate::error::BatchError;

const NODE_RADIUS: f32 = 1.0;

/// A named sphere sitting at the origin.
#[derive(Debug)]
pub struct Node
{
  pub name: String,
  sphere: Sphere,
}

impl Node
{
  /// Builds the node and submits its geometry right away.
  pub fn new(batch: &mut Batch, name: impl Into<String>, color: Color, wireframe: bool)
    -> Result<Self, BatchError>
  {
    Self::from_sphere(batch, name, Sphere::new(color, NODE_RADIUS), wireframe)
  }

  pub fn from_sphere(
    batch: &mut Batch,
    name: impl Into<String>,
    sphere: Sphere,
    wireframe: bool,
  ) -> Result<Self, BatchError>
  {
    let mut node = Self { name: name.into(), sphere };
    node.draw(batch, wireframe)?;
    Ok(node)
  }

  pub fn draw(&mut self, batch: &mut Batch, wireframe: bool) -> Result<(), BatchError>
  {
    self.sphere.draw_at(batch, Vec3::ZERO, wireframe)
  }

  pub fn set_color(&mut self, batch: &mut Batch, color: Color) -> Result<(), BatchError>
  {
    self.sphere.set_color(batch, color)
  }

  pub fn sphere(&self) -> &Sphere
  {
    &self.sphere
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn test_new_node_is_drawn_immediately()
  {
    let mut batch = Batch::new();
    let node = Node::new(&mut batch, "Access Point", [255, 255, 255, 255], true).unwrap();

    assert_eq!(node.name, "Access Point");
    assert_eq!(node.sphere().radius(), 1.0);
    assert_eq!(batch.len(), 2);
  }

  #[test]
  fn test_redraw_without_wireframe_drops_overlay()
  {
    let mut batch = Batch::new();
    let mut node = Node::new(&mut batch, "n", [10, 20, 30, 255], true).unwrap();

    node.draw(&mut batch, false).unwrap();
    assert_eq!(batch.len(), 1);
    assert!(node.sphere().wireframe_list().is_none());
  }

  #[test]
  fn test_set_color_forwards_to_sphere()
  {
    let mut batch = Batch::new();
    let mut node = Node::new(&mut batch, "n", [255, 255, 255, 255], false).unwrap();

    node.set_color(&mut batch, [0, 128, 255, 255]).unwrap();
    let list = batch.get(node.sphere().vertex_list().unwrap()).unwrap();
    assert_eq!(list.colors()[..4], [0_u8, 128, 255, 255]);
  }
}
