mod batch;
mod node;
mod sphere;

pub use batch::{
  Batch, Color, Primitive, RenderGroup, VertexList, VertexListId, COLOR_COMPONENTS,
  POSITION_COMPONENTS,
};
pub use node::Node;
pub use sphere::{sphere_positions, triangle_count, Sphere, MIN_RESOLUTION, WIREFRAME_COLOR};
