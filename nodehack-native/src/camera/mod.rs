mod projection;
mod uniform;

pub use projection::{scene_base, Projection};
pub use uniform::CameraUniform;
