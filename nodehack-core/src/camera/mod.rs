mod settings;
mod transform;
mod view;

pub use settings::{AxisLimits, CameraSettings};
pub use transform::{MatrixStack, TransformTarget};
pub use view::{Camera, CameraScope};
