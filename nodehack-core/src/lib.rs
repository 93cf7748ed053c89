//! Platform-free half of the node viewer: the camera transform bracket, the
//! UV-sphere generator and the draw batch it submits to, plus the input latch,
//! update clock and configuration the native shell wires together.

pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod math;
pub mod mesh;

pub use camera::{AxisLimits, Camera, CameraScope, CameraSettings, MatrixStack, TransformTarget};
pub use clock::TickClock;
pub use config::{CameraConfig, ViewerConfig};
pub use error::{BatchError, CameraError, ConfigError};
pub use input::{KeyLatch, MovementBinding};
pub use mesh::{Batch, Color, Node, RenderGroup, Sphere, VertexListId};
