mod batch;
mod core;
mod depth;
mod gui;
mod pipeline;

pub use self::core::Renderer;
