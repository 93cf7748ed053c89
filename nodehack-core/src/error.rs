use std::path::PathBuf;

use thiserror::Error;

use crate::mesh::VertexListId;

#[derive(Debug, Error, PartialEq)]
pub enum CameraError
{
  #[error("minimum zoom {min} must be positive and not greater than maximum zoom {max}")]
  InvalidZoomRange
  {
    min: f32,
    max: f32,
  },

  #[error("{kind} limit on axis {axis} is negative ({value})")]
  NegativeLimit
  {
    kind: &'static str,
    axis: char,
    value: f32,
  },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError
{
  #[error("vertex list {0:?} does not exist in this batch")]
  UnknownVertexList(VertexListId),

  #[error("{attribute} array has {actual} components, expected {expected}")]
  LengthMismatch
  {
    attribute: &'static str,
    expected: usize,
    actual: usize,
  },
}

#[derive(Debug, Error)]
pub enum ConfigError
{
  #[error("failed to read config {}", path.display())]
  Io
  {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config: {0}")]
  Parse(#[from] serde_json::Error),
}
