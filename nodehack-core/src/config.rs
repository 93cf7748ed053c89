use std::path::Path;

use serde::Deserialize;

use crate::camera::{AxisLimits, CameraSettings};
use crate::clock::DEFAULT_FPS;
use crate::error::ConfigError;
use crate::mesh::Color;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "NODEHACK_CONFIG";

//
// ──────────────────────────────────────────────────────────────
//   Sections
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig
{
  pub title: String,
  pub width: u32,
  pub height: u32,
}

impl Default for WindowConfig
{
  fn default() -> Self
  {
    Self { title: "In Development".to_owned(), width: 1280, height: 720 }
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeConfig
{
  pub name: String,
  pub color: Color,
  pub radius: f32,
  pub stacks: Option<u32>,
  pub sectors: Option<u32>,
  pub wireframe: bool,
}

impl Default for NodeConfig
{
  fn default() -> Self
  {
    Self {
      name: "Access Point".to_owned(),
      color: [255, 255, 255, 255],
      radius: 1.0,
      stacks: None,
      sectors: None,
      wireframe: true,
    }
  }
}

/// Movement speed the viewer is tuned for; the library default is 1.0.
const VIEWER_MOVEMENT_SPEED: f32 = 0.5;

/// Camera section. Mirrors `CameraSettings`, but fields left out of the file
/// fall back to the viewer's tuning instead of the library defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig
{
  pub movement_speed: f32,
  pub rotation_speed: f32,
  pub min_zoom: f32,
  pub max_zoom: f32,
  pub movement_limit: AxisLimits,
  pub rotation_limit: AxisLimits,
}

impl Default for CameraConfig
{
  fn default() -> Self
  {
    let settings = CameraSettings::default().with_movement_speed(VIEWER_MOVEMENT_SPEED);

    Self {
      movement_speed: settings.movement_speed,
      rotation_speed: settings.rotation_speed,
      min_zoom: settings.min_zoom,
      max_zoom: settings.max_zoom,
      movement_limit: settings.movement_limit,
      rotation_limit: settings.rotation_limit,
    }
  }
}

impl From<CameraConfig> for CameraSettings
{
  fn from(config: CameraConfig) -> Self
  {
    Self {
      movement_speed: config.movement_speed,
      rotation_speed: config.rotation_speed,
      min_zoom: config.min_zoom,
      max_zoom: config.max_zoom,
      movement_limit: config.movement_limit,
      rotation_limit: config.rotation_limit,
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   ViewerConfig
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig
{
  pub window: WindowConfig,
  /// Update ticks per second; 0 disables the update tick.
  pub fps: u32,
  pub camera: CameraConfig,
  pub node: NodeConfig,
}

impl Default for ViewerConfig
{
  fn default() -> Self
  {
    Self {
      window: WindowConfig::default(),
      fps: DEFAULT_FPS,
      camera: CameraConfig::default(),
      node: NodeConfig::default(),
    }
  }
}

impl ViewerConfig
{
  pub fn from_json_str(json: &str) -> Result<Self, ConfigError>
  {
    Ok(serde_json::from_str(json)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError>
  {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    Self::from_json_str(&text)
  }

  /// Load from the file named by `NODEHACK_CONFIG`, or fall back to defaults
  /// when the variable is unset.
  pub fn from_env() -> Result<Self, ConfigError>
  {
    match std::env::var_os(CONFIG_ENV)
    {
      Some(path) =>
      {
        log::info!("loading config from {}", Path::new(&path).display());
        Self::load(path)
      }
      None =>
      {
        log::info!("{CONFIG_ENV} not set, using built-in defaults");
        Ok(Self::default())
      }
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn test_defaults_match_viewer_setup()
  {
    let config = ViewerConfig::default();

    assert_eq!(config.window.width, 1280);
    assert_eq!(config.window.height, 720);
    assert_eq!(config.fps, 30);
    assert_eq!(config.camera.movement_speed, 0.5);
    assert_eq!(config.camera.max_zoom, 4.0);
    assert_eq!(config.node.name, "Access Point");
    assert!(config.node.wireframe);
  }

  #[test]
  fn test_empty_object_is_all_defaults()
  {
    let config = ViewerConfig::from_json_str("{}").unwrap();
    assert_eq!(config, ViewerConfig::default());
  }

  #[test]
  fn test_partial_override()
  {
    let json = r#"{
      "fps": 0,
      "camera": { "max_zoom": 8.0, "movement_limit": { "y": 2.5 } },
      "node": { "color": [255, 0, 0, 255], "stacks": 20, "wireframe": false }
    }"#;

    let config = ViewerConfig::from_json_str(json).unwrap();

    assert_eq!(config.fps, 0);
    assert_eq!(config.camera.max_zoom, 8.0);
    assert_eq!(config.camera.min_zoom, 1.0);
    assert_eq!(config.camera.movement_limit, AxisLimits { y: Some(2.5), ..AxisLimits::NONE });
    assert_eq!(config.node.color, [255, 0, 0, 255]);
    assert_eq!(config.node.stacks, Some(20));
    assert_eq!(config.node.sectors, None);
    assert!(!config.node.wireframe);
    assert_eq!(config.window, WindowConfig::default());
  }

  #[test]
  fn test_partial_camera_keeps_viewer_movement_speed()
  {
    let config = ViewerConfig::from_json_str(r#"{ "camera": { "max_zoom": 8.0 } }"#).unwrap();

    assert_eq!(config.camera.max_zoom, 8.0);
    assert_eq!(config.camera.movement_speed, 0.5);
    assert_eq!(config.camera.rotation_speed, 0.1);

    let settings = CameraSettings::from(config.camera);
    let expected = CameraSettings { max_zoom: 8.0, ..CameraSettings::default() };
    assert_eq!(settings, expected.with_movement_speed(0.5));
  }

  #[test]
  fn test_malformed_json_is_parse_error()
  {
    let err = ViewerConfig::from_json_str("{ fps: 30").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn test_color_out_of_byte_range_rejected()
  {
    let err = ViewerConfig::from_json_str(r#"{ "node": { "color": [256, 0, 0, 255] } }"#);
    assert!(err.is_err());
  }

  #[test]
  fn test_missing_file_is_io_error()
  {
    let err = ViewerConfig::load("/definitely/not/here/viewer.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
  }
}
