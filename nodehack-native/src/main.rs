mod app;
mod camera;
mod input;
mod overlay;
mod renderer;

use anyhow::Context;
use env_logger::Env;
use nodehack_core::ViewerConfig;

fn main()
{
  // RUST_LOG overrides this, e.g. RUST_LOG=wgpu=debug for GPU validation detail.
  env_logger::Builder::from_env(Env::default().default_filter_or("info,wgpu_hal=off,naga=warn"))
    .init();

  if let Err(err) = ViewerConfig::from_env().context("failed to load config").and_then(app::run)
  {
    log::error!("{err:#}");
    std::process::exit(1);
  }
}
