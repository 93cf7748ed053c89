pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth attachment matching the surface size.
pub struct DepthResources
{
  pub view: wgpu::TextureView,
  size: (u32, u32),
}

impl DepthResources
{
  pub fn create(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Self
  {
    let size = (config.width.max(1), config.height.max(1));

    let texture = device.create_texture(&wgpu::TextureDescriptor {
      label: Some("Node Depth Texture"),
      size: wgpu::Extent3d { width: size.0, height: size.1, depth_or_array_layers: 1 },
      mip_level_count: 1,
      sample_count: 1,
      dimension: wgpu::TextureDimension::D2,
      format: DEPTH_FORMAT,
      usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
      view_formats: &[],
    });

    Self { view: texture.create_view(&wgpu::TextureViewDescriptor::default()), size }
  }

  pub fn matches(&self, config: &wgpu::SurfaceConfiguration) -> bool
  {
    self.size == (config.width.max(1), config.height.max(1))
  }
}
