use nodehack_core::RenderGroup;

use super::depth::DEPTH_FORMAT;

//
// ──────────────────────────────────────────────────────────────
//   Vertex layout: two streams, matching the batch arrays
//     slot 0: position  [f32; 3]
//     slot 1: colour    [u8; 4]  (normalised in the shader)
// ──────────────────────────────────────────────────────────────
//

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Unorm8x4];

fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2]
{
  [
    wgpu::VertexBufferLayout {
      array_stride: std::mem::size_of::<[f32; 3]>() as u64,
      step_mode: wgpu::VertexStepMode::Vertex,
      attributes: &POSITION_ATTRS,
    },
    wgpu::VertexBufferLayout {
      array_stride: std::mem::size_of::<[u8; 4]>() as u64,
      step_mode: wgpu::VertexStepMode::Vertex,
      attributes: &COLOR_ATTRS,
    },
  ]
}

//
// ──────────────────────────────────────────────────────────────
//   Render state per group
// ──────────────────────────────────────────────────────────────
//

struct GroupState
{
  label: &'static str,
  polygon_mode: wgpu::PolygonMode,
  depth_compare: wgpu::CompareFunction,
}

fn group_state(group: Option<RenderGroup>) -> GroupState
{
  match group
  {
    None => GroupState {
      label: "Fill Pipeline",
      polygon_mode: wgpu::PolygonMode::Fill,
      depth_compare: wgpu::CompareFunction::Less,
    },

    // Lines sit exactly on the filled faces, so equal depth must pass
    Some(RenderGroup::Wireframe) => GroupState {
      label: "Wireframe Pipeline",
      polygon_mode: wgpu::PolygonMode::Line,
      depth_compare: wgpu::CompareFunction::LessEqual,
    },
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Pipeline
// ──────────────────────────────────────────────────────────────
//

pub fn create_node_pipeline(
  device: &wgpu::Device,
  format: wgpu::TextureFormat,
  camera_bgl: &wgpu::BindGroupLayout,
  group: Option<RenderGroup>,
) -> wgpu::RenderPipeline
{
  let state = group_state(group);

  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Node Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/node.wgsl").into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Node Pipeline Layout"),
    bind_group_layouts: &[camera_bgl],
    push_constant_ranges: &[],
  });

  let buffers = vertex_layouts();

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some(state.label),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &buffers,
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: &shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState {
      topology: wgpu::PrimitiveTopology::TriangleList,
      strip_index_format: None,
      front_face: wgpu::FrontFace::Ccw,
      cull_mode: Some(wgpu::Face::Back),
      unclipped_depth: false,
      polygon_mode: state.polygon_mode,
      conservative: false,
    },
    depth_stencil: Some(wgpu::DepthStencilState {
      format: DEPTH_FORMAT,
      depth_write_enabled: true,
      depth_compare: state.depth_compare,
      stencil: wgpu::StencilState::default(),
      bias: wgpu::DepthBiasState::default(),
    }),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn test_wireframe_group_draws_lines()
  {
    let fill = group_state(None);
    let wire = group_state(Some(RenderGroup::Wireframe));

    assert_eq!(fill.polygon_mode, wgpu::PolygonMode::Fill);
    assert_eq!(wire.polygon_mode, wgpu::PolygonMode::Line);
    assert_eq!(wire.depth_compare, wgpu::CompareFunction::LessEqual);
  }

  #[test]
  fn test_vertex_strides_match_batch_components()
  {
    let [positions, colors] = vertex_layouts();
    assert_eq!(positions.array_stride as usize, nodehack_core::mesh::POSITION_COMPONENTS * 4);
    assert_eq!(colors.array_stride as usize, nodehack_core::mesh::COLOR_COMPONENTS);
  }
}
