use nodehack_core::mesh::{Batch, RenderGroup, VertexList, VertexListId};
use slotmap::SecondaryMap;
use wgpu::util::DeviceExt;

//
// ──────────────────────────────────────────────────────────────
//   GPU copy of one vertex list
// ──────────────────────────────────────────────────────────────
//

struct GpuVertexList
{
  positions: wgpu::Buffer,
  colors: wgpu::Buffer,
  vertex_count: u32,
  revision: u64,
  group: Option<RenderGroup>,
}

impl GpuVertexList
{
  fn create(device: &wgpu::Device, list: &VertexList) -> Self
  {
    let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Node Position Buffer"),
      contents: bytemuck::cast_slice(list.positions()),
      usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });

    let colors = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Node Color Buffer"),
      contents: list.colors(),
      usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });

    Self {
      positions,
      colors,
      vertex_count: list.vertex_count() as u32,
      revision: list.revision(),
      group: list.group(),
    }
  }

  fn fits(&self, list: &VertexList) -> bool
  {
    self.vertex_count as usize == list.vertex_count() && self.group == list.group()
  }

  fn write(&mut self, queue: &wgpu::Queue, list: &VertexList)
  {
    queue.write_buffer(&self.positions, 0, bytemuck::cast_slice(list.positions()));
    queue.write_buffer(&self.colors, 0, list.colors());
    self.revision = list.revision();
  }
}

//
// ──────────────────────────────────────────────────────────────
//   GpuBatch
//
//   Mirrors a Batch. Lists are uploaded on first sight,
//   rewritten in place when their revision moves, and dropped
//   once the batch no longer has them.
// ──────────────────────────────────────────────────────────────
//

#[derive(Default)]
pub struct GpuBatch
{
  lists: SecondaryMap<VertexListId, GpuVertexList>,
}

impl GpuBatch
{
  pub fn new() -> Self
  {
    Self::default()
  }

  pub fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, batch: &Batch)
  {
    self.lists.retain(|id, _| batch.contains(id));

    for (id, list) in batch.iter()
    {
      if list.vertex_count() == 0
      {
        self.lists.remove(id);
        continue;
      }

      let reused = match self.lists.get_mut(id)
      {
        Some(gpu) if gpu.fits(list) =>
        {
          if gpu.revision != list.revision()
          {
            gpu.write(queue, list);
          }
          true
        }
        _ => false,
      };

      if !reused
      {
        self.lists.insert(id, GpuVertexList::create(device, list));
      }
    }
  }

  pub fn draw_group(&self, pass: &mut wgpu::RenderPass<'_>, group: Option<RenderGroup>)
  {
    for (_, gpu) in self.lists.iter().filter(|(_, gpu)| gpu.group == group)
    {
      pass.set_vertex_buffer(0, gpu.positions.slice(..));
      pass.set_vertex_buffer(1, gpu.colors.slice(..));
      pass.draw(0..gpu.vertex_count, 0..1);
    }
  }
}
