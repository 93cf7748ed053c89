use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use super::batch::{Batch, Color, Primitive, RenderGroup, VertexListId, POSITION_COMPONENTS};
use crate::error::BatchError;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

/// Below this the caps and walls degenerate into slivers.
pub const MIN_RESOLUTION: u32 = 14;

/// Stacks/sectors per unit of radius when no resolution is given.
const RESOLUTION_PER_RADIUS: f32 = 1.25;

pub const WIREFRAME_COLOR: Color = [0, 0, 0, 255];

//
// ──────────────────────────────────────────────────────────────
//   Geometry (pure)
// ──────────────────────────────────────────────────────────────
//

/// Triangles in a UV sphere: one fan per cap plus two per wall quad.
pub fn triangle_count(stacks: u32, sectors: u32) -> usize
{
  if stacks < 2
  {
    return 0;
  }

  let (stacks, sectors) = (stacks as usize, sectors as usize);
  2 * sectors + 2 * sectors * stacks.saturating_sub(2)
}

/// Flat triangle-list positions, three floats per vertex.
///
/// Fewer than 2 stacks (or no sectors) yields no triangles.
pub fn sphere_positions(radius: f32, stacks: u32, sectors: u32, center: Vec3) -> Vec<f32>
{
  if stacks < 2 || sectors == 0
  {
    return Vec::new();
  }

  let rings = build_rings(radius, stacks, sectors, center);
  let mut out = Vec::with_capacity(triangle_count(stacks, sectors) * 3 * POSITION_COMPONENTS);

  // North cap: fan from the pole over the top ring
  let north = center + Vec3::new(0.0, radius, 0.0);
  for pair in rings[0].windows(2)
  {
    push_triangle(&mut out, north, pair[0], pair[1]);
  }

  // Walls, two triangles per quad:
  //   v1---v2
  //   |   / |
  //   v3---v4
  for (upper, lower) in rings.iter().zip(rings.iter().skip(1))
  {
    for (top, bottom) in upper.windows(2).zip(lower.windows(2))
    {
      let (v1, v2, v3, v4) = (top[0], top[1], bottom[0], bottom[1]);
      push_triangle(&mut out, v1, v3, v2);
      push_triangle(&mut out, v4, v2, v3);
    }
  }

  // South cap: same fan, reversed winding
  let south = center - Vec3::new(0.0, radius, 0.0);
  for pair in rings[rings.len() - 1].windows(2)
  {
    push_triangle(&mut out, south, pair[1], pair[0]);
  }

  out
}

/// Interior rings from just below the north pole to just above the south
/// pole. Each ring repeats its first vertex at the end so the last sector
/// closes without wrapping indices.
fn build_rings(radius: f32, stacks: u32, sectors: u32, center: Vec3) -> Vec<Vec<Vec3>>
{
  let sector_step = 2.0 * PI / sectors as f32;
  let stack_step = PI / stacks as f32;

  (1..stacks)
    .map(|i| {
      let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
      let ring_radius = radius * stack_angle.cos();
      let ring_height = radius * stack_angle.sin();

      let mut ring: Vec<Vec3> = (1..=sectors)
        .map(|j| {
          let sector_angle = j as f32 * sector_step;
          center
            + Vec3::new(
              ring_radius * sector_angle.cos(),
              ring_height,
              -ring_radius * sector_angle.sin(),
            )
        })
        .collect();

      ring.push(ring[0]);
      ring
    })
    .collect()
}

fn push_triangle(out: &mut Vec<f32>, a: Vec3, b: Vec3, c: Vec3)
{
  out.extend_from_slice(&a.to_array());
  out.extend_from_slice(&b.to_array());
  out.extend_from_slice(&c.to_array());
}

fn solid_colors(color: Color, vertex_count: usize) -> Vec<u8>
{
  color.repeat(vertex_count)
}

fn resolve_resolution(requested: Option<u32>, radius: f32) -> u32
{
  let derived = requested
    .filter(|&n| n > 0)
    .unwrap_or_else(|| (radius * RESOLUTION_PER_RADIUS).ceil().max(0.0) as u32);

  derived.max(MIN_RESOLUTION)
}

//
// ──────────────────────────────────────────────────────────────
//   Sphere
// ──────────────────────────────────────────────────────────────
//

/// A UV sphere submitted to a [`Batch`].
///
/// Geometry is created on the first draw and rewritten in place afterwards.
/// The optional wireframe overlay shares the same positions, forced black,
/// in the [`RenderGroup::Wireframe`] group.
#[derive(Debug)]
pub struct Sphere
{
  radius: f32,
  color: Color,
  stacks: u32,
  sectors: u32,

  vertices: Option<VertexListId>,
  frame_vertices: Option<VertexListId>,
}

impl Sphere
{
  pub fn new(color: Color, radius: f32) -> Self
  {
    Self::with_resolution(color, radius, None, None)
  }

  /// `None` (or 0) derives the resolution from the radius. Anything below
  /// [`MIN_RESOLUTION`] is raised to it.
  pub fn with_resolution(
    color: Color,
    radius: f32,
    stacks: Option<u32>,
    sectors: Option<u32>,
  ) -> Self
  {
    Self {
      radius,
      color,
      stacks: resolve_resolution(stacks, radius),
      sectors: resolve_resolution(sectors, radius),
      vertices: None,
      frame_vertices: None,
    }
  }

  pub fn draw_at(&mut self, batch: &mut Batch, center: Vec3, wireframe: bool)
    -> Result<(), BatchError>
  {
    let positions = sphere_positions(self.radius, self.stacks, self.sectors, center);
    let count = positions.len() / POSITION_COMPONENTS;
    let colors = solid_colors(self.color, count);

    self.vertices = Some(upsert(batch, self.vertices, None, &positions, colors)?);

    if wireframe
    {
      let black = solid_colors(WIREFRAME_COLOR, count);
      let group = Some(RenderGroup::Wireframe);
      self.frame_vertices = Some(upsert(batch, self.frame_vertices, group, &positions, black)?);
    }
    else if let Some(id) = self.frame_vertices.take()
    {
      batch.delete(id);
    }

    Ok(())
  }

  /// Recolour the filled mesh. Positions and the wireframe are untouched.
  pub fn set_color(&mut self, batch: &mut Batch, color: Color) -> Result<(), BatchError>
  {
    self.color = color;

    let Some(id) = self.vertices else { return Ok(()) };
    let count = batch.get(id).ok_or(BatchError::UnknownVertexList(id))?.vertex_count();

    batch.set_colors(id, &solid_colors(color, count))
  }

  /// Release both vertex lists. Safe to call repeatedly.
  pub fn release(&mut self, batch: &mut Batch)
  {
    for id in [self.vertices.take(), self.frame_vertices.take()].into_iter().flatten()
    {
      batch.delete(id);
    }
  }

  pub fn radius(&self) -> f32
  {
    self.radius
  }

  pub fn color(&self) -> Color
  {
    self.color
  }

  pub fn stacks(&self) -> u32
  {
    self.stacks
  }

  pub fn sectors(&self) -> u32
  {
    self.sectors
  }

  pub fn vertex_list(&self) -> Option<VertexListId>
  {
    self.vertices
  }

  pub fn wireframe_list(&self) -> Option<VertexListId>
  {
    self.frame_vertices
  }
}

/// Overwrite `existing` in place when it is still alive with the same vertex
/// count, otherwise allocate a fresh list.
fn upsert(
  batch: &mut Batch,
  existing: Option<VertexListId>,
  group: Option<RenderGroup>,
  positions: &[f32],
  colors: Vec<u8>,
) -> Result<VertexListId, BatchError>
{
  let count = positions.len() / POSITION_COMPONENTS;

  if let Some(id) = existing
  {
    let same_size = batch.get(id).is_some_and(|list| list.vertex_count() == count);
    if same_size
    {
      batch.set_positions(id, positions)?;
      batch.set_colors(id, &colors)?;
      return Ok(id);
    }

    batch.delete(id);
  }

  batch.add(count, Primitive::Triangles, group, positions.to_vec(), colors)
}
