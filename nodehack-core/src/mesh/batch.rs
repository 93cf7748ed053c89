use slotmap::{new_key_type, SlotMap};

use crate::error::BatchError;

new_key_type! {
  /// Handle to a vertex list owned by a [`Batch`].
  pub struct VertexListId;
}

/// RGBA, 0..=255 per channel.
pub type Color = [u8; 4];

pub const POSITION_COMPONENTS: usize = 3;
pub const COLOR_COMPONENTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive
{
  Triangles,
}

/// Render state a vertex list is drawn under. Lists without a group use the
/// default filled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderGroup
{
  /// Front faces rasterised as lines instead of filled.
  Wireframe,
}

//
// ──────────────────────────────────────────────────────────────
//   VertexList
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct VertexList
{
  primitive: Primitive,
  group: Option<RenderGroup>,
  positions: Vec<f32>,
  colors: Vec<u8>,
  revision: u64,
}

impl VertexList
{
  pub fn primitive(&self) -> Primitive
  {
    self.primitive
  }

  pub fn group(&self) -> Option<RenderGroup>
  {
    self.group
  }

  pub fn vertex_count(&self) -> usize
  {
    self.positions.len() / POSITION_COMPONENTS
  }

  pub fn positions(&self) -> &[f32]
  {
    &self.positions
  }

  pub fn colors(&self) -> &[u8]
  {
    &self.colors
  }

  /// Bumped on every write. Consumers compare against the revision they last
  /// uploaded.
  pub fn revision(&self) -> u64
  {
    self.revision
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Batch
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Default)]
pub struct Batch
{
  lists: SlotMap<VertexListId, VertexList>,
}

impl Batch
{
  pub fn new() -> Self
  {
    Self::default()
  }

  pub fn add(
    &mut self,
    count: usize,
    primitive: Primitive,
    group: Option<RenderGroup>,
    positions: Vec<f32>,
    colors: Vec<u8>,
  ) -> Result<VertexListId, BatchError>
  {
    check_len("position", count * POSITION_COMPONENTS, positions.len())?;
    check_len("color", count * COLOR_COMPONENTS, colors.len())?;

    let id = self.lists.insert(VertexList { primitive, group, positions, colors, revision: 0 });
    log::debug!("vertex list {id:?} added: {count} vertices, group {group:?}");

    Ok(id)
  }

  /// Overwrite positions in place. The vertex count cannot change.
  pub fn set_positions(&mut self, id: VertexListId, positions: &[f32]) -> Result<(), BatchError>
  {
    let list = self.lists.get_mut(id).ok_or(BatchError::UnknownVertexList(id))?;
    check_len("position", list.positions.len(), positions.len())?;

    list.positions.copy_from_slice(positions);
    list.revision += 1;
    Ok(())
  }

  /// Overwrite colours in place. The vertex count cannot change.
  pub fn set_colors(&mut self, id: VertexListId, colors: &[u8]) -> Result<(), BatchError>
  {
    let list = self.lists.get_mut(id).ok_or(BatchError::UnknownVertexList(id))?;
    check_len("color", list.colors.len(), colors.len())?;

    list.colors.copy_from_slice(colors);
    list.revision += 1;
    Ok(())
  }

  /// Returns the released list, or `None` if the id was already gone.
  pub fn delete(&mut self, id: VertexListId) -> Option<VertexList>
  {
    let removed = self.lists.remove(id);
    if removed.is_some()
    {
      log::debug!("vertex list {id:?} deleted");
    }
    removed
  }

  pub fn get(&self, id: VertexListId) -> Option<&VertexList>
  {
    self.lists.get(id)
  }

  pub fn contains(&self, id: VertexListId) -> bool
  {
    self.lists.contains_key(id)
  }

  pub fn iter(&self) -> impl Iterator<Item = (VertexListId, &VertexList)>
  {
    self.lists.iter()
  }

  pub fn iter_group(
    &self,
    group: Option<RenderGroup>,
  ) -> impl Iterator<Item = (VertexListId, &VertexList)>
  {
    self.lists.iter().filter(move |(_, list)| list.group == group)
  }

  pub fn len(&self) -> usize
  {
    self.lists.len()
  }

  pub fn is_empty(&self) -> bool
  {
    self.lists.is_empty()
  }
}

fn check_len(attribute: &'static str, expected: usize, actual: usize) -> Result<(), BatchError>
{
  if expected != actual
  {
    return Err(BatchError::LengthMismatch { attribute, expected, actual });
  }

  Ok(())
}
