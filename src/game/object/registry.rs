use slab::Slab;
use serde::{Deserialize, Serialize};
use strum::EnumCount;

use crate::{
    tile::TileMap,
    utils::coords::{Cell, CellRange},
    game::{Date, command::CommandError, town::TownId},
};

use super::{Object, ObjectId, ObjectType};

pub const DEFAULT_OBJECT_POOL_CAPACITY: usize = 64000;

// ----------------------------------------------
// ObjectRegistry
// ----------------------------------------------

// Owns every live Object. Tiles refer back to objects only by ObjectId.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectRegistry {
    objects: Slab<Object>,
    generation: u32,
    capacity: usize,

    // Rebuilt from the tile map after loading.
    #[serde(skip)]
    counts: [u32; ObjectType::COUNT],
}

pub struct ObjectRegistryIter<'a> {
    inner: slab::Iter<'a, Object>,
}

impl<'a> Iterator for ObjectRegistryIter<'a> {
    type Item = &'a Object;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, object)| object)
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_OBJECT_POOL_CAPACITY)
    }
}

impl ObjectRegistry {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity != 0);
        Self {
            objects: Slab::new(),
            generation: 0,
            capacity,
            counts: [0; ObjectType::COUNT],
        }
    }

    // Drops every object and zeroes the type counts.
    pub fn reset_all(&mut self) {
        self.objects.clear();
        self.counts = [0; ObjectType::COUNT];
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn can_allocate(&self) -> bool {
        self.objects.len() < self.capacity
    }

    #[inline]
    fn next_generation(&mut self) -> u32 {
        let generation = self.generation;
        self.generation += 1;
        generation
    }

    // ----------------------
    // Allocation:
    // ----------------------

    pub fn allocate(&mut self, location: CellRange, town: TownId, build_date: Date) -> Result<ObjectId, CommandError> {
        if !self.can_allocate() {
            return Err(CommandError::OutOfCapacity);
        }

        let generation = self.next_generation();
        let entry = self.objects.vacant_entry();
        let id = ObjectId::new(generation, entry.key());

        entry.insert(Object { id, location, town, build_date });
        Ok(id)
    }

    // Frees the slot. Tiles must no longer refer to the object.
    pub fn release(&mut self, id: ObjectId) -> Result<Object, String> {
        if self.try_get(id).is_none() {
            return Err(format!("Object {id} is not alive!"));
        }
        Ok(self.objects.remove(id.index()))
    }

    // ----------------------
    // Lookup:
    // ----------------------

    #[inline]
    pub fn try_get(&self, id: ObjectId) -> Option<&Object> {
        if !id.is_valid() {
            return None;
        }
        self.objects.get(id.index())
            .filter(|object| object.id().generation() == id.generation())
    }

    #[inline]
    pub fn try_get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        if !id.is_valid() {
            return None;
        }
        self.objects.get_mut(id.index())
            .filter(|object| object.id().generation() == id.generation())
    }

    // Resolves the object a tile belongs to. Any tile of the footprint works.
    pub fn get_by_tile(&self, tile_map: &TileMap, cell: Cell) -> Option<&Object> {
        let object_tile = tile_map.try_tile(cell)?.object()?;
        self.try_get(object_tile.id)
    }

    #[inline]
    pub fn iter(&self) -> ObjectRegistryIter<'_> {
        ObjectRegistryIter { inner: self.objects.iter() }
    }

    // ----------------------
    // Per type counts:
    // ----------------------

    #[inline]
    pub fn count(&self, object_type: ObjectType) -> u32 {
        self.counts[object_type as usize]
    }

    #[inline]
    pub fn increment_count(&mut self, object_type: ObjectType) {
        self.counts[object_type as usize] += 1;
    }

    #[inline]
    pub fn decrement_count(&mut self, object_type: ObjectType) {
        let count = &mut self.counts[object_type as usize];
        debug_assert!(*count != 0, "{object_type} count underflow!");
        *count = count.saturating_sub(1);
    }

    // Recounts every live object by the type stored on its anchor tile.
    // Returns the objects whose anchor does not point back at them.
    pub fn recount(&mut self, tile_map: &TileMap) -> Vec<ObjectId> {
        self.counts = [0; ObjectType::COUNT];
        let mut orphans = Vec::new();

        for (_, object) in self.objects.iter() {
            let anchor = tile_map.try_tile(object.anchor()).and_then(|tile| tile.object());
            match anchor {
                Some(object_tile) if object_tile.id == object.id() => {
                    self.counts[object_tile.object_type as usize] += 1;
                }
                _ => orphans.push(object.id()),
            }
        }

        orphans
    }
}
