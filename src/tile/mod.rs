use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumDiscriminants, EnumIter};

use crate::game::{
    company::Owner,
    object::{ObjectId, ObjectType},
};

pub mod map;
pub mod slope;
pub mod dispatch;
pub mod landscape;
pub mod water;

#[cfg(test)]
mod tests;

pub use map::TileMap;
pub use slope::{Foundation, Slope};

// Maximum height level of a tile corner.
pub const MAX_TILE_HEIGHT: u8 = 15;

// ----------------------------------------------
// WaterClass / ClearGround
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum WaterClass {
    Sea,
    Canal,
    River,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ClearGround {
    #[default]
    Grass,
    Rough,
}

// ----------------------------------------------
// ObjectTile
// ----------------------------------------------

// Per-type extra state stored on object tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectTileState {
    Animation { frame: u8 },
    Headquarters { level: u8 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTile {
    pub object_type: ObjectType,
    pub id: ObjectId,
    // Water class of the tile before the object was built, if it was water.
    pub water_class: Option<WaterClass>,
    pub state: ObjectTileState,
}

impl ObjectTile {
    #[inline]
    pub fn hq_level(&self) -> Option<u8> {
        match self.state {
            ObjectTileState::Headquarters { level } => Some(level),
            ObjectTileState::Animation { .. } => None,
        }
    }
}

// ----------------------------------------------
// Tile
// ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(TileKind))]
#[strum_discriminants(derive(Display, EnumCount, EnumIter, Hash))]
pub enum TileContents {
    Clear { ground: ClearGround, density: u8 },
    Water { class: WaterClass },
    Object(ObjectTile),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    // Height of the lowest corner.
    pub height: u8,
    pub slope: Slope,
    pub owner: Owner,
    pub bridge_above: bool,
    pub contents: TileContents,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            height: 0,
            slope: Slope::FLAT,
            owner: Owner::None,
            bridge_above: false,
            contents: TileContents::Clear { ground: ClearGround::Grass, density: 3 },
        }
    }
}

impl Tile {
    #[inline]
    pub fn kind(&self) -> TileKind {
        TileKind::from(&self.contents)
    }

    #[inline]
    pub fn is(&self, kind: TileKind) -> bool {
        self.kind() == kind
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        self.slope.is_flat()
    }

    // Height of the highest corner.
    #[inline]
    pub fn max_z(&self) -> u8 {
        self.height + self.slope.max_z()
    }

    #[inline]
    pub fn object(&self) -> Option<&ObjectTile> {
        match &self.contents {
            TileContents::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn object_mut(&mut self) -> Option<&mut ObjectTile> {
        match &mut self.contents {
            TileContents::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn is_object_of_type(&self, object_type: ObjectType) -> bool {
        self.object().is_some_and(|object| object.object_type == object_type)
    }

    // Water class for water tiles and for objects built on water.
    #[inline]
    pub fn water_class(&self) -> Option<WaterClass> {
        match &self.contents {
            TileContents::Water { class } => Some(*class),
            TileContents::Object(object) => object.water_class,
            TileContents::Clear { .. } => None,
        }
    }

    #[inline]
    pub fn is_on_water(&self) -> bool {
        self.water_class().is_some()
    }

    // Bare (clear, not under a bridge) and perfectly flat.
    #[inline]
    pub fn is_bare_and_flat(&self) -> bool {
        self.is(TileKind::Clear) && self.is_flat() && !self.bridge_above
    }

    pub fn make_clear(&mut self, ground: ClearGround, density: u8) {
        self.owner = Owner::None;
        self.contents = TileContents::Clear { ground, density };
    }

    pub fn make_water(&mut self, class: WaterClass) {
        self.owner = if class == WaterClass::Sea { Owner::Water } else { Owner::None };
        self.contents = TileContents::Water { class };
    }

    // Returns the tile to a neutral state, keeping any water it had before.
    pub fn make_water_or_clear(&mut self, water_class: Option<WaterClass>) {
        match water_class {
            Some(class) => self.make_water(class),
            None => self.make_clear(ClearGround::Grass, 0),
        }
    }
}
