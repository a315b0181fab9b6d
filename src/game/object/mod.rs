use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};

use crate::utils::{
    coords::{Cell, CellRange},
    index::GenerationalIndex,
};

use super::{Date, town::TownId};

pub mod spec;
pub mod registry;
pub mod cmd;
pub mod procs;
pub mod generate;


pub use registry::ObjectRegistry;
pub use spec::{ObjectFlags, ObjectSpec, ObjectSpecs};

// ----------------------------------------------
// ObjectType
// ----------------------------------------------

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize)]
pub enum ObjectType {
    Transmitter,
    Lighthouse,
    Statue,
    OwnedLand,
    Headquarters,
}

pub type ObjectId = GenerationalIndex;

// ----------------------------------------------
// Company headquarters size levels
// ----------------------------------------------

pub const HQ_LEVEL_COUNT: usize = 5;
pub const HQ_MAX_LEVEL: u8 = (HQ_LEVEL_COUNT - 1) as u8;

// Minimum performance score for HQ levels 1..=4.
const HQ_LEVEL_THRESHOLDS: [u32; HQ_LEVEL_COUNT - 1] = [170, 350, 520, 720];

#[inline]
pub fn hq_level_for_score(score: u32) -> u8 {
    HQ_LEVEL_THRESHOLDS.iter()
        .take_while(|threshold| score >= **threshold)
        .count() as u8
}

// ----------------------------------------------
// Object
// ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    id: ObjectId,
    location: CellRange,
    town: TownId,
    build_date: Date,
}

impl Object {
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    // Footprint. `location.start` is the anchor tile.
    #[inline]
    pub fn location(&self) -> CellRange {
        self.location
    }

    #[inline]
    pub fn anchor(&self) -> Cell {
        self.location.start
    }

    #[inline]
    pub fn town(&self) -> TownId {
        self.town
    }

    #[inline]
    pub fn build_date(&self) -> Date {
        self.build_date
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Object{} @ {}", self.id, self.location)
    }
}
