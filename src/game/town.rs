use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::coords::Cell;

use super::company::{CompanyId, MAX_COMPANIES};

// ----------------------------------------------
// TownId
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TownId(u16);

impl TownId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TownId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Town #{}", self.0)
    }
}

// Radius of the spiral searched around the town centre for a statue site.
pub const STATUE_SEARCH_RADIUS: i32 = 8;

// ----------------------------------------------
// Town
// ----------------------------------------------

pub type StatueBits = BitArr!(for MAX_COMPANIES, in u16, Lsb0);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    id: TownId,
    pub name: String,
    pub xy: Cell,
    // One bit per company that has a statue in this town.
    statues: StatueBits,
}

impl Town {
    #[inline]
    pub fn id(&self) -> TownId {
        self.id
    }

    #[inline]
    pub fn has_statue(&self, company: CompanyId) -> bool {
        self.statues[company.index()]
    }

    #[inline]
    pub fn set_statue(&mut self, company: CompanyId, value: bool) {
        self.statues.set(company.index(), value);
    }

    #[inline]
    pub fn statue_count(&self) -> usize {
        self.statues.count_ones()
    }
}

// ----------------------------------------------
// TownList
// ----------------------------------------------

// Towns are never removed, so ids stay dense.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownList {
    towns: Vec<Town>,
}

impl TownList {
    pub fn found(&mut self, name: &str, xy: Cell) -> TownId {
        let id = TownId(self.towns.len() as u16);
        self.towns.push(Town {
            id,
            name: name.into(),
            xy,
            statues: StatueBits::ZERO,
        });
        id
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.towns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }

    #[inline]
    pub fn try_get(&self, id: TownId) -> Option<&Town> {
        self.towns.get(id.index())
    }

    #[inline]
    pub fn try_get_mut(&mut self, id: TownId) -> Option<&mut Town> {
        self.towns.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Town> {
        self.towns.iter()
    }

    // Nearest town by manhattan distance, first founded wins ties.
    pub fn closest_town(&self, cell: Cell) -> Option<TownId> {
        self.towns.iter()
            .min_by_key(|town| (town.xy.manhattan_distance(cell), town.id))
            .map(Town::id)
    }
}
