use smallvec::SmallVec;
use serde::{Deserialize, Serialize};
use strum::EnumCount;

use crate::{
    log,
    utils::{Size, coords::{Cell, CellRange}},
};

use super::{
    cargo::{CargoPacket, CargoSource, CargoType},
    company::Owner,
};

// Catchment radius of every station, in tiles.
pub const CATCHMENT_RADIUS: i32 = 4;

// ----------------------------------------------
// Station
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationId(u16);

impl StationId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    id: StationId,
    pub name: String,
    pub owner: Owner,
    pub xy: Cell,
    // Per cargo pickup rating (0..=255). Zero means the cargo is not served.
    pub ratings: [u8; CargoType::COUNT],
    pub waiting: Vec<CargoPacket>,
}

impl Station {
    #[inline]
    pub fn id(&self) -> StationId {
        self.id
    }

    #[inline]
    pub fn rating(&self, cargo: CargoType) -> u8 {
        self.ratings[cargo as usize]
    }

    pub fn waiting_amount(&self, cargo: CargoType) -> u32 {
        self.waiting.iter()
            .filter(|packet| packet.cargo == cargo)
            .map(|packet| packet.amount)
            .sum()
    }
}

// ----------------------------------------------
// StationList
// ----------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationList {
    stations: Vec<Station>,
}

impl StationList {
    pub fn build(&mut self, name: &str, owner: Owner, xy: Cell, rating: u8) -> StationId {
        let id = StationId(self.stations.len() as u16);
        self.stations.push(Station {
            id,
            name: name.into(),
            owner,
            xy,
            ratings: [rating; CargoType::COUNT],
            waiting: Vec::new(),
        });
        id
    }

    #[inline]
    pub fn try_get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    #[inline]
    pub fn try_get_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.stations.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    // Moves `amount` units of cargo to the best rated station among `candidates`.
    // Returns the amount actually moved.
    pub fn move_goods_to_station(&mut self,
                                 cargo: CargoType,
                                 amount: u32,
                                 source: CargoSource,
                                 candidates: &[StationId]) -> u32 {

        let best = candidates.iter()
            .filter_map(|id| self.try_get(*id))
            .filter(|station| station.rating(cargo) != 0)
            .max_by_key(|station| (station.rating(cargo), std::cmp::Reverse(station.id)))
            .map(|station| (station.id, station.rating(cargo)));

        let Some((best_id, best_rating)) = best else {
            return 0;
        };

        let moved = (amount * (best_rating as u32 + 1)) >> 8;
        if moved == 0 {
            return 0;
        }

        if let Some(station) = self.try_get_mut(best_id) {
            station.waiting.push(CargoPacket { cargo, amount: moved, source });
        }

        moved
    }

    // Forgets `source` on every waiting packet, e.g. when the source building is removed.
    pub fn invalidate_all_from(&mut self, source: CargoSource) {
        let mut count = 0;
        for station in &mut self.stations {
            for packet in &mut station.waiting {
                if packet.source == source {
                    packet.source = CargoSource::Unknown;
                    count += 1;
                }
            }
        }

        if count != 0 {
            log::verbose!(log::channel!("cargo"), "Invalidated {count} packets from {source:?}.");
        }
    }
}

// ----------------------------------------------
// StationFinder
// ----------------------------------------------

pub type StationCandidates = SmallVec<[StationId; 4]>;

// Stations whose catchment area reaches any tile of an area.
pub struct StationFinder {
    search_range: CellRange,
}

impl StationFinder {
    pub fn new(area: CellRange, map_size: Size) -> Self {
        Self { search_range: area.expanded(CATCHMENT_RADIUS, map_size) }
    }

    pub fn stations(&self, stations: &StationList) -> StationCandidates {
        stations.iter()
            .filter(|station| self.search_range.contains(station.xy))
            .map(Station::id)
            .collect()
    }
}
