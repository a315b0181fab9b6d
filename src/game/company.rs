use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{
    render::sprites::PaletteId,
    utils::coords::Cell,
};

use super::economy::Money;

pub const MAX_COMPANIES: usize = 15;

// ----------------------------------------------
// CompanyId / Owner
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompanyId(u8);

impl CompanyId {
    #[inline]
    pub const fn new(index: u8) -> Self {
        debug_assert!((index as usize) < MAX_COMPANIES);
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Company #{}", self.0 + 1)
    }
}

// Owner of a tile, or the identity a command acts on behalf of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Company(CompanyId),
    Town,
    None,
    // Natural erosion. Acts with unrestricted clearing rights.
    Water,
}

impl Owner {
    #[inline]
    pub fn company(self) -> Option<CompanyId> {
        match self {
            Self::Company(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub fn is_company(self) -> bool {
        self.company().is_some()
    }
}

impl From<CompanyId> for Owner {
    #[inline]
    fn from(id: CompanyId) -> Self {
        Self::Company(id)
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Company(id) => write!(f, "{id}"),
            Self::Town  => write!(f, "Town"),
            Self::None  => write!(f, "None"),
            Self::Water => write!(f, "Water"),
        }
    }
}

// ----------------------------------------------
// Performance rating
// ----------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub vehicles: i64,
    pub stations: i64,
    pub min_profit: Money,
    pub min_income: Money,
    pub max_income: Money,
    pub delivered_cargo: i64,
    pub cargo_kinds: i64,
}

pub const MAX_PERFORMANCE_SCORE: u32 = 1000;

// (needed value, max points) per rating category. Points add up to MAX_PERFORMANCE_SCORE.
const SCORE_VEHICLES:   (i64, u32) = (120, 100);
const SCORE_STATIONS:   (i64, u32) = (80, 100);
const SCORE_MIN_PROFIT: (i64, u32) = (10_000, 100);
const SCORE_MIN_INCOME: (i64, u32) = (50_000, 50);
const SCORE_MAX_INCOME: (i64, u32) = (100_000, 100);
const SCORE_DELIVERED:  (i64, u32) = (40_000, 400);
const SCORE_CARGO:      (i64, u32) = (8, 50);
const SCORE_MONEY:      (i64, u32) = (10_000_000, 50);
const SCORE_LOAN:       (i64, u32) = (250_000, 50);

#[inline]
fn category_score(value: i64, (needed, points): (i64, u32)) -> u32 {
    let value = value.clamp(0, needed);
    (value * points as i64 / needed) as u32
}

// ----------------------------------------------
// Company
// ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: CompanyId,
    pub name: String,
    pub colour: u8,
    pub money: Money,
    pub loan: Money,
    pub property_value: Money,
    pub performance: PerformanceStats,
    pub location_of_hq: Option<Cell>,
    score: u32,
    valuation: Money,
}

impl Company {
    pub fn new(id: CompanyId, name: &str, colour: u8) -> Self {
        Self {
            id,
            name: name.into(),
            colour,
            money: 0,
            loan: 0,
            property_value: 0,
            performance: PerformanceStats::default(),
            location_of_hq: None,
            score: 0,
            valuation: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> CompanyId {
        self.id
    }

    // Last computed performance score (0..=1000).
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn valuation(&self) -> Money {
        self.valuation
    }

    // Company value from its current books, without recomputing the rating.
    #[inline]
    pub fn current_value(&self) -> Money {
        self.money - self.loan + self.property_value
    }

    #[inline]
    pub fn palette(&self) -> PaletteId {
        PaletteId::company(self.colour)
    }

    // Recomputes the performance score and company value, returns the new score.
    pub fn update_rating_and_value(&mut self) -> u32 {
        let perf = &self.performance;

        let score =
            category_score(perf.vehicles, SCORE_VEHICLES) +
            category_score(perf.stations, SCORE_STATIONS) +
            category_score(perf.min_profit, SCORE_MIN_PROFIT) +
            category_score(perf.min_income, SCORE_MIN_INCOME) +
            category_score(perf.max_income, SCORE_MAX_INCOME) +
            category_score(perf.delivered_cargo, SCORE_DELIVERED) +
            category_score(perf.cargo_kinds, SCORE_CARGO) +
            category_score(self.money, SCORE_MONEY) +
            category_score(SCORE_LOAN.0 - self.loan, SCORE_LOAN);

        debug_assert!(score <= MAX_PERFORMANCE_SCORE);

        self.score = score;
        self.valuation = self.current_value();
        score
    }
}

// ----------------------------------------------
// CompanyList
// ----------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyList {
    slots: ArrayVec<Option<Company>, MAX_COMPANIES>,
}

impl CompanyList {
    // Founds a company in the first free slot.
    pub fn found(&mut self, name: &str, colour: u8) -> Option<CompanyId> {
        let index = match self.slots.iter().position(|slot| slot.is_none()) {
            Some(index) => index,
            None => {
                if self.slots.is_full() {
                    return None;
                }
                self.slots.push(None);
                self.slots.len() - 1
            }
        };

        let id = CompanyId::new(index as u8);
        self.slots[index] = Some(Company::new(id, name, colour));
        Some(id)
    }

    pub fn remove(&mut self, id: CompanyId) -> Option<Company> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    #[inline]
    pub fn try_get(&self, id: CompanyId) -> Option<&Company> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn try_get_mut(&mut self, id: CompanyId) -> Option<&mut Company> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn is_valid(&self, id: CompanyId) -> bool {
        self.try_get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Company> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Company> {
        self.slots.iter_mut().flatten()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    // Recolour palette for sprites owned by `owner`, if it is a company.
    pub fn palette_for(&self, owner: Owner) -> Option<PaletteId> {
        owner.company()
            .and_then(|id| self.try_get(id))
            .map(Company::palette)
    }
}
