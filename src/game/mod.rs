use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub mod cargo;
pub mod command;
pub mod company;
pub mod economy;
pub mod genworld;
pub mod object;
pub mod station;
pub mod town;
pub mod world;

// ----------------------------------------------
// GameMode
// ----------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Normal,
    Editor,
}

// ----------------------------------------------
// Date
// ----------------------------------------------

pub const DAYS_IN_YEAR: u32 = 365;

// Simulation date, in days since year zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date(pub u32);

impl Date {
    #[inline]
    pub const fn from_year(year: u32) -> Self {
        Self(year * DAYS_IN_YEAR)
    }

    #[inline]
    pub const fn year(self) -> u32 {
        self.0 / DAYS_IN_YEAR
    }

    #[inline]
    pub const fn day_of_year(self) -> u32 {
        self.0 % DAYS_IN_YEAR
    }

    #[inline]
    pub const fn add_days(self, days: u32) -> Self {
        Self(self.0 + days)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{:03}", self.year(), self.day_of_year() + 1)
    }
}
