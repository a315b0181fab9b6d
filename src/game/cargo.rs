use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use strum_macros::{Display, EnumIter};

use super::{company::CompanyId, town::TownId};

// ----------------------------------------------
// CargoType
// ----------------------------------------------

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize)]
pub enum CargoType {
    Passengers,
    Mail,
}

// ----------------------------------------------
// CargoSource
// ----------------------------------------------

// Where a cargo packet came from. Sources are invalidated when they disappear.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CargoSource {
    Headquarters(CompanyId),
    Town(TownId),
    Unknown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoPacket {
    pub cargo: CargoType,
    pub amount: u32,
    pub source: CargoSource,
}

// ----------------------------------------------
// CargoAcceptance
// ----------------------------------------------

// Acceptance in 1/8 units per cargo type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CargoAcceptance {
    amounts: [u32; CargoType::COUNT],
    always_accepted: [bool; CargoType::COUNT],
}

impl CargoAcceptance {
    #[inline]
    pub fn get(&self, cargo: CargoType) -> u32 {
        self.amounts[cargo as usize]
    }

    #[inline]
    pub fn add(&mut self, cargo: CargoType, amount: u32) {
        self.amounts[cargo as usize] += amount;
    }

    #[inline]
    pub fn set_always_accepted(&mut self, cargo: CargoType) {
        self.always_accepted[cargo as usize] = true;
    }

    #[inline]
    pub fn is_always_accepted(&self, cargo: CargoType) -> bool {
        self.always_accepted[cargo as usize]
    }
}
