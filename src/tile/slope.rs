use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::bitflags_with_display;

// ----------------------------------------------
// Slope
// ----------------------------------------------

bitflags_with_display! {
    // Raised corners of a tile. A steep slope has one corner raised by two
    // height levels (the corner opposite to the lowered one).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Slope: u8 {
        const W     = 1 << 0;
        const S     = 1 << 1;
        const E     = 1 << 2;
        const N     = 1 << 3;
        const STEEP = 1 << 4;
    }
}

impl Slope {
    pub const FLAT: Self = Self::empty();
    pub const NW: Self = Self::N.union(Self::W);
    pub const SW: Self = Self::S.union(Self::W);
    pub const SE: Self = Self::S.union(Self::E);
    pub const NE: Self = Self::N.union(Self::E);
    pub const ELEVATED: Self = Self::N.union(Self::E).union(Self::S).union(Self::W);

    #[inline]
    pub fn is_flat(self) -> bool {
        self.is_empty()
    }

    #[inline]
    pub fn is_steep(self) -> bool {
        self.contains(Self::STEEP)
    }

    // Height difference between the lowest and highest corner.
    #[inline]
    pub fn max_z(self) -> u8 {
        if self.is_steep() {
            2
        } else if self.is_flat() {
            0
        } else {
            1
        }
    }

    #[inline]
    pub fn corners(self) -> Self {
        self.intersection(Self::ELEVATED)
    }
}

// ----------------------------------------------
// Foundation
// ----------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Foundation {
    #[default]
    None,
    Leveled,
    Steep,
}

impl Foundation {
    // Foundation that levels a tile with the given slope at its highest corner.
    #[inline]
    pub fn flattening(slope: Slope) -> Self {
        if slope.is_flat() {
            Self::None
        } else if slope.is_steep() {
            Self::Steep
        } else {
            Self::Leveled
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}
