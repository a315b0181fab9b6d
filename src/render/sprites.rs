use serde::{Deserialize, Serialize};

// ----------------------------------------------
// SpriteId / PaletteId
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteId(pub u16);

impl PaletteId {
    const COMPANY_COLOUR_BASE: u16 = 775;

    // Recolour palette for one of the 16 company colours.
    #[inline]
    pub const fn company(colour: u8) -> Self {
        Self(Self::COMPANY_COLOUR_BASE + (colour & 0xF) as u16)
    }
}

impl std::fmt::Display for SpriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// Ground
pub const SPR_FLAT_BARE_LAND:          SpriteId = SpriteId(3924);
pub const SPR_FLAT_1_THIRD_GRASS_TILE: SpriteId = SpriteId(3943);
pub const SPR_FLAT_2_THIRD_GRASS_TILE: SpriteId = SpriteId(3962);
pub const SPR_FLAT_GRASS_TILE:         SpriteId = SpriteId(3981);
pub const SPR_FLAT_ROUGH_LAND:         SpriteId = SpriteId(4000);
pub const SPR_FLAT_WATER_TILE:         SpriteId = SpriteId(4061);
pub const SPR_CONCRETE_GROUND:         SpriteId = SpriteId(1420);

// Foundations
pub const SPR_FOUNDATION_LEVELED: SpriteId = SpriteId(990);
pub const SPR_FOUNDATION_STEEP:   SpriteId = SpriteId(3993);

// Objects
pub const SPR_TRANSMITTER:       SpriteId = SpriteId(2601);
pub const SPR_LIGHTHOUSE:        SpriteId = SpriteId(4077);
pub const SPR_STATUE_COMPANY:    SpriteId = SpriteId(1454);
pub const SPR_OWNED_LAND_BORDER: SpriteId = SpriteId(4082);
pub const SPR_BRIDGE_MIDDLE:     SpriteId = SpriteId(2559);

// Company headquarters, one base sprite per size level and footprint tile.
pub const SPR_HQ_BASE: u32 = 2602;

#[inline]
pub const fn hq_sprite(level: u32, part: u32) -> SpriteId {
    SpriteId(SPR_HQ_BASE + level * 4 + part)
}
