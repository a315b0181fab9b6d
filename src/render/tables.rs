use strum::EnumCount;

use crate::game::object::{ObjectType, HQ_LEVEL_COUNT};

use super::sprites::*;

// ----------------------------------------------
// DrawTileSprites
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawTileSeq {
    pub sprite: SpriteId,
    pub offset: (i8, i8, i8),
    pub size: (u8, u8, u8),
}

// Ground sprite plus the optional building sprite drawn on top of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawTileSprites {
    pub ground: SpriteId,
    pub building: Option<DrawTileSeq>,
}

impl DrawTileSprites {
    const fn new(ground: SpriteId, sprite: SpriteId, offset: (i8, i8, i8), size: (u8, u8, u8)) -> Self {
        Self { ground, building: Some(DrawTileSeq { sprite, offset, size }) }
    }

    const fn ground_only(ground: SpriteId) -> Self {
        Self { ground, building: None }
    }
}

// ----------------------------------------------
// Object sprite tables
// ----------------------------------------------

// Indexed by ObjectType.
pub static OBJECT_SPRITES: [DrawTileSprites; ObjectType::COUNT] = [
    // Transmitter
    DrawTileSprites::new(SPR_FLAT_GRASS_TILE, SPR_TRANSMITTER, (7, 7, 0), (2, 2, 70)),
    // Lighthouse
    DrawTileSprites::new(SPR_FLAT_GRASS_TILE, SPR_LIGHTHOUSE, (4, 4, 0), (7, 7, 40)),
    // Statue
    DrawTileSprites::new(SPR_CONCRETE_GROUND, SPR_STATUE_COMPANY, (1, 1, 0), (14, 14, 25)),
    // Owned land
    DrawTileSprites::new(SPR_FLAT_GRASS_TILE, SPR_OWNED_LAND_BORDER, (0, 0, 0), (16, 16, 1)),
    // Headquarters (drawn from HQ_SPRITES)
    DrawTileSprites::ground_only(SPR_CONCRETE_GROUND),
];

pub const HQ_SPRITE_COUNT: usize = HQ_LEVEL_COUNT * 4;

// Indexed by `level << 2 | dy << 1 | dx`, where dx,dy is the tile offset in the 2x2 footprint.
pub static HQ_SPRITES: [DrawTileSprites; HQ_SPRITE_COUNT] = build_hq_sprites();

const fn build_hq_sprites() -> [DrawTileSprites; HQ_SPRITE_COUNT] {
    let mut table = [DrawTileSprites::ground_only(SPR_CONCRETE_GROUND); HQ_SPRITE_COUNT];
    let mut i = 0;
    while i < HQ_SPRITE_COUNT {
        let level = (i >> 2) as u32;
        let part = (i & 3) as u32;
        // Bigger headquarters grow taller.
        let height = 20 + (level as u8) * 12;
        table[i] = DrawTileSprites::new(SPR_CONCRETE_GROUND, hq_sprite(level, part), (0, 0, 0), (16, 16, height));
        i += 1;
    }
    table
}

#[inline]
pub fn object_sprites(object_type: ObjectType) -> &'static DrawTileSprites {
    &OBJECT_SPRITES[object_type as usize]
}

#[inline]
pub fn hq_sprites(level: u8, dx: i32, dy: i32) -> &'static DrawTileSprites {
    debug_assert!((level as usize) < HQ_LEVEL_COUNT);
    debug_assert!((0..2).contains(&dx) && (0..2).contains(&dy));
    &HQ_SPRITES[((level as usize) << 2) | ((dy as usize) << 1) | (dx as usize)]
}

// Ground sprites that stand for plain clear land of a given density.
#[inline]
pub fn clear_land_density(ground: SpriteId) -> Option<u8> {
    match ground {
        SPR_FLAT_BARE_LAND          => Some(0),
        SPR_FLAT_1_THIRD_GRASS_TILE => Some(1),
        SPR_FLAT_2_THIRD_GRASS_TILE => Some(2),
        SPR_FLAT_GRASS_TILE         => Some(3),
        _ => None,
    }
}
