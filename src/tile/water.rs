use strum::IntoEnumIterator;

use crate::{
    log,
    render::{TileDrawer, sprites},
    utils::coords::{Cell, DiagDirection},
    game::{
        GameMode,
        world::World,
        company::Owner,
        economy::ExpenseType,
        command::{CommandContext, CommandCost, CommandError, CommandResult, DoCommandFlags, TerrainError},
    },
};

use super::{
    TileKind,
    WaterClass,
    dispatch::{TileDesc, TileProcs},
    landscape::{do_clear_square, landscape_clear},
};

// ----------------------------------------------
// WaterTileProcs
// ----------------------------------------------

#[derive(Copy, Clone, Default)]
pub struct WaterTileProcs;

impl TileProcs for WaterTileProcs {
    fn draw_tile(&self, _world: &World, _cell: Cell, drawer: &mut dyn TileDrawer) {
        drawer.draw_ground_sprite(sprites::SPR_FLAT_WATER_TILE, None);
    }

    fn clear_tile(&self, world: &mut World, cell: Cell, ctx: &CommandContext) -> CommandResult {
        let Some(class) = world.tile_map.tile(cell).water_class() else {
            return Err(CommandError::UnsuitableTerrain(TerrainError::WaterInTheWay));
        };

        let price = match class {
            WaterClass::Sea => {
                // Only nature itself or the scenario editor may dry up the sea.
                if ctx.actor != Owner::Water && ctx.mode != GameMode::Editor {
                    return Err(CommandError::UnsuitableTerrain(TerrainError::WaterInTheWay));
                }
                0
            }
            WaterClass::Canal | WaterClass::River => world.economy.prices.clear_water,
        };

        if ctx.is_exec() {
            do_clear_square(world, cell);
        }

        Ok(CommandCost::with_cost(ExpenseType::Construction, price))
    }

    fn tile_desc(&self, world: &World, cell: Cell) -> TileDesc {
        let tile = world.tile_map.tile(cell);
        let name = match tile.water_class() {
            Some(WaterClass::Canal) => "Canal",
            Some(WaterClass::River) => "River",
            _ => "Sea",
        };
        TileDesc { name: name.into(), owner: tile.owner, build_date: None }
    }

    fn tile_loop(&self, world: &mut World, cell: Cell) {
        water_tile_loop(world, cell);
    }
}

// ----------------------------------------------
// Flooding
// ----------------------------------------------

// Periodic water tick: sea floods neighbouring flat land at sea level.
// Shared by water tiles and objects standing on water.
pub fn water_tile_loop(world: &mut World, cell: Cell) {
    if world.tile_map.tile(cell).water_class() != Some(WaterClass::Sea) {
        return;
    }

    for dir in DiagDirection::iter() {
        let (dx, dy) = dir.step();
        let target = cell.offset(dx, dy);

        if is_floodable(world, target) {
            flood_tile(world, target);
        }
    }
}

fn is_floodable(world: &World, cell: Cell) -> bool {
    let Some(tile) = world.tile_map.try_tile(cell) else {
        return false;
    };

    tile.max_z() == 0 && !tile.is(TileKind::Water) && !tile.is_on_water()
}

fn flood_tile(world: &mut World, cell: Cell) {
    // Water removes whatever stands in its way, ownership notwithstanding.
    let ctx = CommandContext::new(Owner::Water, world.mode, DoCommandFlags::EXEC);

    match landscape_clear(world, cell, &ctx) {
        Ok(_) => {
            world.tile_map.tile_mut(cell).make_water(WaterClass::Sea);
            log::verbose!(log::channel!("landscape"), "Tile {cell} flooded.");
        }
        Err(err) => {
            log::verbose!(log::channel!("landscape"), "Tile {cell} resisted flooding: {err}");
        }
    }
}
