use crate::{
    log,
    render::{TileDrawer, sprites},
    utils::coords::{Cell, CellRange},
    game::{
        world::World,
        company::{CompanyId, Owner},
        economy::ExpenseType,
        command::{CommandContext, CommandCost, CommandError, CommandResult, TerrainError, execute_command},
    },
};

use super::{
    ClearGround,
    Slope,
    TileContents,
    dispatch::{self, TileDesc, TileProcs},
};

// ----------------------------------------------
// Landscape entry points
// ----------------------------------------------

// Clears whatever occupies `cell`, dispatching on its tile kind.
pub fn landscape_clear(world: &mut World, cell: Cell, ctx: &CommandContext) -> CommandResult {
    if !world.tile_map.is_cell_within_bounds(cell) {
        return Err(CommandError::UnsuitableTerrain(TerrainError::OutOfMap));
    }
    dispatch::handler_at(world, cell).clear_tile(world, cell, ctx)
}

// Demolish command entry point.
pub fn cmd_landscape_clear(world: &mut World, ctx: &CommandContext, cell: Cell) -> CommandResult {
    execute_command(world, ctx, |world, ctx| landscape_clear(world, cell, ctx))
}

// Terraform entry point for a single tile.
pub fn cmd_terraform_tile(world: &mut World, ctx: &CommandContext, cell: Cell, z_new: u8, slope_new: Slope) -> CommandResult {
    execute_command(world, ctx, |world, ctx| terraform_tile(world, cell, ctx, z_new, slope_new))
}

// Turns the tile into bare clear land, keeping its height and slope.
pub fn do_clear_square(world: &mut World, cell: Cell) {
    world.tile_map.tile_mut(cell).make_clear(ClearGround::Grass, 0);
}

// Checks that every tile of `area` is buildable at one common height and clears it.
// Sloped tiles are leveled with a foundation, steep slopes are refused.
pub fn check_flat_land(world: &mut World, area: CellRange, ctx: &CommandContext) -> CommandResult {
    check_flat_land_except(world, area, ctx, None)
}

// Same as check_flat_land, but tiles inside `cleared` are taken as already cleared
// by the caller. Their shape is still checked.
pub fn check_flat_land_except(world: &mut World,
                              area: CellRange,
                              ctx: &CommandContext,
                              cleared: Option<CellRange>) -> CommandResult {
    if !world.tile_map.is_range_within_bounds(area) {
        return Err(CommandError::UnsuitableTerrain(TerrainError::OutOfMap));
    }

    let mut cost = CommandCost::new(ExpenseType::Construction);
    let mut allowed_z: Option<u8> = None;

    for cell in &area {
        let tile = world.tile_map.tile(cell);

        if tile.bridge_above {
            return Err(CommandError::UnsuitableTerrain(TerrainError::BridgeInTheWay));
        }

        if tile.slope.is_steep() {
            return Err(CommandError::UnsuitableTerrain(TerrainError::LandSlopedWrongDirection));
        }

        let flat_z = tile.max_z();
        match allowed_z {
            None => allowed_z = Some(flat_z),
            Some(z) if z != flat_z => {
                return Err(CommandError::UnsuitableTerrain(TerrainError::FlatLandRequired));
            }
            Some(_) => {}
        }

        if !tile.slope.is_flat() {
            cost.add_cost(world.economy.prices.build_foundation);
        }

        if !cleared.is_some_and(|cleared| cleared.contains(cell)) {
            cost.add(landscape_clear(world, cell, ctx)?);
        }
    }

    Ok(cost)
}

// Ownership transfer of a single tile, e.g. on company liquidation.
pub fn change_tile_owner(world: &mut World, cell: Cell, old_owner: Owner, new_owner: Option<CompanyId>) {
    dispatch::handler_at(world, cell).change_tile_owner(world, cell, old_owner, new_owner);
}

// Moves every tile owned by `old_owner` over to `new_owner` (or reverts it when None).
pub fn change_owner_everywhere(world: &mut World, old_owner: CompanyId, new_owner: Option<CompanyId>) {
    let old = Owner::Company(old_owner);
    for cell in &world.tile_map.full_range() {
        if world.tile_map.tile(cell).owner == old {
            change_tile_owner(world, cell, old, new_owner);
        }
    }
}

// Asks the occupant of `cell` whether the terrain may change under it.
// On success with EXEC the new height and slope are applied.
pub fn terraform_tile(world: &mut World, cell: Cell, ctx: &CommandContext, z_new: u8, slope_new: Slope) -> CommandResult {
    if !world.tile_map.is_cell_within_bounds(cell) {
        return Err(CommandError::UnsuitableTerrain(TerrainError::OutOfMap));
    }

    let cost = dispatch::handler_at(world, cell).terraform_tile(world, cell, ctx, z_new, slope_new)?;

    if ctx.is_exec() {
        let tile = world.tile_map.tile_mut(cell);
        tile.height = z_new;
        tile.slope = slope_new;
    }

    Ok(cost)
}

// Runs the periodic tick of a single tile.
pub fn tile_loop(world: &mut World, cell: Cell) {
    dispatch::handler_at(world, cell).tile_loop(world, cell);
}

// One full pass of the periodic tick over the whole map.
pub fn run_tile_loop(world: &mut World) {
    for cell in &world.tile_map.full_range() {
        tile_loop(world, cell);
    }
    log::verbose!(log::channel!("landscape"), "Tile loop pass done.");
}

// ----------------------------------------------
// ClearTileProcs
// ----------------------------------------------

#[derive(Copy, Clone, Default)]
pub struct ClearTileProcs;

impl TileProcs for ClearTileProcs {
    fn draw_tile(&self, world: &World, cell: Cell, drawer: &mut dyn TileDrawer) {
        let tile = world.tile_map.tile(cell);
        if let TileContents::Clear { ground, density } = tile.contents {
            match ground {
                ClearGround::Grass => drawer.draw_clear_land(cell, tile.slope, density),
                ClearGround::Rough => drawer.draw_ground_sprite(sprites::SPR_FLAT_ROUGH_LAND, None),
            }
        }
    }

    fn clear_tile(&self, world: &mut World, cell: Cell, ctx: &CommandContext) -> CommandResult {
        let prices = &world.economy.prices;
        let price = match world.tile_map.tile(cell).contents {
            TileContents::Clear { ground: ClearGround::Rough, .. } => prices.clear_rough,
            _ => prices.clear_grass,
        };

        if ctx.is_exec() {
            do_clear_square(world, cell);
        }

        Ok(CommandCost::with_cost(ExpenseType::Construction, price))
    }

    fn tile_desc(&self, world: &World, cell: Cell) -> TileDesc {
        let tile = world.tile_map.tile(cell);
        let name = match tile.contents {
            TileContents::Clear { ground: ClearGround::Rough, .. } => "Rough land",
            TileContents::Clear { density: 0, .. } => "Bare land",
            _ => "Grass",
        };
        TileDesc { name: name.into(), owner: tile.owner, build_date: None }
    }
}
