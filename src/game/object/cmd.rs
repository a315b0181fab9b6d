use crate::{
    log,
    tile::{
        ObjectTile,
        ObjectTileState,
        TileKind,
        TileContents,
        landscape::{check_flat_land_except, landscape_clear},
    },
    utils::coords::{Cell, CellRange},
    game::{
        GameMode,
        world::World,
        cargo::CargoSource,
        company::Owner,
        economy::ExpenseType,
        command::{
            CommandContext,
            CommandCost,
            CommandError,
            CommandResult,
            DoCommandFlags,
            TerrainError,
            execute_command,
        },
        town::{STATUE_SEARCH_RADIUS, TownId},
    },
};

use super::{ObjectFlags, ObjectId, ObjectType, hq_level_for_score};

// ----------------------------------------------
// build_object
// ----------------------------------------------

// Places an object of `object_type` with its anchor at `anchor`. Does not validate
// the site; callers check legality first. `town` defaults to the nearest town.
pub fn build_object(world: &mut World,
                    object_type: ObjectType,
                    anchor: Cell,
                    owner: Owner,
                    town: Option<TownId>) -> Result<ObjectId, CommandError> {

    let spec = world.spec(object_type);
    let location = CellRange::from_origin_and_size(anchor, spec.width(), spec.height());
    debug_assert!(world.tile_map.is_range_within_bounds(location));

    let Some(town) = town.or_else(|| world.towns.closest_town(anchor)) else {
        panic!("Cannot build {object_type} at {anchor}: no town to attribute it to!");
    };

    let id = world.objects.allocate(location, town, world.date)?;

    let state = match object_type {
        ObjectType::Headquarters => ObjectTileState::Headquarters { level: 0 },
        _ => ObjectTileState::Animation { frame: 0 },
    };

    for cell in &location {
        let tile = world.tile_map.tile_mut(cell);
        let water_class = tile.water_class();
        tile.owner = owner;
        tile.contents = TileContents::Object(ObjectTile { object_type, id, water_class, state });
    }

    world.objects.increment_count(object_type);

    log::verbose!(log::channel!("objects"), "Built {object_type} {id} at {location} for {owner}.");
    Ok(id)
}

// ----------------------------------------------
// clear_object
// ----------------------------------------------

// Removes the object covering `cell` (any tile of its footprint).
pub fn clear_object(world: &mut World, cell: Cell, ctx: &CommandContext) -> CommandResult {
    let tile = world.tile_map.tile(cell);
    let Some(object_tile) = tile.object().copied() else {
        return Err(CommandError::GenericCommandFailure);
    };

    let owner = tile.owner;
    let object_type = object_tile.object_type;

    let Some(object) = world.objects.try_get(object_tile.id) else {
        panic!("Tile {cell} refers to object {} which is not alive!", object_tile.id);
    };

    let id = object.id();
    let location = object.location();
    let town = object.town();
    let flags = world.spec(object_type).flags;

    if !ctx.is_forced_removal() {
        check_removal_rights(world, ctx, object_type, owner, flags)?;
    }

    let spec = world.spec(object_type);
    let mut cost = CommandCost::with_cost(
        ExpenseType::Construction,
        spec.clear_cost(&world.economy.prices) * location.area() as i64);

    if flags.contains(ObjectFlags::CLEAR_INCOME) {
        cost.multiply(-1);
    }

    match object_type {
        ObjectType::Headquarters => {
            let company_id = owner.company();
            let company = company_id.and_then(|id| world.companies.try_get(id));

            // Relocating costs 1% of the company value.
            let value = company.map_or(0, |company| company.current_value());
            cost = CommandCost::with_cost(ExpenseType::Property, value / 100);

            if ctx.is_exec() {
                if let Some(company_id) = company_id {
                    if let Some(company) = world.companies.try_get_mut(company_id) {
                        company.location_of_hq = None;
                    }
                    world.stations.invalidate_all_from(CargoSource::Headquarters(company_id));
                }
            }
        }
        ObjectType::Statue => {
            if ctx.is_exec() {
                if let (Some(company_id), Some(town)) = (owner.company(), world.towns.try_get_mut(town)) {
                    town.set_statue(company_id, false);
                }
            }
        }
        _ => {}
    }

    if ctx.is_exec() {
        world.objects.decrement_count(object_type);

        for cur in &location {
            let tile = world.tile_map.tile_mut(cur);
            let water_class = tile.water_class();
            tile.make_water_or_clear(water_class);
        }

        if let Err(err) = world.objects.release(id) {
            panic!("Failed to release {object_type} at {location}: {err}");
        }

        log::verbose!(log::channel!("objects"), "Cleared {object_type} {id} at {location} by {}.", ctx.actor);
    }

    Ok(cost)
}

fn check_removal_rights(world: &World,
                        ctx: &CommandContext,
                        object_type: ObjectType,
                        owner: Owner,
                        flags: ObjectFlags) -> Result<(), CommandError> {

    let autoremove = flags.contains(ObjectFlags::AUTOREMOVE);
    let bulldozer = world.settings.magic_bulldozer;

    if !autoremove && ctx.has(DoCommandFlags::AUTO) {
        // No implicit removal by overbuilding.
        return Err(CommandError::ObstructedByExisting(object_type));
    }

    if ctx.mode == GameMode::Editor {
        return Ok(());
    }

    if owner == Owner::None {
        if !bulldozer {
            return Err(CommandError::PermissionDenied);
        }
    } else if owner != ctx.actor {
        return Err(CommandError::NotOwner);
    } else if !autoremove && !bulldozer {
        return Err(CommandError::PermissionDenied);
    }

    Ok(())
}

// Removes the whole object covering `cell`, ignoring ownership. Used when an owner goes away.
pub fn demolish_object(world: &mut World, cell: Cell) {
    let ctx = CommandContext::new(Owner::None, world.mode, DoCommandFlags::EXEC | DoCommandFlags::FORCE_REMOVAL);
    if let Err(err) = clear_object(world, cell, &ctx) {
        log::error!(log::channel!("objects"), "Failed to demolish object at {cell}: {err}");
    }
}

// ----------------------------------------------
// Build object command
// ----------------------------------------------

// Build command entry point. Queries first, then executes if `ctx` asks for it.
pub fn cmd_build_object(world: &mut World, ctx: &CommandContext, object_type: ObjectType, cell: Cell) -> CommandResult {
    execute_command(world, ctx, |world, ctx| build_object_pass(world, ctx, object_type, cell))
}

fn build_object_pass(world: &mut World, ctx: &CommandContext, object_type: ObjectType, cell: Cell) -> CommandResult {
    let spec = world.spec(object_type);
    if !spec.is_available(world.date) || spec.has_flags(ObjectFlags::TOWN_ACTION_ONLY) {
        return Err(CommandError::NotAvailable);
    }

    if spec.has_flags(ObjectFlags::ONLY_IN_SCENEDIT) &&
       (ctx.mode != GameMode::Editor || ctx.actor != Owner::None) {
        return Err(CommandError::RestrictedContext);
    }

    if spec.has_flags(ObjectFlags::ONLY_IN_GAME) &&
       (ctx.mode != GameMode::Normal || !ctx.actor.company().is_some_and(|id| world.companies.is_valid(id))) {
        return Err(CommandError::RestrictedContext);
    }

    if !world.objects.can_allocate() {
        return Err(CommandError::TooManyObjects);
    }

    if world.towns.is_empty() {
        return Err(CommandError::NoTownYet);
    }

    let area = CellRange::from_origin_and_size(cell, spec.width(), spec.height());
    let build_cost = spec.build_cost(&world.economy.prices) * area.area() as i64;

    let mut cost = CommandCost::new(ExpenseType::Property);

    // The old HQ goes first, so query and execution see the same land under a
    // new HQ that overlaps the old one.
    let mut old_hq_area = None;
    if object_type == ObjectType::Headquarters {
        let Some(company_id) = ctx.actor.company() else {
            return Err(CommandError::RestrictedContext);
        };

        let old_hq = world.companies.try_get(company_id).and_then(|company| company.location_of_hq);
        if let Some(old_hq) = old_hq {
            old_hq_area = world.object_at(old_hq).map(|object| object.location());

            let force = ctx.with(DoCommandFlags::FORCE_REMOVAL);
            let relocation = clear_object(world, old_hq, &force)
                .map_err(|_| CommandError::GenericCommandFailure)?;
            cost.add(relocation);
        }
    }

    if object_type == ObjectType::OwnedLand {
        // Owned land can be placed on any slope.
        cost.add(landscape_clear(world, cell, ctx)?);
    } else {
        cost.add(check_flat_land_except(world, area, ctx, old_hq_area)?);
    }

    let mut hq_score = 0;
    match object_type {
        ObjectType::Transmitter | ObjectType::Lighthouse => {
            if !world.tile_map.tile(cell).is_flat() {
                return Err(CommandError::UnsuitableTerrain(TerrainError::FlatLandRequired));
            }
        }
        ObjectType::OwnedLand => {
            let tile = world.tile_map.tile(cell);
            if tile.is(TileKind::Object) && tile.owner == ctx.actor && tile.is_object_of_type(ObjectType::OwnedLand) {
                return Err(CommandError::AlreadyOwned);
            }
        }
        ObjectType::Headquarters if ctx.is_exec() => {
            let company = ctx.actor.company().and_then(|id| world.companies.try_get_mut(id));
            if let Some(company) = company {
                hq_score = company.update_rating_and_value();
                company.location_of_hq = Some(cell);
            }
        }
        ObjectType::Headquarters | ObjectType::Statue => {}
    }

    if ctx.is_exec() {
        build_object(world, object_type, cell, ctx.actor, None)?;

        // A new HQ starts at the size its company deserves.
        if object_type == ObjectType::Headquarters {
            update_company_hq(world, cell, hq_score);
        }
    }

    cost.add_cost(build_cost);
    Ok(cost)
}

// ----------------------------------------------
// Company headquarters
// ----------------------------------------------

// Grows the HQ covering `cell` one level at a time until it matches `score`.
// Headquarters never shrink.
pub fn update_company_hq(world: &mut World, cell: Cell, score: u32) {
    let target = hq_level_for_score(score);

    let Some(location) = world.object_at(cell).map(|object| object.location()) else {
        return;
    };

    loop {
        let current = world.tile_map.tile(location.start).object().and_then(ObjectTile::hq_level);
        let Some(level) = current else {
            return;
        };

        if level >= target {
            break;
        }

        increase_hq_level(world, location);
        log::verbose!(log::channel!("objects"), "HQ at {} grew to level {}.", location.start, level + 1);
    }
}

fn increase_hq_level(world: &mut World, location: CellRange) {
    for cell in &location {
        if let Some(object) = world.tile_map.tile_mut(cell).object_mut() {
            if let ObjectTileState::Headquarters { level } = &mut object.state {
                *level += 1;
            }
        }
    }
}

// ----------------------------------------------
// Town statue action
// ----------------------------------------------

// Town authority action: builds a statue of the acting company somewhere near the town centre.
pub fn cmd_build_statue(world: &mut World, ctx: &CommandContext, town_id: TownId) -> CommandResult {
    execute_command(world, ctx, |world, ctx| build_statue_pass(world, ctx, town_id))
}

fn build_statue_pass(world: &mut World, ctx: &CommandContext, town_id: TownId) -> CommandResult {
    let Some(company_id) = ctx.actor.company().filter(|id| world.companies.is_valid(*id)) else {
        return Err(CommandError::RestrictedContext);
    };

    if ctx.mode != GameMode::Normal {
        return Err(CommandError::RestrictedContext);
    }

    let Some(town) = world.towns.try_get(town_id) else {
        return Err(CommandError::NoTownYet);
    };

    if town.has_statue(company_id) {
        return Err(CommandError::ObstructedByExisting(ObjectType::Statue));
    }

    if !world.objects.can_allocate() {
        return Err(CommandError::TooManyObjects);
    }

    let site = world.tile_map.circular_search(town.xy, STATUE_SEARCH_RADIUS, |tile_map, cell| {
        tile_map.tile(cell).is_bare_and_flat()
    });

    let Some(site) = site else {
        return Err(CommandError::UnsuitableTerrain(TerrainError::FlatLandRequired));
    };

    let mut cost = CommandCost::with_cost(ExpenseType::Other, world.economy.prices.build_statue);
    cost.add(landscape_clear(world, site, ctx)?);

    if ctx.is_exec() {
        build_object(world, ObjectType::Statue, site, Owner::Company(company_id), Some(town_id))?;
        if let Some(town) = world.towns.try_get_mut(town_id) {
            town.set_statue(company_id, true);
        }
    }

    Ok(cost)
}
