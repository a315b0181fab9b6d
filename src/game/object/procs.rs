use rand::Rng;

use crate::{
    render::{
        DisplayOptions,
        SortableSprite,
        TileDrawer,
        tables,
    },
    tile::{
        Foundation,
        Slope,
        dispatch::{ClickAction, TileDesc, TileProcs},
        landscape::landscape_clear,
        water::water_tile_loop,
    },
    utils::coords::{Cell, CellRange},
    game::{
        world::World,
        cargo::{CargoAcceptance, CargoSource, CargoType},
        command::{CommandContext, CommandCost, CommandResult},
        company::{CompanyId, Owner},
        economy::ExpenseType,
        station::StationFinder,
    },
};

use super::{
    ObjectFlags,
    ObjectType,
    cmd::{clear_object, demolish_object},
};

// ----------------------------------------------
// ObjectTileProcs
// ----------------------------------------------

#[derive(Copy, Clone, Default)]
pub struct ObjectTileProcs;

impl TileProcs for ObjectTileProcs {
    fn draw_tile(&self, world: &World, cell: Cell, drawer: &mut dyn TileDrawer) {
        let tile = world.tile_map.tile(cell);
        let Some(object_tile) = tile.object() else {
            return;
        };

        let spec = world.spec(object_tile.object_type);

        // Types that no longer exist are drawn as transmitters.
        let object_type = if spec.enabled { object_tile.object_type } else { ObjectType::Transmitter };

        if !spec.has_flags(ObjectFlags::HAS_NO_FOUNDATION) {
            drawer.draw_foundation(cell, self.foundation(world, cell, tile.slope));
        }

        let palette = world.companies.palette_for(tile.owner);

        let sprites = match (object_type, object_tile.hq_level()) {
            (ObjectType::Headquarters, Some(level)) => {
                let anchor = world.object_at(cell).map_or(cell, |object| object.anchor());
                tables::hq_sprites(level, cell.x - anchor.x, cell.y - anchor.y)
            }
            _ => tables::object_sprites(object_type),
        };

        match tables::clear_land_density(sprites.ground) {
            // Without a foundation a flat ground sprite would not match sloped land.
            Some(density) if spec.has_flags(ObjectFlags::HAS_NO_FOUNDATION) => {
                drawer.draw_clear_land(cell, tile.slope, density);
            }
            _ => drawer.draw_ground_sprite(sprites.ground, palette),
        }

        let options = drawer.display_options();
        if !options.contains(DisplayOptions::INVISIBLE_STRUCTURES) {
            if let Some(seq) = sprites.building {
                let (_, z) = self.slope_z(world, cell);
                drawer.add_sortable_sprite(SortableSprite {
                    sprite: seq.sprite,
                    palette,
                    cell,
                    offset: seq.offset,
                    size: seq.size,
                    z,
                    transparent: options.contains(DisplayOptions::TRANSPARENT_STRUCTURES),
                });
            }
        }

        if spec.has_flags(ObjectFlags::ALLOW_UNDER_BRIDGE) && tile.bridge_above {
            drawer.draw_bridge_middle(cell);
        }
    }

    fn slope_z(&self, world: &World, cell: Cell) -> (Slope, u8) {
        let tile = world.tile_map.tile(cell);
        if tile.is_object_of_type(ObjectType::OwnedLand) {
            (tile.slope, tile.height)
        } else {
            (Slope::FLAT, tile.max_z())
        }
    }

    fn foundation(&self, world: &World, cell: Cell, slope: Slope) -> Foundation {
        if world.tile_map.tile(cell).is_object_of_type(ObjectType::OwnedLand) {
            Foundation::None
        } else {
            Foundation::flattening(slope)
        }
    }

    fn clear_tile(&self, world: &mut World, cell: Cell, ctx: &CommandContext) -> CommandResult {
        clear_object(world, cell, ctx)
    }

    fn add_accepted_cargo(&self, world: &World, cell: Cell, acceptance: &mut CargoAcceptance) {
        let Some(level) = hq_level_at(world, cell) else {
            return;
        };

        // Level in 1..=5. The building covers four tiles, each accepts a share.
        let level = level as u32 + 1;

        acceptance.add(CargoType::Passengers, level.max(1));
        acceptance.set_always_accepted(CargoType::Passengers);

        acceptance.add(CargoType::Mail, (level / 2).max(1));
        acceptance.set_always_accepted(CargoType::Mail);
    }

    fn tile_desc(&self, world: &World, cell: Cell) -> TileDesc {
        let tile = world.tile_map.tile(cell);
        let name = tile.object()
            .map_or("Object", |object_tile| world.spec(object_tile.object_type).name);

        TileDesc {
            name: name.into(),
            owner: tile.owner,
            build_date: world.object_at(cell).map(|object| object.build_date()),
        }
    }

    fn click_tile(&self, world: &World, cell: Cell) -> Option<ClickAction> {
        hq_level_at(world, cell)?;
        world.tile_map.tile(cell).owner.company().map(ClickAction::ShowCompany)
    }

    fn tile_loop(&self, world: &mut World, cell: Cell) {
        if world.tile_map.tile(cell).is_on_water() {
            water_tile_loop(world, cell);
        }

        // Flooding may have removed the object.
        let Some(level) = hq_level_at(world, cell) else {
            return;
        };

        let Some(company) = world.tile_map.tile(cell).owner.company() else {
            return;
        };

        produce_hq_cargo(world, cell, company, level as u32 + 1);
    }

    fn change_tile_owner(&self, world: &mut World, cell: Cell, old_owner: Owner, new_owner: Option<CompanyId>) {
        let tile = world.tile_map.tile(cell);
        if tile.owner != old_owner {
            return;
        }

        let Some(object_type) = tile.object().map(|object_tile| object_tile.object_type) else {
            return;
        };

        match (object_type, new_owner) {
            (ObjectType::OwnedLand, Some(new_owner)) => {
                world.tile_map.tile_mut(cell).owner = Owner::Company(new_owner);
            }
            (ObjectType::Statue, _) => transfer_statue(world, cell, old_owner, new_owner),
            _ => demolish_object(world, cell),
        }
    }

    fn terraform_tile(&self, world: &mut World, cell: Cell, ctx: &CommandContext, z_new: u8, slope_new: Slope) -> CommandResult {
        let tile = world.tile_map.tile(cell);
        let Some(object_type) = tile.object().map(|object_tile| object_tile.object_type) else {
            return landscape_clear(world, cell, ctx);
        };

        match object_type {
            ObjectType::OwnedLand => {
                // Owned land stays owned while its owner reshapes it.
                if tile.owner == ctx.actor {
                    return Ok(CommandCost::new(ExpenseType::Construction));
                }
            }
            ObjectType::Transmitter | ObjectType::Lighthouse => {}
            _ => {
                if world.settings.autoslope &&
                   !slope_new.is_steep() &&
                   z_new + slope_new.max_z() == tile.max_z() {
                    return Ok(CommandCost::with_cost(ExpenseType::Construction, world.economy.prices.build_foundation));
                }
            }
        }

        landscape_clear(world, cell, ctx)
    }
}

// ----------------------------------------------
// Helpers
// ----------------------------------------------

#[inline]
fn hq_level_at(world: &World, cell: Cell) -> Option<u8> {
    world.tile_map.tile(cell).object().and_then(|object_tile| object_tile.hq_level())
}

// HQ tiles randomly hand passengers and mail to nearby stations.
// Production grows with the HQ level and halves during a recession.
fn produce_hq_cargo(world: &mut World, cell: Cell, company: CompanyId, level: u32) {
    debug_assert!(level >= 1 && level < 6);

    let area = CellRange::from_origin_and_size(cell, 2, 2);
    let candidates = StationFinder::new(area, world.tile_map.size()).stations(&world.stations);

    let r: u32 = world.rng.random();
    let recession = world.economy.is_recession();
    let source = CargoSource::Headquarters(company);

    let passengers = r & 0xFF;
    if passengers < 256 / 4 / (6 - level) {
        let amount = hq_cargo_amount(passengers, recession);
        world.stations.move_goods_to_station(CargoType::Passengers, amount, source, &candidates);
    }

    let mail = (r >> 8) & 0xFF;
    if mail < 196 / 4 / (6 - level) {
        let amount = hq_cargo_amount(mail, recession);
        world.stations.move_goods_to_station(CargoType::Mail, amount, source, &candidates);
    }
}

#[inline]
fn hq_cargo_amount(random_bits: u32, recession: bool) -> u32 {
    let amount = random_bits / 8 / 4 + 1;
    if recession { (amount + 1) >> 1 } else { amount }
}

fn transfer_statue(world: &mut World, cell: Cell, old_owner: Owner, new_owner: Option<CompanyId>) {
    let Some(town_id) = world.object_at(cell).map(|object| object.town()) else {
        return;
    };

    let Some(town) = world.towns.try_get_mut(town_id) else {
        return;
    };

    if let Some(old_owner) = old_owner.company() {
        town.set_statue(old_owner, false);
    }

    match new_owner {
        Some(new_owner) if !town.has_statue(new_owner) => {
            town.set_statue(new_owner, true);
            world.tile_map.tile_mut(cell).owner = Owner::Company(new_owner);
        }
        _ => demolish_object(world, cell),
    }
}
