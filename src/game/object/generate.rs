use rand::Rng;

use crate::{
    log,
    config::Landscape,
    tile::{TileKind, TileMap},
    utils::{
        Size,
        coords::{Axis, Cell, CellRange, DiagDirection},
    },
    game::{
        world::World,
        company::Owner,
        genworld::{GenWorldProgress, GenWorldStep},
    },
};

use super::{ObjectType, cmd::build_object};

// Towers only go on high ground, lighthouses only near sea level.
const TRANSMITTER_MIN_HEIGHT: u8 = 4;
const LIGHTHOUSE_MAX_HEIGHT: u8 = 2;

// Half size of the square around a transmitter kept free of other transmitters.
const TRANSMITTER_SPACING: i32 = 4;

const LIGHTHOUSE_ROUNDS: u32 = 1000;
pub(super) const LIGHTHOUSE_MAX_INLAND_STEPS: u32 = 19;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub transmitters: u32,
    pub lighthouses: u32,
}

// ----------------------------------------------
// Map size scaling
// ----------------------------------------------

// Scales `n` (given for a 256x256 map) by map area, rounding up.
#[inline]
pub fn scale_by_map_size(n: u32, size: Size) -> u32 {
    let scaled = (n as u64 * size.area() as u64).div_ceil(256 * 256);
    scaled as u32
}

// Scales `n` (given for a 256x256 map) by map circumference, rounding up.
#[inline]
pub fn scale_by_map_size_1d(n: u32, size: Size) -> u32 {
    let scaled = (n as u64 * (size.width + size.height) as u64).div_ceil(512);
    scaled as u32
}

// ----------------------------------------------
// generate_objects
// ----------------------------------------------

// Scatters transmitters over high flat land and lighthouses along the coast.
// Placing fewer objects than targeted is not an error.
pub fn generate_objects(world: &mut World, progress: &mut dyn GenWorldProgress) -> GenerationSummary {
    let mut summary = GenerationSummary::default();

    if world.settings.landscape == Landscape::Toyland {
        return summary;
    }

    if world.towns.is_empty() {
        log::warn!(log::channel!("genworld"), "No towns on the map, skipping object generation.");
        return summary;
    }

    let size = world.tile_map.size();
    let transmitters_to_build = scale_by_map_size(15, size);

    let mut lighthouses_to_build = {
        if world.settings.landscape == Landscape::Tropic {
            0
        } else {
            let n = (world.rng.random::<u32>() & 3) + 7;
            scale_by_map_size_1d(n, size)
        }
    };

    // Fewer lighthouses when little of the map border is sea.
    if world.settings.freeform_edges && lighthouses_to_build != 0 {
        let max_x = world.tile_map.max_x();
        let max_y = world.tile_map.max_y();
        let edge_tiles = (2 * max_y + 2 * max_x - 6).max(1) as u32;
        lighthouses_to_build = lighthouses_to_build * count_edge_water_tiles(&world.tile_map) / edge_tiles;
    }

    progress.set_total(GenWorldStep::Objects, transmitters_to_build + lighthouses_to_build);

    summary.transmitters = place_transmitters(world, progress, transmitters_to_build);
    summary.lighthouses = place_lighthouses(world, progress, lighthouses_to_build);

    if summary.transmitters < transmitters_to_build || summary.lighthouses < lighthouses_to_build {
        log::info!(log::channel!("genworld"),
                   "Placed {}/{} transmitters and {}/{} lighthouses.",
                   summary.transmitters, transmitters_to_build,
                   summary.lighthouses, lighthouses_to_build);
    } else {
        log::info!(log::channel!("genworld"),
                   "Placed {} transmitters and {} lighthouses.",
                   summary.transmitters, summary.lighthouses);
    }

    summary
}

// Water tiles on the inner ring just inside the map border.
fn count_edge_water_tiles(tile_map: &TileMap) -> u32 {
    let max_x = tile_map.max_x();
    let max_y = tile_map.max_y();
    let is_water = |x: i32, y: i32| tile_map.is_tile_kind(Cell::new(x, y), TileKind::Water) as u32;

    let mut count = 0;
    for x in 0..max_x {
        count += is_water(x, 1);
        count += is_water(x, max_y - 1);
    }
    for y in 1..(max_y - 1) {
        count += is_water(1, y);
        count += is_water(max_x - 1, y);
    }
    count
}

// ----------------------------------------------
// Transmitters
// ----------------------------------------------

fn place_transmitters(world: &mut World, progress: &mut dyn GenWorldProgress, target: u32) -> u32 {
    if target == 0 {
        return 0;
    }

    let size = world.tile_map.size();
    let mut placed = 0;

    for _ in 0..scale_by_map_size(1000, size) {
        let cell = Cell::new(world.rng.random_range(0..size.width),
                             world.rng.random_range(0..size.height));

        let tile = world.tile_map.tile(cell);
        if !tile.is_bare_and_flat() || tile.height < TRANSMITTER_MIN_HEIGHT {
            continue;
        }

        if is_transmitter_nearby(&world.tile_map, cell) {
            continue;
        }

        if build_object(world, ObjectType::Transmitter, cell, Owner::None, None).is_err() {
            log::warn!(log::channel!("genworld"), "Object pool exhausted while placing transmitters.");
            break;
        }

        progress.step_done(GenWorldStep::Objects);
        placed += 1;
        if placed == target {
            break;
        }
    }

    placed
}

// Any transmitter in the 9x9 square centred on `cell`, clipped to the map.
pub(super) fn is_transmitter_nearby(tile_map: &TileMap, cell: Cell) -> bool {
    let window = CellRange::new(cell, cell).expanded(TRANSMITTER_SPACING, tile_map.size());
    window.iter().any(|cur| tile_map.tile(cur).is_object_of_type(ObjectType::Transmitter))
}

// ----------------------------------------------
// Lighthouses
// ----------------------------------------------

fn place_lighthouses(world: &mut World, progress: &mut dyn GenWorldProgress, target: u32) -> u32 {
    let max_x = world.tile_map.max_x();
    let max_y = world.tile_map.max_y();
    if target == 0 || max_x < 2 || max_y < 2 {
        return 0;
    }

    let mut placed = 0;

    for _ in 0..LIGHTHOUSE_ROUNDS {
        if placed == target {
            break;
        }

        let r: u32 = world.rng.random();
        let dir = pick_coast_direction(r, max_x, max_y);
        let start = coast_start_cell(dir, r, max_x, max_y);

        // The map border there must be sea.
        if !world.tile_map.is_tile_kind(start, TileKind::Water) {
            continue;
        }

        let Some(site) = find_lighthouse_site(&world.tile_map, start, dir) else {
            continue;
        };

        if build_object(world, ObjectType::Lighthouse, site, Owner::None, None).is_err() {
            log::warn!(log::channel!("genworld"), "Object pool exhausted while placing lighthouses.");
            break;
        }

        progress.step_done(GenWorldStep::Objects);
        placed += 1;
    }

    placed
}

// Picks a map edge weighted by its length, so lighthouses spread evenly along the perimeter.
pub(super) fn pick_coast_direction(r: u32, max_x: i32, max_y: i32) -> DiagDirection {
    let max_x = max_x as i64;
    let max_y = max_y as i64;

    let mut perimeter = ((r >> 16) as i64 % (2 * (max_x + max_y))) - max_y;
    let mut dir = Some(DiagDirection::NE);

    while perimeter > 0 {
        let Some(cur) = dir else {
            break;
        };
        perimeter -= match cur.axis() {
            Axis::X => max_x,
            Axis::Y => max_y,
        };
        dir = cur.next();
    }

    dir.unwrap_or(DiagDirection::NE)
}

pub(super) fn coast_start_cell(dir: DiagDirection, r: u32, max_x: i32, max_y: i32) -> Cell {
    let along_x = (r % max_x as u32) as i32;
    let along_y = (r % max_y as u32) as i32;
    match dir {
        DiagDirection::NE => Cell::new(max_x - 1, along_y),
        DiagDirection::SE => Cell::new(along_x, 1),
        DiagDirection::SW => Cell::new(1, along_y),
        DiagDirection::NW => Cell::new(along_x, max_y - 1),
    }
}

// Walks inland from `start` looking for bare, flat, low land.
pub(super) fn find_lighthouse_site(tile_map: &TileMap, start: Cell, dir: DiagDirection) -> Option<Cell> {
    let (dx, dy) = dir.step();
    let mut cell = start;

    for _ in 0..LIGHTHOUSE_MAX_INLAND_STEPS {
        let tile = tile_map.tile(cell);
        if tile.is_bare_and_flat() && tile.height <= LIGHTHOUSE_MAX_HEIGHT {
            return Some(cell);
        }

        cell = cell.offset(dx, dy);
        if !tile_map.is_cell_within_bounds(cell) {
            return None;
        }
    }

    None
}
