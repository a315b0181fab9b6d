use super::*;

use crate::{
    config::GameConfigs,
    render::{DisplayOptions, DrawCommand, DrawList, sprites},
    utils::{
        Size,
        coords::{Cell, CellRange},
    },
    game::{
        GameMode,
        command::{CommandContext, CommandError, DoCommandFlags, TerrainError},
        world::World,
    },
};

use super::dispatch::TileProcs;

fn new_world() -> World {
    let mut configs = GameConfigs::default();
    configs.sim.map_size = Size::new(16, 16);
    World::new(&configs)
}

fn editor_query() -> CommandContext {
    CommandContext::editor(DoCommandFlags::empty())
}

fn company_exec(world: &mut World) -> CommandContext {
    let company = world.companies.found("Acme", 2).unwrap();
    CommandContext::company(company, DoCommandFlags::EXEC)
}

// ----------------------------------------------
// Slopes
// ----------------------------------------------

#[test]
fn test_slope_heights() {
    assert!(Slope::FLAT.is_flat());
    assert_eq!(Slope::FLAT.max_z(), 0);

    assert!(!Slope::N.is_flat());
    assert!(!Slope::N.is_steep());
    assert_eq!(Slope::NE.max_z(), 1);

    let steep = Slope::STEEP | Slope::W | Slope::S | Slope::E;
    assert!(steep.is_steep());
    assert_eq!(steep.max_z(), 2);
    assert_eq!(steep.corners(), Slope::W | Slope::S | Slope::E);

    assert_eq!(Foundation::flattening(Slope::FLAT), Foundation::None);
    assert_eq!(Foundation::flattening(Slope::SW), Foundation::Leveled);
    assert_eq!(Foundation::flattening(steep), Foundation::Steep);
}

#[test]
fn test_tile_defaults() {
    let tile = Tile::default();
    assert!(tile.is(TileKind::Clear));
    assert!(tile.is_bare_and_flat());
    assert_eq!(tile.owner, Owner::None);
    assert_eq!(tile.water_class(), None);
    assert!(tile.object().is_none());

    let mut tile = Tile { height: 2, slope: Slope::N, ..Default::default() };
    assert_eq!(tile.max_z(), 3);

    tile.make_water(WaterClass::Sea);
    assert_eq!(tile.owner, Owner::Water);
    assert_eq!(tile.water_class(), Some(WaterClass::Sea));

    tile.make_water_or_clear(None);
    assert_eq!(tile.contents, TileContents::Clear { ground: ClearGround::Grass, density: 0 });
    assert_eq!(tile.owner, Owner::None);
}

// ----------------------------------------------
// TileMap
// ----------------------------------------------

#[test]
fn test_tile_map_bounds() {
    let tile_map = TileMap::new(Size::new(8, 4));

    assert_eq!((tile_map.max_x(), tile_map.max_y()), (7, 3));
    assert!(tile_map.is_cell_within_bounds(Cell::new(7, 3)));
    assert!(!tile_map.is_cell_within_bounds(Cell::new(8, 0)));
    assert!(!tile_map.is_cell_within_bounds(Cell::new(0, -1)));
    assert!(tile_map.try_tile(Cell::new(0, 4)).is_none());

    assert!(tile_map.is_range_within_bounds(CellRange::from_origin_and_size(Cell::new(6, 2), 2, 2)));
    assert!(!tile_map.is_range_within_bounds(CellRange::from_origin_and_size(Cell::new(7, 2), 2, 2)));

    assert!(tile_map.is_inner_cell(Cell::new(1, 1)));
    assert!(!tile_map.is_inner_cell(Cell::new(0, 1)));
    assert!(!tile_map.is_inner_cell(Cell::new(7, 2)));

    assert_eq!(tile_map.count_tiles(|tile| tile.is(TileKind::Clear)), 32);
}

#[test]
fn test_circular_search_order() {
    let tile_map = TileMap::new(Size::new(5, 5));

    let mut visited = Vec::new();
    let found = tile_map.circular_search(Cell::new(2, 2), 1, |_, cell| {
        visited.push(cell);
        false
    });

    assert!(found.is_none());
    assert_eq!(visited, vec![
        Cell::new(2, 2),
        Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1),
        Cell::new(3, 2), Cell::new(3, 3),
        Cell::new(2, 3), Cell::new(1, 3),
        Cell::new(1, 2),
    ]);
}

#[test]
fn test_circular_search_skips_outside_cells() {
    let mut tile_map = TileMap::new(Size::new(5, 5));

    let mut visited = Vec::new();
    tile_map.circular_search(Cell::new(0, 0), 1, |_, cell| {
        visited.push(cell);
        false
    });
    assert_eq!(visited, vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1), Cell::new(0, 1)]);

    tile_map.tile_mut(Cell::new(4, 4)).height = 3;
    let found = tile_map.circular_search(Cell::new(2, 2), 2, |tile_map, cell| tile_map.tile(cell).height == 3);
    assert_eq!(found, Some(Cell::new(4, 4)));

    let found = tile_map.circular_search(Cell::new(2, 2), 1, |tile_map, cell| tile_map.tile(cell).height == 3);
    assert_eq!(found, None);
}

// ----------------------------------------------
// check_flat_land
// ----------------------------------------------

#[test]
fn test_check_flat_land() {
    let mut world = new_world();
    let area = CellRange::from_origin_and_size(Cell::new(2, 2), 2, 2);

    let cost = landscape::check_flat_land(&mut world, area, &editor_query()).unwrap();
    assert_eq!(cost.cost(), 4 * 20);

    // Leveled with a foundation up to the common height.
    for cell in &area {
        world.tile_map.tile_mut(cell).height = 1;
    }
    let tile = world.tile_map.tile_mut(Cell::new(3, 3));
    tile.height = 0;
    tile.slope = Slope::SE;

    let cost = landscape::check_flat_land(&mut world, area, &editor_query()).unwrap();
    assert_eq!(cost.cost(), 4 * 20 + 250);

    // Probing leaves the grass alone.
    assert_eq!(world.tile_map.tile(Cell::new(2, 2)).contents,
               TileContents::Clear { ground: ClearGround::Grass, density: 3 });

    world.tile_map.tile_mut(Cell::new(2, 3)).height = 2;
    assert_eq!(landscape::check_flat_land(&mut world, area, &editor_query()),
               Err(CommandError::UnsuitableTerrain(TerrainError::FlatLandRequired)));
}

#[test]
fn test_check_flat_land_errors() {
    let mut world = new_world();

    world.tile_map.tile_mut(Cell::new(5, 5)).bridge_above = true;
    assert_eq!(landscape::check_flat_land(&mut world, CellRange::new(Cell::new(5, 5), Cell::new(6, 6)), &editor_query()),
               Err(CommandError::UnsuitableTerrain(TerrainError::BridgeInTheWay)));

    world.tile_map.tile_mut(Cell::new(8, 8)).slope = Slope::STEEP | Slope::N | Slope::E | Slope::S;
    assert_eq!(landscape::check_flat_land(&mut world, CellRange::new(Cell::new(8, 8), Cell::new(8, 8)), &editor_query()),
               Err(CommandError::UnsuitableTerrain(TerrainError::LandSlopedWrongDirection)));

    assert_eq!(landscape::check_flat_land(&mut world, CellRange::new(Cell::new(15, 15), Cell::new(16, 16)), &editor_query()),
               Err(CommandError::UnsuitableTerrain(TerrainError::OutOfMap)));

    world.tile_map.tile_mut(Cell::new(11, 10)).make_water(WaterClass::Sea);
    let mut ctx = company_exec(&mut world);
    ctx.flags = DoCommandFlags::empty();
    assert_eq!(landscape::check_flat_land(&mut world, CellRange::new(Cell::new(10, 10), Cell::new(11, 10)), &ctx),
               Err(CommandError::UnsuitableTerrain(TerrainError::WaterInTheWay)));
}

// ----------------------------------------------
// Clearing land and water
// ----------------------------------------------

#[test]
fn test_clear_land() {
    let mut world = new_world();
    let ctx = company_exec(&mut world);

    let cost = landscape::landscape_clear(&mut world, Cell::new(1, 1), &ctx).unwrap();
    assert_eq!(cost.cost(), 20);
    assert_eq!(world.tile_map.tile(Cell::new(1, 1)).contents,
               TileContents::Clear { ground: ClearGround::Grass, density: 0 });

    world.tile_map.tile_mut(Cell::new(2, 1)).make_clear(ClearGround::Rough, 3);
    let cost = landscape::landscape_clear(&mut world, Cell::new(2, 1), &ctx).unwrap();
    assert_eq!(cost.cost(), 40);

    assert_eq!(landscape::landscape_clear(&mut world, Cell::new(-1, 1), &ctx),
               Err(CommandError::UnsuitableTerrain(TerrainError::OutOfMap)));
}

#[test]
fn test_clear_water() {
    let mut world = new_world();
    let ctx = company_exec(&mut world);

    let canal = Cell::new(3, 3);
    world.tile_map.tile_mut(canal).make_water(WaterClass::Canal);
    let cost = landscape::cmd_landscape_clear(&mut world, &ctx, canal).unwrap();
    assert_eq!(cost.cost(), 500);
    assert!(world.tile_map.is_tile_kind(canal, TileKind::Clear));

    let sea = Cell::new(4, 4);
    world.tile_map.tile_mut(sea).make_water(WaterClass::Sea);
    assert_eq!(landscape::cmd_landscape_clear(&mut world, &ctx, sea),
               Err(CommandError::UnsuitableTerrain(TerrainError::WaterInTheWay)));
    assert!(world.tile_map.is_tile_kind(sea, TileKind::Water));

    let cost = landscape::cmd_landscape_clear(&mut world, &CommandContext::editor(DoCommandFlags::EXEC), sea).unwrap();
    assert_eq!(cost.cost(), 0);
    assert!(world.tile_map.is_tile_kind(sea, TileKind::Clear));
}

// ----------------------------------------------
// Flooding
// ----------------------------------------------

#[test]
fn test_sea_floods_low_land() {
    let mut world = new_world();
    let sea = Cell::new(5, 5);
    world.tile_map.tile_mut(sea).make_water(WaterClass::Sea);

    world.tile_map.tile_mut(Cell::new(5, 4)).height = 1;
    world.tile_map.tile_mut(Cell::new(5, 6)).slope = Slope::S;

    landscape::tile_loop(&mut world, sea);

    assert!(world.tile_map.is_tile_kind(Cell::new(4, 5), TileKind::Water));
    assert!(world.tile_map.is_tile_kind(Cell::new(6, 5), TileKind::Water));
    assert!(world.tile_map.is_tile_kind(Cell::new(5, 4), TileKind::Clear));
    assert!(world.tile_map.is_tile_kind(Cell::new(5, 6), TileKind::Clear));

    // Diagonal neighbours are not touched.
    assert!(world.tile_map.is_tile_kind(Cell::new(6, 6), TileKind::Clear));
}

#[test]
fn test_canal_does_not_flood() {
    let mut world = new_world();
    let canal = Cell::new(5, 5);
    world.tile_map.tile_mut(canal).make_water(WaterClass::Canal);

    landscape::run_tile_loop(&mut world);

    assert_eq!(world.tile_map.count_tiles(|tile| tile.is(TileKind::Water)), 1);
}

// ----------------------------------------------
// Dispatch
// ----------------------------------------------

#[test]
fn test_clear_and_water_dispatch() {
    let mut world = new_world();
    let water = Cell::new(3, 3);
    world.tile_map.tile_mut(water).make_water(WaterClass::River);
    world.tile_map.tile_mut(Cell::new(4, 3)).make_clear(ClearGround::Rough, 0);
    world.tile_map.tile_mut(Cell::new(5, 3)).make_clear(ClearGround::Grass, 0);

    let name = |world: &World, cell: Cell| dispatch::handler_at(world, cell).tile_desc(world, cell).name;
    assert_eq!(name(&world, water), "River");
    assert_eq!(name(&world, Cell::new(4, 3)), "Rough land");
    assert_eq!(name(&world, Cell::new(5, 3)), "Bare land");
    assert_eq!(name(&world, Cell::new(6, 3)), "Grass");

    let mut list = DrawList::new(DisplayOptions::empty());
    dispatch::handler_at(&world, water).draw_tile(&world, water, &mut list);
    dispatch::handler_at(&world, Cell::new(6, 3)).draw_tile(&world, Cell::new(6, 3), &mut list);
    assert_eq!(list.commands(), &[
        DrawCommand::Ground { sprite: sprites::SPR_FLAT_WATER_TILE, palette: None },
        DrawCommand::ClearLand { cell: Cell::new(6, 3), slope: Slope::FLAT, density: 3 },
    ]);

    assert_eq!(dispatch::handler_at(&world, water).click_tile(&world, water), None);
    assert_eq!(dispatch::handler_at(&world, water).slope_z(&world, water), (Slope::FLAT, 0));
}

#[test]
fn test_terraform_clear_land() {
    let mut world = new_world();
    let cell = Cell::new(7, 7);
    let ctx = CommandContext::new(Owner::None, GameMode::Editor, DoCommandFlags::EXEC);

    let cost = landscape::cmd_terraform_tile(&mut world, &ctx, cell, 2, Slope::NW).unwrap();
    assert_eq!(cost.cost(), 20);

    let tile = world.tile_map.tile(cell);
    assert_eq!((tile.height, tile.slope), (2, Slope::NW));
    assert_eq!(tile.max_z(), 3);
}
