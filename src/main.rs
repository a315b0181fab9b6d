use object_sim::{
    log,
    config::GameConfigs,
    tile::{TileKind, WaterClass, landscape},
    utils::{self, coords::{Cell, CellRange}},
    game::{
        cargo::CargoType,
        command::{CommandContext, DoCommandFlags},
        company::{CompanyId, Owner},
        genworld::ProgressCounter,
        object::{ObjectType, cmd, generate},
        town::TownId,
        world::World,
    },
};

const CONFIGS_PATH: &str = "configs/game_configs.json";
const DEFAULT_SAVE_PATH: &str = "object_sim_save.json";

const SIM_MONTHS: u32 = 12;
const TILE_LOOPS_PER_MONTH: u32 = 4;

// ----------------------------------------------
// main()
// ----------------------------------------------

fn main() {
    let cwd = std::env::current_dir().unwrap();
    println!("The current directory is \"{}\".", cwd.display());

    let configs = GameConfigs::load(CONFIGS_PATH);
    log::info!(log::channel!("app"), "Object Sim v{}", utils::version());

    let mut world = World::new(&configs);
    shape_terrain(&mut world);

    let towns = found_towns(&mut world);
    let companies = found_companies(&mut world);

    let mut progress = ProgressCounter::new(10);
    let summary = generate::generate_objects(&mut world, &mut progress);
    log::info!(log::channel!("app"), "Generated {summary:?}.");

    for (company, town) in companies.iter().zip(towns.iter().cycle()) {
        settle_company(&mut world, *company, *town);
    }

    for month in 1..=SIM_MONTHS {
        for _ in 0..TILE_LOOPS_PER_MONTH {
            landscape::run_tile_loop(&mut world);
        }

        // Pretend the companies are doing well.
        for company in world.companies.iter_mut() {
            company.money += 250_000;
            company.performance.vehicles += 10;
            company.performance.stations += 5;
            company.performance.delivered_cargo += 3500;
        }

        world.monthly_loop();
        world.date = world.date.add_days(30);

        log::info!(log::channel!("app"), "Month {month} ({}) done.", world.date);
    }

    print_report(&world);

    let save_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SAVE_PATH.into());
    if world.save_game(&save_path).is_ok() {
        log::info!(log::channel!("app"), "Saved game to \"{save_path}\".");
    }
}

// ----------------------------------------------
// Map setup
// ----------------------------------------------

// Sea along the border, a coastal plain and a plateau in the middle.
fn shape_terrain(world: &mut World) {
    let max_x = world.tile_map.max_x();
    let max_y = world.tile_map.max_y();
    let center = Cell::new(max_x / 2, max_y / 2);

    for cell in &world.tile_map.full_range() {
        let tile = world.tile_map.tile_mut(cell);

        if cell.x <= 1 || cell.y <= 1 || cell.x >= max_x - 1 || cell.y >= max_y - 1 {
            tile.height = 0;
            tile.make_water(WaterClass::Sea);
            continue;
        }

        let distance = (cell.x - center.x).abs().max((cell.y - center.y).abs());
        tile.height = match distance {
            d if d < max_x / 6 => 5,
            d if d < max_x / 3 => 2,
            _ => 1,
        };
    }
}

fn found_towns(world: &mut World) -> Vec<TownId> {
    let max_x = world.tile_map.max_x();
    let max_y = world.tile_map.max_y();

    vec![
        world.towns.found("Fort Bridgewater", Cell::new(max_x / 4, max_y / 4)),
        world.towns.found("Little Ampton", Cell::new(max_x * 3 / 4, max_y / 4)),
        world.towns.found("Gunningville", Cell::new(max_x / 2, max_y * 3 / 4)),
    ]
}

fn found_companies(world: &mut World) -> Vec<CompanyId> {
    ["Northern Transport", "Coastal Freight"].iter()
        .enumerate()
        .filter_map(|(i, name)| world.companies.found(name, (i * 5) as u8))
        .collect()
}

// Headquarters and a station near `town`, a statue and a plot of land.
fn settle_company(world: &mut World, company: CompanyId, town: TownId) {
    let ctx = CommandContext::company(company, DoCommandFlags::EXEC);

    let Some(center) = world.towns.try_get(town).map(|town| town.xy) else {
        return;
    };

    let search_area = CellRange::new(center, center).expanded(6, world.tile_map.size());
    let hq = search_area.iter()
        .find(|cell| cmd::cmd_build_object(world, &ctx, ObjectType::Headquarters, *cell).is_ok());

    let Some(hq) = hq else {
        log::warn!(log::channel!("app"), "No room for the headquarters of {company}.");
        return;
    };

    world.stations.build("HQ Halt", Owner::Company(company), hq.offset(3, 0), 200);

    if let Err(err) = cmd::cmd_build_statue(world, &ctx, town) {
        log::warn!(log::channel!("app"), "{company} could not build a statue: {err}");
    }

    let plot = search_area.iter().find(|cell| {
        world.tile_map.is_tile_kind(*cell, TileKind::Clear) &&
        cmd::cmd_build_object(world, &ctx, ObjectType::OwnedLand, *cell).is_ok()
    });

    if plot.is_none() {
        log::warn!(log::channel!("app"), "{company} could not buy land.");
    }
}

fn print_report(world: &World) {
    for (object_type, spec) in world.specs.iter() {
        println!("{:<22} {}", spec.name, world.objects.count(object_type));
    }

    for company in world.companies.iter() {
        let hq_level = company.location_of_hq
            .and_then(|cell| world.tile_map.tile(cell).object().and_then(|tile| tile.hq_level()));
        println!("{}: score {}, value {}, HQ level {:?}",
                 company.name, company.score(), company.valuation(), hq_level);
    }

    for station in world.stations.iter() {
        println!("{}: {} passengers, {} mail waiting",
                 station.name,
                 station.waiting_amount(CargoType::Passengers),
                 station.waiting_amount(CargoType::Mail));
    }
}
