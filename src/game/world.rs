use std::path::Path;

use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::{
    log,
    config::{GameConfigs, Landscape},
    save::{self, Load, LoadResult, Save, SaveResult, SaveState, SaveStateImpl},
    tile::TileMap,
    utils::coords::Cell,
};

use super::{
    Date,
    GameMode,
    company::{CompanyId, CompanyList},
    economy::Economy,
    object::{Object, ObjectRegistry, ObjectSpec, ObjectSpecs, ObjectType, cmd},
    station::StationList,
    town::TownList,
};

pub type RandomGenerator = Pcg64;

// ----------------------------------------------
// WorldSettings
// ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSettings {
    pub landscape: Landscape,
    pub freeform_edges: bool,
    pub autoslope: bool,
    pub magic_bulldozer: bool,
}

impl WorldSettings {
    pub fn from_configs(configs: &GameConfigs) -> Self {
        Self {
            landscape: configs.sim.landscape,
            freeform_edges: configs.sim.freeform_edges,
            autoslope: configs.construction.autoslope,
            magic_bulldozer: configs.cheats.magic_bulldozer,
        }
    }
}

// ----------------------------------------------
// World
// ----------------------------------------------

// The whole simulation state every operation runs against.
#[derive(Serialize, Deserialize)]
pub struct World {
    pub tile_map: TileMap,
    pub objects: ObjectRegistry,

    // Static catalog, not part of the saved state.
    #[serde(skip)]
    pub specs: ObjectSpecs,

    pub towns: TownList,
    pub companies: CompanyList,
    pub stations: StationList,
    pub economy: Economy,
    pub rng: RandomGenerator,
    pub date: Date,
    pub mode: GameMode,
    pub settings: WorldSettings,
}

impl World {
    pub fn new(configs: &GameConfigs) -> Self {
        Self {
            tile_map: TileMap::new(configs.sim.map_size),
            objects: ObjectRegistry::new(configs.sim.max_objects),
            specs: ObjectSpecs::default(),
            towns: TownList::default(),
            companies: CompanyList::default(),
            stations: StationList::default(),
            economy: Economy::new(configs.economy.prices.clone()),
            rng: RandomGenerator::seed_from_u64(configs.sim.random_seed),
            date: Date::from_year(1950),
            mode: GameMode::Normal,
            settings: WorldSettings::from_configs(configs),
        }
    }

    // Drops all objects and resets the tiles they stood on.
    pub fn reset_objects(&mut self) {
        let cells: Vec<Cell> = self.objects.iter()
            .flat_map(|object| object.location().iter())
            .collect();

        for cell in cells {
            let tile = self.tile_map.tile_mut(cell);
            let water_class = tile.water_class();
            tile.make_water_or_clear(water_class);
        }

        for company in self.companies.iter_mut() {
            company.location_of_hq = None;
        }

        self.objects.reset_all();
    }

    #[inline]
    pub fn spec(&self, object_type: ObjectType) -> &ObjectSpec {
        self.specs.get(object_type)
    }

    #[inline]
    pub fn object_at(&self, cell: Cell) -> Option<&Object> {
        self.objects.get_by_tile(&self.tile_map, cell)
    }

    // ----------------------
    // Periodic updates:
    // ----------------------

    // Monthly economy update and company rating, growing headquarters as scores improve.
    pub fn monthly_loop(&mut self) {
        self.economy.monthly_loop(&mut self.rng);

        let ids: Vec<CompanyId> = self.companies.iter().map(|company| company.id()).collect();
        for id in ids {
            let Some(company) = self.companies.try_get_mut(id) else {
                continue;
            };

            let score = company.update_rating_and_value();
            if let Some(hq) = company.location_of_hq {
                cmd::update_company_hq(self, hq, score);
            }
        }
    }

    // ----------------------
    // Save games:
    // ----------------------

    pub fn save_game<P>(&mut self, path: P) -> Result<(), String>
        where P: AsRef<Path>
    {
        let mut state = save::backend::new_json_save_state(false);
        save::save_instance(self, &mut state)?;
        state.write_file(path.as_ref()).map_err(|err| {
            let msg = format!("Failed to write save game {:?}: {err}", path.as_ref());
            log::error!(log::channel!("save"), "{msg}");
            msg
        })
    }

    pub fn load_game<P>(path: P) -> Result<Self, String>
        where P: AsRef<Path>
    {
        let mut state = save::backend::new_json_save_state(false);
        if let Err(err) = state.read_file(path.as_ref()) {
            let msg = format!("Failed to read save game {:?}: {err}", path.as_ref());
            log::error!(log::channel!("save"), "{msg}");
            return Err(msg);
        }

        let mut world: World = state.load_new_instance()?;
        world.post_load();
        Ok(world)
    }
}

// ----------------------------------------------
// Save/Load for World
// ----------------------------------------------

impl Save for World {
    fn save(&self, state: &mut SaveStateImpl) -> SaveResult {
        state.save(self)
    }
}

impl Load for World {
    fn load(&mut self, state: &SaveStateImpl) -> LoadResult {
        state.load(self)
    }

    fn post_load(&mut self) {
        let orphans = self.objects.recount(&self.tile_map);
        for id in orphans {
            log::error!(log::channel!("save"), "Object {id} is not referenced by its anchor tile.");
        }

        log::info!(log::channel!("save"), "Loaded world with {} objects.", self.objects.len());
    }
}
