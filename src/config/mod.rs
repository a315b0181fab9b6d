use std::path::Path;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum_macros::{Display, EnumIter};

use crate::{
    log,
    save::{self, SaveState},
    game::economy::Money,
    utils::Size,
};


// ----------------------------------------------
// Configs
// ----------------------------------------------

pub trait Configs {
    fn post_load(&mut self) {
    }

    // Saves current configs to file.
    fn save_file<P>(&self, path: P) -> bool
        where Self: Configs + Sized + Serialize,
              P: AsRef<Path>
    {
        let path = path.as_ref();
        let mut state = save::backend::new_json_save_state(true);

        if let Err(err) = state.save(self) {
            log::error!(log::channel!("config"), "Failed to save config file {path:?}: {err}");
            return false;
        }

        if let Err(err) = state.write_file(path) {
            log::error!(log::channel!("config"), "Failed to write config file {path:?}: {err}");
            return false;
        }

        true
    }

    // Either succeeds loading the config file or returns a default config.
    fn load_file<T, P>(path: P) -> T
        where T: Configs + Sized + Default + DeserializeOwned,
              P: AsRef<Path>
    {
        let path = path.as_ref();
        let mut state = save::backend::new_json_save_state(false);

        if let Err(err) = state.read_file(path) {
            log::error!(log::channel!("config"), "Failed to read config file from path {path:?}: {err}");
            return T::default();
        }

        let mut configs = match state.load_new_instance::<T>() {
            Ok(configs) => configs,
            Err(err) => {
                log::error!(log::channel!("config"), "Failed to deserialize config file from path {path:?}: {err}");
                return T::default();
            }
        };

        configs.post_load();
        configs
    }
}

// ----------------------------------------------
// GameConfigs
// ----------------------------------------------

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)] // Missing fields in the config file get defaults from GameConfigs::default().
pub struct GameConfigs {
    pub sim: SimConfigs,
    pub construction: ConstructionConfigs,
    pub economy: EconomyConfigs,
    pub cheats: CheatsConfigs,
    pub log: LogConfigs,
}

impl Configs for GameConfigs {
    fn post_load(&mut self) {
        if !self.sim.map_size.is_valid() {
            log::error!(log::channel!("config"), "Invalid map size {}, using default.", self.sim.map_size);
            self.sim.map_size = SimConfigs::default().map_size;
        }

        if self.sim.max_objects == 0 {
            log::error!(log::channel!("config"), "max_objects must be non-zero, using default.");
            self.sim.max_objects = SimConfigs::default().max_objects;
        }
    }
}

impl GameConfigs {
    pub fn load<P>(path: P) -> Self
        where P: AsRef<Path>
    {
        let configs: GameConfigs = Self::load_file(path);
        configs.apply_log_settings();
        configs
    }

    pub fn apply_log_settings(&self) {
        log::set_level(self.log.log_level);
        log::enable_source_location(self.log.enable_source_location);
        log::enable_tty_colors(self.log.enable_tty_colors);
    }
}

// ----------------------------------------------
// Sub Config Categories
// ----------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum Landscape {
    #[default]
    Temperate,
    Arctic,
    Tropic,
    Toyland,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfigs {
    pub random_seed: u64,
    pub map_size: Size,
    pub landscape: Landscape,
    pub freeform_edges: bool,
    pub max_objects: usize,
}

impl Default for SimConfigs {
    fn default() -> Self {
        Self { random_seed: 0xB1A5ED,
               map_size: Size::new(64, 64),
               landscape: Landscape::Temperate,
               freeform_edges: true,
               max_objects: 64000 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfigs {
    pub autoslope: bool,
}

impl Default for ConstructionConfigs {
    fn default() -> Self {
        Self { autoslope: true }
    }
}

// Base prices. Object costs are these multiplied by the per-type catalog multipliers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prices {
    pub build_object: Money,
    pub clear_object: Money,
    pub build_foundation: Money,
    pub clear_grass: Money,
    pub clear_rough: Money,
    pub clear_water: Money,
    pub build_statue: Money,
}

impl Default for Prices {
    fn default() -> Self {
        Self { build_object: 250,
               clear_object: 100,
               build_foundation: 250,
               clear_grass: 20,
               clear_rough: 40,
               clear_water: 500,
               build_statue: 15000 }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfigs {
    pub prices: Prices,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheatsConfigs {
    // Allows removal of objects the player would normally not be allowed to demolish.
    pub magic_bulldozer: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfigs {
    pub log_level: log::Level,
    pub enable_source_location: bool,
    pub enable_tty_colors: bool,
}

impl Default for LogConfigs {
    fn default() -> Self {
        Self { log_level: log::Level::Info,
               enable_source_location: false,
               enable_tty_colors: true }
    }
}
