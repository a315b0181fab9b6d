use std::{path::Path, fs, io};
use enum_dispatch::enum_dispatch;
use serde::{Serialize, de::DeserializeOwned};

// ----------------------------------------------
// Save / Load Traits
// ----------------------------------------------

pub trait Save {
    fn pre_save(&mut self) {
    }

    fn save(&self, _state: &mut SaveStateImpl) -> SaveResult {
        Ok(())
    }

    fn post_save(&mut self) {
    }
}

pub trait Load {
    fn pre_load(&mut self) {
    }

    fn load(&mut self, _state: &SaveStateImpl) -> LoadResult {
        Ok(())
    }

    // Rebuild any derived runtime state not stored in the save.
    fn post_load(&mut self) {
    }
}

// ----------------------------------------------
// SaveState
// ----------------------------------------------

pub type SaveResult = Result<(), String>;
pub type LoadResult = Result<(), String>;

#[enum_dispatch(SaveStateImpl)]
pub trait SaveState {
    fn save<T>(&mut self, instance: &T) -> SaveResult
        where T: Serialize;

    fn load<T>(&self, instance: &mut T) -> LoadResult
        where T: DeserializeOwned;

    fn load_new_instance<T>(&self) -> Result<T, String>
        where T: DeserializeOwned;

    fn read_file<P>(&mut self, path: P) -> io::Result<()>
        where P: AsRef<Path>;

    fn write_file<P>(&self, path: P) -> io::Result<()>
        where P: AsRef<Path>;

    fn as_str(&self) -> &str;
    fn set_from_str(&mut self, data: &str);
}

#[enum_dispatch]
pub enum SaveStateImpl {
    Json(backend::JsonSaveState),
}

// ----------------------------------------------
// Helpers
// ----------------------------------------------

// Full save cycle for anything implementing Save: pre_save -> save -> post_save.
pub fn save_instance<T>(instance: &mut T, state: &mut SaveStateImpl) -> SaveResult
    where T: Save
{
    instance.pre_save();
    let result = instance.save(state);
    instance.post_save();
    result
}

// Full load cycle: pre_load -> load -> post_load (post_load only on success).
pub fn load_instance<T>(instance: &mut T, state: &SaveStateImpl) -> LoadResult
    where T: Load
{
    instance.pre_load();
    instance.load(state)?;
    instance.post_load();
    Ok(())
}

// ----------------------------------------------
// SaveState Implementations
// ----------------------------------------------

pub mod backend {
use super::*;

// ----------------------------------------------
// JsonSaveState
// ----------------------------------------------

pub struct JsonSaveState {
    pretty: bool,
    buffer: String,
}

impl JsonSaveState {
    pub fn new(pretty_print: bool) -> Self {
        Self {
            pretty: pretty_print,
            buffer: String::new(),
        }
    }
}

impl SaveState for JsonSaveState {
    fn save<T>(&mut self, instance: &T) -> SaveResult
        where T: Serialize
    {
        let result = {
            if self.pretty {
                serde_json::to_string_pretty(instance)
            } else {
                serde_json::to_string(instance)
            }
        };

        let json = match result {
            Ok(json) => json,
            Err(err)  => return Err(err.to_string()),
        };

        self.buffer = json;
        Ok(())
    }

    fn load<T>(&self, instance: &mut T) -> LoadResult
        where T: DeserializeOwned
    {
        // Load in place:
        *instance = self.load_new_instance()?;
        Ok(())
    }

    fn load_new_instance<T>(&self) -> Result<T, String>
        where T: DeserializeOwned
    {
        if self.buffer.is_empty() {
            return Err("JsonSaveState has no state to load!".into());
        }

        serde_json::from_str::<T>(&self.buffer).map_err(|err| err.to_string())
    }

    fn read_file<P>(&mut self, path: P) -> io::Result<()>
        where P: AsRef<Path>
    {
        self.buffer = fs::read_to_string(path)?;
        Ok(())
    }

    fn write_file<P>(&self, path: P) -> io::Result<()>
        where P: AsRef<Path>
    {
        fs::write(path, &self.buffer)
    }

    fn as_str(&self) -> &str {
        &self.buffer
    }

    fn set_from_str(&mut self, data: &str) {
        self.buffer = data.to_string();
    }
}

#[inline]
pub fn new_json_save_state(pretty_print: bool) -> SaveStateImpl {
    SaveStateImpl::from(JsonSaveState::new(pretty_print))
}
}
