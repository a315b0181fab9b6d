#![allow(clippy::new_without_default)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::too_many_arguments)]

pub mod log;
pub mod utils;
pub mod save;
pub mod config;
pub mod tile;
pub mod render;
pub mod game;
