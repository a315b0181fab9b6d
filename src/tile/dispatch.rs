use enum_dispatch::enum_dispatch;

use crate::{
    bitflags_with_display,
    render::TileDrawer,
    utils::coords::{Cell, DiagDirection},
    game::{
        Date,
        world::World,
        cargo::CargoAcceptance,
        command::{CommandContext, CommandResult},
        company::{CompanyId, Owner},
        object::procs::ObjectTileProcs,
    },
};

use super::{
    Foundation,
    Slope,
    TileKind,
    landscape::ClearTileProcs,
    water::WaterTileProcs,
};

// ----------------------------------------------
// Dispatch support types
// ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileDesc {
    pub name: String,
    pub owner: Owner,
    pub build_date: Option<Date>,
}

bitflags_with_display! {
    // Track bits a vehicle may use on a tile.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct TrackStatus: u16 {
        const X     = 1 << 0;
        const Y     = 1 << 1;
        const UPPER = 1 << 2;
        const LOWER = 1 << 3;
        const LEFT  = 1 << 4;
        const RIGHT = 1 << 5;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportType {
    Rail,
    Road,
    Water,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
    ShowCompany(CompanyId),
}

// ----------------------------------------------
// TileProcs
// ----------------------------------------------

// Per tile kind behavior invoked by generic callers (renderer, ticking,
// terraforming, ownership transfer, commands). Unimplemented hooks are no-ops.
#[enum_dispatch(TileHandler)]
pub trait TileProcs {
    fn draw_tile(&self, _world: &World, _cell: Cell, _drawer: &mut dyn TileDrawer) {
    }

    // Slope and base height the tile presents to anything standing on it.
    fn slope_z(&self, world: &World, cell: Cell) -> (Slope, u8) {
        let tile = world.tile_map.tile(cell);
        (tile.slope, tile.height)
    }

    fn foundation(&self, _world: &World, _cell: Cell, _slope: Slope) -> Foundation {
        Foundation::None
    }

    fn clear_tile(&self, world: &mut World, cell: Cell, ctx: &CommandContext) -> CommandResult;

    fn add_accepted_cargo(&self, _world: &World, _cell: Cell, _acceptance: &mut CargoAcceptance) {
    }

    fn tile_desc(&self, world: &World, cell: Cell) -> TileDesc;

    fn track_status(&self, _world: &World, _cell: Cell, _mode: TransportType, _side: Option<DiagDirection>) -> TrackStatus {
        TrackStatus::empty()
    }

    fn click_tile(&self, _world: &World, _cell: Cell) -> Option<ClickAction> {
        None
    }

    fn tile_loop(&self, _world: &mut World, _cell: Cell) {
    }

    fn change_tile_owner(&self, _world: &mut World, _cell: Cell, _old_owner: Owner, _new_owner: Option<CompanyId>) {
    }

    // Called when the terrain under a tile is about to change to `slope_new` at `z_new`.
    fn terraform_tile(&self, world: &mut World, cell: Cell, ctx: &CommandContext, _z_new: u8, _slope_new: Slope) -> CommandResult {
        self.clear_tile(world, cell, ctx)
    }
}

#[enum_dispatch]
pub enum TileHandler {
    ClearTileProcs,
    WaterTileProcs,
    ObjectTileProcs,
}

#[inline]
pub fn handler_for(kind: TileKind) -> TileHandler {
    match kind {
        TileKind::Clear  => ClearTileProcs.into(),
        TileKind::Water  => WaterTileProcs.into(),
        TileKind::Object => ObjectTileProcs.into(),
    }
}

#[inline]
pub fn handler_at(world: &World, cell: Cell) -> TileHandler {
    handler_for(world.tile_map.tile(cell).kind())
}
